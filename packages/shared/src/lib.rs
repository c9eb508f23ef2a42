pub mod models;
pub mod registries;
pub mod repositories;
pub mod services;
