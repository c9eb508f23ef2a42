pub mod connection;
pub mod events;
pub mod message;
pub mod responses;
pub mod waiting;
