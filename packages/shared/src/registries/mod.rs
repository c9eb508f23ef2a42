pub mod chat_registry;
pub mod connection_registry;
pub mod waiting_pool;
