pub mod errors;
pub mod matching_service;
pub mod message_service;
pub mod session_service;
