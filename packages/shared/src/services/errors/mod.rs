pub mod message_service_errors;
pub mod session_service_errors;
