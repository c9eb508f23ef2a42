pub mod message_repository_errors;
