use crate::repositories::errors::message_repository_errors::MessageRepositoryError;

#[derive(Debug)]
pub enum MessageServiceError {
    ValidationError(String),
    NoActiveChat,
    PersistenceFailed(String),
    Timeout,
}

impl std::fmt::Display for MessageServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            MessageServiceError::NoActiveChat => {
                write!(f, "Cannot send message - no active chat found")
            }
            MessageServiceError::PersistenceFailed(msg) => {
                write!(f, "Message store error: {}", msg)
            }
            MessageServiceError::Timeout => write!(f, "Message store timed out"),
        }
    }
}

impl std::error::Error for MessageServiceError {}

impl From<MessageRepositoryError> for MessageServiceError {
    fn from(error: MessageRepositoryError) -> Self {
        MessageServiceError::PersistenceFailed(error.to_string())
    }
}
