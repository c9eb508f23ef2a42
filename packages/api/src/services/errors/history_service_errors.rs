use std::fmt;

#[derive(Debug)]
pub enum HistoryServiceError {
    ValidationError(String),
    RepositoryError(String),
}

impl fmt::Display for HistoryServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HistoryServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            HistoryServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for HistoryServiceError {}
