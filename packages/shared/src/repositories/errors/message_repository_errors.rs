#[derive(Debug)]
pub enum MessageRepositoryError {
    Serialization(String),
    DynamoDb(String),
}

impl std::fmt::Display for MessageRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRepositoryError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            MessageRepositoryError::DynamoDb(msg) => write!(f, "DynamoDB error: {}", msg),
        }
    }
}

impl std::error::Error for MessageRepositoryError {}
