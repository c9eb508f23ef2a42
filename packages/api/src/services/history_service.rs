use std::sync::Arc;

use shared::models::message::ChatMessage;
use shared::repositories::message_repository::MessageRepository;

use crate::services::errors::history_service_errors::HistoryServiceError;

/// Read path over the message store. Never touches the live registries.
#[derive(Clone)]
pub struct HistoryService {
    repository: Arc<dyn MessageRepository>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        HistoryService { repository }
    }

    /// The full conversation between two users, ordered by sent_at ascending.
    pub async fn get_history(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Vec<ChatMessage>, HistoryServiceError> {
        if user_a.is_empty() || user_b.is_empty() {
            return Err(HistoryServiceError::ValidationError(
                "User IDs cannot be empty".to_string(),
            ));
        }

        self.repository
            .query_history(user_a, user_b)
            .await
            .map_err(|e| HistoryServiceError::RepositoryError(e.to_string()))
    }
}
