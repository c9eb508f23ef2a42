use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use crate::models::events::ClientEvent;
use crate::models::message::ChatMessage;
use crate::registries::chat_registry::ActiveChatRegistry;
use crate::registries::connection_registry::ConnectionRegistry;
use crate::repositories::client_gateway::ClientGateway;
use crate::repositories::message_repository::MessageRepository;
use crate::services::errors::message_service_errors::MessageServiceError;

const DEFAULT_PERSIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Relays a message between the two sides of an active chat: validates the
/// pairing, persists through the store, then pushes the frame to whoever is
/// still connected.
#[derive(Clone)]
pub struct MessageService {
    chat_registry: Arc<ActiveChatRegistry>,
    connections: Arc<ConnectionRegistry>,
    repository: Arc<dyn MessageRepository>,
    gateway: Arc<dyn ClientGateway>,
    persist_timeout: Duration,
}

impl MessageService {
    pub fn new(
        chat_registry: Arc<ActiveChatRegistry>,
        connections: Arc<ConnectionRegistry>,
        repository: Arc<dyn MessageRepository>,
        gateway: Arc<dyn ClientGateway>,
    ) -> Self {
        MessageService {
            chat_registry,
            connections,
            repository,
            gateway,
            persist_timeout: DEFAULT_PERSIST_TIMEOUT,
        }
    }

    pub fn with_persist_timeout(mut self, persist_timeout: Duration) -> Self {
        self.persist_timeout = persist_timeout;
        self
    }

    pub async fn send_message(
        &self,
        sender_id: &str,
        content: &str,
    ) -> Result<ChatMessage, MessageServiceError> {
        if sender_id.is_empty() {
            return Err(MessageServiceError::ValidationError(
                "Sender ID cannot be empty".to_string(),
            ));
        }
        if content.is_empty() {
            return Err(MessageServiceError::ValidationError(
                "Message content cannot be empty".to_string(),
            ));
        }

        let Some(receiver_id) = self.chat_registry.partner_of(sender_id) else {
            return Err(MessageServiceError::NoActiveChat);
        };

        let message = ChatMessage::new(sender_id, &receiver_id, content);

        // the store is the only slow collaborator; never hang the event on it
        match timeout(self.persist_timeout, self.repository.append_message(&message)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(MessageServiceError::from(e)),
            Err(_) => {
                warn!(
                    "Message store append timed out after {:?}",
                    self.persist_timeout
                );
                return Err(MessageServiceError::Timeout);
            }
        }

        let event = ClientEvent::receive_message(&message);

        if let Some(connection_id) = self.connections.connection_for_user(sender_id) {
            self.deliver(&connection_id, sender_id, &event).await;
        }

        match self.connections.connection_for_user(&receiver_id) {
            Some(connection_id) => self.deliver(&connection_id, &receiver_id, &event).await,
            None => {
                // partner raced a disconnect; their pairing is the disconnect
                // path's to clean up
                info!("Partner {} is not connected, skipping delivery", receiver_id);
            }
        }

        Ok(message)
    }

    async fn deliver(&self, connection_id: &str, user_id: &str, event: &ClientEvent) {
        if let Err(e) = self.gateway.post_to_connection(connection_id, event).await {
            warn!("Failed to deliver message to {}: {}", user_id, e);
        }
    }
}
