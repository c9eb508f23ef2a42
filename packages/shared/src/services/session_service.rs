use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::connection::ConnectionEntry;
use crate::models::events::ClientEvent;
use crate::registries::connection_registry::ConnectionRegistry;
use crate::repositories::client_gateway::ClientGateway;
use crate::services::errors::session_service_errors::SessionServiceError;
use crate::services::matching_service::{MatchOutcome, MatchingService};

/// Orchestrates the connect/disconnect lifecycle: registers the transport
/// connection, drives the matching engine and pushes the outcome back out.
#[derive(Clone)]
pub struct SessionService {
    connections: Arc<ConnectionRegistry>,
    matching: Arc<MatchingService>,
    gateway: Arc<dyn ClientGateway>,
}

impl SessionService {
    pub fn new(
        connections: Arc<ConnectionRegistry>,
        matching: Arc<MatchingService>,
        gateway: Arc<dyn ClientGateway>,
    ) -> Self {
        SessionService {
            connections,
            matching,
            gateway,
        }
    }

    /// Registers the connection and tries to find a partner. Both sides of a
    /// new pair are notified; an enqueued user waits silently.
    pub async fn connect(
        &self,
        user_id: &str,
        interests: HashSet<String>,
        connection_id: &str,
    ) -> Result<(), SessionServiceError> {
        if user_id.is_empty() || connection_id.is_empty() {
            return Err(SessionServiceError::ValidationError(
                "User ID and connection ID cannot be empty".to_string(),
            ));
        }

        // single-session policy: a second connect for the same user displaces
        // the earlier connection, partner notification included
        if let Some(stale) = self.connections.connection_for_user(user_id) {
            if stale != connection_id {
                info!("User {} reconnected, displacing connection {}", user_id, stale);
                self.disconnect(&stale).await;
            }
        }

        self.connections
            .register(ConnectionEntry::new(connection_id, user_id, interests.clone()));
        info!("Registered connection {} for user {}", connection_id, user_id);

        match self.matching.match_or_enqueue(user_id, connection_id, &interests) {
            MatchOutcome::Paired {
                partner_id,
                partner_connection_id,
            } => {
                self.notify(connection_id, &ClientEvent::matched(&partner_id))
                    .await;
                self.notify(&partner_connection_id, &ClientEvent::matched(user_id))
                    .await;
            }
            MatchOutcome::Enqueued => {
                debug!("User {} is waiting for a partner", user_id);
            }
        }

        Ok(())
    }

    /// Removes the connection and whatever matching state its user held.
    /// Unknown connection ids are ignored: disconnects arrive from transport
    /// errors as well as client requests, and may repeat.
    pub async fn disconnect(&self, connection_id: &str) {
        let Some(entry) = self.connections.unregister(connection_id) else {
            debug!("Ignoring disconnect for unknown connection {}", connection_id);
            return;
        };

        if let Some(partner_id) = self.matching.withdraw(&entry.user_id) {
            info!(
                "User {} disconnected from chat with {}",
                entry.user_id, partner_id
            );
            if let Some(partner_connection) = self.connections.connection_for_user(&partner_id) {
                self.notify(&partner_connection, &ClientEvent::PartnerDisconnected)
                    .await;
            } else {
                debug!(
                    "Partner {} has no live connection, skipping notification",
                    partner_id
                );
            }
        } else {
            debug!("User {} disconnected while unmatched", entry.user_id);
        }
    }

    async fn notify(&self, connection_id: &str, event: &ClientEvent) {
        if let Err(e) = self.gateway.post_to_connection(connection_id, event).await {
            warn!("Failed to deliver event to connection {}: {}", connection_id, e);
        }
    }
}
