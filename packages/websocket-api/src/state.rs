use std::sync::Arc;

use shared::registries::connection_registry::ConnectionRegistry;
use shared::repositories::client_gateway::ClientGateway;
use shared::services::message_service::MessageService;
use shared::services::session_service::SessionService;

#[derive(Clone)]
pub struct AppState {
    pub connections: Arc<ConnectionRegistry>,
    pub session_service: Arc<SessionService>,
    pub message_service: Arc<MessageService>,
    pub gateway: Arc<dyn ClientGateway>,
}
