use std::sync::Arc;

use crate::services::history_service::HistoryService;

#[derive(Clone)]
pub struct AppState {
    pub history_service: Arc<HistoryService>,
}
