use lambda_runtime::Error;
use serde_json::{json, Value};
use tracing::info;

use crate::state::AppState;

pub async fn handle_disconnect(connection_id: &str, state: AppState) -> Result<Value, Error> {
    info!("WebSocket connection disconnected: {}", connection_id);

    state.session_service.disconnect(connection_id).await;

    Ok(json!({
        "statusCode": 200
    }))
}
