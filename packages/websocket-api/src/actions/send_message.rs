use aws_lambda_events::apigw::ApiGatewayWebsocketProxyRequest;
use lambda_runtime::Error;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use shared::models::events::ClientEvent;

use crate::state::AppState;

/// Handles the `$default` route: application frames sent by a connected
/// client, dispatched on their `action` field.
pub async fn handle_default(
    event: &ApiGatewayWebsocketProxyRequest,
    state: AppState,
) -> Result<Value, Error> {
    let connection_id = event.request_context.connection_id.as_deref().unwrap_or("");

    let Some(body) = event.body.as_ref() else {
        debug!("No body found in WebSocket event");
        return reply_error(&state, connection_id, "No message body").await;
    };

    let message: Value = match serde_json::from_str(body) {
        Ok(message) => message,
        Err(e) => {
            error!("Failed to parse message: {}", e);
            return Ok(json!({
                "statusCode": 400,
                "body": json!({"error": "Invalid JSON format"}).to_string()
            }));
        }
    };

    match message.get("action").and_then(|a| a.as_str()) {
        Some("send_message") => {
            let content = message.get("content").and_then(|c| c.as_str()).unwrap_or("");
            handle_send_message(connection_id, content, &state).await
        }
        Some("ping") => {
            notify(&state, connection_id, &ClientEvent::pong()).await;
            Ok(json!({ "statusCode": 200 }))
        }
        Some(action) => {
            debug!("Unknown action received: {}", action);
            reply_error(&state, connection_id, "Unknown action").await
        }
        None => reply_error(&state, connection_id, "No action specified").await,
    }
}

async fn handle_send_message(
    connection_id: &str,
    content: &str,
    state: &AppState,
) -> Result<Value, Error> {
    // racing disconnects can leave a frame with no registered sender; drop it
    let Some(entry) = state.connections.user_for_connection(connection_id) else {
        debug!("Dropping message from unknown connection {}", connection_id);
        return Ok(json!({ "statusCode": 200 }));
    };

    match state.message_service.send_message(&entry.user_id, content).await {
        Ok(_message) => Ok(json!({ "statusCode": 200 })),
        Err(e) => {
            info!("Rejected message from {}: {}", entry.user_id, e);
            reply_error(state, connection_id, &e.to_string()).await
        }
    }
}

async fn reply_error(state: &AppState, connection_id: &str, message: &str) -> Result<Value, Error> {
    notify(state, connection_id, &ClientEvent::error(message)).await;
    Ok(json!({ "statusCode": 200 }))
}

async fn notify(state: &AppState, connection_id: &str, event: &ClientEvent) {
    if let Err(e) = state.gateway.post_to_connection(connection_id, event).await {
        error!("Failed to send response to connection {}: {}", connection_id, e);
    }
}
