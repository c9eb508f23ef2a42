use std::sync::Arc;
use std::time::Duration;

use aws_lambda_events::apigw::ApiGatewayWebsocketProxyRequest;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use tracing::{debug, error};

pub mod actions;
pub mod state;

use shared::registries::chat_registry::ActiveChatRegistry;
use shared::registries::connection_registry::ConnectionRegistry;
use shared::registries::waiting_pool::WaitingPool;
use shared::repositories::client_gateway::ApiGatewayClientGateway;
use shared::repositories::message_repository::DynamoDbMessageRepository;
use shared::services::matching_service::MatchingService;
use shared::services::message_service::MessageService;
use shared::services::session_service::SessionService;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // required to enable CloudWatch error logging by the runtime
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Set up services. The registries live here for the lifetime of the
    // process and are shared by every event handler.
    let config = aws_config::load_from_env().await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);

    let connections = Arc::new(ConnectionRegistry::new());
    let waiting_pool = Arc::new(WaitingPool::new());
    let chat_registry = Arc::new(ActiveChatRegistry::new());

    let gateway: Arc<ApiGatewayClientGateway> = Arc::new(ApiGatewayClientGateway::new(&config));
    let message_repository = Arc::new(DynamoDbMessageRepository::new(dynamodb_client));

    let matching_service = Arc::new(MatchingService::new(
        waiting_pool,
        chat_registry.clone(),
    ));
    let session_service = Arc::new(SessionService::new(
        connections.clone(),
        matching_service,
        gateway.clone(),
    ));
    let mut message_service = MessageService::new(
        chat_registry,
        connections.clone(),
        message_repository,
        gateway.clone(),
    );
    if let Some(persist_timeout) = persist_timeout_from_env() {
        message_service = message_service.with_persist_timeout(persist_timeout);
    }

    let app_state = state::AppState {
        connections,
        session_service,
        message_service: Arc::new(message_service),
        gateway,
    };

    run(service_fn(|event: LambdaEvent<ApiGatewayWebsocketProxyRequest>| {
        websocket_handler(event, app_state.clone())
    }))
    .await
}

fn persist_timeout_from_env() -> Option<Duration> {
    std::env::var("PERSIST_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse().ok())
        .map(Duration::from_millis)
}

async fn websocket_handler(
    event: LambdaEvent<ApiGatewayWebsocketProxyRequest>,
    state: state::AppState,
) -> Result<Value, Error> {
    let websocket_event = event.payload;
    let route_key = websocket_event
        .request_context
        .route_key
        .clone()
        .unwrap_or_default();
    let connection_id = websocket_event
        .request_context
        .connection_id
        .clone()
        .unwrap_or_default();

    debug!(
        "Processing route_key: {}, connection_id: {}",
        route_key, connection_id
    );

    match route_key.as_str() {
        "$connect" => actions::connect::handle_connect(&websocket_event, state).await,
        "$disconnect" => actions::disconnect::handle_disconnect(&connection_id, state).await,
        "$default" => actions::send_message::handle_default(&websocket_event, state).await,
        _ => {
            error!("Unknown route key: {}", route_key);
            Ok(json!({
                "statusCode": 400,
                "body": json!({"error": "Unknown route"}).to_string()
            }))
        }
    }
}
