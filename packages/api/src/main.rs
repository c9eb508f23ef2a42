use axum::{routing::get, Router};
use lambda_http::{run, tracing, Error};
use std::env::set_var;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub mod routes;
pub mod services;
pub mod state;

use services::history_service::HistoryService;
use shared::repositories::message_repository::DynamoDbMessageRepository;

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    // Set up services
    let config = aws_config::load_from_env().await;
    let client = aws_sdk_dynamodb::Client::new(&config);

    let message_repository = Arc::new(DynamoDbMessageRepository::new(client));
    let history_service = Arc::new(HistoryService::new(message_repository));

    let app_state = state::AppState { history_service };

    // Configure CORS so the browser client can read history
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::messages::routes())
        .layer(cors)
        .with_state(app_state);

    run(app).await
}
