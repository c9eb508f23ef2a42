use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::services::errors::history_service_errors::HistoryServiceError;
use crate::state::AppState;
use shared::models::message::ChatMessage;
use shared::models::responses::ErrorResponse;

pub fn routes() -> Router<AppState> {
    Router::new().route("/messages/{user_a}/{user_b}", get(get_message_history))
}

async fn get_message_history(
    State(state): State<AppState>,
    Path((user_a, user_b)): Path<(String, String)>,
) -> Result<Json<Vec<ChatMessage>>, (StatusCode, Json<ErrorResponse>)> {
    match state.history_service.get_history(&user_a, &user_b).await {
        Ok(messages) => Ok(Json(messages)),
        Err(e) => {
            let error_response = ErrorResponse {
                error: e.to_string(),
            };
            match e {
                HistoryServiceError::ValidationError(_) => {
                    Err((StatusCode::BAD_REQUEST, Json(error_response)))
                }
                HistoryServiceError::RepositoryError(_) => {
                    Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
                }
            }
        }
    }
}
