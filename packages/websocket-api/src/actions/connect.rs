use std::collections::HashSet;

use aws_lambda_events::apigw::ApiGatewayWebsocketProxyRequest;
use lambda_runtime::Error;
use serde_json::{json, Value};
use tracing::info;

use crate::state::AppState;

pub async fn handle_connect(
    event: &ApiGatewayWebsocketProxyRequest,
    state: AppState,
) -> Result<Value, Error> {
    let connection_id = event.request_context.connection_id.as_deref().unwrap_or("");

    // Anonymous clients may connect without declaring an identity
    let user_id = match event.query_string_parameters.first("user_id") {
        Some(user_id) => user_id.to_string(),
        None => format!("user_{}", connection_id),
    };
    let interests = parse_interests(event.query_string_parameters.first("interests"));

    info!(
        "WebSocket connection established: {} (user: {})",
        connection_id, user_id
    );

    if let Err(e) = state
        .session_service
        .connect(&user_id, interests, connection_id)
        .await
    {
        return Ok(json!({
            "statusCode": 400,
            "body": json!({"error": e.to_string()}).to_string()
        }));
    }

    Ok(json!({
        "statusCode": 200
    }))
}

fn parse_interests(raw: Option<&str>) -> HashSet<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|interest| !interest.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interests_splits_on_commas() {
        let interests = parse_interests(Some("music, sports,travel"));

        assert_eq!(interests.len(), 3);
        assert!(interests.contains("music"));
        assert!(interests.contains("sports"));
        assert!(interests.contains("travel"));
    }

    #[test]
    fn test_parse_interests_missing_parameter_is_empty() {
        assert!(parse_interests(None).is_empty());
    }

    #[test]
    fn test_parse_interests_ignores_blank_segments() {
        let interests = parse_interests(Some("music,, ,"));

        assert_eq!(interests.len(), 1);
    }
}
