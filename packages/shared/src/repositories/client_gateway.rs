use async_trait::async_trait;
use aws_sdk_apigatewaymanagement::{primitives::Blob, Client as ApiGatewayClient};
use tracing::debug;

use crate::models::events::ClientEvent;

#[derive(Debug)]
pub enum ClientGatewayError {
    Serialization(String),
    Gateway(String),
}

impl std::fmt::Display for ClientGatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientGatewayError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            ClientGatewayError::Gateway(msg) => write!(f, "Gateway error: {}", msg),
        }
    }
}

impl std::error::Error for ClientGatewayError {}

/// Push side of the transport: delivers an event frame to one connection.
#[async_trait]
pub trait ClientGateway: Send + Sync {
    async fn post_to_connection(
        &self,
        connection_id: &str,
        event: &ClientEvent,
    ) -> Result<(), ClientGatewayError>;
}

pub struct ApiGatewayClientGateway {
    client: ApiGatewayClient,
}

impl ApiGatewayClientGateway {
    /// Builds a management client against the WebSocket API callback URL,
    /// e.g. https://{api-id}.execute-api.{region}.amazonaws.com/{stage}
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        let endpoint = std::env::var("WEBSOCKET_API_ENDPOINT")
            .expect("WEBSOCKET_API_ENDPOINT environment variable must be set");

        let gateway_config = aws_sdk_apigatewaymanagement::config::Builder::from(config)
            .endpoint_url(endpoint)
            .build();

        Self {
            client: ApiGatewayClient::from_conf(gateway_config),
        }
    }
}

#[async_trait]
impl ClientGateway for ApiGatewayClientGateway {
    async fn post_to_connection(
        &self,
        connection_id: &str,
        event: &ClientEvent,
    ) -> Result<(), ClientGatewayError> {
        let payload =
            serde_json::to_vec(event).map_err(|e| ClientGatewayError::Serialization(e.to_string()))?;

        self.client
            .post_to_connection()
            .connection_id(connection_id)
            .data(Blob::new(payload))
            .send()
            .await
            .map_err(|e| ClientGatewayError::Gateway(e.to_string()))?;

        debug!("Posted event frame to connection: {}", connection_id);
        Ok(())
    }
}
