use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_item};

use crate::models::message::ChatMessage;
use crate::repositories::errors::message_repository_errors::MessageRepositoryError;

/// The durable message store. The relay only appends; the read path queries a
/// whole conversation.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn append_message(&self, message: &ChatMessage) -> Result<(), MessageRepositoryError>;

    /// All messages between the two users, ordered by sent_at ascending.
    /// Argument order does not matter.
    async fn query_history(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Vec<ChatMessage>, MessageRepositoryError>;
}

pub struct DynamoDbMessageRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbMessageRepository {
    pub fn new(client: Client) -> Self {
        let table_name = std::env::var("MESSAGES_TABLE")
            .expect("MESSAGES_TABLE environment variable must be set");
        Self { client, table_name }
    }
}

#[async_trait]
impl MessageRepository for DynamoDbMessageRepository {
    async fn append_message(&self, message: &ChatMessage) -> Result<(), MessageRepositoryError> {
        let item =
            to_item(message).map_err(|e| MessageRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| MessageRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn query_history(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Vec<ChatMessage>, MessageRepositoryError> {
        let conversation_id = ChatMessage::conversation_id_for(user_a, user_b);

        let query_result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("conversation_id = :conversation_id")
            .expression_attribute_values(
                ":conversation_id",
                AttributeValue::S(conversation_id),
            )
            .send()
            .await
            .map_err(|e| MessageRepositoryError::DynamoDb(e.to_string()))?;

        let mut messages = Vec::new();

        if let Some(items) = query_result.items {
            for item in items {
                let message: ChatMessage = from_item(item)
                    .map_err(|e| MessageRepositoryError::Serialization(e.to_string()))?;
                messages.push(message);
            }
        }

        // the sort key is the message id, so order by timestamp here
        messages.sort_by_key(|message| message.sent_at);

        Ok(messages)
    }
}
