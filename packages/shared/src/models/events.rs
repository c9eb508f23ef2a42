use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::message::ChatMessage;

/// Outbound frame pushed to a client connection. Serialized with an `action`
/// tag, e.g. `{"action":"matched","partner_id":"bob"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientEvent {
    Matched {
        partner_id: String,
    },
    ReceiveMessage {
        sender_id: String,
        content: String,
        sent_at: DateTime<Utc>,
    },
    PartnerDisconnected,
    Error {
        message: String,
    },
    Pong {
        timestamp: DateTime<Utc>,
    },
}

impl ClientEvent {
    pub fn matched(partner_id: &str) -> Self {
        ClientEvent::Matched {
            partner_id: partner_id.to_string(),
        }
    }

    pub fn receive_message(message: &ChatMessage) -> Self {
        ClientEvent::ReceiveMessage {
            sender_id: message.sender_id.clone(),
            content: message.content.clone(),
            sent_at: message.sent_at,
        }
    }

    pub fn error(message: &str) -> Self {
        ClientEvent::Error {
            message: message.to_string(),
        }
    }

    pub fn pong() -> Self {
        ClientEvent::Pong {
            timestamp: Utc::now(),
        }
    }
}
