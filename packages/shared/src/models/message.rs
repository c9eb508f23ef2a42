use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A relayed chat message. Immutable once created; the store owns it after a
/// successful append and the relay only holds a transient copy.
/// `conversation_id` is the partition key in the message store,
/// `message_id` the sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub conversation_id: String,
    pub message_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender_id: &str, receiver_id: &str, content: &str) -> Self {
        ChatMessage {
            conversation_id: Self::conversation_id_for(sender_id, receiver_id),
            message_id: Uuid::new_v4().to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            content: content.to_string(),
            sent_at: Utc::now(),
        }
    }

    /// Order-independent key for a pair of users, e.g. "alice#bob" for both
    /// (alice, bob) and (bob, alice).
    pub fn conversation_id_for(user_a: &str, user_b: &str) -> String {
        if user_a <= user_b {
            format!("{}#{}", user_a, user_b)
        } else {
            format!("{}#{}", user_b, user_a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_message_creation() {
        let message = ChatMessage::new("alice", "bob", "hi");

        assert_eq!(message.sender_id, "alice");
        assert_eq!(message.receiver_id, "bob");
        assert_eq!(message.content, "hi");
        assert_eq!(message.conversation_id, "alice#bob");
        assert!(!message.message_id.is_empty());

        let now = Utc::now();
        assert!((now - message.sent_at).num_seconds() < 10);
    }

    #[test]
    fn test_message_id_uniqueness() {
        let message1 = ChatMessage::new("alice", "bob", "hi");
        let message2 = ChatMessage::new("alice", "bob", "hi");

        assert_ne!(message1.message_id, message2.message_id);
    }

    #[test]
    fn test_conversation_id_ignores_direction() {
        assert_eq!(
            ChatMessage::conversation_id_for("alice", "bob"),
            ChatMessage::conversation_id_for("bob", "alice")
        );
    }

    #[test]
    fn test_message_serialization() {
        let message = ChatMessage::new("alice", "bob", "hi");

        let serialized = serde_json::to_string(&message).unwrap();
        assert!(serialized.contains("\"sender_id\":\"alice\""));
        assert!(serialized.contains("\"receiver_id\":\"bob\""));
        assert!(serialized.contains("\"content\":\"hi\""));
        assert!(serialized.contains("\"sent_at\""));

        let deserialized: ChatMessage = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, message);
    }

    proptest! {
        #[test]
        fn conversation_id_is_symmetric(a in "[a-z0-9_-]{1,16}", b in "[a-z0-9_-]{1,16}") {
            prop_assert_eq!(
                ChatMessage::conversation_id_for(&a, &b),
                ChatMessage::conversation_id_for(&b, &a)
            );
        }
    }
}
