use std::collections::HashSet;

/// A live transport connection and the interests its user declared at connect
/// time. Owned exclusively by the connection registry.
#[derive(Debug, Clone)]
pub struct ConnectionEntry {
    pub connection_id: String,
    pub user_id: String,
    pub interests: HashSet<String>,
}

impl ConnectionEntry {
    pub fn new(connection_id: &str, user_id: &str, interests: HashSet<String>) -> Self {
        ConnectionEntry {
            connection_id: connection_id.to_string(),
            user_id: user_id.to_string(),
            interests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_entry_creation() {
        let interests: HashSet<String> = ["music".to_string()].into_iter().collect();
        let entry = ConnectionEntry::new("conn-1", "alice", interests);

        assert_eq!(entry.connection_id, "conn-1");
        assert_eq!(entry.user_id, "alice");
        assert!(entry.interests.contains("music"));
    }

    #[test]
    fn test_connection_entry_empty_interests() {
        let entry = ConnectionEntry::new("conn-1", "alice", HashSet::new());

        assert!(entry.interests.is_empty());
    }
}
