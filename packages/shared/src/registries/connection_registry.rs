use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::connection::ConnectionEntry;

/// Live connections, indexed both ways: connection_id -> entry for the
/// transport side, user_id -> connection_id for notification targets. Both
/// indexes are updated under one lock so neither can observe the other
/// half-written.
#[derive(Default)]
pub struct ConnectionRegistry {
    inner: Mutex<Indexes>,
}

#[derive(Default)]
struct Indexes {
    by_connection: HashMap<String, ConnectionEntry>,
    by_user: HashMap<String, String>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a connection, overwriting any prior entry for the same
    /// connection_id.
    pub fn register(&self, entry: ConnectionEntry) {
        let mut inner = self.inner.lock().expect("connection registry lock poisoned");
        if let Some(prior) = inner.by_connection.remove(&entry.connection_id) {
            inner.by_user.remove(&prior.user_id);
        }
        inner
            .by_user
            .insert(entry.user_id.clone(), entry.connection_id.clone());
        inner
            .by_connection
            .insert(entry.connection_id.clone(), entry);
    }

    /// Removes a connection and returns its entry, or None for a connection
    /// that was never registered or is already gone.
    pub fn unregister(&self, connection_id: &str) -> Option<ConnectionEntry> {
        let mut inner = self.inner.lock().expect("connection registry lock poisoned");
        let entry = inner.by_connection.remove(connection_id)?;
        // the user may already have been re-registered under a newer connection
        if inner.by_user.get(&entry.user_id).map(String::as_str) == Some(connection_id) {
            inner.by_user.remove(&entry.user_id);
        }
        Some(entry)
    }

    pub fn connection_for_user(&self, user_id: &str) -> Option<String> {
        let inner = self.inner.lock().expect("connection registry lock poisoned");
        inner.by_user.get(user_id).cloned()
    }

    pub fn user_for_connection(&self, connection_id: &str) -> Option<ConnectionEntry> {
        let inner = self.inner.lock().expect("connection registry lock poisoned");
        inner.by_connection.get(connection_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_register_and_lookup_both_ways() {
        let registry = ConnectionRegistry::new();
        registry.register(ConnectionEntry::new("conn-1", "alice", HashSet::new()));

        assert_eq!(
            registry.connection_for_user("alice"),
            Some("conn-1".to_string())
        );
        let entry = registry.user_for_connection("conn-1").unwrap();
        assert_eq!(entry.user_id, "alice");
    }

    #[test]
    fn test_unregister_returns_entry_and_clears_both_indexes() {
        let registry = ConnectionRegistry::new();
        registry.register(ConnectionEntry::new("conn-1", "alice", HashSet::new()));

        let removed = registry.unregister("conn-1").unwrap();

        assert_eq!(removed.user_id, "alice");
        assert!(registry.connection_for_user("alice").is_none());
        assert!(registry.user_for_connection("conn-1").is_none());
    }

    #[test]
    fn test_unregister_unknown_connection_is_none() {
        let registry = ConnectionRegistry::new();

        assert!(registry.unregister("conn-1").is_none());
    }

    #[test]
    fn test_register_overwrites_same_connection_id() {
        let registry = ConnectionRegistry::new();
        registry.register(ConnectionEntry::new("conn-1", "alice", HashSet::new()));
        registry.register(ConnectionEntry::new("conn-1", "bob", HashSet::new()));

        assert!(registry.connection_for_user("alice").is_none());
        assert_eq!(
            registry.connection_for_user("bob"),
            Some("conn-1".to_string())
        );
    }

    #[test]
    fn test_unregister_stale_connection_keeps_newer_reverse_entry() {
        let registry = ConnectionRegistry::new();
        registry.register(ConnectionEntry::new("conn-1", "alice", HashSet::new()));
        registry.register(ConnectionEntry::new("conn-2", "alice", HashSet::new()));

        // removing the older connection must not clobber the newer one
        registry.unregister("conn-1");

        assert_eq!(
            registry.connection_for_user("alice"),
            Some("conn-2".to_string())
        );
    }
}
