use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use crate::models::waiting::WaitingUser;

/// The ordered pool of users seeking a partner. All operations take the pool
/// lock, so a scan-and-remove is indivisible: no caller can observe an entry
/// after it has been selected for a match.
#[derive(Default)]
pub struct WaitingPool {
    entries: Mutex<VecDeque<WaitingUser>>,
}

impl WaitingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the back of the pool. Returns false without modifying the
    /// pool when the user_id is already enqueued; the caller must remove the
    /// stale entry first.
    pub fn enqueue(&self, user: WaitingUser) -> bool {
        let mut entries = self.entries.lock().expect("waiting pool lock poisoned");
        if entries.iter().any(|e| e.user_id == user.user_id) {
            return false;
        }
        entries.push_back(user);
        true
    }

    /// Scans in FIFO order and removes the first entry compatible with
    /// `interests`, skipping entries that belong to `user_id` itself. Among
    /// several compatible entries the longest-waiting one wins.
    pub fn find_and_remove_match(
        &self,
        user_id: &str,
        interests: &HashSet<String>,
    ) -> Option<WaitingUser> {
        let mut entries = self.entries.lock().expect("waiting pool lock poisoned");
        let position = entries
            .iter()
            .position(|e| e.user_id != user_id && e.matches_interests(interests))?;
        entries.remove(position)
    }

    /// Removes the entry for `user_id` if present; no-op otherwise.
    pub fn remove(&self, user_id: &str) -> Option<WaitingUser> {
        let mut entries = self.entries.lock().expect("waiting pool lock poisoned");
        let position = entries.iter().position(|e| e.user_id == user_id)?;
        entries.remove(position)
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.lock().expect("waiting pool lock poisoned");
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interest_set(interests: &[&str]) -> HashSet<String> {
        interests.iter().map(|i| i.to_string()).collect()
    }

    fn waiting(user_id: &str, interests: &[&str]) -> WaitingUser {
        WaitingUser::new(user_id, &format!("conn-{}", user_id), interest_set(interests))
    }

    #[test]
    fn test_enqueue_rejects_duplicate_user() {
        let pool = WaitingPool::new();

        assert!(pool.enqueue(waiting("alice", &[])));
        assert!(!pool.enqueue(waiting("alice", &["music"])));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_find_and_remove_match_is_fifo_among_matches() {
        let pool = WaitingPool::new();
        pool.enqueue(waiting("alice", &["music"]));
        pool.enqueue(waiting("bob", &["music"]));

        let matched = pool
            .find_and_remove_match("carol", &interest_set(&["music"]))
            .unwrap();

        assert_eq!(matched.user_id, "alice");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_find_and_remove_match_skips_incompatible_entries() {
        let pool = WaitingPool::new();
        pool.enqueue(waiting("alice", &["sports"]));
        pool.enqueue(waiting("bob", &["music"]));

        let matched = pool
            .find_and_remove_match("carol", &interest_set(&["music"]))
            .unwrap();

        assert_eq!(matched.user_id, "bob");
        // the incompatible entry keeps its place at the front
        assert_eq!(pool.len(), 1);
        assert!(pool.remove("alice").is_some());
    }

    #[test]
    fn test_find_and_remove_match_never_matches_self() {
        let pool = WaitingPool::new();
        pool.enqueue(waiting("alice", &["music"]));

        assert!(pool
            .find_and_remove_match("alice", &interest_set(&["music"]))
            .is_none());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_find_and_remove_match_empty_pool() {
        let pool = WaitingPool::new();

        assert!(pool.find_and_remove_match("alice", &HashSet::new()).is_none());
    }

    #[test]
    fn test_remove_is_noop_for_unknown_user() {
        let pool = WaitingPool::new();
        pool.enqueue(waiting("alice", &[]));

        assert!(pool.remove("bob").is_none());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_remove_frees_the_user_for_re_enqueue() {
        let pool = WaitingPool::new();
        pool.enqueue(waiting("alice", &[]));

        assert!(pool.remove("alice").is_some());
        assert!(pool.enqueue(waiting("alice", &[])));
    }
}
