use std::collections::HashSet;

use chrono::{DateTime, Utc};

/// A user waiting in the pool for a conversation partner.
#[derive(Debug, Clone)]
pub struct WaitingUser {
    pub user_id: String,
    pub connection_id: String,
    pub interests: HashSet<String>,
    pub joined_at: DateTime<Utc>,
}

impl WaitingUser {
    pub fn new(user_id: &str, connection_id: &str, interests: HashSet<String>) -> Self {
        WaitingUser {
            user_id: user_id.to_string(),
            connection_id: connection_id.to_string(),
            interests,
            joined_at: Utc::now(),
        }
    }

    /// Whether this waiting user is compatible with an arrival declaring
    /// `interests`. Two empty sets pair together; an empty set never pairs
    /// with a non-empty one; otherwise the sets must share at least one
    /// interest (case-sensitive exact match).
    pub fn matches_interests(&self, interests: &HashSet<String>) -> bool {
        if self.interests.is_empty() && interests.is_empty() {
            return true;
        }
        if self.interests.is_empty() || interests.is_empty() {
            return false;
        }
        !self.interests.is_disjoint(interests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn interest_set(interests: &[&str]) -> HashSet<String> {
        interests.iter().map(|i| i.to_string()).collect()
    }

    #[test_case(&[], &[], true ; "both empty sets pair together")]
    #[test_case(&["music"], &[], false ; "waiting has interests but arrival does not")]
    #[test_case(&[], &["music"], false ; "arrival has interests but waiting does not")]
    #[test_case(&["music"], &["music"], true ; "identical single interest")]
    #[test_case(&["music", "sports"], &["sports"], true ; "one shared interest suffices")]
    #[test_case(&["music"], &["sports"], false ; "disjoint interests never pair")]
    #[test_case(&["Music"], &["music"], false ; "interest matching is case sensitive")]
    fn test_matches_interests(waiting: &[&str], arrival: &[&str], expected: bool) {
        let user = WaitingUser::new("alice", "conn-1", interest_set(waiting));

        assert_eq!(user.matches_interests(&interest_set(arrival)), expected);
    }

    #[test]
    fn test_joined_at_is_recent() {
        let user = WaitingUser::new("alice", "conn-1", HashSet::new());

        let now = Utc::now();
        assert!((now - user.joined_at).num_seconds() < 10);
    }
}
