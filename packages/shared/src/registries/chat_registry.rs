use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

/// Active conversations, stored as mirrored entries: pairing a with b writes
/// both a -> b and b -> a, and unpairing removes both. The single lock keeps
/// the mirror intact; a surviving half is a programming error elsewhere.
#[derive(Default)]
pub struct ActiveChatRegistry {
    pairs: Mutex<HashMap<String, String>>,
}

impl ActiveChatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes both mirrored entries as one step.
    pub fn pair(&self, user_a: &str, user_b: &str) {
        let mut pairs = self.pairs.lock().expect("chat registry lock poisoned");
        pairs.insert(user_a.to_string(), user_b.to_string());
        pairs.insert(user_b.to_string(), user_a.to_string());
    }

    pub fn partner_of(&self, user_id: &str) -> Option<String> {
        let pairs = self.pairs.lock().expect("chat registry lock poisoned");
        pairs.get(user_id).cloned()
    }

    /// Removes both halves of the user's pairing and returns the former
    /// partner so the caller can notify them. No-op returning None when the
    /// user has no active chat.
    pub fn unpair(&self, user_id: &str) -> Option<String> {
        let mut pairs = self.pairs.lock().expect("chat registry lock poisoned");
        let partner = pairs.remove(user_id)?;
        match pairs.get(&partner).cloned() {
            Some(back) if back == user_id => {
                pairs.remove(&partner);
            }
            other => {
                // half-mirrored entry: leave whatever the partner points at alone
                warn!(
                    "Chat entry for {} does not mirror {} (found {:?})",
                    partner, user_id, other
                );
            }
        }
        Some(partner)
    }
}
