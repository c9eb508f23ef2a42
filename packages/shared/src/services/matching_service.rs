use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::models::waiting::WaitingUser;
use crate::registries::chat_registry::ActiveChatRegistry;
use crate::registries::waiting_pool::WaitingPool;

/// Outcome of a match attempt for a newly connected user.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Paired {
        partner_id: String,
        partner_connection_id: String,
    },
    Enqueued,
}

/// The only writer of matching state. Every transition between the waiting
/// pool and the chat registry runs under the transition lock, so no handler
/// can observe a user removed from the pool but not yet paired, and a user
/// is never present on both sides at once.
pub struct MatchingService {
    waiting_pool: Arc<WaitingPool>,
    chat_registry: Arc<ActiveChatRegistry>,
    transition: Mutex<()>,
}

impl MatchingService {
    pub fn new(waiting_pool: Arc<WaitingPool>, chat_registry: Arc<ActiveChatRegistry>) -> Self {
        MatchingService {
            waiting_pool,
            chat_registry,
            transition: Mutex::new(()),
        }
    }

    /// Pairs the arrival with the longest-waiting compatible user, or leaves
    /// them in the pool when no one fits.
    pub fn match_or_enqueue(
        &self,
        user_id: &str,
        connection_id: &str,
        interests: &HashSet<String>,
    ) -> MatchOutcome {
        let _transition = self
            .transition
            .lock()
            .expect("matching transition lock poisoned");

        // drop any stale entry left by an earlier connect before scanning
        self.waiting_pool.remove(user_id);

        match self.waiting_pool.find_and_remove_match(user_id, interests) {
            Some(partner) => {
                self.chat_registry.pair(user_id, &partner.user_id);
                info!("Matched {} with {}", user_id, partner.user_id);
                MatchOutcome::Paired {
                    partner_id: partner.user_id,
                    partner_connection_id: partner.connection_id,
                }
            }
            None => {
                self.waiting_pool
                    .enqueue(WaitingUser::new(user_id, connection_id, interests.clone()));
                debug!("No compatible partner for {}, enqueued", user_id);
                MatchOutcome::Enqueued
            }
        }
    }

    /// Removes the user from whichever side of the matching state they
    /// occupy. Returns the former partner when the user was paired.
    pub fn withdraw(&self, user_id: &str) -> Option<String> {
        let _transition = self
            .transition
            .lock()
            .expect("matching transition lock poisoned");

        self.waiting_pool.remove(user_id);
        self.chat_registry.unpair(user_id)
    }
}
