use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::model::{generate_token, Id};

/// Cache entry for an outstanding registration challenge
#[derive(Clone, Debug)]
struct ChallengeEntry {
    user_id: Id,
    issued_at: Instant,
}

/// In-memory cache for passkey registration challenges with TTL.
/// A challenge is issued when registration begins and must be echoed
/// back on completion; it is single-use and expires after 5 minutes.
#[derive(Debug)]
pub struct ChallengeCache {
    entries: Arc<RwLock<HashMap<String, ChallengeEntry>>>,
    ttl: Duration,
}

impl ChallengeCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::from_secs(300), // 5 minutes
        }
    }

    /// Issue a fresh challenge bound to the given user
    pub async fn issue(&self, user_id: &Id) -> String {
        let challenge = generate_token();
        let mut entries = self.entries.write().await;

        // Opportunistic cleanup of expired entries
        entries.retain(|_, entry| entry.issued_at.elapsed() <= self.ttl);

        entries.insert(
            challenge.clone(),
            ChallengeEntry {
                user_id: user_id.clone(),
                issued_at: Instant::now(),
            },
        );
        challenge
    }

    /// Consume a challenge. Returns true only if it exists, has not
    /// expired, and was issued to this user. The entry is removed
    /// either way.
    pub async fn take(&self, challenge: &str, user_id: &Id) -> bool {
        let mut entries = self.entries.write().await;

        match entries.remove(challenge) {
            Some(entry) => entry.issued_at.elapsed() <= self.ttl && &entry.user_id == user_id,
            None => false,
        }
    }
}

impl Default for ChallengeCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn issued_challenge_can_be_taken_once() {
        let cache = ChallengeCache::new();
        let user_id = "user-1".to_string();

        let challenge = cache.issue(&user_id).await;
        assert!(cache.take(&challenge, &user_id).await);
        assert!(!cache.take(&challenge, &user_id).await);
    }

    #[tokio::test]
    async fn challenge_is_bound_to_the_issuing_user() {
        let cache = ChallengeCache::new();
        let challenge = cache.issue(&"user-1".to_string()).await;

        assert!(!cache.take(&challenge, &"user-2".to_string()).await);
        // Consumed by the failed attempt
        assert!(!cache.take(&challenge, &"user-1".to_string()).await);
    }

    #[tokio::test]
    async fn unknown_challenge_is_rejected() {
        let cache = ChallengeCache::new();
        assert!(!cache.take("no-such-challenge", &"user-1".to_string()).await);
    }
}
