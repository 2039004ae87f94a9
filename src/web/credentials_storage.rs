use cached::{Cached, TimedSizedCache};
use std::fmt::Debug;

const CACHE_SIZE: usize = 100;
const SESSION_LIFESPAN_IN_SECONDS: u64 = 60 * 60 * 24;

/// A container for storing login credentials between requests,
/// keyed by the session token carried in the authentication cookie.
/// Only 100 sessions can be live at a time, and they expire after one day.
#[derive(Debug)]
pub struct CredentialsStorage<C: Send + Sync> {
    credentials: TimedSizedCache<String, C>,
}

impl<C: Send + Sync> CredentialsStorage<C> {
    pub fn store(&mut self, id: String, credentials: C) {
        self.credentials.cache_set(id, credentials);
    }

    pub fn get(&mut self, id: &str) -> Option<&C> {
        self.credentials.cache_get(id)
    }
}

impl<C: Send + Sync> Default for CredentialsStorage<C> {
    fn default() -> Self {
        let credentials =
            TimedSizedCache::with_size_and_lifespan(CACHE_SIZE, SESSION_LIFESPAN_IN_SECONDS);
        Self { credentials }
    }
}
