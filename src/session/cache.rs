// Session cache adapter.
// Persists the last known user under a fixed key; storage failures never escape.

use tracing::debug;

use crate::api::User;
use crate::storage::KeyValueStore;

/// Storage key for the cached user record.
pub const SESSION_KEY: &str = "tcr-user";

/// Best-effort persistence of the last observed user.
///
/// The cache only speeds up showing a known identity. It is never the
/// source of truth, so every storage error is absorbed here.
#[derive(Debug)]
pub struct SessionCache<S> {
    store: S,
}

impl<S: KeyValueStore> SessionCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Raw cached value, or `None` when absent or unreadable.
    pub fn get(&self) -> Option<String> {
        match self.store.get(SESSION_KEY) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "session cache read failed");
                None
            }
        }
    }

    /// Store `user` as the cached session.
    pub fn set(&self, user: &User) {
        let json = match serde_json::to_string(user) {
            Ok(json) => json,
            Err(e) => {
                debug!(error = %e, "session cache serialize failed");
                return;
            }
        };
        if let Err(e) = self.store.set(SESSION_KEY, &json) {
            debug!(error = %e, "session cache write failed");
        }
    }

    /// Drop the cached session.
    pub fn remove(&self) {
        if let Err(e) = self.store.remove(SESSION_KEY) {
            debug!(error = %e, "session cache remove failed");
        }
    }

    /// Cached user, or `None` when absent or not a valid user record.
    pub fn load_user(&self) -> Option<User> {
        let raw = self.get()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "ignoring malformed cached session");
                None
            }
        }
    }
}
