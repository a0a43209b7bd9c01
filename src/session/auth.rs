// Auth state for the signed-in visitor.
// Combines the current-user query with the session cache for stale-while-revalidate.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{CurrentUserSource, User};
use crate::error::{CueRoomError, Result};
use crate::storage::KeyValueStore;

use super::cache::SessionCache;
use super::query::{Query, QueryOptions, fetch_with_retry};

/// Snapshot handed to views.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub error: Option<Arc<CueRoomError>>,
}

impl AuthState {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_admin)
    }
}

/// Run one current-user fetch cycle against `source`.
///
/// Owns nothing from the session, so it can be spawned while the session
/// keeps rendering; the result goes back through [`AuthSession::resolve`].
pub async fn fetch_session_user<C: CurrentUserSource>(
    source: &C,
    retry: u32,
) -> Result<Option<User>> {
    fetch_with_retry(retry, move || source.fetch_current_user()).await
}

/// Current-user query backed by a persisted session cache.
#[derive(Debug)]
pub struct AuthSession<S> {
    cache: SessionCache<S>,
    query: Query<Option<User>>,
}

impl<S: KeyValueStore> AuthSession<S> {
    /// Seed the query from whatever the cache holds.
    pub fn new(cache: SessionCache<S>) -> Self {
        let options = QueryOptions::no_retry();
        // No cached user leaves the query without data instead of seeding
        // `None`: a seeded `None` would count as a settled signed-out answer
        // and the first fetch would never report loading.
        let query = match cache.load_user() {
            Some(user) => Query::with_initial_data(Some(user), options),
            None => Query::new(options),
        };
        Self { cache, query }
    }

    pub fn cache(&self) -> &SessionCache<S> {
        &self.cache
    }

    pub fn query(&self) -> &Query<Option<User>> {
        &self.query
    }

    /// Mark the current-user fetch as in flight. Returns false when one
    /// is already out and the caller should not start another.
    pub fn begin_fetch(&mut self) -> bool {
        if self.query.is_fetching() {
            return false;
        }
        self.query.begin_fetch();
        true
    }

    /// Attempts allowed after a failed fetch.
    pub fn retry(&self) -> u32 {
        self.query.options().retry
    }

    /// Apply the outcome of a current-user fetch.
    ///
    /// A signed-in answer overwrites the cache and a signed-out answer
    /// clears it. Failures leave the cache alone so the stale user stays
    /// available.
    pub fn resolve(&mut self, result: Result<Option<User>>) {
        match &result {
            Ok(Some(user)) => {
                info!(user_id = %user.id, "session confirmed");
                self.cache.set(user);
            }
            Ok(None) => {
                info!("no active session");
                self.cache.remove();
            }
            Err(e) => warn!(error = %e, "current user fetch failed"),
        }
        self.query.settle(result);
    }

    /// Fetch the current user from `source` and apply the result.
    pub async fn refresh<C: CurrentUserSource>(&mut self, source: &C) {
        if !self.begin_fetch() {
            return;
        }
        let result = fetch_session_user(source, self.retry()).await;
        self.resolve(result);
    }

    /// Derive the view state. The cache is re-read on every call whenever
    /// the query has no user.
    pub fn state(&self) -> AuthState {
        let user = self
            .query
            .data()
            .cloned()
            .flatten()
            .or_else(|| self.cache.load_user());
        let error = self.query.error().cloned();
        let query_loading = self.query.is_loading();
        let is_loading = query_loading && !(error.is_some() && user.is_some());

        AuthState {
            is_authenticated: user.is_some(),
            user,
            is_loading,
            error,
        }
    }
}
