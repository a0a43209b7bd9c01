// Query state for a single remote resource.
// Tracks last data, last error, and whether a fetch is in flight.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{CueRoomError, Result};

/// Lifecycle status of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStatus {
    /// No data yet.
    #[default]
    Pending,
    Success,
    Error,
}

/// Fetch policy for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    /// Extra attempts after a failed fetch. Zero means one attempt only.
    pub retry: u32,
    /// Poll period; `None` disables polling.
    pub refetch_interval: Option<Duration>,
}

impl QueryOptions {
    /// One attempt, no polling.
    pub fn no_retry() -> Self {
        Self::default()
    }

    pub fn polling(interval: Duration) -> Self {
        Self {
            retry: 0,
            refetch_interval: Some(interval),
        }
    }
}

/// Cached result of fetching one resource.
#[derive(Debug, Clone)]
pub struct Query<T> {
    data: Option<T>,
    error: Option<Arc<CueRoomError>>,
    status: QueryStatus,
    fetching: bool,
    data_updated_at: Option<DateTime<Utc>>,
    settled_at: Option<DateTime<Utc>>,
    options: QueryOptions,
}

impl<T> Query<T> {
    pub fn new(options: QueryOptions) -> Self {
        Self {
            data: None,
            error: None,
            status: QueryStatus::Pending,
            fetching: false,
            data_updated_at: None,
            settled_at: None,
            options,
        }
    }

    /// A query seeded with data that counts as a successful result.
    pub fn with_initial_data(data: T, options: QueryOptions) -> Self {
        Self {
            data: Some(data),
            status: QueryStatus::Success,
            data_updated_at: Some(Utc::now()),
            ..Self::new(options)
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&Arc<CueRoomError>> {
        self.error.as_ref()
    }

    pub fn status(&self) -> QueryStatus {
        self.status
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    pub fn data_updated_at(&self) -> Option<DateTime<Utc>> {
        self.data_updated_at
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// First load in progress: a fetch is out and there is no data yet.
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Pending && self.fetching
    }

    /// Mark a fetch as started.
    pub fn begin_fetch(&mut self) {
        self.fetching = true;
        if self.data.is_none() {
            self.status = QueryStatus::Pending;
            self.error = None;
        }
    }

    /// Record the outcome of a fetch. Failures keep the previous data.
    pub fn settle(&mut self, result: Result<T>) {
        self.fetching = false;
        self.settled_at = Some(Utc::now());
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.status = QueryStatus::Success;
                self.data_updated_at = Some(Utc::now());
            }
            Err(e) => {
                self.error = Some(Arc::new(e));
                self.status = QueryStatus::Error;
            }
        }
    }

    /// Whether polling calls for a new fetch at `now`.
    ///
    /// Measured from the last finished attempt, so a failing endpoint is
    /// polled at the same pace as a healthy one.
    pub fn refetch_due(&self, now: DateTime<Utc>) -> bool {
        let Some(interval) = self.options.refetch_interval else {
            return false;
        };
        if self.fetching {
            return false;
        }
        match self.settled_at {
            None => true,
            Some(updated) => now
                .signed_duration_since(updated)
                .to_std()
                .map(|elapsed| elapsed >= interval)
                .unwrap_or(false),
        }
    }
}

/// Run `fetch` once plus up to `retry` more times while it fails.
pub async fn fetch_with_retry<T, F, Fut>(retry: u32, mut fetch: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match fetch().await {
            Ok(data) => return Ok(data),
            Err(e) if attempt < retry => {
                attempt += 1;
                debug!(error = %e, attempt, "fetch failed, retrying");
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn network_error() -> CueRoomError {
        CueRoomError::Other("connection refused".to_string())
    }

    #[test]
    fn test_first_load() {
        let mut query: Query<u32> = Query::new(QueryOptions::no_retry());
        assert!(!query.is_loading());

        query.begin_fetch();
        assert!(query.is_loading());

        query.settle(Ok(7));
        assert!(!query.is_loading());
        assert_eq!(query.data(), Some(&7));
        assert_eq!(query.status(), QueryStatus::Success);
    }

    #[test]
    fn test_initial_data_is_not_loading() {
        let mut query = Query::with_initial_data(1, QueryOptions::no_retry());
        query.begin_fetch();

        assert!(query.is_fetching());
        assert!(!query.is_loading());
    }

    #[test]
    fn test_failure_keeps_data() {
        let mut query = Query::with_initial_data("cached", QueryOptions::no_retry());
        query.begin_fetch();
        query.settle(Err(network_error()));

        assert_eq!(query.data(), Some(&"cached"));
        assert!(query.error().is_some());
        assert_eq!(query.status(), QueryStatus::Error);
    }

    #[test]
    fn test_refetch_without_data_clears_error() {
        let mut query: Query<u32> = Query::new(QueryOptions::no_retry());
        query.begin_fetch();
        query.settle(Err(network_error()));
        assert!(!query.is_loading());

        query.begin_fetch();
        assert!(query.error().is_none());
        assert!(query.is_loading());
    }

    #[test]
    fn test_success_clears_error() {
        let mut query = Query::with_initial_data(1, QueryOptions::no_retry());
        query.settle(Err(network_error()));
        query.settle(Ok(2));

        assert!(query.error().is_none());
        assert_eq!(query.data(), Some(&2));
    }

    #[test]
    fn test_refetch_due() {
        let now = Utc::now();

        let query: Query<u32> = Query::new(QueryOptions::no_retry());
        assert!(!query.refetch_due(now));

        let mut query: Query<u32> = Query::new(QueryOptions::polling(Duration::from_secs(30)));
        assert!(query.refetch_due(now));

        query.settle(Ok(1));
        assert!(!query.refetch_due(Utc::now()));
        assert!(query.refetch_due(Utc::now() + chrono::Duration::seconds(31)));

        query.begin_fetch();
        assert!(!query.refetch_due(Utc::now() + chrono::Duration::seconds(31)));
    }

    #[test]
    fn test_refetch_due_after_failure() {
        let mut query: Query<u32> = Query::new(QueryOptions::polling(Duration::from_secs(30)));
        query.begin_fetch();
        query.settle(Err(network_error()));

        assert!(!query.refetch_due(Utc::now()));
        assert!(query.refetch_due(Utc::now() + chrono::Duration::seconds(31)));
    }

    #[tokio::test]
    async fn test_no_retry_is_single_attempt() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<u32> = fetch_with_retry(0, move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(network_error())
        })
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = fetch_with_retry(3, move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(network_error())
            } else {
                Ok(5)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 5);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }
}
