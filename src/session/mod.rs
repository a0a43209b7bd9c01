// Session module.
// Tracks the signed-in user from the server with a persisted fallback copy.

pub mod auth;
pub mod cache;
pub mod query;

pub use auth::{AuthSession, AuthState, fetch_session_user};
pub use cache::{SESSION_KEY, SessionCache};
pub use query::{Query, QueryOptions, QueryStatus, fetch_with_retry};
