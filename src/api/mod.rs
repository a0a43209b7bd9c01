// TheCueRoom API module.
// Provides the HTTP client, endpoint calls, and the record types they return.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
pub use endpoints::{CurrentUserSource, SettingsSource};
pub use types::*;
