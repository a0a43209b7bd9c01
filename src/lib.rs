// TheCueRoom terminal client.
// Session tracking with a persisted fallback, plus polled animation settings.

pub mod api;
pub mod app;
pub mod config;
pub mod context;
pub mod error;
pub mod session;
pub mod settings;
pub mod storage;
pub mod ui;

pub use error::{CueRoomError, Result};
