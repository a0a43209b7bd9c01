// Error types for the cueroom client.
// Covers API failures, decoding errors, and uninitialized app state.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CueRoomError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Not signed in")]
    Unauthorized,

    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} has not been initialized")]
    NotInitialized(&'static str),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CueRoomError>;
