use std::io;

use serde_json::Value;

use crate::config;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// CLI Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::Error),

    #[error("{0}")]
    Api(#[from] slack_api::Error),

    /// The call went through, but Slack answered with `"ok": false`.
    #[error("Slack returned an error: {error}")]
    Remote { error: String, body: Value },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code for this error.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Remote { .. } => 2,
            _ => 1,
        }
    }
}
