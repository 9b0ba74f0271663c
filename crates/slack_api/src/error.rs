pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Slack API error: {source}")]
    Slack {
        source: SlackError,
        body: Option<String>,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid HTTP header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("invalid API base URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to build slack client: {0}")]
    Build(String),
}

/// A non-success HTTP status returned by the Slack API.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{} ({})", message, status_code.as_u16())]
pub struct SlackError {
    pub status_code: StatusCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StatusCode(u16);

impl StatusCode {
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[must_use]
    pub(crate) const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Whether the service is asking the caller to slow down.
    #[must_use]
    pub const fn is_rate_limited(self) -> bool {
        self.0 == 429
    }
}

impl PartialEq<u16> for StatusCode {
    fn eq(&self, other: &u16) -> bool {
        self.0 == *other
    }
}
