use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any network activity.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote service answered with a non-success status.
    #[error("HTTP error: {status} {reason}")]
    Http { status: u16, reason: String },

    /// Connection failure, interrupted transfer or timeout.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the front-end should offer a manual retry for this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Http { .. } | Error::Network(_))
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Transport failures only; status codes are classified by the fetcher.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
