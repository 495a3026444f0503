use thiserror::Error;

/// Failure of a create- or read-request. The view only ever sees a generic
/// message; the detail here goes to the log.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

impl TransportError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}
