use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("completion service API key is not configured")]
    MissingApiKey,

    #[error("invalid completion base url: {0}")]
    InvalidBaseUrl(String),

    #[error("completion request timed out after {0:?}")]
    Timeout(Duration),

    #[error("completion transport error: {0}")]
    Transport(String),

    #[error("completion service returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The service answered 2xx but the answer had no usable message content.
    #[error("{reason}")]
    UnexpectedResponse { reason: String, raw: String },
}

impl CompletionError {
    /// Raw response body, for the shape-error case only.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::UnexpectedResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
