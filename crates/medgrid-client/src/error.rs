use medgrid_core::CoreError;
use thiserror::Error;

/// Errors from talking to the patient API.
///
/// The store does not branch on these; it stores whatever failure occurred
/// and clears its loading flag. The taxonomy exists for callers below the
/// store (and for logs).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to connect to server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse response JSON: {0}")]
    Decode(serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClientError {
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// True for 4xx responses.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Http { status, .. } if (400..500).contains(status))
    }

    /// True for 5xx responses.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Http { status, .. } if (500..600).contains(status))
    }
}
