use thiserror::Error;

/// Shown when the backend cannot be reached at all.
pub const CONNECT_MESSAGE: &str = "Cannot connect to server. Is the backend running?";

/// Shown when an error carries no usable text.
pub const FALLBACK_MESSAGE: &str = "Error parsing video. Check console.";

/// Input rejected before any request is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL is required")]
    EmptyUrl,

    #[error("Please enter a URL.")]
    MalformedUrl { input: String },
}

/// Errors are `Clone` so they can travel inside UI messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Network Error: cannot connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Non-2xx response. `detail` is the backend's structured error text.
    #[error("Request failed with status code {status}")]
    Server {
        status: u16,
        detail: Option<String>,
        body: String,
    },

    #[error("{reason}")]
    Decode { reason: String },

    #[error("{reason}")]
    Http { reason: String },

    #[error("IO error: {reason}")]
    Io { reason: String },
}

impl ClientError {
    /// True for failures where no response was ever received.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ClientError::Connect { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io {
            reason: err.to_string(),
        }
    }
}

/// Derives the text surfaced to the user for a failed analysis.
///
/// Precedence: the backend's `detail`, then the fixed connectivity message,
/// then the raw error text, then [`FALLBACK_MESSAGE`].
pub fn user_message(err: &ClientError) -> String {
    if let ClientError::Server {
        detail: Some(detail),
        ..
    } = err
    {
        if !detail.trim().is_empty() {
            return detail.clone();
        }
    }

    if err.is_connectivity() {
        return CONNECT_MESSAGE.to_string();
    }

    let raw = err.to_string();
    if raw.trim().is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        raw
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
