use thiserror::Error;
use xml_client::XmlError;

/// Hard failures of receiver operations
///
/// Menu drift ("item not found", a failed return to the root menu) is not an
/// error at this level: it is reported through
/// [`NavigationListener::navigation_error`](crate::NavigationListener::navigation_error)
/// and the originating call returns normally.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network communication error
    ///
    /// The receiver could not be reached or the HTTP exchange failed.
    /// Never retried by this crate.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response parsing error
    ///
    /// The response could not be parsed, its expected root element is absent,
    /// or a required field is missing or malformed.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The receiver answered a command with a non-zero return code
    #[error("Command rejected by receiver: return code {0}")]
    Rejected(u16),

    /// The menu never reported "Ready" within the configured wait bound
    #[error("Menu still not ready after {waited_ms}ms")]
    Timeout { waited_ms: u64 },

    /// The transport behind a controller has been dropped
    #[error("Connection to receiver lost")]
    ConnectionLost,
}

impl ApiError {
    /// Create a protocol error for a required response field that is missing
    pub fn missing_field(path: &str) -> Self {
        Self::Protocol(format!("{} missing in response", path))
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<XmlError> for ApiError {
    fn from(error: XmlError) -> Self {
        match error {
            XmlError::Network(msg) => ApiError::Transport(msg),
            XmlError::Parse(msg) => ApiError::Protocol(msg),
            XmlError::Rejected(code) => ApiError::Rejected(code),
        }
    }
}
