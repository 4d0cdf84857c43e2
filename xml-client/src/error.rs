//! Error types for the XML client

use thiserror::Error;

/// Errors that can occur while talking to the receiver's control endpoint
#[derive(Debug, Error)]
pub enum XmlError {
    /// Network or HTTP communication error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// The receiver answered a PUT with a non-zero return code
    #[error("Command rejected: return code {0}")]
    Rejected(u16),
}
