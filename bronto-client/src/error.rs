//! Error types for the bronto client.

use thiserror::Error;

/// Errors that can occur in bronto client operations.
#[derive(Error, Debug)]
pub enum BrontoError {
    /// A child-entity mutation was attempted with no current board
    /// selected. Raised locally, before any network call.
    #[error("No board selected")]
    NoBoardSelected,

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (DNS, connect, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrontoError {
    /// The string a store surfaces to its consumer: the server-supplied
    /// error message when there is one, otherwise the given fallback.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            BrontoError::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Result type alias for bronto client operations.
pub type BrontoResult<T> = Result<T, BrontoError>;
