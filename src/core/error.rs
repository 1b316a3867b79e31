//! Error types for the sign-in flow.

use thiserror::Error;

/// Text shown when the backend gave no usable message
pub const FALLBACK_MESSAGE: &str = "Something Went Wrong";

/// Errors produced while submitting credentials
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No response reached the client
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status
    #[error("Server returned {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// A 2xx response whose body did not match `{user, message}`
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// A submission is already in flight
    #[error("A submission is already in progress")]
    Busy,
}

impl AuthError {
    /// Text to surface in the error toast.
    ///
    /// Server-provided messages are shown verbatim; everything else falls back
    /// to [`FALLBACK_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Decode(err.to_string())
    }
}
