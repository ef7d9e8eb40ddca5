//! Error types shared by every controller
//!
//! Each operation boundary converts whatever went wrong into a
//! [`GalleryError`], which the caller turns into an inline notice.

use thiserror::Error;

/// Failure of a gallery operation
#[derive(Error, Debug)]
pub enum GalleryError {
    /// A form field or selected file failed local validation
    #[error("{0}")]
    Validation(String),

    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never completed
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered 2xx but the body could not be decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Local key-value storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Backend URL or API key missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Broad buckets used when reporting an error to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Never reached the network
    Local,
    /// The backend rejected the request
    Backend,
    /// Network failure or unreadable response
    Transport,
}

impl GalleryError {
    pub fn validation(message: impl Into<String>) -> Self {
        GalleryError::Validation(message.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GalleryError::Validation(_)
            | GalleryError::Storage(_)
            | GalleryError::Configuration(_) => ErrorCategory::Local,
            GalleryError::Rejected { .. } => ErrorCategory::Backend,
            GalleryError::Transport(_) | GalleryError::MalformedResponse(_) => {
                ErrorCategory::Transport
            }
        }
    }
}

impl From<reqwest::Error> for GalleryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GalleryError::MalformedResponse(err.to_string())
        } else {
            GalleryError::Transport(err)
        }
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        GalleryError::MalformedResponse(err.to_string())
    }
}

/// Type alias for Result with GalleryError
pub type GalleryResult<T> = Result<T, GalleryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_backend_message() {
        let err = GalleryError::Rejected {
            status: 400,
            message: "Invalid login credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert_eq!(err.category(), ErrorCategory::Backend);
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            GalleryError::validation("Please fill in every field").category(),
            ErrorCategory::Local
        );
        assert_eq!(
            GalleryError::MalformedResponse("eof".to_string()).category(),
            ErrorCategory::Transport
        );
        assert_eq!(
            GalleryError::Storage("read-only".to_string()).category(),
            ErrorCategory::Local
        );
    }
}
