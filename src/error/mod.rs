//! Error types for vision-form.

use thiserror::Error;

use crate::view::ElementId;

/// Message shown when the backend rejects a submission without saying why.
pub const GENERIC_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Message shown when no response could be obtained from the backend.
pub const CONNECTIVITY_ERROR_MESSAGE: &str = "Failed to connect to the server. Please try again.";

/// Message shown when a caller cancels an in-flight submission.
pub const CANCELLED_MESSAGE: &str = "The request was cancelled.";

/// Primary error type for all vision-form operations.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-2xx response. `message` is the backend's `error` field, if any.
    #[error("Application error (status {status}): {}", .message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Application {
        status: u16,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Required element '{0}' is missing from the view")]
    MissingElement(ElementId),
}

/// Coarse classification of a [`FormError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The backend answered with a non-2xx status.
    Application,
    /// No usable response was obtained.
    Transport,
    /// The view is missing an element the controller needs.
    Wiring,
    Configuration,
    /// Bad input from the caller, before anything was sent.
    Client,
}

impl FormError {
    /// Create an application error from a status and an optional backend message.
    pub fn application(status: u16, message: Option<String>) -> Self {
        Self::Application { status, message }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Application { .. } => ErrorCategory::Application,
            Self::Network(_) | Self::Timeout(_) | Self::Cancelled | Self::Serialization(_) => {
                ErrorCategory::Transport
            }
            Self::MissingElement(_) => ErrorCategory::Wiring,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Io(_) | Self::InvalidArgument(_) => ErrorCategory::Client,
        }
    }

    /// Text rendered into the error panel for this failure.
    ///
    /// Application errors show the backend message verbatim, falling back to
    /// [`GENERIC_ERROR_MESSAGE`]. Every transport failure shows
    /// [`CONNECTIVITY_ERROR_MESSAGE`], except an explicit cancellation.
    pub fn user_message(&self) -> String {
        match self {
            Self::Application { message, .. } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(GENERIC_ERROR_MESSAGE)
                .to_string(),
            Self::Cancelled => CANCELLED_MESSAGE.to_string(),
            _ if self.category() == ErrorCategory::Transport => {
                CONNECTIVITY_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FormError>;
