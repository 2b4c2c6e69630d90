//! Error types for the website.

use thiserror::Error;

/// Result type for website operations.
pub type WebResult<T> = Result<T, WebError>;

/// Errors shown to the visitor as notifications.
#[derive(Debug, Error)]
pub enum WebError {
    /// Input failed a local rule before any remote call.
    #[error("{0}")]
    Validation(String),

    /// The remote service refused the request.
    #[error("{0}")]
    Rejected(String),

    /// Reading or writing the token store failed.
    #[error("{0}")]
    Storage(#[from] cs_core::CoreError),
}

impl WebError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
