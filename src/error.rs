use thiserror::Error;

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Fatal errors surfaced to the caller.
///
/// Transient remote failures never appear here; they are reported as
/// [`FetchOutcome::Failed`](crate::models::FetchOutcome::Failed) instead.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Configuration error (missing credentials, unreadable rules file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The `url` search field is missing or not a valid absolute URL
    #[error("Invalid search URL: {0}")]
    InvalidUrl(String),
}
