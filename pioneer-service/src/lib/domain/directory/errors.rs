use thiserror::Error;

/// Error for parsing the client-supplied entry limit
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LimitError {
    #[error("limit must be a positive integer, got '{0}'")]
    NotAPositiveInteger(String),
}

/// Error for public directory operations
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("Upstream request failed: {0}")]
    RequestFailed(String),

    #[error("Upstream returned status {0}")]
    UnexpectedStatus(u16),

    #[error("Upstream response could not be decoded: {0}")]
    InvalidResponse(String),
}
