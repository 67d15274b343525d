use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures keep the message produced by `jsonwebtoken` so it can
/// be reported back to the caller as-is.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("{0}")]
    InvalidToken(String),
}
