use thiserror::Error;

/// Failure reported by a [`RefreshTokenStore`](super::ports::RefreshTokenStore)
/// implementation.
#[derive(Debug, Clone, Error)]
#[error("Refresh token store failure: {0}")]
pub struct StoreError(pub String);

/// Error type for refresh token operations.
#[derive(Debug, Clone, Error)]
pub enum RefreshError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token has been revoked")]
    Revoked,

    #[error("Refresh token has expired")]
    Expired,

    #[error("Entropy source unavailable: {0}")]
    Entropy(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
