use thiserror::Error;

/// Error type for password operations.
///
/// A wrong password is not an error: `verify` reports it as `Ok(false)`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid hasher parameters: {0}")]
    InvalidParams(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
