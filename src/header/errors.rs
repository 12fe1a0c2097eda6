use thiserror::Error;

/// Error type for authorization header parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No credential found in authorization header")]
    MissingCredential,
}
