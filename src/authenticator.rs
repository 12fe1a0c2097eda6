use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;
use uuid::Uuid;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::config::AuthConfig;
use crate::header::extract;
use crate::header::ExtractError;
use crate::header::Scheme;
use crate::jwt::JwtError;
use crate::jwt::TokenHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::RefreshError;
use crate::refresh::RefreshTokenService;
use crate::refresh::RefreshTokenStore;

/// Authentication coordinator for HTTP handlers.
///
/// Composes password hashing, access token issuance, header extraction, and
/// the refresh token service. Password hashing is dispatched to the blocking
/// thread pool so a slow Argon2 run never stalls unrelated requests on the
/// async runtime.
pub struct Authenticator<S>
where
    S: RefreshTokenStore,
{
    password_hasher: PasswordHasher,
    token_handler: TokenHandler,
    refresh_tokens: RefreshTokenService<S>,
    access_token_ttl: Duration,
}

/// Token pair returned by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct SessionTokens {
    /// Short-lived signed access token.
    pub access_token: String,

    /// Long-lived opaque refresh token.
    pub refresh_token: String,
}

/// Broad classification of an authentication error.
///
/// Handlers map every `Authentication` error to one generic unauthorized
/// response so the distinction between a bad signature, an expired token,
/// and an unknown token never reaches the client; the precise variant stays
/// available internally for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed input: header, hash, or token encoding. Client error.
    Validation,

    /// Credential or token rejected. Collapse to a generic unauthorized.
    Authentication,

    /// Subsystem failure. Fatal for this request; the caller may retry the
    /// whole operation.
    Internal,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Incorrect password")]
    IncorrectPassword,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Jwt(#[from] JwtError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Refresh(#[from] RefreshError),

    #[error("Blocking task failed: {0}")]
    TaskFailed(String),
}

impl AuthError {
    /// Classify this error for response mapping.
    pub fn class(&self) -> ErrorClass {
        match self {
            AuthError::IncorrectPassword => ErrorClass::Authentication,

            AuthError::Password(PasswordError::MalformedHash(_)) => ErrorClass::Validation,
            AuthError::Password(_) => ErrorClass::Internal,

            AuthError::Jwt(JwtError::InvalidSignature) | AuthError::Jwt(JwtError::Expired) => {
                ErrorClass::Authentication
            }
            AuthError::Jwt(JwtError::EncodingFailed(_)) => ErrorClass::Internal,
            AuthError::Jwt(_) => ErrorClass::Validation,

            AuthError::Extract(ExtractError::MissingCredential) => ErrorClass::Validation,

            AuthError::Refresh(RefreshError::NotFound)
            | AuthError::Refresh(RefreshError::Revoked)
            | AuthError::Refresh(RefreshError::Expired) => ErrorClass::Authentication,
            AuthError::Refresh(_) => ErrorClass::Internal,

            AuthError::TaskFailed(_) => ErrorClass::Internal,
        }
    }
}

impl<S> Authenticator<S>
where
    S: RefreshTokenStore,
{
    /// Create an authenticator from configuration and a refresh token store.
    ///
    /// # Arguments
    /// * `config` - Signing secret, token lifetimes, and hasher parameters
    /// * `store` - Refresh token persistence implementation
    ///
    /// # Errors
    /// * `Password(InvalidParams)` - Hasher parameters are out of range
    pub fn new(config: &AuthConfig, store: Arc<S>) -> Result<Self, AuthError> {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    /// Create an authenticator with an explicit time source.
    pub fn with_clock(
        config: &AuthConfig,
        store: Arc<S>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(config.hasher.clone())?,
            token_handler: TokenHandler::with_clock(
                config.token_secret.as_bytes(),
                clock.clone(),
            ),
            refresh_tokens: RefreshTokenService::with_clock(
                store,
                config.refresh_token_lifetime(),
                clock,
            ),
            access_token_ttl: config.access_token_ttl(),
        })
    }

    /// Hash a password for storage, off the async runtime.
    ///
    /// # Errors
    /// * `Password(HashingFailed)` - The hashing engine failed
    /// * `TaskFailed` - The blocking task was cancelled or panicked
    pub async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.password_hasher.clone();

        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::TaskFailed(e.to_string()))??;

        Ok(hash)
    }

    /// Verify a password and mint a session token pair.
    ///
    /// # Arguments
    /// * `user_id` - The user whose stored hash is being checked
    /// * `password` - Plaintext password from the login request
    /// * `stored_hash` - The user's stored password hash
    ///
    /// # Returns
    /// Access and refresh tokens; the refresh record is persisted
    ///
    /// # Errors
    /// * `IncorrectPassword` - Password does not match
    /// * `Password(MalformedHash)` - Stored hash does not parse
    /// * `Refresh(..)` / `Jwt(..)` - Token issuance failed
    pub async fn login(
        &self,
        user_id: Uuid,
        password: String,
        stored_hash: String,
    ) -> Result<SessionTokens, AuthError> {
        let hasher = self.password_hasher.clone();

        let matched = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| AuthError::TaskFailed(e.to_string()))??;

        if !matched {
            tracing::warn!(user_id = %user_id, "login with incorrect password");
            return Err(AuthError::IncorrectPassword);
        }

        let access_token = self.token_handler.issue(user_id, self.access_token_ttl)?;
        let refresh_record = self.refresh_tokens.create(user_id).await?;

        Ok(SessionTokens {
            access_token,
            refresh_token: refresh_record.token,
        })
    }

    /// Authenticate a protected request from its authorization header.
    ///
    /// # Arguments
    /// * `authorization` - Raw header value, or `None` if absent
    ///
    /// # Returns
    /// The authenticated user's id
    pub fn authorize(&self, authorization: Option<&str>) -> Result<Uuid, AuthError> {
        let token = extract(authorization, Scheme::Bearer)?;
        let user_id = self.token_handler.validate(&token)?;
        Ok(user_id)
    }

    /// Extract an API key from an authorization header.
    ///
    /// Used by webhook ingestion, which authenticates with a static key
    /// rather than a user session.
    pub fn api_key(&self, authorization: Option<&str>) -> Result<String, AuthError> {
        let key = extract(authorization, Scheme::ApiKey)?;
        Ok(key)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The refresh token itself is not rotated: it stays valid until revoked
    /// or expired.
    ///
    /// # Arguments
    /// * `authorization` - Raw header value carrying `Bearer <refresh token>`
    ///
    /// # Returns
    /// A freshly minted access token
    pub async fn refresh(&self, authorization: Option<&str>) -> Result<String, AuthError> {
        let token = extract(authorization, Scheme::Bearer)?;
        let user_id = self.refresh_tokens.validate(&token).await?;

        let access_token = self.token_handler.issue(user_id, self.access_token_ttl)?;
        Ok(access_token)
    }

    /// Revoke the refresh token presented in an authorization header.
    ///
    /// Idempotent; revoking an unknown token succeeds.
    pub async fn revoke(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        let token = extract(authorization, Scheme::Bearer)?;
        self.refresh_tokens.revoke(&token).await?;
        Ok(())
    }
}
