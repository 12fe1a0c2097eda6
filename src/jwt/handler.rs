use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::AccessClaims;
use super::errors::JwtError;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Issues and validates signed access tokens.
///
/// Tokens are compact three-segment JWTs signed with HS256 under a symmetric
/// secret supplied at construction. Signature verification is delegated to
/// the jsonwebtoken crate (constant-time comparison); expiry is evaluated
/// here against an injectable clock so it carries no leeway and tests can
/// pin `now()`.
pub struct TokenHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    clock: Arc<dyn Clock>,
}

impl TokenHandler {
    /// Create a token handler bound to a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret; should be at least 32 bytes
    pub fn new(secret: &[u8]) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    /// Create a token handler with an explicit time source.
    pub fn with_clock(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            clock,
        }
    }

    /// Mint a signed access token for a user.
    ///
    /// # Arguments
    /// * `user_id` - Subject of the token
    /// * `ttl` - Token lifetime; `exp` is set to `iat + ttl` exactly
    ///
    /// # Returns
    /// Compact JWT string (header.payload.signature, base64url)
    ///
    /// # Errors
    /// * `InvalidLifetime` - `ttl` is zero or negative (caller contract violation)
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        if ttl <= Duration::zero() {
            return Err(JwtError::InvalidLifetime);
        }

        let claims = AccessClaims::new(user_id, self.clock.now(), ttl.num_seconds());
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its subject.
    ///
    /// Signature and expiry are independent checks: a tampered token fails
    /// with `InvalidSignature` and an authentic-but-stale token fails with
    /// `Expired`, so diagnostics can tell the two apart even though callers
    /// collapse both into a generic authentication failure.
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    ///
    /// # Returns
    /// The user id from the `sub` claim
    ///
    /// # Errors
    /// * `Malformed` - Encoding or claim structure does not parse
    /// * `InvalidSignature` - Signature does not verify under the secret
    /// * `Expired` - `now() >= exp`, with no grace period
    /// * `InvalidSubject` - `sub` is not a valid user id
    pub fn validate(&self, token: &str) -> Result<Uuid, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the injected clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        let claims = token_data.claims;
        if claims.is_expired(self.clock.now()) {
            return Err(JwtError::Expired);
        }

        Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidSubject)
    }
}
