use std::sync::Arc;

use chrono::Duration;
use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;

use super::errors::RefreshError;
use super::models::RefreshToken;
use super::ports::RefreshTokenStore;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Issues, validates, and revokes opaque refresh tokens.
///
/// Tokens are 32 bytes of OS entropy, hex-encoded, and meaningful only via
/// lookup in the backing store. A token stays valid until it is explicitly
/// revoked or passes its expiry; validation does not rotate or consume it.
pub struct RefreshTokenService<S>
where
    S: RefreshTokenStore,
{
    store: Arc<S>,
    lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl<S> RefreshTokenService<S>
where
    S: RefreshTokenStore,
{
    /// Create a refresh token service.
    ///
    /// # Arguments
    /// * `store` - Persistence implementation for token records
    /// * `lifetime` - How long a newly created token stays valid
    pub fn new(store: Arc<S>, lifetime: Duration) -> Self {
        Self::with_clock(store, lifetime, Arc::new(SystemClock))
    }

    /// Create a refresh token service with an explicit time source.
    pub fn with_clock(store: Arc<S>, lifetime: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            lifetime,
            clock,
        }
    }

    /// Generate a fresh opaque token value.
    ///
    /// # Returns
    /// 64 lowercase hexadecimal characters encoding 32 random bytes
    ///
    /// # Errors
    /// * `Entropy` - The OS random source could not be read; fatal for the
    ///   enclosing request, not retried here
    pub fn generate(&self) -> Result<String, RefreshError> {
        let mut bytes = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| RefreshError::Entropy(e.to_string()))?;

        Ok(hex::encode(bytes))
    }

    /// Create and persist a refresh token record for a user.
    ///
    /// # Arguments
    /// * `user_id` - Owning user
    ///
    /// # Returns
    /// The persisted record, including the opaque token value
    ///
    /// # Errors
    /// * `Entropy` - Token generation failed
    /// * `Store` - Persistence failed; nothing was stored
    pub async fn create(&self, user_id: Uuid) -> Result<RefreshToken, RefreshError> {
        let now = self.clock.now();
        let record = RefreshToken {
            token: self.generate()?,
            user_id,
            created_at: now,
            expires_at: now + self.lifetime,
            revoked_at: None,
        };

        self.store.create(record.clone()).await?;
        tracing::debug!(user_id = %user_id, "created refresh token");

        Ok(record)
    }

    /// Validate a refresh token and return its owning user.
    ///
    /// Revocation is checked before expiry, so a revoked-and-expired token
    /// reports `Revoked`.
    ///
    /// # Arguments
    /// * `token` - Opaque token value presented by the client
    ///
    /// # Returns
    /// The user id associated with the record
    ///
    /// # Errors
    /// * `NotFound` - No record exists for this token
    /// * `Revoked` - The record has been revoked
    /// * `Expired` - `now() >= expires_at`
    /// * `Store` - Lookup failed
    pub async fn validate(&self, token: &str) -> Result<Uuid, RefreshError> {
        let record = self
            .store
            .find_by_token(token)
            .await?
            .ok_or(RefreshError::NotFound)?;

        if record.is_revoked() {
            tracing::warn!(user_id = %record.user_id, "refresh with revoked token");
            return Err(RefreshError::Revoked);
        }
        if record.is_expired(self.clock.now()) {
            tracing::debug!(user_id = %record.user_id, "refresh with expired token");
            return Err(RefreshError::Expired);
        }

        Ok(record.user_id)
    }

    /// Revoke a refresh token.
    ///
    /// Idempotent: revoking an already-revoked or unknown token succeeds as
    /// a no-op, so this path does not leak token existence through error
    /// codes.
    ///
    /// # Arguments
    /// * `token` - Opaque token value to revoke
    ///
    /// # Errors
    /// * `Store` - The store operation failed; the record is left untouched
    pub async fn revoke(&self, token: &str) -> Result<(), RefreshError> {
        self.store.revoke(token).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::clock::FixedClock;
    use crate::refresh::errors::StoreError;
    use crate::refresh::models::TOKEN_LEN;

    #[derive(Default)]
    struct InMemoryStore {
        records: Mutex<HashMap<String, RefreshToken>>,
    }

    #[async_trait]
    impl RefreshTokenStore for InMemoryStore {
        async fn create(&self, record: RefreshToken) -> Result<(), StoreError> {
            self.records
                .lock()
                .unwrap()
                .insert(record.token.clone(), record);
            Ok(())
        }

        async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, StoreError> {
            Ok(self.records.lock().unwrap().get(token).cloned())
        }

        async fn revoke(&self, token: &str) -> Result<(), StoreError> {
            if let Some(record) = self.records.lock().unwrap().get_mut(token) {
                record.revoked_at.get_or_insert_with(Utc::now);
            }
            Ok(())
        }
    }

    fn service() -> (
        RefreshTokenService<InMemoryStore>,
        Arc<InMemoryStore>,
        Arc<FixedClock>,
    ) {
        let store = Arc::new(InMemoryStore::default());
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::new(start));
        let service =
            RefreshTokenService::with_clock(store.clone(), Duration::days(60), clock.clone());
        (service, store, clock)
    }

    #[test]
    fn test_generate_format() {
        let (service, _, _) = service();

        let token = service.generate().expect("Failed to generate token");
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_generate_no_collisions() {
        let (service, _, _) = service();

        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(service.generate().unwrap()));
        }
    }

    #[tokio::test]
    async fn test_create_then_validate() {
        let (service, _, _) = service();
        let user_id = Uuid::new_v4();

        let record = service.create(user_id).await.expect("Failed to create");
        assert_eq!(record.user_id, user_id);
        assert_eq!(record.expires_at - record.created_at, Duration::days(60));
        assert!(record.revoked_at.is_none());

        let validated = service.validate(&record.token).await.unwrap();
        assert_eq!(validated, user_id);
    }

    #[tokio::test]
    async fn test_validate_unknown_token() {
        let (service, _, _) = service();

        let result = service.validate(&"0".repeat(64)).await;
        assert!(matches!(result, Err(RefreshError::NotFound)));
    }

    #[tokio::test]
    async fn test_validate_does_not_rotate() {
        let (service, _, _) = service();

        let record = service.create(Uuid::new_v4()).await.unwrap();
        for _ in 0..3 {
            assert!(service.validate(&record.token).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_revoke_then_validate() {
        let (service, _, _) = service();

        let record = service.create(Uuid::new_v4()).await.unwrap();
        service.revoke(&record.token).await.unwrap();

        let result = service.validate(&record.token).await;
        assert!(matches!(result, Err(RefreshError::Revoked)));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let (service, _, clock) = service();

        let record = service.create(Uuid::new_v4()).await.unwrap();
        clock.advance(Duration::days(60));

        let result = service.validate(&record.token).await;
        assert!(matches!(result, Err(RefreshError::Expired)));
    }

    #[tokio::test]
    async fn test_revoked_takes_precedence_over_expired() {
        let (service, _, clock) = service();

        let record = service.create(Uuid::new_v4()).await.unwrap();
        service.revoke(&record.token).await.unwrap();
        clock.advance(Duration::days(61));

        let result = service.validate(&record.token).await;
        assert!(matches!(result, Err(RefreshError::Revoked)));
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let (service, _, _) = service();

        let record = service.create(Uuid::new_v4()).await.unwrap();
        service.revoke(&record.token).await.unwrap();
        service.revoke(&record.token).await.unwrap();

        // Revoking a token that never existed is also a no-op.
        service.revoke("does-not-exist").await.unwrap();
    }
}
