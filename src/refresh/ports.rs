use async_trait::async_trait;

use super::errors::StoreError;
use super::models::RefreshToken;

/// Persistence port for refresh token records.
///
/// The store owns the schema and transport; this subsystem only relies on
/// the operation contract below. Concurrent `find_by_token` and `revoke`
/// calls on the same token must be linearizable: once `revoke` returns,
/// every subsequent lookup observes the record as revoked. Implementations
/// provide that guarantee themselves, typically with an atomic conditional
/// update on `revoked_at`; no extra locking layer is added here.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + 'static {
    /// Persist a new record. Either the complete record is stored or
    /// nothing is.
    async fn create(&self, record: RefreshToken) -> Result<(), StoreError>;

    /// Look up a record by its opaque token value.
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, StoreError>;

    /// Mark a record revoked by setting `revoked_at`.
    ///
    /// Idempotent: revoking an already-revoked or nonexistent token is a
    /// no-op, not an error.
    async fn revoke(&self, token: &str) -> Result<(), StoreError>;
}
