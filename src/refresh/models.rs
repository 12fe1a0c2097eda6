use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Length of an opaque refresh token string: 32 random bytes, hex-encoded.
pub const TOKEN_LEN: usize = 64;

/// A persisted refresh token record.
///
/// Created at login and owned by the backing store. The only mutation this
/// subsystem ever performs is setting `revoked_at`; revocation is monotonic
/// and a revoked record never returns to active. Expiry is a predicate over
/// `expires_at`, not a stored state, and expired rows are garbage-collected
/// by the store, never deleted here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshToken {
    /// Opaque token value: 64 lowercase hex characters.
    pub token: String,

    /// Owning user.
    pub user_id: Uuid,

    pub created_at: DateTime<Utc>,

    /// Always `created_at + lifetime` exactly.
    pub expires_at: DateTime<Utc>,

    /// Set once by revocation, never cleared.
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Whether the record is expired at `now`, with no grace period.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
