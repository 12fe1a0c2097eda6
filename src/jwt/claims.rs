use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Issuer written into every access token.
pub const ISSUER: &str = "quill";

/// Registered claims carried by an access token.
///
/// Every field is required: a token missing any of them fails validation as
/// malformed. Constructed fresh per token and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Issuer, always [`ISSUER`].
    pub iss: String,

    /// Subject: the authenticated user's id.
    pub sub: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp). Always `iat + ttl` exactly.
    pub exp: i64,
}

impl AccessClaims {
    /// Build claims for a user authenticated at `issued_at`, expiring after
    /// `ttl_seconds`.
    pub fn new(user_id: Uuid, issued_at: DateTime<Utc>, ttl_seconds: i64) -> Self {
        let iat = issued_at.timestamp();
        Self {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat,
            exp: iat + ttl_seconds,
        }
    }

    /// Whether the token is expired at `now`, with no grace period.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expiry_is_exactly_issued_at_plus_ttl() {
        let issued = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let claims = AccessClaims::new(Uuid::new_v4(), issued, 600);

        assert_eq!(claims.exp - claims.iat, 600);
        assert_eq!(claims.iss, ISSUER);
    }

    #[test]
    fn test_is_expired_has_no_leeway() {
        let issued = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let claims = AccessClaims::new(Uuid::new_v4(), issued, 10);

        let just_before = issued + chrono::Duration::seconds(9);
        let exactly_at = issued + chrono::Duration::seconds(10);
        let just_after = issued + chrono::Duration::seconds(11);

        assert!(!claims.is_expired(just_before));
        assert!(claims.is_expired(exactly_at));
        assert!(claims.is_expired(just_after));
    }
}
