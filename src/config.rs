use chrono::Duration;
use serde::Deserialize;

use crate::password::HasherParams;

const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 3600;
const DEFAULT_REFRESH_TOKEN_LIFETIME_SECS: i64 = 60 * 24 * 60 * 60;

/// Authentication configuration.
///
/// Supplied once at construction of the [`Authenticator`](crate::Authenticator);
/// nothing in this crate reads ambient process state. The struct derives
/// `Deserialize` so embedding services can layer it from their config files
/// and environment the same way they load the rest of their settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Symmetric secret for signing access tokens. Never logged.
    pub token_secret: String,

    /// Access token lifetime in seconds. Defaults to one hour.
    #[serde(default = "AuthConfig::default_access_token_ttl_secs")]
    pub access_token_ttl_secs: i64,

    /// Refresh token lifetime in seconds. Defaults to sixty days.
    #[serde(default = "AuthConfig::default_refresh_token_lifetime_secs")]
    pub refresh_token_lifetime_secs: i64,

    /// Password hashing cost parameters.
    #[serde(default)]
    pub hasher: HasherParams,
}

impl AuthConfig {
    /// Build a config with the given secret and default lifetimes.
    pub fn new(token_secret: impl Into<String>) -> Self {
        Self {
            token_secret: token_secret.into(),
            access_token_ttl_secs: Self::default_access_token_ttl_secs(),
            refresh_token_lifetime_secs: Self::default_refresh_token_lifetime_secs(),
            hasher: HasherParams::default(),
        }
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::seconds(self.access_token_ttl_secs)
    }

    pub fn refresh_token_lifetime(&self) -> Duration {
        Duration::seconds(self.refresh_token_lifetime_secs)
    }

    fn default_access_token_ttl_secs() -> i64 {
        DEFAULT_ACCESS_TOKEN_TTL_SECS
    }

    fn default_refresh_token_lifetime_secs() -> i64 {
        DEFAULT_REFRESH_TOKEN_LIFETIME_SECS
    }
}
