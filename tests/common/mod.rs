use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use quill_auth::AuthConfig;
use quill_auth::Clock;
use quill_auth::RefreshToken;
use quill_auth::RefreshTokenStore;
use quill_auth::StoreError;

/// In-memory refresh token store with the same operation contract a
/// relational implementation provides.
#[derive(Default)]
pub struct InMemoryRefreshTokenStore {
    records: Mutex<HashMap<String, RefreshToken>>,
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
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

/// Controllable clock for deterministic expiry tests.
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn new() -> Self {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        Self(Mutex::new(start))
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Config with minimum-cost hashing so the test suite stays fast.
pub fn test_config(secret: &str) -> AuthConfig {
    let mut config = AuthConfig::new(secret);
    config.access_token_ttl_secs = 10;
    config.hasher.memory_kib = 8;
    config.hasher.iterations = 1;
    config.hasher.parallelism = 1;
    config
}
