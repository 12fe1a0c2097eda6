//! Credential and session authentication for the quill content service.
//!
//! Provides the authentication primitives the HTTP layer composes:
//! - Password hashing and verification (Argon2id, tunable costs)
//! - Short-lived signed access tokens (HS256 JWT)
//! - Long-lived opaque refresh tokens with server-side revocation
//! - Authorization header credential extraction (Bearer, ApiKey)
//!
//! Routing, JSON marshaling, and the relational schema live in the service;
//! this crate only consumes a [`RefreshTokenStore`] implementation and a
//! constructor-time [`AuthConfig`].
//!
//! # Examples
//!
//! ## Password hashing
//! ```
//! use quill_auth::{HasherParams, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(HasherParams::default()).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("wrong_password", &hash).unwrap());
//! ```
//!
//! ## Access tokens
//! ```
//! use chrono::Duration;
//! use quill_auth::TokenHandler;
//! use uuid::Uuid;
//!
//! let handler = TokenHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = handler.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(handler.validate(&token).unwrap(), user_id);
//! ```
//!
//! ## Header extraction
//! ```
//! use quill_auth::{extract, Scheme};
//!
//! let credential = extract(Some("Bearer abc123"), Scheme::Bearer).unwrap();
//! assert_eq!(credential, "abc123");
//! ```

pub mod authenticator;
pub mod clock;
pub mod config;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthError;
pub use authenticator::Authenticator;
pub use authenticator::ErrorClass;
pub use authenticator::SessionTokens;
pub use clock::Clock;
pub use clock::SystemClock;
pub use config::AuthConfig;
pub use header::extract;
pub use header::ExtractError;
pub use header::Scheme;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::TokenHandler;
pub use password::HasherParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::RefreshError;
pub use refresh::RefreshToken;
pub use refresh::RefreshTokenService;
pub use refresh::RefreshTokenStore;
pub use refresh::StoreError;
