use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashParseError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use serde::Deserialize;

use super::errors::PasswordError;

/// Argon2id cost parameters.
///
/// The defaults follow the current OWASP recommendation for Argon2id
/// (19 MiB memory, 2 iterations, 1 lane). Operators with faster or slower
/// hardware tune these through configuration rather than code changes.
#[derive(Debug, Clone, Deserialize)]
pub struct HasherParams {
    /// Memory cost in KiB.
    #[serde(default = "HasherParams::default_memory_kib")]
    pub memory_kib: u32,

    /// Number of passes over memory.
    #[serde(default = "HasherParams::default_iterations")]
    pub iterations: u32,

    /// Degree of parallelism (lanes).
    #[serde(default = "HasherParams::default_parallelism")]
    pub parallelism: u32,
}

impl HasherParams {
    fn default_memory_kib() -> u32 {
        Params::DEFAULT_M_COST
    }

    fn default_iterations() -> u32 {
        Params::DEFAULT_T_COST
    }

    fn default_parallelism() -> u32 {
        Params::DEFAULT_P_COST
    }
}

impl Default for HasherParams {
    fn default() -> Self {
        Self {
            memory_kib: Self::default_memory_kib(),
            iterations: Self::default_iterations(),
            parallelism: Self::default_parallelism(),
        }
    }
}

/// Password hashing implementation.
///
/// Uses Argon2id with per-hash random salts. The produced hash is in PHC
/// string format and self-describes its algorithm, parameters, and salt, so
/// `verify` works against hashes created under older cost settings.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a password hasher with the given cost parameters.
    ///
    /// # Arguments
    /// * `params` - Argon2id cost parameters
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters are outside the algorithm's valid range
    pub fn new(params: HasherParams) -> Result<Self, PasswordError> {
        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - The hashing engine failed; fatal for the request
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest comparison inside the argon2 crate is constant-time, so
    /// response timing does not leak the position of the first mismatching
    /// byte. A correct-format hash with a wrong password returns `Ok(false)`,
    /// never an error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - The stored hash does not parse
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        // Verification picks up the cost parameters embedded in the hash.
        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(HashParseError::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}
