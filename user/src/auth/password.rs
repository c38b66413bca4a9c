//! Argon2id password hashing.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;

use crate::error::{Result, UserError};

static PRODUCTION: Lazy<PasswordConfig> = Lazy::new(PasswordConfig::default);

/// Cost parameters for Argon2id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl PasswordConfig {
    /// Cheapest valid parameters. Only for tests.
    pub fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

/// Hashes and verifies passwords with a fixed set of Argon2id parameters.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    config: PasswordConfig,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(*PRODUCTION)
    }
}

impl PasswordHasher {
    pub fn new(config: PasswordConfig) -> Self {
        Self { config }
    }

    fn argon2(&self) -> Result<Argon2<'static>> {
        let params = Params::new(
            self.config.memory_kib,
            self.config.iterations,
            self.config.parallelism,
            None,
        )
        .map_err(|e| UserError::Configuration(format!("Invalid argon2 parameters: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash with a fresh random salt. The result is a PHC string.
    pub fn hash(&self, plain: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()?
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    /// Check `plain` against a stored PHC string. The parameters embedded in
    /// the hash take precedence over this hasher's configuration.
    pub fn verify(&self, plain: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;
        Ok(self
            .argon2()?
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(PasswordConfig::minimal());
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::new(PasswordConfig::minimal());
        let first = hasher.hash("password1").unwrap();
        let second = hasher.hash("password1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = PasswordHasher::new(PasswordConfig::minimal());
        assert!(matches!(
            hasher.verify("password1", "not-a-phc-string"),
            Err(UserError::PasswordHash(_))
        ));
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let hasher = PasswordHasher::new(PasswordConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 0,
        });
        assert!(matches!(
            hasher.hash("password1"),
            Err(UserError::Configuration(_))
        ));
    }
}
