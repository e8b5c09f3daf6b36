//! Stored password derivation (Argon2)

use crate::config::{PasswordSource, SecretKey};
use crate::error::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Derives the password material persisted for a new user.
///
/// Constructed once from configuration and owned by the user service for
/// its whole lifetime.
#[derive(Debug, Clone)]
pub struct PasswordDeriver {
    secret_key: SecretKey,
    source: PasswordSource,
}

impl PasswordDeriver {
    pub fn new(secret_key: SecretKey, source: PasswordSource) -> Self {
        Self { secret_key, source }
    }

    pub fn source(&self) -> PasswordSource {
        self.source
    }

    /// Hash the configured source into a PHC string.
    ///
    /// With [`PasswordSource::SecretKey`] the `supplied` password is ignored
    /// and every user receives a hash of the same secret.
    pub fn derive(&self, supplied: &str) -> Result<String> {
        match self.source {
            PasswordSource::SecretKey => hash_secret(self.secret_key.expose()),
            PasswordSource::Supplied => hash_secret(supplied),
        }
    }
}

/// Hash a secret using Argon2 with a random salt
pub fn hash_secret(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Error generating a secure password: {}", e))
        })?;
    Ok(hash.to_string())
}

/// Verify a secret against its stored hash
pub fn verify_secret(secret: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed_hash)
        .is_ok())
}
