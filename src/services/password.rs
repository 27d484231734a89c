// src/services/password.rs
// DOCUMENTATION: One-way password hashing
// PURPOSE: Users never have plaintext passwords persisted

use crate::errors::PlacesError;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use rand::rngs::OsRng;

/// Hash a plaintext password with a fresh salt (PHC string format)
pub fn hash_password(password: &str) -> Result<String, PlacesError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            log::error!("Failed to hash password: {}", e);
            PlacesError::StorageError(format!("Failed to hash password: {}", e))
        })
}

/// Check a plaintext password against a stored hash
/// DOCUMENTATION: An unparseable stored hash never verifies
#[cfg(test)]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    use argon2::{PasswordHash, PasswordVerifier};

    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}
