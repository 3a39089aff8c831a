//! Credential hashing and secret generation using Argon2id.

use crate::errors::{ManagerError, Result};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::RngCore;

/// Hash a secret with Argon2id.
///
/// Returns a PHC-formatted string that includes algorithm, parameters,
/// salt, and hash, suitable for storing in a `User` record.
pub fn hash_secret(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());

    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| ManagerError::Credential(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a secret against a PHC-formatted hash from [`hash_secret`].
///
/// Returns `Ok(false)` on a mismatch; `Err` only for a malformed hash.
pub fn verify_secret(secret: &str, hash_str: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash_str).map_err(|e| ManagerError::Credential(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate a random secret: 16 bytes from the thread CSPRNG, hex-encoded.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_secret("correct horse battery staple").unwrap();

        assert!(verify_secret("correct horse battery staple", &hash).unwrap());
        assert!(!verify_secret("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hash_includes_parameters() {
        let hash = hash_secret("test password").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_malformed_hash() {
        let err = verify_secret("anything", "not a phc string").unwrap_err();
        assert!(matches!(err, ManagerError::Credential(_)));
    }

    #[test]
    fn test_generate_secret_shape() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 32);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_secret_is_random() {
        assert_ne!(generate_secret(), generate_secret());
    }
}
