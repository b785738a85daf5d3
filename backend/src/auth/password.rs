//! Password hashing using bcrypt
//!
//! Salted, adaptive hashing with a configurable work factor. Hashing and
//! verification are CPU-intensive, so async wrappers offload to the
//! blocking thread pool rather than stalling the runtime.

use anyhow::Result;
use tracing::warn;

/// Password hashing service
///
/// The work factor comes from configuration; raising it slows offline
/// brute-force attempts at the cost of login latency.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking operation)
    ///
    /// A fresh random salt is generated per call, so hashing the same
    /// password twice yields different strings.
    pub fn hash(password: &str, cost: u32) -> Result<String> {
        bcrypt::hash(password, cost).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String, cost: u32) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Never fails: a stored hash that cannot be parsed verifies as `false`,
    /// indistinguishable to the caller from a wrong password. The data
    /// integrity problem is recorded in the logs instead.
    pub fn verify(password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "stored password hash is not a valid bcrypt string");
                false
            }
        }
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the test suite fast; production cost comes from config.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify() {
        let password = "secure_password_123";
        let hash = PasswordService::hash(password, TEST_COST).unwrap();

        assert!(PasswordService::verify(password, &hash));
        assert!(!PasswordService::verify("wrong_password", &hash));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "test_password";
        let hash1 = PasswordService::hash(password, TEST_COST).unwrap();
        let hash2 = PasswordService::hash(password, TEST_COST).unwrap();

        // Hashes should be different due to random salt
        assert_ne!(hash1, hash2);

        // But both should verify correctly
        assert!(PasswordService::verify(password, &hash1));
        assert!(PasswordService::verify(password, &hash2));
    }

    #[test]
    fn test_verification_is_deterministic() {
        let hash = PasswordService::hash("pw123456", TEST_COST).unwrap();
        assert_eq!(
            PasswordService::verify("pw123456", &hash),
            PasswordService::verify("pw123456", &hash)
        );
    }

    #[test]
    fn test_malformed_hash_verifies_false() {
        assert!(!PasswordService::verify("anything", "not-a-bcrypt-hash"));
        assert!(!PasswordService::verify("anything", ""));
        assert!(!PasswordService::verify("anything", "$2b$12$truncated"));
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let password = "async_test_password".to_string();
        let hash = PasswordService::hash_async(password.clone(), TEST_COST)
            .await
            .unwrap();

        assert!(PasswordService::verify_async(password.clone(), hash.clone())
            .await
            .unwrap());
        assert!(!PasswordService::verify_async("wrong".to_string(), hash)
            .await
            .unwrap());
    }
}
