//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_the_original_password() {
        let hashed = hash_password("admin123").unwrap();
        assert!(verify_password("admin123", &hashed).unwrap());
    }

    #[test]
    fn verify_rejects_a_wrong_password() {
        let hashed = hash_password("admin123").unwrap();
        assert!(!verify_password("admin124", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("user123").unwrap();
        let b = hash_password("user123").unwrap();
        assert_ne!(a, b);
    }
}
