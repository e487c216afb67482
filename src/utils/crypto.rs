use bcrypt::BcryptError;

/// Work factor for bcrypt. Each attempt costs 2^12 rounds.
pub const HASH_COST: u32 = 12;

/// Salted one-way hash of a plaintext password. A fresh salt is generated per
/// call, so hashing the same password twice yields different strings.
pub fn hash_password(plaintext: &str) -> Result<String, BcryptError> {
    bcrypt::hash(plaintext, HASH_COST)
}

/// Recomputes with the salt embedded in `hashed` and compares. The comparison
/// inside bcrypt is constant-time.
pub fn verify_password(plaintext: &str, hashed: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plaintext, hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_roundtrip() {
        let hashed = hash_password("secret123").unwrap();
        assert!(verify_password("secret123", &hashed).unwrap());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hashed = hash_password("secret123").unwrap();
        assert!(!verify_password("secret124", &hashed).unwrap());
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hashed = hash_password("secret123").unwrap();
        assert_ne!(hashed, "secret123");
        assert!(hashed.starts_with("$2"));
    }

    #[test]
    fn test_salts_differ_per_call() {
        let first = hash_password("secret123").unwrap();
        let second = hash_password("secret123").unwrap();
        assert_ne!(first, second);
    }
}
