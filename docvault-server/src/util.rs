//! Shared utility functions for docvault-server

/// Minimum password length for new accounts
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Canonical email form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Take a required string field, rejecting absent or blank values
pub fn required<'a>(value: &'a Option<String>) -> Option<&'a str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("admin123").unwrap();
        assert_ne!(hash, "admin123");
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("admin124", &hash));
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(!verify_password("admin123", "admin123"));
    }

    #[test]
    fn email_normalization() {
        assert_eq!(normalize_email("  Admin@Cafe.COM "), "admin@cafe.com");
    }

    #[test]
    fn required_rejects_blank() {
        assert_eq!(required(&Some("x".into())), Some("x"));
        assert_eq!(required(&Some("   ".into())), None);
        assert_eq!(required(&None), None);
    }
}
