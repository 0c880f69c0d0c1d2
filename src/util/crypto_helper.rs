use argon2::password_hash::SaltString;
use argon2::{Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretString};

/// Builds the Argon2id hasher keyed with the server-side pepper.
fn argon2_with_pepper(pepper: &SecretString) -> Result<Argon2<'_>, argon2::Error> {
    let pepper = pepper.expose_secret().as_bytes();
    if pepper.is_empty() {
        return Ok(Argon2::default());
    }
    Argon2::new_with_secret(
        pepper,
        argon2::Algorithm::Argon2id,
        Version::V0x13,
        Params::default(),
    )
}

/// Hashes a password with Argon2id and a random salt.
///
/// # Arguments
///
/// * `pepper` - Server-side secret mixed into every hash (may be empty).
/// * `password` - The plain text password.
///
/// # Returns
///
/// The PHC formatted hash string, or an error message if hashing fails.
pub fn hash_password(pepper: &SecretString, password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = argon2_with_pepper(pepper).map_err(|e| format!("Invalid argon2 setup: {}", e))?;
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| format!("Hashing failed: {}", e))
}

/// Verifies `password` against a stored PHC hash.
///
/// Malformed hashes never verify.
pub fn verify_password(pepper: &SecretString, password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };
    match argon2_with_pepper(pepper) {
        Ok(argon2) => argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Runs a throwaway verification so unknown accounts take as long as known ones.
pub fn fake_password_verification(pepper: &SecretString, dummy_hash: &SecretString) {
    let _ = verify_password(pepper, "dummy-password", dummy_hash.expose_secret());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_and_verifies_with_pepper() {
        let pepper: SecretString = "pepper".to_string().into();
        let hash = hash_password(&pepper, "correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&pepper, "correct horse", &hash));
        assert!(!verify_password(&pepper, "wrong horse", &hash));

        let other_pepper: SecretString = "other".to_string().into();
        assert!(!verify_password(&other_pepper, "correct horse", &hash));
    }

    #[test]
    fn empty_pepper_uses_plain_argon2() {
        let pepper: SecretString = String::new().into();
        let hash = hash_password(&pepper, "secret-password").unwrap();
        assert!(verify_password(&pepper, "secret-password", &hash));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        let pepper: SecretString = "pepper".to_string().into();
        assert!(!verify_password(&pepper, "anything", "not-a-phc-string"));
    }
}
