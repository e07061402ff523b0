//! Password hashing and strength checks for PROJTRACK.
//!
//! Uses Argon2id for secure password hashing.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Special characters accepted (and required) in passwords.
pub const SPECIAL_CHARS: &str = "@$!%*?&";

// Argon2 parameters. Stored hashes produced with different parameters
// are transparently re-hashed on the next successful login.
const M_COST: u32 = 65536; // 64 MB
const T_COST: u32 = 3;
const P_COST: u32 = 4;

/// Password-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    TooLong,

    /// Password contains characters outside the accepted alphabet.
    #[error("password may only contain letters, digits, and {SPECIAL_CHARS}")]
    InvalidChars,

    /// No lowercase letter.
    #[error("password must contain a lowercase letter")]
    MissingLowercase,

    /// No uppercase letter.
    #[error("password must contain an uppercase letter")]
    MissingUppercase,

    /// No digit.
    #[error("password must contain a digit")]
    MissingDigit,

    /// No special character.
    #[error("password must contain a special character ({SPECIAL_CHARS})")]
    MissingSpecial,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

/// Create the Argon2 hasher with the current parameters.
fn create_argon2() -> Argon2<'static> {
    let params = Params::new(M_COST, T_COST, P_COST, None).expect("valid Argon2 params");
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}

/// Hash a password using Argon2id.
///
/// Returns a PHC-formatted hash string that includes the salt and
/// parameters. Strength policy is checked separately at the
/// registration and password-change boundaries, so stored credentials
/// that predate the current policy can still be re-hashed here.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = create_argon2();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// Returns `Ok(())` if the password matches, or an error if it doesn't.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    // Parameters are taken from the parsed hash, not from create_argon2()
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// Check whether a stored hash was produced with an outdated
/// configuration and should be re-hashed on the next successful login.
pub fn needs_rehash(hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    if parsed.algorithm.as_str() != "argon2id" {
        return Ok(true);
    }

    let params = Params::try_from(&parsed).map_err(|_| PasswordError::InvalidHash)?;
    Ok(params.m_cost() != M_COST || params.t_cost() != T_COST || params.p_cost() != P_COST)
}

/// Validate the password strength policy.
///
/// Requirements:
/// - Length: 8-128 characters
/// - At least one lowercase letter, uppercase letter, and digit
/// - At least one special character from `@$!%*?&`
/// - No characters outside letters, digits, and that special set
pub fn validate_password_strength(password: &str) -> Result<(), PasswordError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    if !password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || SPECIAL_CHARS.contains(c))
    {
        return Err(PasswordError::InvalidChars);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::MissingDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(PasswordError::MissingSpecial);
    }
    Ok(())
}
