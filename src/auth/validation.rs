//! Input validation for PROJTRACK user registration.

use thiserror::Error;

use crate::auth::password::validate_password_strength;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum first/last name length.
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Validation errors for registration.
///
/// Display strings are the exact user-facing messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are missing.
    #[error("All fields are required.")]
    FieldsRequired,

    /// Email address has an invalid format.
    #[error("Please enter a valid email address.")]
    EmailInvalid,

    /// Username exceeds the length limit.
    #[error("Username must be under {MAX_USERNAME_LENGTH} characters.")]
    UsernameTooLong,

    /// First or last name exceeds the length limit.
    #[error("Names must be under {MAX_NAME_LENGTH} characters.")]
    NameTooLong,

    /// Email exceeds the length limit.
    #[error("Email must be under {MAX_EMAIL_LENGTH} characters.")]
    EmailTooLong,

    /// Password fails the strength policy.
    #[error(
        "Password must be at least 8 characters and include uppercase, lowercase, number, and special character."
    )]
    PasswordTooWeak,

    /// Password and confirmation differ.
    #[error("Passwords do not match.")]
    PasswordMismatch,

    /// Username or email is already registered.
    #[error("Username or email already exists.")]
    AlreadyExists,
}

/// Registration request data, trimmed at construction.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Email address.
    pub email: String,
    /// Desired username.
    pub username: String,
    /// Plaintext password (hashed before storage).
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
}

impl RegistrationRequest {
    /// Create a registration request, trimming surrounding whitespace.
    pub fn new(
        firstname: &str,
        lastname: &str,
        email: &str,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Self {
        Self {
            firstname: firstname.trim().to_string(),
            lastname: lastname.trim().to_string(),
            email: email.trim().to_string(),
            username: username.trim().to_string(),
            password: password.trim().to_string(),
            confirm_password: confirm_password.trim().to_string(),
        }
    }
}

/// Basic email format check: one @, non-empty local part, dotted
/// domain with no empty labels, no whitespace.
fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let (local, domain) = (parts[0], parts[1]);
    if local.is_empty() || !domain.contains('.') {
        return false;
    }
    if domain.split('.').any(|p| p.is_empty()) {
        return false;
    }
    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }

    true
}

/// Validate a registration request.
///
/// Rules are checked in order and the first violation is reported,
/// mirroring the sequential form validation of the registration page.
pub fn validate_registration(request: &RegistrationRequest) -> Result<(), ValidationError> {
    if request.firstname.is_empty()
        || request.lastname.is_empty()
        || request.email.is_empty()
        || request.username.is_empty()
        || request.password.is_empty()
    {
        return Err(ValidationError::FieldsRequired);
    }
    if !is_valid_email(&request.email) {
        return Err(ValidationError::EmailInvalid);
    }
    if request.username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }
    if request.firstname.len() > MAX_NAME_LENGTH || request.lastname.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    if request.email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }
    if validate_password_strength(&request.password).is_err() {
        return Err(ValidationError::PasswordTooWeak);
    }
    if request.password != request.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegistrationRequest {
        RegistrationRequest::new(
            "Jo",
            "Lee",
            "jo@example.com",
            "jolee",
            "P@ssw0rd!",
            "P@ssw0rd!",
        )
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration(&valid_request()).is_ok());
    }

    #[test]
    fn test_missing_fields() {
        let mut request = valid_request();
        request.firstname = String::new();
        assert_eq!(
            validate_registration(&request),
            Err(ValidationError::FieldsRequired)
        );

        let mut request = valid_request();
        request.password = String::new();
        assert_eq!(
            validate_registration(&request),
            Err(ValidationError::FieldsRequired)
        );
    }

    #[test]
    fn test_invalid_email() {
        for email in ["invalid", "@example.com", "user@", "user@example", "a b@example.com"] {
            let mut request = valid_request();
            request.email = email.to_string();
            assert_eq!(
                validate_registration(&request),
                Err(ValidationError::EmailInvalid),
                "email: {email}"
            );
        }
    }

    #[test]
    fn test_username_too_long() {
        let mut request = valid_request();
        request.username = "a".repeat(51);
        assert_eq!(
            validate_registration(&request),
            Err(ValidationError::UsernameTooLong)
        );

        // Exactly 50 is accepted
        let mut request = valid_request();
        request.username = "a".repeat(50);
        assert!(validate_registration(&request).is_ok());
    }

    #[test]
    fn test_name_too_long() {
        let mut request = valid_request();
        request.lastname = "a".repeat(51);
        assert_eq!(
            validate_registration(&request),
            Err(ValidationError::NameTooLong)
        );
    }

    #[test]
    fn test_email_too_long() {
        let mut request = valid_request();
        request.email = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            validate_registration(&request),
            Err(ValidationError::EmailTooLong)
        );
    }

    #[test]
    fn test_weak_password() {
        for password in ["short", "alllowercase1!", "ALLUPPERCASE1!", "NoDigits!!", "NoSpecial11"] {
            let mut request = valid_request();
            request.password = password.to_string();
            request.confirm_password = password.to_string();
            assert_eq!(
                validate_registration(&request),
                Err(ValidationError::PasswordTooWeak),
                "password: {password}"
            );
        }
    }

    #[test]
    fn test_password_mismatch() {
        let mut request = valid_request();
        request.confirm_password = "Differ3nt!".to_string();
        assert_eq!(
            validate_registration(&request),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_first_violation_wins() {
        // Both the email and the password are invalid; the email rule
        // comes first in the sequence
        let mut request = valid_request();
        request.email = "invalid".to_string();
        request.password = "weak".to_string();
        request.confirm_password = "weak".to_string();
        assert_eq!(
            validate_registration(&request),
            Err(ValidationError::EmailInvalid)
        );
    }

    #[test]
    fn test_request_trims_whitespace() {
        let request = RegistrationRequest::new(
            "  Jo  ",
            " Lee ",
            " jo@example.com ",
            " jolee ",
            " P@ssw0rd! ",
            " P@ssw0rd! ",
        );
        assert_eq!(request.firstname, "Jo");
        assert_eq!(request.email, "jo@example.com");
        assert!(validate_registration(&request).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::FieldsRequired.to_string(),
            "All fields are required."
        );
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match."
        );
        assert_eq!(
            ValidationError::AlreadyExists.to_string(),
            "Username or email already exists."
        );
    }
}
