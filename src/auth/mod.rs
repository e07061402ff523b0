//! Authentication for PROJTRACK.
//!
//! Password hashing, credential verification with lockout, input
//! validation for registration, and the password-change flow.

mod password;
mod service;
mod validation;

pub use password::{
    hash_password, needs_rehash, validate_password_strength, verify_password, PasswordError,
    MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, SPECIAL_CHARS,
};
pub use service::{
    change_password, login, AuthError, ChangePasswordError, ChangePasswordRequest, LockoutPolicy,
};
pub use validation::{
    validate_registration, RegistrationRequest, ValidationError, MAX_EMAIL_LENGTH,
    MAX_NAME_LENGTH, MAX_USERNAME_LENGTH,
};
