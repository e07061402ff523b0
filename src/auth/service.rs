//! Credential verification and password change for PROJTRACK.
//!
//! The login flow enforces the account lockout policy, upgrades
//! outdated password hashes, and keeps the failed-attempt counter.

use chrono::{NaiveDateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::password::{
    hash_password, needs_rehash, validate_password_strength, verify_password,
};
use crate::config::SecurityConfig;
use crate::db::{User, UserRepository};

/// Timestamp format used by the database (`datetime('now')`).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Authentication errors.
///
/// The bad-credentials message is identical whether or not the
/// username exists, so login responses never reveal which usernames
/// are registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong username or password.
    #[error("Invalid username or password.")]
    BadCredentials,

    /// Account is temporarily locked.
    #[error("Account locked due to too many failed logins. Try again later.")]
    Locked,

    /// Data store failure.
    #[error("database error: {0}")]
    Storage(String),
}

/// Account lockout policy.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Failed attempts before the account locks.
    pub max_attempts: i64,
    /// Seconds the lock lasts, measured from the last failed attempt.
    pub window_secs: u64,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_secs: 300,
        }
    }
}

impl From<&SecurityConfig> for LockoutPolicy {
    fn from(config: &SecurityConfig) -> Self {
        Self {
            max_attempts: config.lockout_max_attempts,
            window_secs: config.lockout_window_secs,
        }
    }
}

/// Seconds elapsed since a stored attempt timestamp.
///
/// An unparseable timestamp counts as infinitely old, which unlocks
/// the account rather than locking it forever.
fn seconds_since(timestamp: &str) -> i64 {
    match NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT) {
        Ok(t) => Utc::now()
            .naive_utc()
            .signed_duration_since(t)
            .num_seconds(),
        Err(_) => i64::MAX,
    }
}

/// Attempt to log a user in.
///
/// Flow:
/// 1. Locked check: `failed_attempts >= max` and the last failure is
///    inside the window rejects without touching the password. An
///    elapsed window resets the counter first.
/// 2. Password verification against the stored Argon2 hash.
/// 3. On success: re-hash transparently if the stored hash uses
///    outdated parameters, then reset the counter.
/// 4. On failure: increment the counter and stamp the attempt, but
///    only when the user actually exists.
pub async fn login(
    repo: &UserRepository<'_>,
    policy: &LockoutPolicy,
    username: &str,
    password: &str,
) -> Result<User, AuthError> {
    let user = repo
        .get_by_username(username)
        .await
        .map_err(|e| AuthError::Storage(e.to_string()))?;

    // Lockout check before any password work
    if let Some(ref user) = user {
        if user.failed_attempts >= policy.max_attempts {
            let elapsed = user.last_attempt.as_deref().map(seconds_since);

            if matches!(elapsed, Some(e) if e < policy.window_secs as i64) {
                warn!(username = %user.username, "Login blocked: account locked");
                return Err(AuthError::Locked);
            }

            // Lockout expired; reset before verifying
            repo.reset_failed_attempts(user.id)
                .await
                .map_err(|e| AuthError::Storage(e.to_string()))?;
        }
    }

    let Some(user) = user else {
        // No record to update; same response as a wrong password
        warn!(username = %username, "Login failed: unknown username");
        return Err(AuthError::BadCredentials);
    };

    match verify_password(password, &user.password) {
        Ok(()) => {
            // Upgrade hashes produced by an outdated configuration
            if needs_rehash(&user.password).unwrap_or(true) {
                let new_hash =
                    hash_password(password).map_err(|e| AuthError::Storage(e.to_string()))?;
                repo.update_password(user.id, &new_hash)
                    .await
                    .map_err(|e| AuthError::Storage(e.to_string()))?;
                info!(username = %user.username, "Password hash upgraded");
            }

            repo.reset_failed_attempts(user.id)
                .await
                .map_err(|e| AuthError::Storage(e.to_string()))?;

            info!(username = %user.username, user_id = user.id, "Login successful");
            Ok(user)
        }
        Err(_) => {
            repo.record_failed_attempt(user.id)
                .await
                .map_err(|e| AuthError::Storage(e.to_string()))?;
            warn!(username = %user.username, "Login failed: wrong password");
            Err(AuthError::BadCredentials)
        }
    }
}

/// Password-change request, trimmed at construction.
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    /// Current password, re-verified before any change.
    pub current_password: String,
    /// New password.
    pub new_password: String,
    /// Confirmation of the new password.
    pub confirm_password: String,
}

impl ChangePasswordRequest {
    /// Create a password-change request, trimming whitespace.
    pub fn new(current_password: &str, new_password: &str, confirm_password: &str) -> Self {
        Self {
            current_password: current_password.trim().to_string(),
            new_password: new_password.trim().to_string(),
            confirm_password: confirm_password.trim().to_string(),
        }
    }

    fn is_empty(&self) -> bool {
        self.current_password.is_empty()
            && self.new_password.is_empty()
            && self.confirm_password.is_empty()
    }
}

/// Password-change errors.
#[derive(Error, Debug)]
pub enum ChangePasswordError {
    /// One or more rules were violated; messages in evaluation order.
    #[error("password change validation failed")]
    Validation(Vec<String>),

    /// Data store failure.
    #[error("database error: {0}")]
    Storage(String),
}

/// Change a user's password.
///
/// Collects every violated rule (not just the first) so the user can
/// fix all of them at once. New-password-equal-to-old is deliberately
/// not rejected.
pub async fn change_password(
    repo: &UserRepository<'_>,
    user: &User,
    request: &ChangePasswordRequest,
) -> Result<(), ChangePasswordError> {
    if request.is_empty() {
        return Err(ChangePasswordError::Validation(vec![
            "Please fill in all fields to change your password.".to_string(),
        ]));
    }

    let mut errors = Vec::new();

    if request.current_password.is_empty()
        || request.new_password.is_empty()
        || request.confirm_password.is_empty()
    {
        errors.push("All password fields must be completed.".to_string());
    }
    if verify_password(&request.current_password, &user.password).is_err() {
        errors.push("Current password is incorrect.".to_string());
    }
    if request.new_password != request.confirm_password {
        errors.push("New passwords do not match.".to_string());
    }
    if validate_password_strength(&request.new_password).is_err() {
        errors.push(
            "Password must be at least 8 characters and include uppercase, lowercase, number, and special character."
                .to_string(),
        );
    }

    if !errors.is_empty() {
        return Err(ChangePasswordError::Validation(errors));
    }

    let hashed =
        hash_password(&request.new_password).map_err(|e| ChangePasswordError::Storage(e.to_string()))?;
    repo.update_password(user.id, &hashed)
        .await
        .map_err(|e| ChangePasswordError::Storage(e.to_string()))?;

    info!(username = %user.username, "Password changed");
    Ok(())
}
