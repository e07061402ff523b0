//! User model for PROJTRACK.

/// User entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique).
    pub username: String,
    /// Email address (unique).
    pub email: String,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Consecutive failed login attempts.
    pub failed_attempts: i64,
    /// Timestamp of the last failed login attempt.
    pub last_attempt: Option<String>,
    /// Account creation timestamp.
    pub created_at: String,
}

impl User {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Data for creating a new user.
///
/// The password must be pre-hashed with Argon2 before construction.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Password hash.
    pub password: String,
}

impl NewUser {
    /// Create a new user record.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            password: password.into(),
        }
    }
}
