//! User repository for PROJTRACK.
//!
//! CRUD operations and failed-login bookkeeping for user accounts.

use super::user::{NewUser, User};
use super::DbPool;
use crate::{ProjtrackError, Result};

const USER_COLUMNS: &str = "id, username, email, firstname, lastname, password, \
     failed_attempts, last_attempt, created_at";

/// Repository for user operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository over the given pool.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, firstname, lastname, password)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.firstname)
        .bind(&new_user.lastname)
        .bind(&new_user.password)
        .execute(self.pool)
        .await
        .map_err(|e| ProjtrackError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| ProjtrackError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| ProjtrackError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by username (case-insensitive).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ? COLLATE NOCASE"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| ProjtrackError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Check whether a username or email is already taken.
    pub async fn username_or_email_exists(&self, username: &str, email: &str) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users
             WHERE username = ? COLLATE NOCASE OR email = ? COLLATE NOCASE)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(self.pool)
        .await
        .map_err(|e| ProjtrackError::Database(e.to_string()))?;
        Ok(exists.0)
    }

    /// Record a failed login attempt.
    ///
    /// The increment is a single UPDATE statement; the lockout decision
    /// reads the counter in a separate SELECT, so concurrent attempts
    /// may race past the threshold.
    pub async fn record_failed_attempt(&self, id: i64) -> Result<()> {
        sqlx::query(
            "UPDATE users
             SET failed_attempts = failed_attempts + 1,
                 last_attempt = datetime('now')
             WHERE id = ?",
        )
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| ProjtrackError::Database(e.to_string()))?;
        Ok(())
    }

    /// Reset the failed-attempt counter to zero.
    pub async fn reset_failed_attempts(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE users SET failed_attempts = 0 WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| ProjtrackError::Database(e.to_string()))?;
        Ok(())
    }

    /// Replace the stored password hash.
    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<()> {
        sqlx::query("UPDATE users SET password = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| ProjtrackError::Database(e.to_string()))?;
        Ok(())
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
            .map_err(|e| ProjtrackError::Database(e.to_string()))?;
        Ok(count.0)
    }
}
