//! Database schema and migrations for PROJTRACK.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- Users table for authentication and account management
CREATE TABLE users (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    username         TEXT NOT NULL UNIQUE,
    email            TEXT NOT NULL UNIQUE,
    firstname        TEXT NOT NULL,
    lastname         TEXT NOT NULL,
    password         TEXT NOT NULL,           -- Argon2 hash
    failed_attempts  INTEGER NOT NULL DEFAULT 0,
    last_attempt     TEXT,                    -- timestamp of last failed login
    created_at       TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_username ON users(username);
CREATE INDEX idx_users_email ON users(email);
"#,
    // v2: Projects table
    r#"
-- Projects table; every project belongs to exactly one user
CREATE TABLE projects (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id          INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title             TEXT NOT NULL,
    short_description TEXT NOT NULL,
    start_date        TEXT NOT NULL,           -- ISO date
    end_date          TEXT,                    -- ISO date, optional
    phase             TEXT NOT NULL DEFAULT 'design',  -- 'design', 'development', 'testing', 'deployment', 'complete'
    created_at        TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at        TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_projects_owner_id ON projects(owner_id);
CREATE INDEX idx_projects_phase ON projects(phase);
CREATE INDEX idx_projects_start_date ON projects(start_date);
CREATE INDEX idx_projects_created_at ON projects(created_at);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_first_migration_contains_users_table() {
        let first = MIGRATIONS[0];
        assert!(first.contains("CREATE TABLE users"));
        assert!(first.contains("username"));
        assert!(first.contains("password"));
        assert!(first.contains("failed_attempts"));
        assert!(first.contains("last_attempt"));
    }

    #[test]
    fn test_projects_migration_contains_projects_table() {
        let projects_migration = MIGRATIONS[1];
        assert!(projects_migration.contains("CREATE TABLE projects"));
        assert!(projects_migration.contains("owner_id"));
        assert!(projects_migration.contains("title"));
        assert!(projects_migration.contains("short_description"));
        assert!(projects_migration.contains("start_date"));
        assert!(projects_migration.contains("end_date"));
        assert!(projects_migration.contains("phase"));
    }

    #[test]
    fn test_migrations_are_valid_sql() {
        for migration in MIGRATIONS {
            assert!(!migration.trim().is_empty());
            assert!(
                migration.contains("CREATE TABLE")
                    || migration.contains("ALTER TABLE")
                    || migration.contains("CREATE INDEX")
            );
        }
    }
}
