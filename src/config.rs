//! Configuration module for PROJTRACK.

use serde::Deserialize;
use std::path::Path;

use crate::{ProjtrackError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/projtrack.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Security configuration: session timeout and login lockout policy.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Session inactivity timeout in seconds.
    #[serde(default = "default_session_timeout")]
    pub session_timeout_secs: u64,
    /// Failed login attempts before the account is locked.
    #[serde(default = "default_lockout_attempts")]
    pub lockout_max_attempts: i64,
    /// Lockout window in seconds.
    #[serde(default = "default_lockout_window")]
    pub lockout_window_secs: u64,
}

fn default_session_timeout() -> u64 {
    900
}

fn default_lockout_attempts() -> i64 {
    5
}

fn default_lockout_window() -> u64 {
    300
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            session_timeout_secs: default_session_timeout(),
            lockout_max_attempts: default_lockout_attempts(),
            lockout_window_secs: default_lockout_window(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path of the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/projtrack.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Security settings.
    #[serde(default)]
    pub security: SecurityConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ProjtrackError::Config(format!("failed to parse config: {e}")))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "data/projtrack.db");
        assert_eq!(config.security.session_timeout_secs, 900);
        assert_eq!(config.security.lockout_max_attempts, 5);
        assert_eq!(config.security.lockout_window_secs, 300);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 9000

[database]
path = "/tmp/test.db"

[security]
session_timeout_secs = 600
lockout_max_attempts = 3
lockout_window_secs = 120

[logging]
level = "debug"
file = "/tmp/test.log"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.path, "/tmp/test.db");
        assert_eq!(config.security.session_timeout_secs, 600);
        assert_eq!(config.security.lockout_max_attempts, 3);
        assert_eq!(config.security.lockout_window_secs, 120);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[server]
port = 3000
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 3000);
        // Everything else falls back to defaults
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.security.lockout_max_attempts, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "this is not toml [[[").unwrap();

        let result = Config::load(file.path());
        assert!(matches!(result, Err(ProjtrackError::Config(_))));
    }
}
