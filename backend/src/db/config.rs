//! Database configuration and environment variable handling.

use std::env;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "availability.db";

/// Configuration for opening the SQLite database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
    /// Path to the database file (a `sqlite:///` URL is accepted and stripped)
    pub database_path: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Connection checkout timeout in seconds
    pub connection_timeout_sec: u64,
    /// SQLite busy timeout in milliseconds
    pub busy_timeout_ms: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            max_pool_size: 8,
            connection_timeout_sec: 30,
            busy_timeout_ms: 5000,
        }
    }
}

impl SqliteConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` or `SQLITE_DATABASE_PATH` (optional, default: `availability.db`)
    /// - `SQLITE_POOL_MAX` (optional, default: 8)
    /// - `SQLITE_CONN_TIMEOUT_SEC` (optional, default: 30)
    /// - `SQLITE_BUSY_TIMEOUT_MS` (optional, default: 5000)
    ///
    /// # Errors
    /// Returns an error if a numeric variable is set but does not parse.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let database_path = env::var("DATABASE_URL")
            .or_else(|_| env::var("SQLITE_DATABASE_PATH"))
            .unwrap_or(defaults.database_path);

        let max_pool_size = parse_env("SQLITE_POOL_MAX", defaults.max_pool_size)?;
        if max_pool_size == 0 {
            return Err("SQLITE_POOL_MAX must be at least 1".to_string());
        }
        let connection_timeout_sec =
            parse_env("SQLITE_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec)?;
        let busy_timeout_ms = parse_env("SQLITE_BUSY_TIMEOUT_MS", defaults.busy_timeout_ms)?;

        Ok(Self {
            database_path,
            max_pool_size,
            connection_timeout_sec,
            busy_timeout_ms,
        })
    }

    /// Create a new configuration for a database file.
    pub fn with_path(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            ..Default::default()
        }
    }

    /// The path to open, without any URL scheme.
    ///
    /// URLs follow the `sqlite:///relative.db` / `sqlite:////absolute.db`
    /// convention, so the scheme is `sqlite:///` when present.
    pub fn connection_path(&self) -> &str {
        let path = self.database_path.as_str();
        ["sqlite:///", "sqlite://", "sqlite:"]
            .iter()
            .find_map(|scheme| path.strip_prefix(scheme))
            .unwrap_or(path)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| format!("{} must be a valid number, got '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_path_strips_scheme() {
        assert_eq!(
            SqliteConfig::with_path("sqlite://data/a.db").connection_path(),
            "data/a.db"
        );
        assert_eq!(
            SqliteConfig::with_path("sqlite:a.db").connection_path(),
            "a.db"
        );
        assert_eq!(SqliteConfig::with_path("a.db").connection_path(), "a.db");
    }

    #[test]
    fn test_connection_path_three_slash_url_is_relative() {
        assert_eq!(
            SqliteConfig::with_path("sqlite:///./availability.db").connection_path(),
            "./availability.db"
        );
        assert_eq!(
            SqliteConfig::with_path("sqlite:///data/a.db").connection_path(),
            "data/a.db"
        );
        assert_eq!(
            SqliteConfig::with_path("sqlite:////var/lib/a.db").connection_path(),
            "/var/lib/a.db"
        );
    }

    #[test]
    fn test_default_config() {
        let config = SqliteConfig::default();
        assert_eq!(config.database_path, DEFAULT_DATABASE_PATH);
        assert_eq!(config.max_pool_size, 8);
        assert_eq!(config.connection_timeout_sec, 30);
        assert_eq!(config.busy_timeout_ms, 5000);
    }
}
