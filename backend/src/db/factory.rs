//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration. The resulting `Arc<dyn AvailabilityRepository>`
//! is built once at startup and handed to the HTTP layer.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "sqlite-repo")]
use super::repositories::SqliteRepository;
use super::repository::{AvailabilityRepository, RepositoryError, RepositoryResult};
use super::SqliteConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// SQLite + Diesel implementation
    Sqlite,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("sqlite", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Unset or unparsable values fall back to SQLite
    /// when that backend is compiled in, otherwise Local.
    pub fn from_env() -> Self {
        std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or_else(Self::default_for_build)
    }

    fn default_for_build() -> Self {
        if cfg!(feature = "sqlite-repo") {
            Self::Sqlite
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use availability::db::{RepositoryFactory, RepositoryType, SqliteConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = SqliteConfig::from_env()?;
///     let _on_disk = RepositoryFactory::create(RepositoryType::Sqlite, Some(&config)).await?;
///
///     let _in_memory = RepositoryFactory::create_local();
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `sqlite_config` - Database configuration (required for SQLite)
    pub async fn create(
        repo_type: RepositoryType,
        sqlite_config: Option<&SqliteConfig>,
    ) -> RepositoryResult<Arc<dyn AvailabilityRepository>> {
        match repo_type {
            RepositoryType::Sqlite => {
                #[cfg(feature = "sqlite-repo")]
                {
                    let config = sqlite_config.ok_or_else(|| {
                        RepositoryError::configuration(
                            "SQLite repository requires SqliteConfig",
                        )
                    })?;
                    let repo = Self::create_sqlite(config).await?;
                    Ok(repo as Arc<dyn AvailabilityRepository>)
                }
                #[cfg(not(feature = "sqlite-repo"))]
                {
                    let _ = sqlite_config;
                    Err(RepositoryError::configuration(
                        "SQLite repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a SQLite repository, running migrations off the async runtime.
    #[cfg(feature = "sqlite-repo")]
    pub async fn create_sqlite(config: &SqliteConfig) -> RepositoryResult<Arc<SqliteRepository>> {
        let config = config.clone();
        let repo = tokio::task::spawn_blocking(move || SqliteRepository::new(config))
            .await
            .map_err(|e| RepositoryError::internal(format!("Task join error: {}", e)))??;
        Ok(Arc::new(repo))
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn AvailabilityRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` to pick the backend and, for SQLite, the
    /// variables documented on [`SqliteConfig::from_env`].
    pub async fn from_env() -> RepositoryResult<Arc<dyn AvailabilityRepository>> {
        let repo_type = RepositoryType::from_env();
        let sqlite_config = match repo_type {
            RepositoryType::Sqlite => {
                Some(SqliteConfig::from_env().map_err(RepositoryError::configuration)?)
            }
            RepositoryType::Local => None,
        };
        Self::create(repo_type, sqlite_config.as_ref()).await
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn AvailabilityRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_config(&config).await
    }

    /// Create repository from `repository.toml` under `base` when one exists,
    /// otherwise from the environment.
    ///
    /// A config file that is present but invalid is an error, never a reason
    /// to fall back.
    pub async fn from_config_or_env(
        base: &Path,
    ) -> RepositoryResult<Arc<dyn AvailabilityRepository>> {
        match RepositoryConfig::find_in(base)? {
            Some(config) => Self::from_config(&config).await,
            None => Self::from_env().await,
        }
    }

    /// Create repository from an already loaded [`RepositoryConfig`].
    pub async fn from_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn AvailabilityRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        let sqlite_config = config.to_sqlite_config()?;
        Self::create(repo_type, sqlite_config.as_ref()).await
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```ignore
/// use availability::db::{RepositoryBuilder, RepositoryType, SqliteConfig};
///
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Sqlite)
///     .sqlite_config(SqliteConfig::with_path("availability.db"))
///     .build()
///     .await?;
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    sqlite_config: Option<SqliteConfig>,
}

impl RepositoryBuilder {
    /// Create a new repository builder, picking the type from the environment.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::from_env(),
            sqlite_config: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Set the SQLite configuration.
    pub fn sqlite_config(mut self, config: SqliteConfig) -> Self {
        self.sqlite_config = Some(config);
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, RepositoryError> {
        self.repo_type = RepositoryType::from_env();
        if self.repo_type == RepositoryType::Sqlite {
            self.sqlite_config =
                Some(SqliteConfig::from_env().map_err(RepositoryError::configuration)?);
        }
        Ok(self)
    }

    /// Load configuration from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(
        mut self,
        config_path: P,
    ) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_file(config_path)?;

        self.repo_type = repo_config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        self.sqlite_config = repo_config.to_sqlite_config()?;

        Ok(self)
    }

    /// Build the repository instance.
    ///
    /// A SQLite build without an explicit configuration uses the defaults
    /// (`availability.db` in the working directory).
    pub async fn build(self) -> RepositoryResult<Arc<dyn AvailabilityRepository>> {
        let sqlite_config = match (self.repo_type, self.sqlite_config) {
            (RepositoryType::Sqlite, None) => Some(SqliteConfig::default()),
            (_, config) => config,
        };
        RepositoryFactory::create(self.repo_type, sqlite_config.as_ref()).await
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
