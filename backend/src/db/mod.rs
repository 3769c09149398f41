//! Database module for availability storage.
//!
//! This module provides abstractions for database operations via the Repository pattern,
//! allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Required-field validation                            │
//! │  - Unoccupied shift reporting                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────┬──────────────────────┐
//!     │   SQLite (Diesel)    │  Local (in-memory)   │
//!     └──────────────────────┴──────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! Build the repository once at startup and pass it down; there is no global
//! instance.
//!
//! ```ignore
//! use availability::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env().await?;
//!     let entries = services::list_user_availability(repo.as_ref(), "alice").await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;


pub use config::SqliteConfig;
pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "sqlite-repo")]
pub use repositories::{PoolStats, SqliteRepository};
pub use repository::{
    AvailabilityRepository, ErrorContext, RepositoryError, RepositoryResult, SHIFT_NOT_FOUND,
    SHIFT_UNOCCUPIED,
};

pub use services::{
    create_entry, delete_entry, find_on_call, health_check, list_user_availability,
};
