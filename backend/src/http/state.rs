//! Application state for the HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use crate::db::repository::AvailabilityRepository;

/// Directory served under `/static` unless configured otherwise.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn AvailabilityRepository>,
    /// Root of the frontend bundle
    pub static_dir: PathBuf,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn AvailabilityRepository>) -> Self {
        Self {
            repository,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }

    /// Serve the frontend from a different directory.
    pub fn with_static_dir(mut self, static_dir: impl Into<PathBuf>) -> Self {
        self.static_dir = static_dir.into();
        self
    }
}
