//! Repository trait definition.
//!
//! Storage backends implement [`AvailabilityRepository`]; everything above the
//! storage layer talks to an `Arc<dyn AvailabilityRepository>` so that the
//! on-disk and in-memory backends are interchangeable.

mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::{AvailabilityEntry, EntryId, NewAvailabilityEntry};

/// Message for deleting an id that has no row.
pub const SHIFT_NOT_FOUND: &str = "Shift not found";

/// Message for a day/slot lookup with no claimants.
pub const SHIFT_UNOCCUPIED: &str = "Shift is unoccupied";

/// Entity name recorded in error contexts.
pub(crate) const ENTITY: &str = "availability";

/// Persistence operations over the `availability` table.
///
/// Implementations perform each call as a single atomic storage operation.
/// Policy decisions (input validation, treating an empty shift as not found)
/// live in [`crate::db::services`], not here.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store a new entry and return it with its assigned id.
    async fn insert_entry(&self, entry: &NewAvailabilityEntry)
        -> RepositoryResult<AvailabilityEntry>;

    /// All entries for a user, ordered by `(day, time_slot)` then id.
    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<AvailabilityEntry>>;

    /// All entries claiming a shift, in insertion order. May be empty.
    async fn list_by_shift(
        &self,
        day: &str,
        time_slot: &str,
    ) -> RepositoryResult<Vec<AvailabilityEntry>>;

    /// Remove an entry, returning its prior values.
    ///
    /// Returns [`RepositoryError::NotFound`] when no row has this id.
    async fn delete_entry(&self, id: EntryId) -> RepositoryResult<AvailabilityEntry>;
}
