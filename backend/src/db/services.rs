//! High-level availability operations.
//!
//! These functions work with any [`AvailabilityRepository`] implementation and
//! own the policy the backends do not: required-field validation on create and
//! reporting an unclaimed shift as not found.

use crate::api::{AvailabilityEntry, EntryId, NewAvailabilityEntry, Shift};
use crate::db::repository::{
    AvailabilityRepository, ErrorContext, RepositoryError, RepositoryResult, ENTITY,
    SHIFT_UNOCCUPIED,
};

/// Check that the backing store is reachable.
pub async fn health_check<R>(repo: &R) -> RepositoryResult<bool>
where
    R: AvailabilityRepository + ?Sized,
{
    repo.health_check().await
}

/// Store a new availability entry.
///
/// All three fields must be non-empty.
pub async fn create_entry<R>(
    repo: &R,
    entry: &NewAvailabilityEntry,
) -> RepositoryResult<AvailabilityEntry>
where
    R: AvailabilityRepository + ?Sized,
{
    if let Some(field) = entry.first_empty_field() {
        return Err(RepositoryError::validation_with_context(
            format!("{} must not be empty", field),
            ErrorContext::new("create_entry").with_entity(ENTITY),
        ));
    }

    let created = repo.insert_entry(entry).await?;
    log::info!(
        "Stored availability {} for user {} on {}",
        created.id,
        created.user_id,
        created.shift()
    );
    Ok(created)
}

/// A user's entries ordered by day, then time slot. Empty when none exist.
pub async fn list_user_availability<R>(
    repo: &R,
    user_id: &str,
) -> RepositoryResult<Vec<AvailabilityEntry>>
where
    R: AvailabilityRepository + ?Sized,
{
    repo.list_by_user(user_id).await
}

/// Everyone who claimed a shift.
///
/// Unlike [`list_user_availability`], an empty result is an error:
/// [`RepositoryError::NotFound`] with the message "Shift is unoccupied".
pub async fn find_on_call<R>(
    repo: &R,
    day: &str,
    time_slot: &str,
) -> RepositoryResult<Vec<AvailabilityEntry>>
where
    R: AvailabilityRepository + ?Sized,
{
    let entries = repo.list_by_shift(day, time_slot).await?;
    if entries.is_empty() {
        let shift = Shift { day, time_slot };
        log::debug!("No one on call for {}", shift);
        return Err(RepositoryError::not_found_with_context(
            SHIFT_UNOCCUPIED,
            ErrorContext::new("find_on_call")
                .with_entity(ENTITY)
                .with_details(format!("shift={}", shift)),
        ));
    }
    Ok(entries)
}

/// Delete an entry by id, returning the removed row.
pub async fn delete_entry<R>(repo: &R, id: EntryId) -> RepositoryResult<AvailabilityEntry>
where
    R: AvailabilityRepository + ?Sized,
{
    let deleted = repo.delete_entry(id).await?;
    log::info!("Deleted availability {} for user {}", id, deleted.user_id);
    Ok(deleted)
}
