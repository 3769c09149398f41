//! In-memory repository for unit tests and local development.
//!
//! Entries live in a `BTreeMap` keyed by id, so iteration order is insertion
//! order. Ids come from a counter that only moves forward, which keeps the
//! never-reused guarantee of the on-disk backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::{AvailabilityEntry, EntryId, NewAvailabilityEntry};
use crate::db::repository::{
    AvailabilityRepository, ErrorContext, RepositoryError, RepositoryResult, ENTITY,
    SHIFT_NOT_FOUND,
};

#[derive(Debug)]
struct LocalState {
    next_id: i64,
    entries: BTreeMap<EntryId, AvailabilityEntry>,
}

impl Default for LocalState {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// Availability repository backed by process memory.
#[derive(Debug, Default)]
pub struct LocalRepository {
    state: RwLock<LocalState>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AvailabilityRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn insert_entry(
        &self,
        entry: &NewAvailabilityEntry,
    ) -> RepositoryResult<AvailabilityEntry> {
        let mut state = self.state.write();
        let id = EntryId::new(state.next_id);
        state.next_id += 1;

        let stored = entry.clone().with_id(id);
        state.entries.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<AvailabilityEntry>> {
        let state = self.state.read();
        let mut entries: Vec<AvailabilityEntry> = state
            .entries
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            (a.day.as_str(), a.time_slot.as_str(), a.id)
                .cmp(&(b.day.as_str(), b.time_slot.as_str(), b.id))
        });
        Ok(entries)
    }

    async fn list_by_shift(
        &self,
        day: &str,
        time_slot: &str,
    ) -> RepositoryResult<Vec<AvailabilityEntry>> {
        let state = self.state.read();
        Ok(state
            .entries
            .values()
            .filter(|e| e.day == day && e.time_slot == time_slot)
            .cloned()
            .collect())
    }

    async fn delete_entry(&self, id: EntryId) -> RepositoryResult<AvailabilityEntry> {
        self.state.write().entries.remove(&id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                SHIFT_NOT_FOUND,
                ErrorContext::new("delete_entry")
                    .with_entity(ENTITY)
                    .with_entity_id(id),
            )
        })
    }
}
