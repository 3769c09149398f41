//! Public API surface for the availability backend.
//!
//! This file consolidates the domain and DTO types shared by the repository
//! layer and the HTTP API. All types derive Serialize/Deserialize for JSON
//! serialization.

use serde::{Deserialize, Serialize};

/// Availability entry identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub i64);

impl EntryId {
    pub fn new(value: i64) -> Self {
        EntryId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EntryId> for i64 {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

impl From<i64> for EntryId {
    fn from(value: i64) -> Self {
        EntryId(value)
    }
}

/// One stored row linking a user to a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    /// Storage-assigned identifier
    pub id: EntryId,
    /// Submitting user
    pub user_id: String,
    /// Free-form day label
    pub day: String,
    /// Free-form time slot label
    pub time_slot: String,
}

impl AvailabilityEntry {
    /// The (day, time_slot) pair this entry claims.
    pub fn shift(&self) -> Shift<'_> {
        Shift {
            day: &self.day,
            time_slot: &self.time_slot,
        }
    }
}

/// Entry data before storage assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAvailabilityEntry {
    pub user_id: String,
    pub day: String,
    pub time_slot: String,
}

impl NewAvailabilityEntry {
    pub fn new(
        user_id: impl Into<String>,
        day: impl Into<String>,
        time_slot: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            day: day.into(),
            time_slot: time_slot.into(),
        }
    }

    /// Attach a storage-assigned id.
    pub fn with_id(self, id: EntryId) -> AvailabilityEntry {
        AvailabilityEntry {
            id,
            user_id: self.user_id,
            day: self.day,
            time_slot: self.time_slot,
        }
    }

    /// Name of the first required field that is empty, if any.
    pub fn first_empty_field(&self) -> Option<&'static str> {
        [
            ("user_id", &self.user_id),
            ("day", &self.day),
            ("time_slot", &self.time_slot),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
    }
}

/// A schedulable period: a day paired with a time slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Shift<'a> {
    pub day: &'a str,
    pub time_slot: &'a str,
}

impl std::fmt::Display for Shift<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.day, self.time_slot)
    }
}

/// A user who declared availability for a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnCallEntry {
    #[serde(rename = "on-call")]
    pub on_call: String,
}

impl From<AvailabilityEntry> for OnCallEntry {
    fn from(entry: AvailabilityEntry) -> Self {
        Self {
            on_call: entry.user_id,
        }
    }
}

/// Confirmation returned after a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub ok: bool,
    pub deleted_id: EntryId,
}

impl DeleteConfirmation {
    pub fn deleted(id: EntryId) -> Self {
        Self {
            ok: true,
            deleted_id: id,
        }
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
