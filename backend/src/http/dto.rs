//! Data Transfer Objects for the HTTP API.
//!
//! Response payloads for entries are the domain types from [`crate::api`],
//! which already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{AvailabilityEntry, DeleteConfirmation, OnCallEntry};
use crate::api::NewAvailabilityEntry;

/// Form body for `POST /api/availability`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAvailabilityForm {
    pub user_id: String,
    pub day: String,
    pub time_slot: String,
}

impl From<CreateAvailabilityForm> for NewAvailabilityEntry {
    fn from(form: CreateAvailabilityForm) -> Self {
        NewAvailabilityEntry::new(form.user_id, form.day, form.time_slot)
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}
