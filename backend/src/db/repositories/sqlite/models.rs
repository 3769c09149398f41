use diesel::prelude::*;

use super::schema::availability;
use crate::api::{AvailabilityEntry, EntryId, NewAvailabilityEntry};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = availability)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AvailabilityRow {
    pub id: i64,
    pub user_id: String,
    pub day: String,
    pub time_slot: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = availability)]
pub struct NewAvailabilityRow<'a> {
    pub user_id: &'a str,
    pub day: &'a str,
    pub time_slot: &'a str,
}

impl<'a> From<&'a NewAvailabilityEntry> for NewAvailabilityRow<'a> {
    fn from(entry: &'a NewAvailabilityEntry) -> Self {
        Self {
            user_id: &entry.user_id,
            day: &entry.day,
            time_slot: &entry.time_slot,
        }
    }
}

impl From<AvailabilityRow> for AvailabilityEntry {
    fn from(row: AvailabilityRow) -> Self {
        AvailabilityEntry {
            id: EntryId::new(row.id),
            user_id: row.user_id,
            day: row.day,
            time_slot: row.time_slot,
        }
    }
}
