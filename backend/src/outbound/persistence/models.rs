//! Diesel row structs for the places table.
//!
//! Rows are internal to the persistence adapter; repositories convert them
//! to domain types before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::places;
use crate::domain::geo::Coordinates;
use crate::domain::place::PersistedPlace;

/// Queryable row for stored places.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = places)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlaceRow {
    pub id: Uuid,
    pub external_id: String,
    pub category: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: i32,
    pub specialties: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<PlaceRow> for PersistedPlace {
    fn from(row: PlaceRow) -> Self {
        Self {
            id: row.id,
            external_id: row.external_id,
            category: row.category,
            name: row.name,
            coordinates: Coordinates::new(row.longitude, row.latitude),
            capacity: row.capacity,
            specialties: row.specialties,
            updated_at: row.updated_at,
        }
    }
}
