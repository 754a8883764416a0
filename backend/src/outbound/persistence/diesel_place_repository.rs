//! PostgreSQL-backed place store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::PlaceRow;
use super::pool::DbPool;
use super::schema::places;
use crate::domain::geo::BoundingBox;
use crate::domain::place::{DEFAULT_CAPACITY, DiscoveredPlace, PersistedPlace, default_specialties};
use crate::domain::ports::{PlaceRepository, PlaceRepositoryError};

/// Insertable row for first-time places.
#[derive(Debug, Insertable)]
#[diesel(table_name = places)]
struct NewPlaceRow<'a> {
    id: Uuid,
    external_id: &'a str,
    category: &'a str,
    name: &'a str,
    latitude: f64,
    longitude: f64,
    capacity: i32,
    specialties: Vec<String>,
    updated_at: DateTime<Utc>,
}

/// Changeset for refreshing a stored place.
///
/// `None` capacity or specialties leave the stored column untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = places)]
struct PlaceChangeset<'a> {
    category: &'a str,
    name: &'a str,
    latitude: f64,
    longitude: f64,
    capacity: Option<i32>,
    specialties: Option<&'a [String]>,
    updated_at: DateTime<Utc>,
}

impl<'a> NewPlaceRow<'a> {
    fn from_discovered(place: &'a DiscoveredPlace, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            external_id: &place.external_id,
            category: &place.category,
            name: &place.name,
            latitude: place.coordinates.latitude,
            longitude: place.coordinates.longitude,
            capacity: place.capacity.unwrap_or(DEFAULT_CAPACITY),
            specialties: place
                .specialties
                .clone()
                .unwrap_or_else(|| default_specialties(&place.category)),
            updated_at: now,
        }
    }
}

impl<'a> PlaceChangeset<'a> {
    fn from_discovered(place: &'a DiscoveredPlace, now: DateTime<Utc>) -> Self {
        Self {
            category: &place.category,
            name: &place.name,
            latitude: place.coordinates.latitude,
            longitude: place.coordinates.longitude,
            capacity: place.capacity,
            specialties: place.specialties.as_deref(),
            updated_at: now,
        }
    }
}

/// Diesel-backed implementation of the place store port.
#[derive(Clone)]
pub struct DieselPlaceRepository {
    pool: DbPool,
}

impl DieselPlaceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaceRepository for DieselPlaceRepository {
    async fn upsert_place(
        &self,
        place: &DiscoveredPlace,
    ) -> Result<PersistedPlace, PlaceRepositoryError> {
        let now = Utc::now();
        let new_row = NewPlaceRow::from_discovered(place, now);
        let changeset = PlaceChangeset::from_discovered(place, now);

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(places::table)
            .values(&new_row)
            .on_conflict(places::external_id)
            .do_update()
            .set(&changeset)
            .returning(PlaceRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn update_place(
        &self,
        place: &DiscoveredPlace,
    ) -> Result<Option<PersistedPlace>, PlaceRepositoryError> {
        let changeset = PlaceChangeset::from_discovered(place, Utc::now());

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(places::table.filter(places::external_id.eq(&place.external_id)))
            .set(&changeset)
            .returning(PlaceRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(PersistedPlace::from))
    }

    async fn find_in_bounds(
        &self,
        bounds: &BoundingBox,
    ) -> Result<Vec<PersistedPlace>, PlaceRepositoryError> {
        let mut query = places::table
            .filter(places::latitude.between(bounds.min_lat, bounds.max_lat))
            .select(PlaceRow::as_select())
            .order(places::external_id.asc())
            .into_boxed();

        // At most two ranges: the box split at the antimeridian.
        query = match bounds.longitude_ranges().as_slice() {
            [(west, east)] => query.filter(places::longitude.between(*west, *east)),
            [(west_a, east_a), (west_b, east_b)] => query.filter(
                places::longitude
                    .between(*west_a, *east_a)
                    .or(places::longitude.between(*west_b, *east_b)),
            ),
            _ => query,
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = query
            .load::<PlaceRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(PersistedPlace::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PersistedPlace>, PlaceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = places::table
            .filter(places::id.eq(id))
            .select(PlaceRow::as_select())
            .first::<PlaceRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(PersistedPlace::from))
    }
}
