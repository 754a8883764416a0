//! Driven port for the place store.
//!
//! Implementations must make [`PlaceRepository::upsert_place`] atomic per
//! `external_id`: concurrent upserts of one id never create two rows.

use async_trait::async_trait;
use uuid::Uuid;

use super::define_port_error;
use crate::domain::geo::BoundingBox;
use crate::domain::place::{DiscoveredPlace, PersistedPlace};

define_port_error! {
    /// Errors raised by the place store.
    pub enum PlaceRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "place persistence connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "place persistence query failed: {message}",
        /// A concurrent write or constraint violation rejected the upsert.
        Conflict { message: String } =>
            "place persistence conflict: {message}",
    }
}

/// Port for caching discovered places.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Insert the place or overwrite the mutable fields of the row with the
    /// same `external_id`.
    ///
    /// Capacity and specialties take their defaults on insert and are only
    /// overwritten when `place` supplies them.
    async fn upsert_place(
        &self,
        place: &DiscoveredPlace,
    ) -> Result<PersistedPlace, PlaceRepositoryError>;

    /// Overwrite an existing row by `external_id`; `Ok(None)` when absent.
    async fn update_place(
        &self,
        place: &DiscoveredPlace,
    ) -> Result<Option<PersistedPlace>, PlaceRepositoryError>;

    /// Every stored place inside `bounds`, named or not.
    async fn find_in_bounds(
        &self,
        bounds: &BoundingBox,
    ) -> Result<Vec<PersistedPlace>, PlaceRepositoryError>;

    /// Look up a stored place by its store identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PersistedPlace>, PlaceRepositoryError>;
}
