//! Driving port for "what places are near this point" queries.

use async_trait::async_trait;

use super::PlaceSearch;
use crate::domain::Error;
use crate::domain::place::PersistedPlace;

/// Domain use-case port for nearby place lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NearbyPlacesQuery: Send + Sync {
    /// Named, stored places within the search radius after refreshing the
    /// cache from the live feed.
    async fn nearby_places(&self, search: &PlaceSearch) -> Result<Vec<PersistedPlace>, Error>;
}

/// Fixture query returning no places.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNearbyPlacesQuery;

#[async_trait]
impl NearbyPlacesQuery for FixtureNearbyPlacesQuery {
    async fn nearby_places(&self, _search: &PlaceSearch) -> Result<Vec<PersistedPlace>, Error> {
        Ok(Vec::new())
    }
}
