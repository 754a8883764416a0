//! Driving port for "what hazards are near this point" queries.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::event::Event;
use crate::domain::geo::{Coordinates, RadiusKm};

/// Hazard query centre and radius. Hazard radii are kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyHazardsRequest {
    /// Point to search around.
    pub center: Coordinates,
    /// Search radius in kilometres.
    pub radius: RadiusKm,
}

/// Domain use-case port for nearby hazard lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NearbyHazardsQuery: Send + Sync {
    /// Canonical events within the requested radius.
    ///
    /// Feed failures never fail the query; they only shrink the result.
    async fn nearby_hazards(&self, request: &NearbyHazardsRequest) -> Result<Vec<Event>, Error>;
}

/// Fixture query reporting a quiet world.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNearbyHazardsQuery;

#[async_trait]
impl NearbyHazardsQuery for FixtureNearbyHazardsQuery {
    async fn nearby_hazards(&self, _request: &NearbyHazardsRequest) -> Result<Vec<Event>, Error> {
        Ok(Vec::new())
    }
}
