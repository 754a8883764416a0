//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving ports, so they stay testable without network or database I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureNearbyHazardsQuery, FixtureNearbyPlacesQuery, FixtureResourceDispatchCommand,
    NearbyHazardsQuery, NearbyPlacesQuery, ResourceDispatchCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Nearby hazards use case.
    pub hazards: Arc<dyn NearbyHazardsQuery>,
    /// Nearby places use case.
    pub places: Arc<dyn NearbyPlacesQuery>,
    /// Resource lookup and alert dispatch.
    pub resources: Arc<dyn ResourceDispatchCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        hazards: Arc<dyn NearbyHazardsQuery>,
        places: Arc<dyn NearbyPlacesQuery>,
        resources: Arc<dyn ResourceDispatchCommand>,
    ) -> Self {
        Self {
            hazards,
            places,
            resources,
        }
    }

    /// Replace the hazard query.
    #[must_use]
    pub fn with_hazards(mut self, hazards: Arc<dyn NearbyHazardsQuery>) -> Self {
        self.hazards = hazards;
        self
    }

    /// Replace the places query.
    #[must_use]
    pub fn with_places(mut self, places: Arc<dyn NearbyPlacesQuery>) -> Self {
        self.places = places;
        self
    }

    /// Replace the resource command.
    #[must_use]
    pub fn with_resources(mut self, resources: Arc<dyn ResourceDispatchCommand>) -> Self {
        self.resources = resources;
        self
    }
}

impl Default for HttpState {
    /// State wired to fixture ports that report nothing nearby.
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureNearbyHazardsQuery),
            Arc::new(FixtureNearbyPlacesQuery),
            Arc::new(FixtureResourceDispatchCommand),
        )
    }
}
