//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`) are what inbound adapters call.
//! Driven ports (sources, repository, notifier, metrics) are what outbound
//! adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod alert_notifier;
mod hazard_source;
mod nearby_hazards_query;
mod nearby_places_query;
mod place_repository;
mod place_source;
mod resource_dispatch_command;
mod source_fetch_metrics;

#[cfg(test)]
pub use alert_notifier::MockAlertNotifier;
pub use alert_notifier::{AlertNotifier, AlertNotifierError};
#[cfg(test)]
pub use hazard_source::MockHazardSource;
pub use hazard_source::{
    FixtureHazardSource, HazardSource, RawGeometry, RawHazardRecord, SourceError,
};
#[cfg(test)]
pub use nearby_hazards_query::MockNearbyHazardsQuery;
pub use nearby_hazards_query::{
    FixtureNearbyHazardsQuery, NearbyHazardsQuery, NearbyHazardsRequest,
};
#[cfg(test)]
pub use nearby_places_query::MockNearbyPlacesQuery;
pub use nearby_places_query::{FixtureNearbyPlacesQuery, NearbyPlacesQuery};
#[cfg(test)]
pub use place_repository::MockPlaceRepository;
pub use place_repository::{PlaceRepository, PlaceRepositoryError};
#[cfg(test)]
pub use place_source::MockPlaceSource;
pub use place_source::{FixturePlaceSource, PlaceSearch, PlaceSource, RawPlaceRecord};
#[cfg(test)]
pub use resource_dispatch_command::MockResourceDispatchCommand;
pub use resource_dispatch_command::{FixtureResourceDispatchCommand, ResourceDispatchCommand};
#[cfg(test)]
pub use source_fetch_metrics::MockSourceFetchMetrics;
pub use source_fetch_metrics::{
    FetchOutcome, NoOpSourceFetchMetrics, SourceFetchMetrics, SourceFetchMetricsError,
};
