//! Driving port for locating resources and sending them alerts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::geo::{Coordinates, RadiusMeters};
use crate::domain::resource::{AlertAcknowledgement, NearbyResource};

/// Domain use-case port for resource lookup and alert dispatch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceDispatchCommand: Send + Sync {
    /// Stored, named resources within `max_distance`, nearest first.
    async fn nearby_resources(
        &self,
        center: Coordinates,
        max_distance: RadiusMeters,
    ) -> Result<Vec<NearbyResource>, Error>;

    /// Alert the resource `resource_id` that help is needed at `location`.
    async fn alert(
        &self,
        resource_id: Uuid,
        location: Coordinates,
    ) -> Result<AlertAcknowledgement, Error>;

    /// Alert whichever resource is nearest to `location`.
    async fn dispatch_nearest(
        &self,
        location: Coordinates,
        max_distance: RadiusMeters,
    ) -> Result<AlertAcknowledgement, Error>;
}

/// Fixture command backed by an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureResourceDispatchCommand;

#[async_trait]
impl ResourceDispatchCommand for FixtureResourceDispatchCommand {
    async fn nearby_resources(
        &self,
        _center: Coordinates,
        _max_distance: RadiusMeters,
    ) -> Result<Vec<NearbyResource>, Error> {
        Ok(Vec::new())
    }

    async fn alert(
        &self,
        resource_id: Uuid,
        _location: Coordinates,
    ) -> Result<AlertAcknowledgement, Error> {
        Err(Error::not_found(format!("resource {resource_id} not found")))
    }

    async fn dispatch_nearest(
        &self,
        _location: Coordinates,
        _max_distance: RadiusMeters,
    ) -> Result<AlertAcknowledgement, Error> {
        Err(Error::not_found("no resource found within the requested distance"))
    }
}
