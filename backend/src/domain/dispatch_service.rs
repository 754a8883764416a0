//! Resource lookup and alert dispatch service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::geo::{BoundingBox, Coordinates, RadiusMeters};
use crate::domain::place::PersistedPlace;
use crate::domain::places_service::map_repository_error;
use crate::domain::ports::{AlertNotifier, PlaceRepository, ResourceDispatchCommand};
use crate::domain::proximity::nearest_within;
use crate::domain::resource::{
    AlertAcknowledgement, NearbyResource, ResourceAlert, select_nearest,
};

/// Domain service selecting resources and handing alerts to the notifier.
#[derive(Clone)]
pub struct ResourceDispatchService {
    repository: Arc<dyn PlaceRepository>,
    notifier: Arc<dyn AlertNotifier>,
}

impl ResourceDispatchService {
    /// Create a new dispatch service.
    pub fn new(repository: Arc<dyn PlaceRepository>, notifier: Arc<dyn AlertNotifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    async fn send(
        &self,
        place: &PersistedPlace,
        location: Coordinates,
    ) -> Result<AlertAcknowledgement, Error> {
        let alert = ResourceAlert {
            resource_id: place.id,
            resource_name: place.name.clone(),
            location,
        };
        self.notifier.notify(&alert).await.map_err(|error| {
            warn!(resource_id = %alert.resource_id, %error, "alert hand-off failed");
            Error::service_unavailable("alert could not be handed off")
        })?;
        info!(
            resource_id = %alert.resource_id,
            latitude = location.latitude,
            longitude = location.longitude,
            "emergency alert accepted"
        );
        Ok(AlertAcknowledgement::for_alert(&alert))
    }
}

#[async_trait]
impl ResourceDispatchCommand for ResourceDispatchService {
    async fn nearby_resources(
        &self,
        center: Coordinates,
        max_distance: RadiusMeters,
    ) -> Result<Vec<NearbyResource>, Error> {
        let radius = max_distance.to_km();
        let stored = self
            .repository
            .find_in_bounds(&BoundingBox::around(center, radius))
            .await
            .map_err(map_repository_error)?;
        let named = stored.into_iter().filter(PersistedPlace::is_named);
        Ok(nearest_within(named, center, radius)
            .into_iter()
            .map(|(place, distance_km)| NearbyResource { place, distance_km })
            .collect())
    }

    async fn alert(
        &self,
        resource_id: Uuid,
        location: Coordinates,
    ) -> Result<AlertAcknowledgement, Error> {
        let place = self
            .repository
            .find_by_id(resource_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("resource {resource_id} not found")))?;
        self.send(&place, location).await
    }

    async fn dispatch_nearest(
        &self,
        location: Coordinates,
        max_distance: RadiusMeters,
    ) -> Result<AlertAcknowledgement, Error> {
        let candidates = self.nearby_resources(location, max_distance).await?;
        let nearest = select_nearest(&candidates)
            .map_err(|none_found| Error::not_found(none_found.to_string()))?;
        self.send(&nearest.place, location).await
    }
}

#[cfg(test)]
#[path = "dispatch_service_tests.rs"]
mod tests;
