//! Nearby places query service with read-through caching.
//!
//! Every query re-fetches the map feed, upserts what it discovered, then
//! reads the stored view for the query area back. The feed being down only
//! means the stored view is served as-is; the store being unreachable is
//! the one fatal condition.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::Error;
use crate::domain::event::SourceKind;
use crate::domain::geo::BoundingBox;
use crate::domain::normalize::normalize_place;
use crate::domain::place::{DiscoveredPlace, PersistedPlace};
use crate::domain::ports::{
    FetchOutcome, NearbyPlacesQuery, NoOpSourceFetchMetrics, PlaceRepository,
    PlaceRepositoryError, PlaceSearch, PlaceSource, SourceFetchMetrics,
};
use crate::domain::proximity::filter_within;

/// Domain service answering nearby place queries.
#[derive(Clone)]
pub struct NearbyPlacesService {
    source: Arc<dyn PlaceSource>,
    repository: Arc<dyn PlaceRepository>,
    metrics: Arc<dyn SourceFetchMetrics>,
    source_timeout: Duration,
}

impl NearbyPlacesService {
    /// Create a new service.
    pub fn new(
        source: Arc<dyn PlaceSource>,
        repository: Arc<dyn PlaceRepository>,
        metrics: Arc<dyn SourceFetchMetrics>,
        source_timeout: Duration,
    ) -> Self {
        Self {
            source,
            repository,
            metrics,
            source_timeout,
        }
    }

    /// Create a service that does not record fetch metrics.
    pub fn with_noop_metrics(
        source: Arc<dyn PlaceSource>,
        repository: Arc<dyn PlaceRepository>,
        source_timeout: Duration,
    ) -> Self {
        Self::new(
            source,
            repository,
            Arc::new(NoOpSourceFetchMetrics),
            source_timeout,
        )
    }

    async fn discover(&self, search: &PlaceSearch) -> Vec<DiscoveredPlace> {
        let (raw, outcome) =
            match tokio::time::timeout(self.source_timeout, self.source.fetch_places(search)).await
            {
                Ok(Ok(raw)) => (raw, FetchOutcome::Success),
                Ok(Err(error)) => {
                    warn!(
                        error_kind = error.kind(),
                        %error,
                        "place source unavailable; serving cached places"
                    );
                    (Vec::new(), FetchOutcome::Failure)
                }
                Err(_) => {
                    warn!(
                        timeout_ms = self.source_timeout.as_millis(),
                        "place source timed out; serving cached places"
                    );
                    (Vec::new(), FetchOutcome::TimedOut)
                }
            };

        if let Err(error) = self
            .metrics
            .record_fetch(SourceKind::Overpass, outcome)
            .await
        {
            warn!(%error, "failed to record source fetch metric");
        }

        raw.into_iter().filter_map(normalize_place).collect()
    }

    /// Upsert one place, retrying a conflict once as a plain update.
    async fn cache(&self, place: &DiscoveredPlace) -> Result<(), Error> {
        let error = match self.repository.upsert_place(place).await {
            Ok(_) => return Ok(()),
            Err(PlaceRepositoryError::Conflict { message }) => {
                debug!(external_id = %place.external_id, %message, "upsert conflict; retrying as update");
                match self.repository.update_place(place).await {
                    Ok(Some(_)) => return Ok(()),
                    Ok(None) => {
                        warn!(external_id = %place.external_id, "conflicting place vanished before update");
                        return Ok(());
                    }
                    Err(error) => error,
                }
            }
            Err(error) => error,
        };

        if matches!(error, PlaceRepositoryError::Connection { .. }) {
            return Err(map_repository_error(error));
        }
        warn!(external_id = %place.external_id, %error, "skipping place that failed to cache");
        Ok(())
    }
}

/// Map store failures onto domain errors.
pub(crate) fn map_repository_error(error: PlaceRepositoryError) -> Error {
    match error {
        PlaceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("place store unavailable: {message}"))
        }
        PlaceRepositoryError::Query { message } | PlaceRepositoryError::Conflict { message } => {
            Error::internal(format!("place store error: {message}"))
        }
    }
}

#[async_trait]
impl NearbyPlacesQuery for NearbyPlacesService {
    async fn nearby_places(&self, search: &PlaceSearch) -> Result<Vec<PersistedPlace>, Error> {
        let discovered = self.discover(search).await;
        for place in &discovered {
            self.cache(place).await?;
        }

        let radius = search.radius.to_km();
        let bounds = BoundingBox::around(search.center, radius);
        let stored = self
            .repository
            .find_in_bounds(&bounds)
            .await
            .map_err(map_repository_error)?;
        let named = stored.into_iter().filter(PersistedPlace::is_named);
        let nearby = filter_within(named, search.center, radius);

        debug!(
            discovered = discovered.len(),
            result_count = nearby.len(),
            radius_m = search.radius.get(),
            "nearby places resolved"
        );
        Ok(nearby)
    }
}

#[cfg(test)]
#[path = "places_service_tests.rs"]
mod tests;
