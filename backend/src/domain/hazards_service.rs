//! Nearby hazards query service.
//!
//! Pipeline per query: poll every feed concurrently under a per-feed
//! timeout, normalise, collapse cross-source duplicates when more than one
//! feed contributed, merge near-duplicates, then filter to the radius.
//! A failing or slow feed only removes its own contribution.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::domain::Error;
use crate::domain::event::{Event, HazardReport};
use crate::domain::merge::{MERGE_THRESHOLD_KM, collapse_cross_source, merge_events};
use crate::domain::normalize::normalize_hazard;
use crate::domain::ports::{
    FetchOutcome, HazardSource, NearbyHazardsQuery, NearbyHazardsRequest, NoOpSourceFetchMetrics,
    RawHazardRecord, SourceFetchMetrics,
};
use crate::domain::proximity::filter_within;

/// Default time budget for one feed call.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

/// Domain service answering nearby hazard queries from live feeds.
#[derive(Clone)]
pub struct NearbyHazardsService {
    sources: Vec<Arc<dyn HazardSource>>,
    metrics: Arc<dyn SourceFetchMetrics>,
    source_timeout: Duration,
}

impl NearbyHazardsService {
    /// Create a service polling `sources`, each bounded by `source_timeout`.
    pub fn new(
        sources: Vec<Arc<dyn HazardSource>>,
        metrics: Arc<dyn SourceFetchMetrics>,
        source_timeout: Duration,
    ) -> Self {
        Self {
            sources,
            metrics,
            source_timeout,
        }
    }

    /// Create a service that does not record fetch metrics.
    pub fn with_noop_metrics(sources: Vec<Arc<dyn HazardSource>>, source_timeout: Duration) -> Self {
        Self::new(sources, Arc::new(NoOpSourceFetchMetrics), source_timeout)
    }

    async fn fetch_all(&self) -> Vec<RawHazardRecord> {
        join_all(self.sources.iter().map(|source| self.fetch_one(source.as_ref())))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    async fn fetch_one(&self, source: &dyn HazardSource) -> Vec<RawHazardRecord> {
        let kind = source.kind();
        let (records, outcome) =
            match tokio::time::timeout(self.source_timeout, source.fetch_hazards()).await {
                Ok(Ok(records)) => {
                    debug!(source = %kind, count = records.len(), "hazard source fetched");
                    (records, FetchOutcome::Success)
                }
                Ok(Err(error)) => {
                    warn!(
                        source = %kind,
                        error_kind = error.kind(),
                        %error,
                        "hazard source unavailable; continuing without it"
                    );
                    (Vec::new(), FetchOutcome::Failure)
                }
                Err(_) => {
                    warn!(
                        source = %kind,
                        timeout_ms = self.source_timeout.as_millis(),
                        "hazard source timed out; continuing without it"
                    );
                    (Vec::new(), FetchOutcome::TimedOut)
                }
            };

        if let Err(error) = self.metrics.record_fetch(kind, outcome).await {
            warn!(source = %kind, %error, "failed to record source fetch metric");
        }
        records
    }
}

/// Collapse cross-source duplicates, then merge near-duplicates.
fn dedupe(reports: Vec<HazardReport>) -> Vec<Event> {
    let contributing: HashSet<_> = reports.iter().map(|report| report.source).collect();
    let reports = if contributing.len() > 1 {
        collapse_cross_source(reports)
    } else {
        reports
    };
    merge_events(reports, MERGE_THRESHOLD_KM)
}

#[async_trait]
impl NearbyHazardsQuery for NearbyHazardsService {
    async fn nearby_hazards(&self, request: &NearbyHazardsRequest) -> Result<Vec<Event>, Error> {
        let raw = self.fetch_all().await;
        let raw_count = raw.len();
        let reports: Vec<HazardReport> = raw.into_iter().filter_map(normalize_hazard).collect();
        let normalized_count = reports.len();
        let events = dedupe(reports);
        let canonical_count = events.len();
        let nearby = filter_within(events, request.center, request.radius);

        debug!(
            raw_count,
            normalized_count,
            canonical_count,
            result_count = nearby.len(),
            radius_km = request.radius.get(),
            "nearby hazards resolved"
        );
        Ok(nearby)
    }
}

#[cfg(test)]
#[path = "hazards_service_tests.rs"]
mod tests;
