//! Prometheus adapter for per-feed fetch outcome counters.

use async_trait::async_trait;
use prometheus::{IntCounterVec, Opts, Registry};

use crate::domain::event::SourceKind;
use crate::domain::ports::{FetchOutcome, SourceFetchMetrics, SourceFetchMetricsError};

/// Prometheus-backed recorder for feed call outcomes.
pub struct PrometheusSourceFetchMetrics {
    fetches_total: IntCounterVec,
}

impl PrometheusSourceFetchMetrics {
    /// Create and register the counter with the provided registry.
    ///
    /// # Errors
    ///
    /// Returns an error when Prometheus rejects metric registration.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let fetches_total = IntCounterVec::new(
            Opts::new(
                "hazard_source_fetches_total",
                "Feed calls by source and outcome",
            ),
            &["source", "outcome"],
        )?;
        registry.register(Box::new(fetches_total.clone()))?;
        Ok(Self { fetches_total })
    }
}

#[async_trait]
impl SourceFetchMetrics for PrometheusSourceFetchMetrics {
    async fn record_fetch(
        &self,
        source: SourceKind,
        outcome: FetchOutcome,
    ) -> Result<(), SourceFetchMetricsError> {
        self.fetches_total
            .get_metric_with_label_values(&[source.as_str(), outcome.as_str()])
            .map_err(|error| SourceFetchMetricsError::export(error.to_string()))?
            .inc();
        Ok(())
    }
}
