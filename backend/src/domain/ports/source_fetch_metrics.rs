//! Domain port for per-feed fetch outcome counters.
//!
//! The hazard and place services report every feed call here so an adapter
//! can export counters without the services knowing about Prometheus.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::event::SourceKind;

define_port_error! {
    /// Errors exposed when recording fetch metrics.
    pub enum SourceFetchMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } =>
            "source fetch metrics exporter failed: {message}",
    }
}

/// Result of one feed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The feed answered and decoded.
    Success,
    /// The feed failed with a transport, status, or decode error.
    Failure,
    /// The call exceeded the per-feed timeout.
    TimedOut,
}

impl FetchOutcome {
    /// Stable label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::TimedOut => "timeout",
        }
    }
}

/// Metrics recording port for feed calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceFetchMetrics: Send + Sync {
    /// Record the outcome of one call to `source`.
    async fn record_fetch(
        &self,
        source: SourceKind,
        outcome: FetchOutcome,
    ) -> Result<(), SourceFetchMetricsError>;
}

/// No-op implementation used when metrics are disabled or in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSourceFetchMetrics;

#[async_trait]
impl SourceFetchMetrics for NoOpSourceFetchMetrics {
    async fn record_fetch(
        &self,
        _source: SourceKind,
        _outcome: FetchOutcome,
    ) -> Result<(), SourceFetchMetricsError> {
        Ok(())
    }
}
