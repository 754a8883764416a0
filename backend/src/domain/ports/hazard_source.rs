//! Driven port for hazard feeds.
//!
//! Each feed adapter decodes its own payload into [`RawHazardRecord`]s; the
//! domain owns normalisation and merging so adapters stay schema-only.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::define_port_error;
use crate::domain::event::SourceKind;
use crate::domain::geo::Coordinates;

/// One geometry revision of a raw hazard record.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGeometry {
    /// When the geometry was observed, if the feed says.
    pub observed_at: Option<DateTime<Utc>>,
    /// Representative position, absent when the feed shape was unusable.
    pub coordinates: Option<Coordinates>,
}

/// Hazard record as decoded from a feed, before normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHazardRecord {
    /// Feed-scoped identifier.
    pub id: String,
    /// Feed the record came from.
    pub source: SourceKind,
    /// Free-text label as published.
    pub title: String,
    /// Declared category titles, most specific first.
    pub categories: Vec<String>,
    /// Geometry revisions in feed order.
    pub geometries: Vec<RawGeometry>,
    /// Links back to source detail pages.
    pub source_links: Vec<String>,
}

define_port_error! {
    /// Errors surfaced by feed adapters. All of them mean the source is
    /// unavailable for this request.
    pub enum SourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "source transport failed: {message}",
        /// The call exceeded its time budget.
        Timeout { message: String } =>
            "source timeout: {message}",
        /// The upstream service rate-limited the call.
        RateLimited { message: String } =>
            "source rate limited request: {message}",
        /// The payload could not be decoded.
        Decode { message: String } =>
            "source response decode failed: {message}",
        /// The adapter or upstream rejected the request itself.
        InvalidRequest { message: String } =>
            "source request invalid: {message}",
    }
}

impl SourceError {
    /// Short label for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::RateLimited { .. } => "rate_limited",
            Self::Decode { .. } => "decode",
            Self::InvalidRequest { .. } => "invalid_request",
        }
    }
}

/// Port for fetching current hazards from one feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HazardSource: Send + Sync {
    /// Which feed this adapter reads.
    fn kind(&self) -> SourceKind;

    /// Fetch the feed's current hazard records.
    async fn fetch_hazards(&self) -> Result<Vec<RawHazardRecord>, SourceError>;
}

/// Fixture source returning no hazards.
#[derive(Debug, Clone, Copy)]
pub struct FixtureHazardSource(pub SourceKind);

#[async_trait]
impl HazardSource for FixtureHazardSource {
    fn kind(&self) -> SourceKind {
        self.0
    }

    async fn fetch_hazards(&self) -> Result<Vec<RawHazardRecord>, SourceError> {
        Ok(Vec::new())
    }
}
