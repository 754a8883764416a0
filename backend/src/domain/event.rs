//! Hazard reports and canonical events.
//!
//! A [`HazardReport`] is one normalised observation from one feed. The
//! merger folds reports describing the same incident into a canonical
//! [`Event`] whose `occurrences` keep every contributing report in discovery
//! order. Events are rebuilt for every query and never persisted.

use std::fmt;

use chrono::{DateTime, Utc};

use super::geo::Coordinates;
use super::proximity::Located;

/// Category assigned when a feed does not declare one.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Earthquake category label shared by every feed.
///
/// EONET's own label; the USGS adapter reuses it so reports of one quake
/// from both feeds share a collapse key.
pub const EARTHQUAKES_CATEGORY: &str = "Earthquakes";

/// External feed a record originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// NASA EONET natural event tracker.
    Eonet,
    /// USGS earthquake hazards program summary feed.
    Usgs,
    /// OpenStreetMap Overpass API.
    Overpass,
}

impl SourceKind {
    /// Stable lowercase label used in payloads, logs, and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eonet => "eonet",
            Self::Usgs => "usgs",
            Self::Overpass => "overpass",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalised hazard observation awaiting merge.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardReport {
    /// Source-scoped identifier; not unique across feeds.
    pub id: String,
    /// Feed that produced the report.
    pub source: SourceKind,
    /// Free-text label.
    pub title: String,
    /// Normalised hazard type, or [`UNKNOWN_CATEGORY`].
    pub category: String,
    /// Position of the selected geometry.
    pub coordinates: Coordinates,
    /// Timestamp of the selected geometry, when the feed supplied one.
    pub observed_at: Option<DateTime<Utc>>,
    /// Link back to the source detail page.
    pub source_link: Option<String>,
}

/// A report folded into a canonical event.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    /// Source-scoped identifier of the report.
    pub id: String,
    /// Feed that produced the report.
    pub source: SourceKind,
    /// When the report's geometry was observed.
    pub observed_at: Option<DateTime<Utc>>,
    /// Where the report placed the hazard.
    pub coordinates: Coordinates,
    /// Link back to the source detail page.
    pub source_link: Option<String>,
}

impl From<&HazardReport> for Occurrence {
    fn from(report: &HazardReport) -> Self {
        Self {
            id: report.id.clone(),
            source: report.source,
            observed_at: report.observed_at,
            coordinates: report.coordinates,
            source_link: report.source_link.clone(),
        }
    }
}

/// Canonical, de-duplicated hazard.
///
/// Top-level fields mirror the first report seen for the incident; later
/// reports only extend `occurrences`.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Identifier of the first report.
    pub id: String,
    /// Feed of the first report.
    pub source: SourceKind,
    /// Shared title of every folded report.
    pub title: String,
    /// Shared category of every folded report.
    pub category: String,
    /// Position of the first report.
    pub coordinates: Coordinates,
    /// Observation time of the first report.
    pub observed_at: Option<DateTime<Utc>>,
    /// Source link of the first report.
    pub source_link: Option<String>,
    /// Contributing reports in discovery order; never empty.
    pub occurrences: Vec<Occurrence>,
}

impl Event {
    /// Start a canonical event from its first report.
    #[must_use]
    pub fn from_first(report: HazardReport) -> Self {
        let occurrence = Occurrence::from(&report);
        Self {
            id: report.id,
            source: report.source,
            title: report.title,
            category: report.category,
            coordinates: report.coordinates,
            observed_at: report.observed_at,
            source_link: report.source_link,
            occurrences: vec![occurrence],
        }
    }

    /// Append a matching report as a further occurrence.
    pub fn absorb(&mut self, report: &HazardReport) {
        self.occurrences.push(Occurrence::from(report));
    }

    /// Whether `report` describes the same incident within `threshold_km`.
    #[must_use]
    pub fn matches(&self, report: &HazardReport, threshold_km: f64) -> bool {
        self.title == report.title
            && self.category == report.category
            && self.coordinates.distance_km(&report.coordinates) <= threshold_km
    }

    /// Canonical fields expressed as a report, e.g. for re-merging.
    #[must_use]
    pub fn representative(&self) -> HazardReport {
        HazardReport {
            id: self.id.clone(),
            source: self.source,
            title: self.title.clone(),
            category: self.category.clone(),
            coordinates: self.coordinates,
            observed_at: self.observed_at,
            source_link: self.source_link.clone(),
        }
    }
}

impl Located for HazardReport {
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

impl Located for Event {
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}
