//! Driven port for the points-of-interest feed.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::SourceError;
use crate::domain::geo::{Coordinates, RadiusMeters};

/// Area to search for response-capable places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceSearch {
    /// Point to search around.
    pub center: Coordinates,
    /// Search radius in metres, as the map feed expects.
    pub radius: RadiusMeters,
}

/// One tagged map element, before normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPlaceRecord {
    /// OSM element type (`node`, `way`, or `relation`).
    pub element_type: String,
    /// Raw OSM element identifier.
    pub element_id: i64,
    /// Node position or way/relation centre, when present.
    pub coordinates: Option<Coordinates>,
    /// Free-form OSM tags.
    pub tags: BTreeMap<String, String>,
}

/// Port for discovering places around a point.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// Fetch the raw elements inside `search`.
    async fn fetch_places(&self, search: &PlaceSearch) -> Result<Vec<RawPlaceRecord>, SourceError>;
}

/// Fixture source that discovers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixturePlaceSource;

#[async_trait]
impl PlaceSource for FixturePlaceSource {
    async fn fetch_places(
        &self,
        _search: &PlaceSearch,
    ) -> Result<Vec<RawPlaceRecord>, SourceError> {
        Ok(Vec::new())
    }
}
