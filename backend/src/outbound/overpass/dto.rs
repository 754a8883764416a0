//! DTOs for decoding Overpass JSON responses.
//!
//! Elements decode into these transport DTOs first, then map into
//! [`RawPlaceRecord`]s in one pass. Elements without a usable position keep
//! `coordinates: None`; the normaliser decides what to drop.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::geo::Coordinates;
use crate::domain::ports::RawPlaceRecord;

#[derive(Debug, Deserialize)]
pub(super) struct OverpassResponseDto {
    #[serde(default)]
    pub(super) elements: Vec<OverpassElementDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OverpassElementDto {
    #[serde(rename = "type")]
    pub(super) element_type: String,
    pub(super) id: i64,
    pub(super) lon: Option<f64>,
    pub(super) lat: Option<f64>,
    pub(super) center: Option<OverpassElementCenterDto>,
    #[serde(default)]
    pub(super) tags: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OverpassElementCenterDto {
    pub(super) lon: f64,
    pub(super) lat: f64,
}

impl OverpassResponseDto {
    pub(super) fn into_raw_records(self) -> Vec<RawPlaceRecord> {
        self.elements
            .into_iter()
            .map(OverpassElementDto::into_raw_record)
            .collect()
    }
}

impl OverpassElementDto {
    fn into_raw_record(self) -> RawPlaceRecord {
        let coordinates = self
            .position()
            .and_then(|(longitude, latitude)| Coordinates::try_new(longitude, latitude).ok());
        RawPlaceRecord {
            element_type: self.element_type,
            element_id: self.id,
            coordinates,
            tags: self.tags,
        }
    }

    fn position(&self) -> Option<(f64, f64)> {
        if let (Some(longitude), Some(latitude)) = (self.lon, self.lat) {
            return Some((longitude, latitude));
        }
        self.center.as_ref().map(|center| (center.lon, center.lat))
    }
}
