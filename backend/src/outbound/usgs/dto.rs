//! DTOs for the USGS GeoJSON summary feed.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::domain::event::{EARTHQUAKES_CATEGORY, SourceKind};
use crate::domain::geo::Coordinates;
use crate::domain::ports::{RawGeometry, RawHazardRecord};

#[derive(Debug, Deserialize)]
pub(super) struct FeatureCollectionDto {
    #[serde(default)]
    pub(super) features: Vec<FeatureDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FeatureDto {
    pub(super) id: String,
    pub(super) geometry: Option<PointGeometryDto>,
    pub(super) properties: FeaturePropertiesDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct PointGeometryDto {
    /// `[longitude, latitude, depth_km]`.
    #[serde(default)]
    pub(super) coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FeaturePropertiesDto {
    pub(super) title: Option<String>,
    pub(super) place: Option<String>,
    /// Origin time in epoch milliseconds.
    pub(super) time: Option<i64>,
    pub(super) url: Option<String>,
}

impl FeatureCollectionDto {
    pub(super) fn into_raw_records(self) -> Vec<RawHazardRecord> {
        self.features
            .into_iter()
            .map(FeatureDto::into_raw_record)
            .collect()
    }
}

impl FeatureDto {
    fn into_raw_record(self) -> RawHazardRecord {
        let coordinates = self.geometry.as_ref().and_then(PointGeometryDto::position);
        let FeaturePropertiesDto {
            title,
            place,
            time,
            url,
        } = self.properties;

        RawHazardRecord {
            id: self.id,
            source: SourceKind::Usgs,
            title: title.or(place).unwrap_or_default(),
            categories: vec![EARTHQUAKES_CATEGORY.to_owned()],
            geometries: vec![RawGeometry {
                observed_at: time.and_then(from_epoch_millis),
                coordinates,
            }],
            source_links: url.into_iter().collect(),
        }
    }
}

impl PointGeometryDto {
    fn position(&self) -> Option<Coordinates> {
        match self.coordinates.as_slice() {
            [longitude, latitude, ..] => Coordinates::try_new(*longitude, *latitude).ok(),
            _ => None,
        }
    }
}

fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
