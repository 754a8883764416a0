//! DTOs for decoding EONET event payloads.
//!
//! Geometry coordinates stay as raw JSON until mapped, because points carry
//! `[lon, lat]` while polygons carry nested rings.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::event::SourceKind;
use crate::domain::geo::Coordinates;
use crate::domain::ports::{RawGeometry, RawHazardRecord};

#[derive(Debug, Deserialize)]
pub(super) struct EonetResponseDto {
    #[serde(default)]
    pub(super) events: Vec<EonetEventDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EonetEventDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) categories: Vec<EonetCategoryDto>,
    #[serde(default)]
    pub(super) sources: Vec<EonetLinkDto>,
    #[serde(default, alias = "geometry")]
    pub(super) geometries: Vec<EonetGeometryDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct EonetCategoryDto {
    #[serde(default)]
    pub(super) title: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct EonetLinkDto {
    #[serde(default)]
    pub(super) url: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct EonetGeometryDto {
    pub(super) date: Option<String>,
    #[serde(rename = "type")]
    pub(super) geometry_type: Option<String>,
    #[serde(default)]
    pub(super) coordinates: Value,
}

impl EonetResponseDto {
    pub(super) fn into_raw_records(self) -> Vec<RawHazardRecord> {
        self.events
            .into_iter()
            .map(EonetEventDto::into_raw_record)
            .collect()
    }
}

impl EonetEventDto {
    fn into_raw_record(self) -> RawHazardRecord {
        RawHazardRecord {
            id: self.id,
            source: SourceKind::Eonet,
            title: self.title,
            categories: self
                .categories
                .into_iter()
                .map(|category| category.title)
                .collect(),
            geometries: self
                .geometries
                .iter()
                .map(EonetGeometryDto::to_raw_geometry)
                .collect(),
            source_links: self.sources.into_iter().map(|link| link.url).collect(),
        }
    }
}

impl EonetGeometryDto {
    fn to_raw_geometry(&self) -> RawGeometry {
        RawGeometry {
            observed_at: self.date.as_deref().and_then(parse_date),
            coordinates: self.representative_point(),
        }
    }

    fn representative_point(&self) -> Option<Coordinates> {
        match self.geometry_type.as_deref() {
            Some("Polygon") => polygon_centroid(&self.coordinates),
            Some("Point") | None => point(&self.coordinates),
            Some(other) => {
                debug!(geometry_type = other, "unsupported EONET geometry type");
                None
            }
        }
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .ok()
}

fn point(value: &Value) -> Option<Coordinates> {
    let pair = value.as_array()?;
    let longitude = pair.first()?.as_f64()?;
    let latitude = pair.get(1)?.as_f64()?;
    Coordinates::try_new(longitude, latitude).ok()
}

/// Vertex mean of the outer ring, skipping the closing vertex.
///
/// Longitudes are unwrapped relative to the first vertex before averaging so
/// rings crossing ±180° keep their centre on the right side of the globe.
fn polygon_centroid(value: &Value) -> Option<Coordinates> {
    let ring = value.as_array()?.first()?.as_array()?;
    let mut vertices = ring.iter().map(point).collect::<Option<Vec<_>>>()?;
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    let anchor = vertices.first()?.longitude;

    #[expect(
        clippy::cast_precision_loss,
        reason = "ring vertex counts are far below f64 integer precision"
    )]
    let count = vertices.len() as f64;
    let (sum_lon, sum_lat) = vertices.iter().fold((0.0, 0.0), |(lon, lat), vertex| {
        (lon + unwrap_longitude(vertex.longitude, anchor), lat + vertex.latitude)
    });
    Coordinates::try_new(wrap_longitude(sum_lon / count), sum_lat / count).ok()
}

/// Shift `longitude` by whole turns to lie within 180° of `anchor`.
fn unwrap_longitude(longitude: f64, anchor: f64) -> f64 {
    let delta = longitude - anchor;
    if delta > 180.0 {
        longitude - 360.0
    } else if delta < -180.0 {
        longitude + 360.0
    } else {
        longitude
    }
}

fn wrap_longitude(longitude: f64) -> f64 {
    if longitude > 180.0 {
        longitude - 360.0
    } else if longitude < -180.0 {
        longitude + 360.0
    } else {
        longitude
    }
}
