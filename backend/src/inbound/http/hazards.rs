//! Nearby hazard endpoint.
//!
//! ```text
//! POST /api/v1/hazards/nearby {"latitude":40.7,"longitude":-74.0,"radiusKm":50}
//! ```
//!
//! Hazard radii are kilometres; every other proximity endpoint takes metres.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::event::{Event, Occurrence};
use crate::domain::geo::Coordinates;
use crate::domain::ports::NearbyHazardsRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_coordinates, parse_radius_km};

const LATITUDE: FieldName = FieldName::new("latitude");
const LONGITUDE: FieldName = FieldName::new("longitude");
const RADIUS_KM: FieldName = FieldName::new("radiusKm");

/// Request body for nearby hazard lookups.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbyHazardsBody {
    /// Query latitude in degrees.
    #[schema(example = 40.7)]
    pub latitude: Option<f64>,
    /// Query longitude in degrees.
    #[schema(example = -74.0)]
    pub longitude: Option<f64>,
    /// Search radius in kilometres.
    #[schema(example = 50.0)]
    pub radius_km: Option<f64>,
}

impl TryFrom<NearbyHazardsBody> for NearbyHazardsRequest {
    type Error = crate::domain::Error;

    fn try_from(body: NearbyHazardsBody) -> Result<Self, Self::Error> {
        Ok(Self {
            center: parse_coordinates(body.latitude, body.longitude, LATITUDE, LONGITUDE)?,
            radius: parse_radius_km(body.radius_km, RADIUS_KM)?,
        })
    }
}

fn lon_lat(coordinates: Coordinates) -> [f64; 2] {
    [coordinates.longitude, coordinates.latitude]
}

/// One report folded into a hazard.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceResponse {
    pub id: String,
    /// Feed that reported it: `eonet` or `usgs`.
    pub source: String,
    /// RFC 3339 observation time, when known.
    pub observed_at: Option<String>,
    /// `[longitude, latitude]`.
    #[schema(value_type = Vec<f64>)]
    pub coordinates: [f64; 2],
    pub source_link: Option<String>,
}

impl From<Occurrence> for OccurrenceResponse {
    fn from(occurrence: Occurrence) -> Self {
        Self {
            id: occurrence.id,
            source: occurrence.source.as_str().to_owned(),
            observed_at: occurrence.observed_at.map(|at| at.to_rfc3339()),
            coordinates: lon_lat(occurrence.coordinates),
            source_link: occurrence.source_link,
        }
    }
}

/// A de-duplicated hazard near the query point.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HazardResponse {
    pub id: String,
    pub source: String,
    #[schema(example = "Wildfire - Kern County")]
    pub title: String,
    #[schema(example = "Wildfires")]
    pub category: String,
    /// `[longitude, latitude]` of the first report.
    #[schema(value_type = Vec<f64>)]
    pub coordinates: [f64; 2],
    pub observed_at: Option<String>,
    pub source_link: Option<String>,
    /// Every contributing report, in discovery order.
    pub occurrences: Vec<OccurrenceResponse>,
}

impl From<Event> for HazardResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            source: event.source.as_str().to_owned(),
            title: event.title,
            category: event.category,
            coordinates: lon_lat(event.coordinates),
            observed_at: event.observed_at.map(|at| at.to_rfc3339()),
            source_link: event.source_link,
            occurrences: event
                .occurrences
                .into_iter()
                .map(OccurrenceResponse::from)
                .collect(),
        }
    }
}

/// List hazards near a point.
#[utoipa::path(
    post,
    path = "/api/v1/hazards/nearby",
    request_body = NearbyHazardsBody,
    description = "Fetch all hazard feeds, merge duplicate reports, and return hazards within radiusKm kilometres. Unavailable feeds shrink the result instead of failing it.",
    responses(
        (status = 200, description = "Nearby hazards", body = [HazardResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["hazards"],
    operation_id = "nearbyHazards"
)]
#[post("/hazards/nearby")]
pub async fn nearby_hazards(
    state: web::Data<HttpState>,
    body: web::Json<NearbyHazardsBody>,
) -> ApiResult<HttpResponse> {
    let request = NearbyHazardsRequest::try_from(body.into_inner())?;
    let events = state.hazards.nearby_hazards(&request).await?;
    let response: Vec<HazardResponse> = events.into_iter().map(HazardResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}
