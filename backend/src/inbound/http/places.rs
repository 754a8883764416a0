//! Nearby places endpoint.
//!
//! ```text
//! GET /api/v1/places/nearby?latitude=40.7&longitude=-74.0&radiusMeters=2500
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::place::PersistedPlace;
use crate::domain::ports::PlaceSearch;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_coordinates, parse_radius_meters};

const LATITUDE: FieldName = FieldName::new("latitude");
const LONGITUDE: FieldName = FieldName::new("longitude");
const RADIUS_METERS: FieldName = FieldName::new("radiusMeters");

/// Query parameters for nearby place lookups.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct NearbyPlacesParams {
    /// Query latitude in degrees.
    pub latitude: Option<f64>,
    /// Query longitude in degrees.
    pub longitude: Option<f64>,
    /// Search radius in metres.
    pub radius_meters: Option<f64>,
}

impl TryFrom<NearbyPlacesParams> for PlaceSearch {
    type Error = crate::domain::Error;

    fn try_from(params: NearbyPlacesParams) -> Result<Self, Self::Error> {
        Ok(Self {
            center: parse_coordinates(params.latitude, params.longitude, LATITUDE, LONGITUDE)?,
            radius: parse_radius_meters(params.radius_meters, RADIUS_METERS)?,
        })
    }
}

/// A cached place near the query point.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResponse {
    /// Store identifier; use it to address alerts.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    /// Map feed identifier such as `n123`.
    #[schema(example = "n123")]
    pub external_id: String,
    #[schema(example = "hospital")]
    pub category: String,
    #[schema(example = "City Hospital")]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<PersistedPlace> for PlaceResponse {
    fn from(place: PersistedPlace) -> Self {
        Self {
            id: place.id,
            external_id: place.external_id,
            category: place.category,
            name: place.name,
            lat: place.coordinates.latitude,
            lon: place.coordinates.longitude,
        }
    }
}

/// List named response-capable places near a point.
#[utoipa::path(
    get,
    path = "/api/v1/places/nearby",
    params(NearbyPlacesParams),
    description = "Refresh the place cache from the map feed, then return named hospitals, shelters, and blood donation sites within radiusMeters metres.",
    responses(
        (status = 200, description = "Nearby places", body = [PlaceResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Place store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["places"],
    operation_id = "nearbyPlaces"
)]
#[get("/places/nearby")]
pub async fn nearby_places(
    state: web::Data<HttpState>,
    params: web::Query<NearbyPlacesParams>,
) -> ApiResult<HttpResponse> {
    let search = PlaceSearch::try_from(params.into_inner())?;
    let places = state.places.nearby_places(&search).await?;
    let response: Vec<PlaceResponse> = places.into_iter().map(PlaceResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}
