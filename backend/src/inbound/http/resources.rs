//! Resource lookup and alert endpoints.
//!
//! ```text
//! GET  /api/v1/resources/nearby?latitude=..&longitude=..&maxDistanceMeters=..
//! POST /api/v1/resources/alert    {"resourceId":"..","location":{"lat":..,"lon":..}}
//! POST /api/v1/resources/dispatch {"location":{"lat":..,"lon":..},"maxDistanceMeters":..}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::geo::Coordinates;
use crate::domain::resource::{AlertAcknowledgement, NearbyResource};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_coordinates, parse_radius_meters,
};

const LATITUDE: FieldName = FieldName::new("latitude");
const LONGITUDE: FieldName = FieldName::new("longitude");
const LOCATION: FieldName = FieldName::new("location");
const LOCATION_LAT: FieldName = FieldName::new("location.lat");
const LOCATION_LON: FieldName = FieldName::new("location.lon");
const MAX_DISTANCE: FieldName = FieldName::new("maxDistanceMeters");
const RESOURCE_ID: FieldName = FieldName::new("resourceId");

/// Query parameters for nearby resource lookups.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct NearbyResourcesParams {
    /// Query latitude in degrees.
    pub latitude: Option<f64>,
    /// Query longitude in degrees.
    pub longitude: Option<f64>,
    /// Maximum distance in metres.
    pub max_distance_meters: Option<f64>,
}

/// Where help is needed.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, ToSchema)]
pub struct LocationBody {
    #[schema(example = 40.7)]
    pub lat: Option<f64>,
    #[schema(example = -74.0)]
    pub lon: Option<f64>,
}

impl LocationBody {
    fn parse(location: Option<Self>) -> Result<Coordinates, Error> {
        let location = location.ok_or_else(|| missing_field_error(LOCATION))?;
        parse_coordinates(location.lat, location.lon, LOCATION_LAT, LOCATION_LON)
    }
}

/// Request body for alerting a specific resource.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertBody {
    /// Identifier returned by the places or resources endpoints.
    #[schema(value_type = Option<String>, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub resource_id: Option<Uuid>,
    pub location: Option<LocationBody>,
}

/// Request body for alerting the nearest resource.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchBody {
    pub location: Option<LocationBody>,
    /// Maximum distance in metres.
    #[schema(example = 10000.0)]
    pub max_distance_meters: Option<f64>,
}

/// A named resource with its distance from the query point.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub external_id: String,
    pub category: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub capacity: i32,
    pub specialties: Vec<String>,
    /// Great-circle distance in kilometres.
    pub distance_km: f64,
}

impl From<NearbyResource> for ResourceResponse {
    fn from(resource: NearbyResource) -> Self {
        let place = resource.place;
        Self {
            id: place.id,
            external_id: place.external_id,
            category: place.category,
            name: place.name,
            lat: place.coordinates.latitude,
            lon: place.coordinates.longitude,
            capacity: place.capacity,
            specialties: place.specialties,
            distance_km: resource.distance_km,
        }
    }
}

/// Acknowledgement that an alert was accepted for delivery.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertAcknowledgementResponse {
    #[schema(example = "Alert sent successfully")]
    pub message: String,
    #[schema(value_type = String)]
    pub resource_id: Uuid,
    pub resource_name: String,
}

impl From<AlertAcknowledgement> for AlertAcknowledgementResponse {
    fn from(ack: AlertAcknowledgement) -> Self {
        Self {
            message: ack.message,
            resource_id: ack.resource_id,
            resource_name: ack.resource_name,
        }
    }
}

/// List named resources near a point, nearest first.
#[utoipa::path(
    get,
    path = "/api/v1/resources/nearby",
    params(NearbyResourcesParams),
    description = "Return cached named places within maxDistanceMeters metres, ordered by distance.",
    responses(
        (status = 200, description = "Nearby resources", body = [ResourceResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Place store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "nearbyResources"
)]
#[get("/resources/nearby")]
pub async fn nearby_resources(
    state: web::Data<HttpState>,
    params: web::Query<NearbyResourcesParams>,
) -> ApiResult<HttpResponse> {
    let params = params.into_inner();
    let center = parse_coordinates(params.latitude, params.longitude, LATITUDE, LONGITUDE)?;
    let max_distance = parse_radius_meters(params.max_distance_meters, MAX_DISTANCE)?;
    let resources = state
        .resources
        .nearby_resources(center, max_distance)
        .await?;
    let response: Vec<ResourceResponse> =
        resources.into_iter().map(ResourceResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// Alert one resource that help is needed.
#[utoipa::path(
    post,
    path = "/api/v1/resources/alert",
    request_body = AlertBody,
    responses(
        (status = 200, description = "Alert accepted", body = AlertAcknowledgementResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown resource", body = ErrorSchema),
        (status = 503, description = "Alert could not be handed off", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "alertResource"
)]
#[post("/resources/alert")]
pub async fn alert_resource(
    state: web::Data<HttpState>,
    body: web::Json<AlertBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let resource_id = body
        .resource_id
        .ok_or_else(|| missing_field_error(RESOURCE_ID))?;
    let location = LocationBody::parse(body.location)?;
    let ack = state.resources.alert(resource_id, location).await?;
    Ok(HttpResponse::Ok().json(AlertAcknowledgementResponse::from(ack)))
}

/// Alert whichever resource is nearest.
#[utoipa::path(
    post,
    path = "/api/v1/resources/dispatch",
    request_body = DispatchBody,
    responses(
        (status = 200, description = "Alert accepted", body = AlertAcknowledgementResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No resource within range", body = ErrorSchema),
        (status = 503, description = "Alert could not be handed off", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "dispatchNearestResource"
)]
#[post("/resources/dispatch")]
pub async fn dispatch_nearest(
    state: web::Data<HttpState>,
    body: web::Json<DispatchBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let location = LocationBody::parse(body.location)?;
    let max_distance = parse_radius_meters(body.max_distance_meters, MAX_DISTANCE)?;
    let ack = state
        .resources
        .dispatch_nearest(location, max_distance)
        .await?;
    Ok(HttpResponse::Ok().json(AlertAcknowledgementResponse::from(ack)))
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;
