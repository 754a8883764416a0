//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the [`ErrorSchema`] wrappers that describe domain failures without
//! coupling domain types to utoipa.
//!
//! The generated document is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::hazards::{HazardResponse, NearbyHazardsBody, OccurrenceResponse};
use crate::inbound::http::places::PlaceResponse;
use crate::inbound::http::resources::{
    AlertAcknowledgementResponse, AlertBody, DispatchBody, LocationBody, ResourceResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Horizon backend API",
        description = "Nearby natural hazards and emergency resources. Hazard radii are kilometres; place and resource distances are metres."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::hazards::nearby_hazards,
        crate::inbound::http::places::nearby_places,
        crate::inbound::http::resources::nearby_resources,
        crate::inbound::http::resources::alert_resource,
        crate::inbound::http::resources::dispatch_nearest,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        NearbyHazardsBody,
        HazardResponse,
        OccurrenceResponse,
        PlaceResponse,
        ResourceResponse,
        LocationBody,
        AlertBody,
        DispatchBody,
        AlertAcknowledgementResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "hazards", description = "Merged natural-hazard reports"),
        (name = "places", description = "Cached hospitals, shelters, and blood donation sites"),
        (name = "resources", description = "Resource lookup and alert dispatch"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
