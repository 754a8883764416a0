//! Domain primitives, algorithms, and services.
//!
//! Purpose: model hazards and places independently of any feed or store,
//! and implement the proximity pipeline over them. Adapters live in
//! `inbound` and `outbound` and reach the domain only through [`ports`].
//!
//! Public surface:
//! - [`geo`]: haversine distance, bounding boxes, radius units.
//! - [`normalize`], [`merge`], [`proximity`], [`resource`]: pipeline stages.
//! - [`NearbyHazardsService`], [`NearbyPlacesService`],
//!   [`ResourceDispatchService`]: use-case implementations.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.

pub mod error;
pub mod event;
pub mod geo;
pub mod merge;
pub mod normalize;
pub mod place;
pub mod ports;
pub mod proximity;
pub mod resource;
pub mod trace_id;

mod dispatch_service;
mod hazards_service;
mod places_service;

pub use self::dispatch_service::ResourceDispatchService;
pub use self::error::{Error, ErrorCode};
pub use self::hazards_service::{DEFAULT_SOURCE_TIMEOUT, NearbyHazardsService};
pub use self::places_service::NearbyPlacesService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
