//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs carry `Option` fields so a missing value and a malformed one
//! both surface as `invalid_request` with `details {field, code}` instead of
//! an opaque extractor rejection.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;
use crate::domain::geo::{Coordinates, GeoValidationError, RadiusKm, RadiusMeters};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    OutOfRange,
    MalformedBody,
    MalformedQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::OutOfRange => "out_of_range",
            Self::MalformedBody => "malformed_body",
            Self::MalformedQuery => "malformed_query",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

fn out_of_range_error(field: FieldName, message: impl Into<String>) -> Error {
    field_error(field, ErrorCode::OutOfRange, message.into())
}

fn require(value: Option<f64>, field: FieldName) -> Result<f64, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Validate a latitude/longitude pair.
pub(crate) fn parse_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
    latitude_field: FieldName,
    longitude_field: FieldName,
) -> Result<Coordinates, Error> {
    let lat = require(latitude, latitude_field)?;
    let lon = require(longitude, longitude_field)?;
    Coordinates::try_new(lon, lat).map_err(|error| match error {
        GeoValidationError::InvalidLatitude(_) => {
            out_of_range_error(latitude_field, error.to_string())
        }
        _ => out_of_range_error(longitude_field, error.to_string()),
    })
}

/// Validate a hazard radius in kilometres.
pub(crate) fn parse_radius_km(value: Option<f64>, field: FieldName) -> Result<RadiusKm, Error> {
    let raw = require(value, field)?;
    RadiusKm::try_new(raw).map_err(|error| out_of_range_error(field, error.to_string()))
}

/// Validate a place or resource radius in metres.
pub(crate) fn parse_radius_meters(
    value: Option<f64>,
    field: FieldName,
) -> Result<RadiusMeters, Error> {
    let raw = require(value, field)?;
    RadiusMeters::try_new(raw).map_err(|error| out_of_range_error(field, error.to_string()))
}

/// Turn JSON extractor rejections into `invalid_request` payloads.
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(%error, "rejected malformed JSON body");
    let payload = Error::invalid_request(format!("malformed JSON body: {error}"))
        .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }));
    payload.into()
}

/// Turn query-string extractor rejections into `invalid_request` payloads.
pub fn query_error_handler(
    error: QueryPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    debug!(%error, "rejected malformed query string");
    let payload = Error::invalid_request(format!("malformed query string: {error}"))
        .with_details(json!({ "code": ErrorCode::MalformedQuery.as_str() }));
    payload.into()
}
