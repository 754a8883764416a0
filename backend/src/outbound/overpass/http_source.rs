//! Reqwest-backed Overpass place source.
//!
//! This adapter owns transport details only: query construction, timeout and
//! HTTP error mapping, and JSON decoding into raw place records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::OverpassResponseDto;
use crate::domain::ports::{PlaceSearch, PlaceSource, RawPlaceRecord, SourceError};
use crate::outbound::http_support::{
    HttpIdentity, build_client, map_transport_error, success_body,
};

/// Public Overpass interpreter.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

const QUERY_TIMEOUT_SECONDS: u32 = 25;

/// Tag filters selecting response-capable places.
const PLACE_SELECTORS: [&str; 3] = [
    r#"["amenity"="hospital"]"#,
    r#"["amenity"="shelter"]"#,
    r#"["healthcare"="blood_donation"]"#,
];

/// Overpass adapter that POSTs one query per search against one endpoint.
pub struct OverpassHttpSource {
    client: Client,
    endpoint: Url,
}

impl OverpassHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_identity(endpoint, timeout, &HttpIdentity::default())
    }

    /// Build an adapter with an explicit outbound identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_identity(
        endpoint: Url,
        timeout: Duration,
        identity: &HttpIdentity,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout, identity)?,
            endpoint,
        })
    }
}

#[async_trait]
impl PlaceSource for OverpassHttpSource {
    async fn fetch_places(&self, search: &PlaceSearch) -> Result<Vec<RawPlaceRecord>, SourceError> {
        let query = build_overpass_query(search);
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("data", query)])
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = success_body(response).await?;
        parse_places(&body)
    }
}

fn parse_places(body: &[u8]) -> Result<Vec<RawPlaceRecord>, SourceError> {
    let decoded: OverpassResponseDto = serde_json::from_slice(body).map_err(|error| {
        SourceError::decode(format!("invalid Overpass JSON payload: {error}"))
    })?;
    Ok(decoded.into_raw_records())
}

fn build_overpass_query(search: &PlaceSearch) -> String {
    let around = format!(
        "(around:{radius},{lat},{lon})",
        radius = search.radius.get(),
        lat = search.center.latitude,
        lon = search.center.longitude,
    );

    let mut lines = Vec::with_capacity(PLACE_SELECTORS.len() * 2);
    for selector in PLACE_SELECTORS {
        for element_type in ["node", "way"] {
            lines.push(format!("  {element_type}{selector}{around};"));
        }
    }

    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECONDS}];\n(\n{query_lines}\n);\nout center tags;",
        query_lines = lines.join("\n")
    )
}
