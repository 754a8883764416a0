//! Reqwest-backed USGS earthquake source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::FeatureCollectionDto;
use crate::domain::event::SourceKind;
use crate::domain::ports::{HazardSource, RawHazardRecord, SourceError};
use crate::outbound::http_support::{
    HttpIdentity, build_client, map_transport_error, success_body,
};

/// Past-day summary of all earthquakes.
pub const DEFAULT_USGS_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";

/// USGS adapter reading one GeoJSON summary feed.
pub struct UsgsHttpSource {
    client: Client,
    endpoint: Url,
}

impl UsgsHttpSource {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
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
impl HazardSource for UsgsHttpSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Usgs
    }

    async fn fetch_hazards(&self) -> Result<Vec<RawHazardRecord>, SourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/geo+json")
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = success_body(response).await?;
        parse_features(&body)
    }
}

pub(crate) fn parse_features(body: &[u8]) -> Result<Vec<RawHazardRecord>, SourceError> {
    let decoded: FeatureCollectionDto = serde_json::from_slice(body)
        .map_err(|error| SourceError::decode(format!("invalid USGS GeoJSON payload: {error}")))?;
    Ok(decoded.into_raw_records())
}
