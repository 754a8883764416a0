//! Reqwest-backed EONET hazard source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::EonetResponseDto;
use crate::domain::event::SourceKind;
use crate::domain::ports::{HazardSource, RawHazardRecord, SourceError};
use crate::outbound::http_support::{
    HttpIdentity, build_client, map_transport_error, success_body,
};

/// Open-events endpoint of the EONET API.
pub const DEFAULT_EONET_URL: &str = "https://eonet.gsfc.nasa.gov/api/v2.1/events";
/// Look-back window requested from EONET.
pub const DEFAULT_EONET_DAYS: u32 = 2;

/// EONET adapter fetching open events from the last few days.
pub struct EonetHttpSource {
    client: Client,
    endpoint: Url,
    days: u32,
}

impl EonetHttpSource {
    /// Build an adapter with an explicit request timeout and look-back window.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        days: u32,
        timeout: Duration,
        identity: &HttpIdentity,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout, identity)?,
            endpoint,
            days: days.max(1),
        })
    }

    fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("status", "open")
            .append_pair("days", &self.days.to_string());
        url
    }
}

#[async_trait]
impl HazardSource for EonetHttpSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Eonet
    }

    async fn fetch_hazards(&self) -> Result<Vec<RawHazardRecord>, SourceError> {
        let response = self
            .client
            .get(self.request_url())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = success_body(response).await?;
        parse_events(&body)
    }
}

pub(crate) fn parse_events(body: &[u8]) -> Result<Vec<RawHazardRecord>, SourceError> {
    let decoded: EonetResponseDto = serde_json::from_slice(body)
        .map_err(|error| SourceError::decode(format!("invalid EONET JSON payload: {error}")))?;
    Ok(decoded.into_raw_records())
}

#[cfg(test)]
mod tests {
    //! Request construction and payload decoding without the network.

    use super::*;

    fn source(days: u32) -> EonetHttpSource {
        let endpoint = Url::parse(DEFAULT_EONET_URL).expect("endpoint");
        EonetHttpSource::new(
            endpoint,
            days,
            Duration::from_secs(1),
            &HttpIdentity::default(),
        )
        .expect("client")
    }

    #[test]
    fn requests_open_events_for_the_window() {
        let url = source(2).request_url();
        assert_eq!(
            url.as_str(),
            "https://eonet.gsfc.nasa.gov/api/v2.1/events?status=open&days=2"
        );
    }

    #[test]
    fn zero_day_window_is_widened_to_one() {
        assert!(source(0).request_url().as_str().ends_with("days=1"));
    }

    #[test]
    fn empty_event_list_decodes() {
        let records = parse_events(br#"{"title":"EONET Events","events":[]}"#).expect("decode");
        assert!(records.is_empty());
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let error = parse_events(b"Service Unavailable").expect_err("decode fails");
        assert!(matches!(error, SourceError::Decode { .. }));
    }
}
