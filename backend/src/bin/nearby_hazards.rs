//! Query the live hazard feeds from the command line and print merged events
//! as JSON.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use horizon::domain::geo::{Coordinates, RadiusKm};
use horizon::domain::ports::{HazardSource, NearbyHazardsQuery, NearbyHazardsRequest};
use horizon::domain::{DEFAULT_SOURCE_TIMEOUT, NearbyHazardsService};
use horizon::inbound::http::hazards::HazardResponse;
use horizon::outbound::HttpIdentity;
use horizon::outbound::eonet::{DEFAULT_EONET_DAYS, DEFAULT_EONET_URL, EonetHttpSource};
use horizon::outbound::usgs::{DEFAULT_USGS_URL, UsgsHttpSource};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

/// `nearby-hazards` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nearby-hazards",
    about = "Fetch EONET and USGS hazards, merge duplicates, and print those near a point",
    version
)]
struct CliArgs {
    /// Latitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,
    /// Longitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,
    /// Search radius in kilometres.
    #[arg(long = "radius-km", value_name = "km")]
    radius_km: f64,
    /// Per-feed deadline in milliseconds.
    #[arg(long = "timeout-ms", value_name = "ms")]
    timeout_ms: Option<u64>,
    /// EONET events endpoint.
    #[arg(long = "eonet-url", value_name = "url", default_value = DEFAULT_EONET_URL)]
    eonet_url: Url,
    /// Days of open EONET events to request.
    #[arg(long = "eonet-days", value_name = "days", default_value_t = DEFAULT_EONET_DAYS)]
    eonet_days: u32,
    /// USGS GeoJSON feed.
    #[arg(long = "usgs-url", value_name = "url", default_value = DEFAULT_USGS_URL)]
    usgs_url: Url,
}

impl CliArgs {
    fn timeout(&self) -> Duration {
        self.timeout_ms
            .map_or(DEFAULT_SOURCE_TIMEOUT, Duration::from_millis)
    }

    fn request(&self) -> io::Result<NearbyHazardsRequest> {
        let center = Coordinates::try_new(self.longitude, self.latitude)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
        let radius = RadiusKm::try_new(self.radius_km)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
        Ok(NearbyHazardsRequest { center, radius })
    }
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

/// Log to stderr so stdout carries only the JSON result.
///
/// Returns whether this call installed the subscriber.
fn init_tracing() -> bool {
    match fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, "tracing init failed");
            false
        }
    }
}

async fn async_main() -> io::Result<()> {
    init_tracing();

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let request = args.request()?;
    let identity = HttpIdentity::default();
    let timeout = args.timeout();

    let eonet = EonetHttpSource::new(args.eonet_url, args.eonet_days, timeout, &identity)
        .map_err(|error| io::Error::other(format!("build EONET client: {error}")))?;
    let usgs = UsgsHttpSource::new(args.usgs_url, timeout, &identity)
        .map_err(|error| io::Error::other(format!("build USGS client: {error}")))?;
    let sources: Vec<Arc<dyn HazardSource>> = vec![Arc::new(eonet), Arc::new(usgs)];
    let service = NearbyHazardsService::with_noop_metrics(sources, timeout);

    let events = service
        .nearby_hazards(&request)
        .await
        .map_err(|error| io::Error::other(format!("hazard query failed: {error}")))?;
    let response: Vec<HazardResponse> = events.into_iter().map(HazardResponse::from).collect();
    let json = serde_json::to_string_pretty(&response).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI parsing and bootstrap.

    use rstest::rstest;

    use super::*;

    fn parse(extra: &[&str]) -> Result<CliArgs, clap::Error> {
        let mut argv = vec!["nearby-hazards"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv)
    }

    #[rstest]
    fn defaults_point_at_public_feeds() {
        let args = parse(&[
            "--latitude",
            "35.0",
            "--longitude",
            "-118.0",
            "--radius-km",
            "50",
        ])
        .expect("arguments should parse");
        assert_eq!(args.eonet_url.as_str(), DEFAULT_EONET_URL);
        assert_eq!(args.usgs_url.as_str(), DEFAULT_USGS_URL);
        assert_eq!(args.timeout(), DEFAULT_SOURCE_TIMEOUT);
        assert_eq!(args.request().expect("valid request").radius.get(), 50.0);
    }

    #[rstest]
    fn out_of_range_latitude_is_invalid_input() {
        let args = parse(&[
            "--latitude",
            "120",
            "--longitude",
            "0",
            "--radius-km",
            "5",
        ])
        .expect("arguments should parse");
        let error = args.request().expect_err("latitude should be rejected");
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
    }

    #[rstest]
    fn radius_is_required() {
        assert!(parse(&["--latitude", "1", "--longitude", "1"]).is_err());
    }

    #[test]
    fn repeated_tracing_init_is_reported_not_fatal() {
        init_tracing();
        assert!(!init_tracing(), "a second subscriber cannot be installed");
    }
}
