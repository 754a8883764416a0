//! Builders wiring feed adapters, stores, and services into handler state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use horizon::domain::ports::{
    HazardSource, NoOpSourceFetchMetrics, PlaceRepository, SourceFetchMetrics,
};
use horizon::domain::{NearbyHazardsService, NearbyPlacesService, ResourceDispatchService};
use horizon::inbound::http::state::HttpState;
use horizon::outbound::alerts::TracingAlertNotifier;
use horizon::outbound::eonet::EonetHttpSource;
#[cfg(feature = "metrics")]
use horizon::outbound::metrics::PrometheusSourceFetchMetrics;
use horizon::outbound::overpass::OverpassHttpSource;
use horizon::outbound::persistence::{DieselPlaceRepository, InMemoryPlaceRepository};
use horizon::outbound::usgs::UsgsHttpSource;

use super::ServerConfig;

fn client_error(feed: &str, err: reqwest::Error) -> std::io::Error {
    std::io::Error::other(format!("{feed} client construction failed: {err}"))
}

/// Build the fetch metrics port.
///
/// Registers the Prometheus counter when a registry is configured, otherwise
/// falls back to the no-op implementation.
///
/// # Errors
/// Returns [`std::io::Error`] if Prometheus metric registration fails.
#[cfg(feature = "metrics")]
fn build_fetch_metrics(config: &ServerConfig) -> std::io::Result<Arc<dyn SourceFetchMetrics>> {
    match &config.prometheus {
        Some(prom) => {
            let metrics = PrometheusSourceFetchMetrics::new(&prom.registry).map_err(|e| {
                std::io::Error::other(format!("source fetch metrics registration failed: {e}"))
            })?;
            Ok(Arc::new(metrics))
        }
        None => Ok(Arc::new(NoOpSourceFetchMetrics)),
    }
}

/// Build the fetch metrics port; always a no-op without the metrics feature.
#[cfg(not(feature = "metrics"))]
fn build_fetch_metrics(_config: &ServerConfig) -> std::io::Result<Arc<dyn SourceFetchMetrics>> {
    Ok(Arc::new(NoOpSourceFetchMetrics))
}

fn build_place_repository(config: &ServerConfig) -> Arc<dyn PlaceRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselPlaceRepository::new(pool.clone())),
        None => {
            info!("no database configured; places are cached in memory");
            Arc::new(InMemoryPlaceRepository::new(Arc::new(DefaultClock)))
        }
    }
}

fn build_hazard_sources(config: &ServerConfig) -> std::io::Result<Vec<Arc<dyn HazardSource>>> {
    let eonet = EonetHttpSource::new(
        config.endpoints.eonet.clone(),
        config.endpoints.eonet_days,
        config.source_timeout,
        &config.identity,
    )
    .map_err(|err| client_error("EONET", err))?;
    let usgs = UsgsHttpSource::new(
        config.endpoints.usgs.clone(),
        config.source_timeout,
        &config.identity,
    )
    .map_err(|err| client_error("USGS", err))?;
    Ok(vec![Arc::new(eonet), Arc::new(usgs)])
}

/// Assemble handler state from the configured adapters.
///
/// # Errors
/// Returns [`std::io::Error`] when an HTTP client cannot be built or metric
/// registration fails.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let metrics = build_fetch_metrics(config)?;
    let repository = build_place_repository(config);
    let overpass = OverpassHttpSource::with_identity(
        config.endpoints.overpass.clone(),
        config.source_timeout,
        &config.identity,
    )
    .map_err(|err| client_error("Overpass", err))?;

    let hazards = NearbyHazardsService::new(
        build_hazard_sources(config)?,
        metrics.clone(),
        config.source_timeout,
    );
    let places = NearbyPlacesService::new(
        Arc::new(overpass),
        repository.clone(),
        metrics,
        config.source_timeout,
    );
    let resources = ResourceDispatchService::new(repository, Arc::new(TracingAlertNotifier));

    Ok(web::Data::new(HttpState::new(
        Arc::new(hazards),
        Arc::new(places),
        Arc::new(resources),
    )))
}
