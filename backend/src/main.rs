//! Backend entry-point: loads configuration, prepares the place store, and
//! serves the REST API.

mod server;

#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use horizon::HorizonSettings;
use horizon::inbound::http::health::HealthState;
use horizon::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use ortho_config::OrthoConfig as _;
use server::{ServerConfig, SourceEndpoints, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = HorizonSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

async fn build_server_config(settings: &HorizonSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;
    let endpoints = SourceEndpoints::from_settings(settings)
        .map_err(|e| std::io::Error::other(format!("invalid feed endpoint: {e}")))?;
    let mut config = ServerConfig::new(bind_addr, endpoints)
        .with_source_timeout(settings.source_timeout())
        .with_identity(settings.http_identity());

    if let Some(database_url) = settings.database_url() {
        if settings.skip_migrations {
            info!("skipping migrations");
        } else {
            let applied = run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
            info!(applied, "database schema up to date");
        }
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("horizon")
            .endpoint("/metrics")
            .build()
    }));

    Ok(config)
}

/// Build Prometheus middleware, logging and discarding failures so the
/// server still starts without metrics.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(make: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match make() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "metrics initialisation failed; continuing without /metrics");
            None
        }
    }
}
