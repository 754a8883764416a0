//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use horizon::HorizonSettings;
use horizon::domain::DEFAULT_SOURCE_TIMEOUT;
use horizon::outbound::HttpIdentity;
use horizon::outbound::persistence::DbPool;
use url::Url;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Upstream feed endpoints.
#[derive(Debug, Clone)]
pub struct SourceEndpoints {
    /// EONET events endpoint.
    pub eonet: Url,
    /// Open-event window requested from EONET.
    pub eonet_days: u32,
    /// USGS GeoJSON summary feed.
    pub usgs: Url,
    /// Overpass interpreter endpoint.
    pub overpass: Url,
}

impl SourceEndpoints {
    /// Resolve endpoints from settings, applying defaults.
    ///
    /// # Errors
    /// Returns [`url::ParseError`] when a configured URL is malformed.
    pub fn from_settings(settings: &HorizonSettings) -> Result<Self, url::ParseError> {
        Ok(Self {
            eonet: Url::parse(settings.eonet_url())?,
            eonet_days: settings.eonet_days(),
            usgs: Url::parse(settings.usgs_url())?,
            overpass: Url::parse(settings.overpass_url())?,
        })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) endpoints: SourceEndpoints,
    pub(crate) source_timeout: Duration,
    pub(crate) identity: HttpIdentity,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a configuration with the default timeout and identity and
    /// the in-memory place store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, endpoints: SourceEndpoints) -> Self {
        Self {
            bind_addr,
            endpoints,
            source_timeout: DEFAULT_SOURCE_TIMEOUT,
            identity: HttpIdentity::default(),
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Deadline applied to each upstream fetch.
    #[must_use]
    pub fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self
    }

    /// Identity presented to upstream feeds.
    #[must_use]
    pub fn with_identity(mut self, identity: HttpIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Attach a database connection pool; places are then persisted in
    /// PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
