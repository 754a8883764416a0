//! Process configuration loaded via OrthoConfig.
//!
//! Every value may come from a CLI flag or a `HORIZON_*` environment
//! variable. Unset values fall back to the defaults below.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_SOURCE_TIMEOUT;
use crate::outbound::HttpIdentity;
use crate::outbound::eonet::{DEFAULT_EONET_DAYS, DEFAULT_EONET_URL};
use crate::outbound::overpass::DEFAULT_OVERPASS_URL;
use crate::outbound::usgs::DEFAULT_USGS_URL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values controlling the HTTP server and feed adapters.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HORIZON")]
pub struct HorizonSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory place store is used when unset.
    pub database_url: Option<String>,
    /// Skip embedded migrations on startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
    /// EONET events endpoint override.
    pub eonet_url: Option<String>,
    /// How many days of open EONET events to request.
    pub eonet_days: Option<u32>,
    /// USGS GeoJSON feed override.
    pub usgs_url: Option<String>,
    /// Overpass interpreter endpoint override.
    pub overpass_url: Option<String>,
    /// Per-adapter deadline in milliseconds.
    pub source_timeout_ms: Option<u64>,
    /// User agent sent to upstream feeds.
    pub user_agent: Option<String>,
}

impl HorizonSettings {
    /// Parse the configured bind address.
    ///
    /// # Errors
    /// Returns [`AddrParseError`] when the value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    #[must_use]
    pub fn eonet_url(&self) -> &str {
        self.eonet_url.as_deref().unwrap_or(DEFAULT_EONET_URL)
    }

    #[must_use]
    pub fn eonet_days(&self) -> u32 {
        self.eonet_days.unwrap_or(DEFAULT_EONET_DAYS)
    }

    #[must_use]
    pub fn usgs_url(&self) -> &str {
        self.usgs_url.as_deref().unwrap_or(DEFAULT_USGS_URL)
    }

    #[must_use]
    pub fn overpass_url(&self) -> &str {
        self.overpass_url.as_deref().unwrap_or(DEFAULT_OVERPASS_URL)
    }

    /// Deadline applied to each upstream fetch.
    #[must_use]
    pub fn source_timeout(&self) -> Duration {
        self.source_timeout_ms
            .map_or(DEFAULT_SOURCE_TIMEOUT, Duration::from_millis)
    }

    /// Identity presented to upstream feeds.
    #[must_use]
    pub fn http_identity(&self) -> HttpIdentity {
        self.user_agent
            .as_deref()
            .map_or_else(HttpIdentity::default, |agent| HttpIdentity {
                user_agent: agent.to_owned(),
            })
    }
}
