//! USGS earthquake feed adapter.
//!
//! Implements the `HazardSource` port over the GeoJSON summary feeds.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_USGS_URL, UsgsHttpSource};

#[cfg(test)]
pub(crate) use http_source::parse_features;
