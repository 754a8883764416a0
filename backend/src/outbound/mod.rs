//! Outbound adapters implementing the domain's driven ports.
//!
//! Feed adapters (`eonet`, `usgs`, `overpass`) share the transport policy in
//! `http_support`; `persistence` holds the place stores.

pub mod alerts;
pub mod eonet;
mod http_support;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod overpass;
pub mod persistence;
pub mod usgs;

pub use http_support::HttpIdentity;
