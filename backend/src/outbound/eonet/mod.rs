//! EONET natural-event feed adapter.
//!
//! Implements the `HazardSource` port over the open-events endpoint.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_EONET_DAYS, DEFAULT_EONET_URL, EonetHttpSource};

#[cfg(test)]
pub(crate) use http_source::parse_events;
