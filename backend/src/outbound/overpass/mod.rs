//! Overpass outbound adapter.
//!
//! A thin HTTP implementation of the `PlaceSource` port that asks Overpass
//! for hospitals, shelters, and blood donation sites around a point.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_OVERPASS_URL, OverpassHttpSource};
