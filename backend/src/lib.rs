//! Horizon proximity backend.
//!
//! Aggregates natural-hazard feeds and caches response-capable places so
//! callers can ask what is dangerous, and who can help, near a point.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
pub use settings::HorizonSettings;
