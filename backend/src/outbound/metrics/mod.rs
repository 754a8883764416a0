//! Prometheus-backed implementations of domain metrics ports.
//!
//! Only compiled with the `metrics` feature.

mod prometheus_source_fetches;

pub use prometheus_source_fetches::PrometheusSourceFetchMetrics;
