//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod hazards;
pub mod health;
pub mod places;
pub mod resources;
pub mod schemas;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;
pub use validation::{json_error_handler, query_error_handler};
