//! Place store adapters.
//!
//! [`DieselPlaceRepository`] persists to PostgreSQL through Diesel with async
//! support from `diesel-async` and `bb8` pooling. Row structs (`models.rs`)
//! and table definitions (`schema.rs`) stay internal; repositories only
//! translate between rows and domain types.
//! [`InMemoryPlaceRepository`] serves deployments without a database.
//!
//! # Example
//!
//! ```ignore
//! use horizon::outbound::persistence::{DbPool, DieselPlaceRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/horizon")).await?;
//! let repository = DieselPlaceRepository::new(pool);
//! ```

mod diesel_helpers;
mod diesel_place_repository;
mod memory_place_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_place_repository::DieselPlaceRepository;
pub use memory_place_repository::InMemoryPlaceRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
