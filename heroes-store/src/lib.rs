//! Storage backends for the heroes catalogue.
//!
//! [`MemoryHeroStore`] keeps records in process memory and backs the tests
//! and database-less runs; [`PgHeroStore`] persists them in PostgreSQL.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod memory;
pub mod postgres;

pub use memory::MemoryHeroStore;
pub use postgres::{create_pool, ensure_schema, DatabaseConfig, PgHeroStore};
