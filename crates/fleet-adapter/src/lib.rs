//! # Fleet Adapter Layer
//!
//! Persistence for the Fleet aggregate (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `database/` - Storage backends speaking flattened rows (SQLite, in-memory)
//! - `repository/` - `FleetRepository` implementation: rows <-> aggregate

pub mod database;
pub mod repository;

pub use database::{
    in_memory::InMemoryFleetDatabase, sqlite::SqliteFleetDatabase, DatabaseError, FleetDatabase,
    FleetFilter, FleetHeaderRow, FleetRow, FleetStore, VehicleRow,
};
pub use repository::storage::StorageFleetRepository;
