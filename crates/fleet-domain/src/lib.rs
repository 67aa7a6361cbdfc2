//! # Fleet Domain Layer
//!
//! Pure business logic for tracking a user's vehicles and where they are.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Fleet aggregate, Vehicle, value objects       ││
//! │  │  repository/- Trait definitions (not implementations)       ││
//! │  │  error      - Invariant violations                          ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Golden Rule
//!
//! **This crate knows nothing about storage.**
//!
//! If we switch from SQLite to PostgreSQL, this crate doesn't change.

pub mod error;
pub mod model;
pub mod repository;

// Re-export commonly used types
pub use error::{FleetError, InvalidCoordinate};

pub use model::{
    fleet::Fleet,
    identifier::{FleetId, PlateNumber, UserId},
    location::Location,
    vehicle::{create_vehicle, Vehicle},
};

pub use repository::fleet_repository::{FleetCriteria, FleetRepository, RepositoryError};
