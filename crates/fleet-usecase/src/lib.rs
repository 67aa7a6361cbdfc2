//! # Fleet Use Case Layer
//!
//! Application-specific business rules.
//! Each use case is a command or query plus one handler that loads the
//! aggregate through the repository port, calls the domain and saves.
//!
//! ```text
//! Handler ──find_one_by_id──▶ FleetRepository ──▶ Fleet
//!    │                                              │
//!    └──────────── save ◀──── domain call ◀─────────┘
//! ```

pub use fleet_domain;

pub mod command;
pub mod error;
pub mod handler;
pub mod query;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{CreateFleetCommand, LocalizeVehicleCommand, RegisterVehicleCommand};
pub use error::HandlerError;
pub use handler::{
    CreateFleetHandler, FleetInfoHandler, LocalizeVehicleHandler, RegisterVehicleHandler,
    UserFleetsHandler, VehicleLocationHandler,
};
pub use query::{FleetInfoQuery, UserFleetsQuery, VehicleLocationQuery};
