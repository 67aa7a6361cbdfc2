//! CLI Commands

pub mod fleet;
pub mod vehicle;

pub use fleet::{CreateCommand, FleetsCommand, InfoCommand};
pub use vehicle::{LocalizeVehicleCommand, LocateCommand, RegisterVehicleCommand};

use clap::Subcommand;
use fleet_domain::FleetRepository;

use crate::output::Report;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new fleet
    Create(CreateCommand),
    /// Register a vehicle into a fleet
    RegisterVehicle(RegisterVehicleCommand),
    /// Set the location of a vehicle
    #[command(allow_negative_numbers = true)]
    LocalizeVehicle(LocalizeVehicleCommand),
    /// Get fleet information by ID
    Info(InfoCommand),
    /// Get the location of a vehicle in a fleet
    Locate(LocateCommand),
    /// List the fleets owned by a user
    Fleets(FleetsCommand),
}

impl Command {
    pub fn run<R: FleetRepository>(&self, repository: &mut R) -> anyhow::Result<Report> {
        match self {
            Command::Create(cmd) => cmd.run(repository),
            Command::RegisterVehicle(cmd) => cmd.run(repository),
            Command::LocalizeVehicle(cmd) => cmd.run(repository),
            Command::Info(cmd) => cmd.run(repository),
            Command::Locate(cmd) => cmd.run(repository),
            Command::Fleets(cmd) => cmd.run(repository),
        }
    }
}
