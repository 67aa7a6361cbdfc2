//! fleet register-vehicle / localize-vehicle / locate commands

use clap::Args;
use fleet_domain::{FleetId, FleetRepository, PlateNumber};
use fleet_usecase::{
    LocalizeVehicleCommand as Localize, LocalizeVehicleHandler, RegisterVehicleCommand as Register,
    RegisterVehicleHandler, VehicleLocationHandler, VehicleLocationQuery,
};

use crate::output::{LocationView, Report};

#[derive(Debug, Args)]
pub struct RegisterVehicleCommand {
    /// Fleet ID
    pub fleet_id: String,
    /// Vehicle plate number
    pub plate_number: String,
    /// Vehicle type (car, truck, motorcycle)
    pub vehicle_type: String,
}

impl RegisterVehicleCommand {
    pub fn run<R: FleetRepository>(&self, repository: &mut R) -> anyhow::Result<Report> {
        let fleet_id = FleetId::new(self.fleet_id.as_str())?;
        let plate_number = PlateNumber::new(self.plate_number.as_str())?;

        RegisterVehicleHandler::new(repository).handle(Register::new(
            fleet_id.clone(),
            plate_number.clone(),
            self.vehicle_type.as_str(),
        ))?;

        Ok(Report::VehicleRegistered {
            fleet_id: fleet_id.into_inner(),
            plate_number: plate_number.into_inner(),
        })
    }
}

#[derive(Debug, Args)]
pub struct LocalizeVehicleCommand {
    /// Fleet ID
    pub fleet_id: String,
    /// Vehicle plate number
    pub plate_number: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Altitude in meters
    pub altitude: Option<f64>,
}

impl LocalizeVehicleCommand {
    pub fn run<R: FleetRepository>(&self, repository: &mut R) -> anyhow::Result<Report> {
        let command = Localize::new(
            FleetId::new(self.fleet_id.as_str())?,
            PlateNumber::new(self.plate_number.as_str())?,
            self.lat,
            self.lng,
            self.altitude,
        )?;
        let location = LocationView::from(&command.location);
        let fleet_id = command.fleet_id.to_string();
        let plate_number = command.plate_number.to_string();

        LocalizeVehicleHandler::new(repository).handle(command)?;

        Ok(Report::VehicleLocalized {
            fleet_id,
            plate_number,
            location,
        })
    }
}

#[derive(Debug, Args)]
pub struct LocateCommand {
    /// Fleet ID
    pub fleet_id: String,
    /// Vehicle plate number
    pub plate_number: String,
}

impl LocateCommand {
    pub fn run<R: FleetRepository>(&self, repository: &R) -> anyhow::Result<Report> {
        let fleet_id = FleetId::new(self.fleet_id.as_str())?;
        let plate_number = PlateNumber::new(self.plate_number.as_str())?;
        let query = VehicleLocationQuery::new(fleet_id, plate_number.clone());
        let location = VehicleLocationHandler::new(repository).handle(query)?;

        Ok(Report::VehicleLocation {
            plate_number: plate_number.into_inner(),
            location: LocationView::from(&location),
        })
    }
}
