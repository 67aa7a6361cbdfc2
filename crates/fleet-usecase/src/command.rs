//! Commands - Requests that change a fleet

use fleet_domain::{FleetError, FleetId, Location, PlateNumber, UserId};

/// Create a fleet for a user
#[derive(Debug, Clone)]
pub struct CreateFleetCommand {
    pub user_id: UserId,
}

impl CreateFleetCommand {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Register a vehicle into a fleet
///
/// `vehicle_type` stays a raw string: it is resolved by the handler so an
/// unsupported type is reported by the domain.
#[derive(Debug, Clone)]
pub struct RegisterVehicleCommand {
    pub fleet_id: FleetId,
    pub plate_number: PlateNumber,
    pub vehicle_type: String,
}

impl RegisterVehicleCommand {
    pub fn new(
        fleet_id: FleetId,
        plate_number: PlateNumber,
        vehicle_type: impl Into<String>,
    ) -> Self {
        Self {
            fleet_id,
            plate_number,
            vehicle_type: vehicle_type.into(),
        }
    }
}

/// Park a vehicle at a location
#[derive(Debug, Clone)]
pub struct LocalizeVehicleCommand {
    pub fleet_id: FleetId,
    pub plate_number: PlateNumber,
    pub location: Location,
}

impl LocalizeVehicleCommand {
    /// Coordinates are validated here, before any storage is touched
    pub fn new(
        fleet_id: FleetId,
        plate_number: PlateNumber,
        latitude: f64,
        longitude: f64,
        altitude: Option<f64>,
    ) -> Result<Self, FleetError> {
        Ok(Self {
            fleet_id,
            plate_number,
            location: Location::new(latitude, longitude, altitude)?,
        })
    }
}
