//! Vehicle - An entity identified by its plate number
//!
//! The set of vehicle kinds is closed, so Vehicle is an enum and every
//! match over it is exhaustive.

use super::identifier::PlateNumber;
use crate::error::FleetError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vehicle {
    Car(PlateNumber),
    Truck(PlateNumber),
    Motorcycle(PlateNumber),
}

impl Vehicle {
    /// Build a vehicle from a kind name, matched case-insensitively.
    ///
    /// Unknown kinds are reported with the caller's original spelling.
    pub fn create(kind: &str, plate_number: PlateNumber) -> Result<Self, FleetError> {
        match kind.to_lowercase().as_str() {
            "car" => Ok(Vehicle::Car(plate_number)),
            "truck" => Ok(Vehicle::Truck(plate_number)),
            "motorcycle" => Ok(Vehicle::Motorcycle(plate_number)),
            _ => Err(FleetError::UnsupportedVehicleType(kind.to_string())),
        }
    }

    pub fn plate_number(&self) -> &PlateNumber {
        match self {
            Vehicle::Car(plate) | Vehicle::Truck(plate) | Vehicle::Motorcycle(plate) => plate,
        }
    }

    /// Lowercase discriminant, as stored in the `vehicle_type` column
    pub fn kind(&self) -> &'static str {
        match self {
            Vehicle::Car(_) => "car",
            Vehicle::Truck(_) => "truck",
            Vehicle::Motorcycle(_) => "motorcycle",
        }
    }
}

/// Free-function form of [`Vehicle::create`]
pub fn create_vehicle(kind: &str, plate_number: PlateNumber) -> Result<Vehicle, FleetError> {
    Vehicle::create(kind, plate_number)
}
