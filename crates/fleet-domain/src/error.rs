//! Domain errors
//!
//! Every invariant violation in the domain surfaces as a `FleetError`,
//! raised at the point of violation. Nothing is constructed partially.

use thiserror::Error;

use crate::model::identifier::{FleetId, PlateNumber, UserId};

/// Which coordinate bound a [`Location`](crate::Location) violated.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidCoordinate {
    #[error("Latitude must be between -90 and 90 degrees (got {0})")]
    Latitude(f64),

    #[error("Longitude must be between -180 and 180 degrees (got {0})")]
    Longitude(f64),

    #[error("Altitude cannot be below -11000 meters (got {0})")]
    Altitude(f64),
}

/// Errors raised by value objects and the Fleet aggregate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FleetError {
    /// An identifier was built from an empty or whitespace-only string
    #[error("Invalid {kind}: {reason}")]
    InvalidIdentifier {
        kind: &'static str,
        reason: &'static str,
    },

    #[error("Invalid location: {0}")]
    InvalidLocation(#[from] InvalidCoordinate),

    #[error("Unsupported vehicle type: {0}")]
    UnsupportedVehicleType(String),

    #[error("Vehicle with plate number {0} has already been registered into this fleet")]
    VehicleAlreadyRegistered(PlateNumber),

    #[error("Vehicle with plate number {0} is not registered in this fleet")]
    VehicleNotFound(PlateNumber),

    #[error("Vehicle location with plate number {0} not found")]
    VehicleLocationNotFound(PlateNumber),

    #[error("Fleet with ID {0} not found")]
    FleetNotFound(FleetId),

    #[error("Fleet with user ID {0} already exists")]
    FleetAlreadyExists(UserId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let plate = PlateNumber::new("AB-123-CD").unwrap();

        assert_eq!(
            FleetError::VehicleNotFound(plate.clone()).to_string(),
            "Vehicle with plate number AB-123-CD is not registered in this fleet"
        );
        assert!(FleetError::VehicleAlreadyRegistered(plate)
            .to_string()
            .contains("already been registered"));
        assert_eq!(
            FleetError::from(InvalidCoordinate::Latitude(91.0)).to_string(),
            "Invalid location: Latitude must be between -90 and 90 degrees (got 91)"
        );
    }
}
