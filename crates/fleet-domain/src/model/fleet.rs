//! Fleet - The aggregate root
//!
//! A Fleet is an Entity (its identity survives vehicle changes).
//! Every change to the vehicle registry or to vehicle locations goes
//! through this type so the invariants hold:
//!
//! - a plate number is registered at most once per fleet
//! - a location only exists for a registered plate number
//!
//! "One fleet per user" is not checked here; that needs storage and is
//! the repository's job.

use std::collections::HashMap;

use super::identifier::{FleetId, PlateNumber, UserId};
use super::location::Location;
use super::vehicle::Vehicle;
use crate::error::FleetError;

#[derive(Debug, Clone)]
pub struct Fleet {
    /// Unique identifier (Entity identity)
    id: FleetId,
    /// Owner of the fleet
    user_id: UserId,
    /// Registered vehicles, keyed by plate number
    vehicles: HashMap<PlateNumber, Vehicle>,
    /// Last known location per vehicle (sparse, no history)
    locations: HashMap<PlateNumber, Location>,
}

impl Fleet {
    /// Create an empty fleet
    pub fn new(id: FleetId, user_id: UserId) -> Self {
        Self {
            id,
            user_id,
            vehicles: HashMap::new(),
            locations: HashMap::new(),
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &FleetId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    // ========== Vehicle Registry ==========

    /// Register a vehicle, rejecting a plate number already in the fleet
    pub fn register_vehicle(&mut self, vehicle: Vehicle) -> Result<(), FleetError> {
        if self.vehicles.contains_key(vehicle.plate_number()) {
            return Err(FleetError::VehicleAlreadyRegistered(
                vehicle.plate_number().clone(),
            ));
        }

        self.vehicles.insert(vehicle.plate_number().clone(), vehicle);
        Ok(())
    }

    pub fn is_vehicle_registered(&self, plate_number: &PlateNumber) -> bool {
        self.vehicles.contains_key(plate_number)
    }

    /// All registered vehicles.
    ///
    /// The order is arbitrary and may differ between calls.
    pub fn registered_vehicles(&self) -> Vec<&Vehicle> {
        self.vehicles.values().collect()
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    // ========== Locations ==========

    /// Set (or overwrite) the location of a registered vehicle
    pub fn localize_vehicle(
        &mut self,
        plate_number: &PlateNumber,
        location: Location,
    ) -> Result<(), FleetError> {
        self.ensure_registered(plate_number)?;
        self.locations.insert(plate_number.clone(), location);
        Ok(())
    }

    /// Current location of a registered vehicle.
    ///
    /// `Ok(None)` means registered but never localized.
    pub fn vehicle_location(
        &self,
        plate_number: &PlateNumber,
    ) -> Result<Option<&Location>, FleetError> {
        self.ensure_registered(plate_number)?;
        Ok(self.locations.get(plate_number))
    }

    fn ensure_registered(&self, plate_number: &PlateNumber) -> Result<(), FleetError> {
        if self.is_vehicle_registered(plate_number) {
            Ok(())
        } else {
            Err(FleetError::VehicleNotFound(plate_number.clone()))
        }
    }
}
