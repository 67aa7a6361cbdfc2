//! Queries - Read-only requests

use fleet_domain::{FleetId, PlateNumber, UserId};

#[derive(Debug, Clone)]
pub struct FleetInfoQuery {
    pub fleet_id: FleetId,
}

impl FleetInfoQuery {
    pub fn new(fleet_id: FleetId) -> Self {
        Self { fleet_id }
    }
}

#[derive(Debug, Clone)]
pub struct VehicleLocationQuery {
    pub fleet_id: FleetId,
    pub plate_number: PlateNumber,
}

impl VehicleLocationQuery {
    pub fn new(fleet_id: FleetId, plate_number: PlateNumber) -> Self {
        Self {
            fleet_id,
            plate_number,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserFleetsQuery {
    pub user_id: UserId,
}

impl UserFleetsQuery {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
