use fleet_domain::{FleetError, FleetRepository, Location};

use super::load_fleet;
use crate::error::HandlerError;
use crate::query::VehicleLocationQuery;

/// Where is this vehicle?
///
/// Unlike the aggregate, a vehicle with no location is an error here.
pub struct VehicleLocationHandler<'a, R: FleetRepository> {
    repository: &'a R,
}

impl<'a, R: FleetRepository> VehicleLocationHandler<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    pub fn handle(&self, query: VehicleLocationQuery) -> Result<Location, HandlerError> {
        let fleet = load_fleet(self.repository, &query.fleet_id)?;

        match fleet.vehicle_location(&query.plate_number)? {
            Some(location) => Ok(*location),
            None => Err(FleetError::VehicleLocationNotFound(query.plate_number).into()),
        }
    }
}
