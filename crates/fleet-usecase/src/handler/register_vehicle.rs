use fleet_domain::{create_vehicle, FleetRepository};
use tracing::info;

use super::load_fleet;
use crate::command::RegisterVehicleCommand;
use crate::error::HandlerError;

pub struct RegisterVehicleHandler<'a, R: FleetRepository> {
    repository: &'a mut R,
}

impl<'a, R: FleetRepository> RegisterVehicleHandler<'a, R> {
    pub fn new(repository: &'a mut R) -> Self {
        Self { repository }
    }

    pub fn handle(&mut self, command: RegisterVehicleCommand) -> Result<(), HandlerError> {
        let mut fleet = load_fleet(&*self.repository, &command.fleet_id)?;

        let vehicle = create_vehicle(&command.vehicle_type, command.plate_number)?;
        let kind = vehicle.kind();
        fleet.register_vehicle(vehicle)?;

        self.repository.save(&fleet)?;

        info!(fleet_id = %command.fleet_id, kind, "vehicle registered");
        Ok(())
    }
}
