use fleet_domain::FleetRepository;
use tracing::info;

use super::load_fleet;
use crate::command::LocalizeVehicleCommand;
use crate::error::HandlerError;

pub struct LocalizeVehicleHandler<'a, R: FleetRepository> {
    repository: &'a mut R,
}

impl<'a, R: FleetRepository> LocalizeVehicleHandler<'a, R> {
    pub fn new(repository: &'a mut R) -> Self {
        Self { repository }
    }

    pub fn handle(&mut self, command: LocalizeVehicleCommand) -> Result<(), HandlerError> {
        let mut fleet = load_fleet(&*self.repository, &command.fleet_id)?;

        fleet.localize_vehicle(&command.plate_number, command.location)?;
        self.repository.save(&fleet)?;

        info!(
            fleet_id = %command.fleet_id,
            plate_number = %command.plate_number,
            "vehicle localized"
        );
        Ok(())
    }
}
