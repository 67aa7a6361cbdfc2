use fleet_domain::{Fleet, FleetCriteria, FleetError, FleetId, FleetRepository};
use tracing::info;
use uuid::Uuid;

use crate::command::CreateFleetCommand;
use crate::error::HandlerError;

/// Creates the (single) fleet of a user
pub struct CreateFleetHandler<'a, R: FleetRepository> {
    repository: &'a mut R,
}

impl<'a, R: FleetRepository> CreateFleetHandler<'a, R> {
    pub fn new(repository: &'a mut R) -> Self {
        Self { repository }
    }

    /// Returns the freshly generated fleet id
    pub fn handle(&mut self, command: CreateFleetCommand) -> Result<FleetId, HandlerError> {
        let criteria = FleetCriteria::UserId(command.user_id.clone());
        if self.repository.exists(&criteria)? {
            return Err(FleetError::FleetAlreadyExists(command.user_id).into());
        }

        let fleet_id = FleetId::new(Uuid::new_v4().to_string())?;
        let fleet = Fleet::new(fleet_id.clone(), command.user_id);
        self.repository.save(&fleet)?;

        info!(fleet_id = %fleet_id, user_id = %fleet.user_id(), "fleet created");
        Ok(fleet_id)
    }
}
