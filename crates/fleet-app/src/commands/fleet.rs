//! fleet create / info / fleets commands

use clap::Args;
use fleet_domain::{FleetId, FleetRepository, UserId};
use fleet_usecase::{
    CreateFleetCommand, CreateFleetHandler, FleetInfoHandler, FleetInfoQuery, UserFleetsHandler,
    UserFleetsQuery,
};

use crate::output::{FleetView, Report};

#[derive(Debug, Args)]
pub struct CreateCommand {
    /// User ID who owns the fleet
    pub user_id: String,
}

impl CreateCommand {
    pub fn run<R: FleetRepository>(&self, repository: &mut R) -> anyhow::Result<Report> {
        let command = CreateFleetCommand::new(UserId::new(self.user_id.as_str())?);
        let fleet_id = CreateFleetHandler::new(repository).handle(command)?;

        Ok(Report::FleetCreated {
            fleet_id: fleet_id.into_inner(),
        })
    }
}

#[derive(Debug, Args)]
pub struct InfoCommand {
    /// Fleet ID
    pub fleet_id: String,
}

impl InfoCommand {
    pub fn run<R: FleetRepository>(&self, repository: &R) -> anyhow::Result<Report> {
        let query = FleetInfoQuery::new(FleetId::new(self.fleet_id.as_str())?);
        let fleet = FleetInfoHandler::new(repository).handle(query)?;

        Ok(Report::FleetInfo(FleetView::from(&fleet)))
    }
}

#[derive(Debug, Args)]
pub struct FleetsCommand {
    /// User ID
    pub user_id: String,
}

impl FleetsCommand {
    pub fn run<R: FleetRepository>(&self, repository: &R) -> anyhow::Result<Report> {
        let user_id = UserId::new(self.user_id.as_str())?;
        let fleets =
            UserFleetsHandler::new(repository).handle(UserFleetsQuery::new(user_id.clone()))?;

        let mut fleet_ids: Vec<String> = fleets.iter().map(|f| f.id().to_string()).collect();
        fleet_ids.sort();

        Ok(Report::UserFleets {
            user_id: user_id.into_inner(),
            fleet_ids,
        })
    }
}
