use fleet_domain::{Fleet, FleetRepository};

use super::load_fleet;
use crate::error::HandlerError;
use crate::query::FleetInfoQuery;

pub struct FleetInfoHandler<'a, R: FleetRepository> {
    repository: &'a R,
}

impl<'a, R: FleetRepository> FleetInfoHandler<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    pub fn handle(&self, query: FleetInfoQuery) -> Result<Fleet, HandlerError> {
        load_fleet(self.repository, &query.fleet_id)
    }
}
