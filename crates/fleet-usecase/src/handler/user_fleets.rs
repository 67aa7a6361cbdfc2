use fleet_domain::{Fleet, FleetRepository};

use crate::error::HandlerError;
use crate::query::UserFleetsQuery;

/// Lists the fleets of a user (empty when the user has none)
pub struct UserFleetsHandler<'a, R: FleetRepository> {
    repository: &'a R,
}

impl<'a, R: FleetRepository> UserFleetsHandler<'a, R> {
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    pub fn handle(&self, query: UserFleetsQuery) -> Result<Vec<Fleet>, HandlerError> {
        Ok(self.repository.find_many_by_user_id(&query.user_id)?)
    }
}
