//! Test doubles for the handlers

use std::collections::HashMap;

use fleet_domain::{Fleet, FleetCriteria, FleetId, FleetRepository, RepositoryError, UserId};

/// Stores whole aggregates, no row mapping
#[derive(Debug, Default)]
pub(crate) struct InMemoryFleetRepo {
    pub fleets: HashMap<FleetId, Fleet>,
    pub saves: usize,
}

impl FleetRepository for InMemoryFleetRepo {
    fn save(&mut self, fleet: &Fleet) -> Result<(), RepositoryError> {
        self.saves += 1;
        self.fleets.insert(fleet.id().clone(), fleet.clone());
        Ok(())
    }

    fn find_one_by_id(&self, id: &FleetId) -> Result<Option<Fleet>, RepositoryError> {
        Ok(self.fleets.get(id).cloned())
    }

    fn find_many_by_user_id(&self, user_id: &UserId) -> Result<Vec<Fleet>, RepositoryError> {
        Ok(self
            .fleets
            .values()
            .filter(|f| f.user_id() == user_id)
            .cloned()
            .collect())
    }

    fn exists(&self, criteria: &FleetCriteria) -> Result<bool, RepositoryError> {
        Ok(match criteria {
            FleetCriteria::Id(id) => self.fleets.contains_key(id),
            FleetCriteria::UserId(user_id) => self.fleets.values().any(|f| f.user_id() == user_id),
        })
    }
}

pub(crate) fn fleet_id(raw: &str) -> FleetId {
    FleetId::new(raw).unwrap()
}

pub(crate) fn user_id(raw: &str) -> UserId {
    UserId::new(raw).unwrap()
}

pub(crate) fn plate(raw: &str) -> fleet_domain::PlateNumber {
    fleet_domain::PlateNumber::new(raw).unwrap()
}

/// Repository holding one empty fleet `fleet-1` owned by `user-1`
pub(crate) fn repo_with_fleet() -> InMemoryFleetRepo {
    let mut repo = InMemoryFleetRepo::default();
    let fleet = Fleet::new(fleet_id("fleet-1"), user_id("user-1"));
    repo.fleets.insert(fleet.id().clone(), fleet);
    repo
}
