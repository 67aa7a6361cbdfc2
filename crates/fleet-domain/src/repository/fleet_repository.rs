//! Fleet Repository - Abstract persistence for Fleets
//!
//! This trait defines what operations the application needs.
//! How the aggregate is flattened into rows is the adapter's concern.

use thiserror::Error;

use crate::error::FleetError;
use crate::model::fleet::Fleet;
use crate::model::identifier::{FleetId, UserId};

/// Errors that can occur during repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Stored data violated a domain rule while rebuilding a Fleet
    #[error(transparent)]
    Domain(#[from] FleetError),

    /// The storage backend failed; the original error is kept as source
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A fleet header was found but no rows came back for it.
    /// This must never happen and is not a "not found".
    #[error("Inconsistent storage: fleet {fleet_id} has a header but no rows")]
    Inconsistent { fleet_id: String },
}

impl RepositoryError {
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        RepositoryError::Storage(Box::new(err))
    }
}

/// Lookup key for [`FleetRepository::exists`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetCriteria {
    Id(FleetId),
    UserId(UserId),
}

/// Fleet Repository Trait
///
/// This is a PORT in hexagonal architecture.
/// Handlers depend on this; adapters provide implementations.
///
/// Note: No async here. Storage is an embedded database and every
/// call path builds its own aggregate.
pub trait FleetRepository {
    /// Persist the complete current state of the aggregate.
    ///
    /// Vehicles present in storage but absent from `fleet` are deleted.
    /// Implementations must apply the whole diff atomically.
    fn save(&mut self, fleet: &Fleet) -> Result<(), RepositoryError>;

    /// Find a fleet by ID. A missing fleet is `Ok(None)`, not an error.
    fn find_one_by_id(&self, id: &FleetId) -> Result<Option<Fleet>, RepositoryError>;

    /// All fleets owned by a user
    fn find_many_by_user_id(&self, user_id: &UserId) -> Result<Vec<Fleet>, RepositoryError>;

    /// Check whether a fleet matches the criteria
    fn exists(&self, criteria: &FleetCriteria) -> Result<bool, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::identifier::PlateNumber;
    use crate::model::location::Location;
    use crate::model::vehicle::Vehicle;
    use std::collections::HashMap;

    /// Whole-aggregate implementation, enough to exercise the contract
    struct InMemoryFleetRepo {
        fleets: HashMap<FleetId, Fleet>,
    }

    impl FleetRepository for InMemoryFleetRepo {
        fn save(&mut self, fleet: &Fleet) -> Result<(), RepositoryError> {
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
                FleetCriteria::UserId(user_id) => {
                    self.fleets.values().any(|f| f.user_id() == user_id)
                }
            })
        }
    }

    #[test]
    fn test_repository_contract() {
        let mut repo = InMemoryFleetRepo {
            fleets: HashMap::new(),
        };
        let user = UserId::new("user-1").unwrap();
        let plate = PlateNumber::new("ABC-123").unwrap();

        let mut fleet = Fleet::new(FleetId::new("f-1").unwrap(), user.clone());
        fleet.register_vehicle(Vehicle::Car(plate.clone())).unwrap();
        fleet
            .localize_vehicle(&plate, Location::new(1.0, 2.0, None).unwrap())
            .unwrap();
        repo.save(&fleet).unwrap();

        assert!(repo.exists(&FleetCriteria::UserId(user.clone())).unwrap());
        assert!(!repo
            .exists(&FleetCriteria::UserId(UserId::new("user-2").unwrap()))
            .unwrap());

        let found = repo.find_one_by_id(fleet.id()).unwrap().unwrap();
        assert_eq!(found.vehicle_count(), 1);
        assert_eq!(repo.find_many_by_user_id(&user).unwrap().len(), 1);
    }

    #[test]
    fn test_inconsistent_message() {
        let err = RepositoryError::Inconsistent {
            fleet_id: "f-9".to_string(),
        };
        assert!(err.to_string().contains("f-9"));
    }
}
