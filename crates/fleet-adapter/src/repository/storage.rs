//! FleetRepository over a row-oriented storage backend

use std::collections::HashSet;

use fleet_domain::{
    Fleet, FleetCriteria, FleetId, FleetRepository, PlateNumber, RepositoryError, UserId,
};
use tracing::{debug, warn};

use super::mapping::{fleet_from_rows, group_rows_by_fleet};
use crate::database::{FleetDatabase, FleetFilter, FleetStore};

/// Maps the Fleet aggregate to the fleet tables of any [`FleetDatabase`]
#[derive(Debug, Clone, Default)]
pub struct StorageFleetRepository<D> {
    database: D,
}

impl<D: FleetDatabase> StorageFleetRepository<D> {
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &D {
        &self.database
    }

    pub fn into_inner(self) -> D {
        self.database
    }
}

/// Write the full state of `fleet`, removing vehicles it no longer has
fn write_fleet(store: &dyn FleetStore, fleet: &Fleet) -> Result<(), RepositoryError> {
    let fleet_id = fleet.id();
    store.upsert_fleet(fleet_id, fleet.user_id())?;

    let vehicles = fleet.registered_vehicles();
    let current: HashSet<&str> = vehicles
        .iter()
        .map(|vehicle| vehicle.plate_number().as_str())
        .collect();

    let mut removed = 0;
    for stored in store.find_vehicles_by_fleet_id(fleet_id)? {
        if !current.contains(stored.plate_number.as_str()) {
            store.delete_vehicle(fleet_id, &PlateNumber::new(stored.plate_number)?)?;
            removed += 1;
        }
    }

    let mut localized = 0;
    for vehicle in &vehicles {
        let plate_number = vehicle.plate_number();
        store.upsert_vehicle(fleet_id, plate_number, vehicle.kind())?;

        match fleet.vehicle_location(plate_number)? {
            Some(location) => {
                store.upsert_location(
                    fleet_id,
                    plate_number,
                    location.latitude(),
                    location.longitude(),
                    location.altitude(),
                )?;
                localized += 1;
            }
            None => store.delete_location(fleet_id, plate_number)?,
        }
    }

    debug!(
        fleet_id = %fleet_id,
        vehicles = vehicles.len(),
        localized,
        removed,
        "fleet saved"
    );
    Ok(())
}

impl<D: FleetDatabase> FleetRepository for StorageFleetRepository<D> {
    fn save(&mut self, fleet: &Fleet) -> Result<(), RepositoryError> {
        self.database
            .transaction(|store| -> Result<(), RepositoryError> { write_fleet(store, fleet) })
    }

    fn find_one_by_id(&self, id: &FleetId) -> Result<Option<Fleet>, RepositoryError> {
        let Some(header) = self.database.find_one(id)? else {
            return Ok(None);
        };

        let filter = FleetFilter {
            id: Some(FleetId::new(header.fleet_id)?),
            user_id: Some(UserId::new(header.fleet_user_id)?),
        };
        let rows = self.database.find_many(&filter)?;

        if rows.is_empty() {
            warn!(fleet_id = %id, "fleet header found without any rows");
            return Err(RepositoryError::Inconsistent {
                fleet_id: id.to_string(),
            });
        }

        fleet_from_rows(&rows).map(Some)
    }

    fn find_many_by_user_id(&self, user_id: &UserId) -> Result<Vec<Fleet>, RepositoryError> {
        let rows = self
            .database
            .find_many(&FleetFilter::by_user_id(user_id.clone()))?;

        group_rows_by_fleet(rows)
            .iter()
            .map(|group| fleet_from_rows(group))
            .collect()
    }

    fn exists(&self, criteria: &FleetCriteria) -> Result<bool, RepositoryError> {
        let filter = match criteria {
            FleetCriteria::Id(id) => FleetFilter::by_id(id.clone()),
            FleetCriteria::UserId(user_id) => FleetFilter::by_user_id(user_id.clone()),
        };
        Ok(self.database.exists(&filter)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DatabaseError, FleetHeaderRow, FleetRow, VehicleRow};
    use crate::{InMemoryFleetDatabase, SqliteFleetDatabase};
    use fleet_domain::{Location, Vehicle};

    fn plate(raw: &str) -> PlateNumber {
        PlateNumber::new(raw).unwrap()
    }

    fn sample_fleet() -> Fleet {
        let mut fleet = Fleet::new(
            FleetId::new("fleet-1").unwrap(),
            UserId::new("user-1").unwrap(),
        );
        fleet.register_vehicle(Vehicle::Car(plate("ABC-123"))).unwrap();
        fleet.register_vehicle(Vehicle::Truck(plate("XYZ-789"))).unwrap();
        let location = Location::new(48.8566, 2.3522, Some(35.0)).unwrap();
        fleet.localize_vehicle(&plate("ABC-123"), location).unwrap();
        fleet
    }

    fn assert_round_trip<D: FleetDatabase>(database: D) {
        let mut repo = StorageFleetRepository::new(database);
        let fleet = sample_fleet();
        repo.save(&fleet).unwrap();

        let found = repo.find_one_by_id(fleet.id()).unwrap().unwrap();

        assert_eq!(found.id(), fleet.id());
        assert_eq!(found.user_id(), fleet.user_id());
        assert_eq!(found.vehicle_count(), 2);
        let location = found.vehicle_location(&plate("ABC-123")).unwrap().unwrap();
        assert_eq!(location.latitude(), 48.8566);
        assert_eq!(location.longitude(), 2.3522);
        assert_eq!(location.altitude(), Some(35.0));
        assert_eq!(found.vehicle_location(&plate("XYZ-789")).unwrap(), None);

        let kinds: HashSet<&str> = found.registered_vehicles().iter().map(|v| v.kind()).collect();
        assert_eq!(kinds, HashSet::from(["car", "truck"]));
    }

    #[test]
    fn test_round_trip_sqlite() {
        assert_round_trip(SqliteFleetDatabase::open_in_memory().unwrap());
    }

    #[test]
    fn test_round_trip_in_memory() {
        assert_round_trip(InMemoryFleetDatabase::new());
    }

    #[test]
    fn test_missing_fleet_is_none() {
        let repo = StorageFleetRepository::new(InMemoryFleetDatabase::new());

        let found = repo
            .find_one_by_id(&FleetId::new("missing").unwrap())
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_save_is_idempotent() {
        let mut repo = StorageFleetRepository::new(SqliteFleetDatabase::open_in_memory().unwrap());
        let fleet = sample_fleet();

        repo.save(&fleet).unwrap();
        let first = repo.database().find_many(&FleetFilter::default()).unwrap();
        repo.save(&fleet).unwrap();
        let second = repo.database().find_many(&FleetFilter::default()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_save_removes_absent_vehicles_and_stale_locations() {
        let db = InMemoryFleetDatabase::new();
        let mut repo = StorageFleetRepository::new(db.clone());
        repo.save(&sample_fleet()).unwrap();

        // Fresh aggregate: XYZ-789 gone, ABC-123 kept but never localized
        let mut fleet = Fleet::new(
            FleetId::new("fleet-1").unwrap(),
            UserId::new("user-1").unwrap(),
        );
        fleet.register_vehicle(Vehicle::Car(plate("ABC-123"))).unwrap();
        repo.save(&fleet).unwrap();

        let vehicles = db
            .find_vehicles_by_fleet_id(&FleetId::new("fleet-1").unwrap())
            .unwrap();
        assert_eq!(
            vehicles,
            vec![VehicleRow {
                fleet_id: "fleet-1".to_string(),
                plate_number: "ABC-123".to_string(),
                vehicle_type: "car".to_string(),
            }]
        );

        let rows = db.find_many(&FleetFilter::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].latitude, None);
    }

    #[test]
    fn test_find_many_by_user_id() {
        let db = InMemoryFleetDatabase::new();
        let mut repo = StorageFleetRepository::new(db);
        let user = UserId::new("user-1").unwrap();

        repo.save(&sample_fleet()).unwrap();
        repo.save(&Fleet::new(FleetId::new("fleet-2").unwrap(), user.clone()))
            .unwrap();
        repo.save(&Fleet::new(
            FleetId::new("fleet-3").unwrap(),
            UserId::new("user-2").unwrap(),
        ))
        .unwrap();

        let fleets = repo.find_many_by_user_id(&user).unwrap();
        let mut ids: Vec<(&str, usize)> = fleets
            .iter()
            .map(|f| (f.id().as_str(), f.vehicle_count()))
            .collect();
        ids.sort();
        assert_eq!(ids, vec![("fleet-1", 2), ("fleet-2", 0)]);

        assert!(repo
            .find_many_by_user_id(&UserId::new("nobody").unwrap())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_exists() {
        let mut repo = StorageFleetRepository::new(SqliteFleetDatabase::open_in_memory().unwrap());
        repo.save(&sample_fleet()).unwrap();

        assert!(repo
            .exists(&FleetCriteria::Id(FleetId::new("fleet-1").unwrap()))
            .unwrap());
        assert!(repo
            .exists(&FleetCriteria::UserId(UserId::new("user-1").unwrap()))
            .unwrap());
        assert!(!repo
            .exists(&FleetCriteria::UserId(UserId::new("user-2").unwrap()))
            .unwrap());
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Fault {
        Nothing,
        /// The join comes back empty even for stored fleets
        EmptyJoin,
        /// Every location write is rejected
        LocationWrites,
    }

    /// Wraps a store and injects a failure on the way through
    struct Faulty<'a, S: ?Sized> {
        inner: &'a S,
        fault: Fault,
    }

    impl<'a, S: ?Sized> Faulty<'a, S> {
        fn new(inner: &'a S, fault: Fault) -> Self {
            Self { inner, fault }
        }
    }

    impl<S: FleetStore + ?Sized> FleetStore for Faulty<'_, S> {
        fn find_one(&self, id: &FleetId) -> Result<Option<FleetHeaderRow>, DatabaseError> {
            self.inner.find_one(id)
        }

        fn find_many(&self, filter: &FleetFilter) -> Result<Vec<FleetRow>, DatabaseError> {
            if self.fault == Fault::EmptyJoin {
                return Ok(Vec::new());
            }
            self.inner.find_many(filter)
        }

        fn find_vehicles_by_fleet_id(
            &self,
            fleet_id: &FleetId,
        ) -> Result<Vec<VehicleRow>, DatabaseError> {
            self.inner.find_vehicles_by_fleet_id(fleet_id)
        }

        fn exists(&self, filter: &FleetFilter) -> Result<bool, DatabaseError> {
            self.inner.exists(filter)
        }

        fn upsert_fleet(&self, fleet_id: &FleetId, user_id: &UserId) -> Result<(), DatabaseError> {
            self.inner.upsert_fleet(fleet_id, user_id)
        }

        fn delete_fleet(&self, fleet_id: &FleetId) -> Result<(), DatabaseError> {
            self.inner.delete_fleet(fleet_id)
        }

        fn upsert_vehicle(
            &self,
            fleet_id: &FleetId,
            plate_number: &PlateNumber,
            vehicle_type: &str,
        ) -> Result<(), DatabaseError> {
            self.inner.upsert_vehicle(fleet_id, plate_number, vehicle_type)
        }

        fn delete_vehicle(
            &self,
            fleet_id: &FleetId,
            plate_number: &PlateNumber,
        ) -> Result<(), DatabaseError> {
            self.inner.delete_vehicle(fleet_id, plate_number)
        }

        fn upsert_location(
            &self,
            fleet_id: &FleetId,
            plate_number: &PlateNumber,
            latitude: f64,
            longitude: f64,
            altitude: Option<f64>,
        ) -> Result<(), DatabaseError> {
            if self.fault == Fault::LocationWrites {
                return Err(DatabaseError::Constraint(format!(
                    "location write rejected for {}",
                    plate_number
                )));
            }
            self.inner
                .upsert_location(fleet_id, plate_number, latitude, longitude, altitude)
        }

        fn delete_location(
            &self,
            fleet_id: &FleetId,
            plate_number: &PlateNumber,
        ) -> Result<(), DatabaseError> {
            self.inner.delete_location(fleet_id, plate_number)
        }
    }

    impl<D: FleetDatabase> FleetDatabase for Faulty<'_, D> {
        fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
        where
            F: FnOnce(&dyn FleetStore) -> Result<T, E>,
            E: From<DatabaseError>,
        {
            let fault = self.fault;
            self.inner
                .transaction(|store| work(&Faulty::new(store, fault)))
        }
    }

    #[test]
    fn test_header_without_rows_is_inconsistent() {
        let db = InMemoryFleetDatabase::new();
        StorageFleetRepository::new(Faulty::new(&db, Fault::Nothing))
            .save(&sample_fleet())
            .unwrap();

        let repo = StorageFleetRepository::new(Faulty::new(&db, Fault::EmptyJoin));
        let err = repo
            .find_one_by_id(&FleetId::new("fleet-1").unwrap())
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Inconsistent { fleet_id } if fleet_id == "fleet-1"));
    }

    /// A save that fails after the vehicle removals and upserts already ran
    fn assert_failed_save_rolls_back<D: FleetDatabase>(db: D) {
        StorageFleetRepository::new(Faulty::new(&db, Fault::Nothing))
            .save(&sample_fleet())
            .unwrap();
        let before = db.find_many(&FleetFilter::default()).unwrap();

        // XYZ-789 dropped, NEW-1 added, ABC-123 moved
        let mut fleet = Fleet::new(
            FleetId::new("fleet-1").unwrap(),
            UserId::new("user-9").unwrap(),
        );
        fleet.register_vehicle(Vehicle::Car(plate("ABC-123"))).unwrap();
        fleet.register_vehicle(Vehicle::Motorcycle(plate("NEW-1"))).unwrap();
        fleet
            .localize_vehicle(&plate("ABC-123"), Location::new(1.0, 2.0, None).unwrap())
            .unwrap();

        let mut repo = StorageFleetRepository::new(Faulty::new(&db, Fault::LocationWrites));
        let err = repo.save(&fleet).unwrap_err();

        assert!(matches!(err, RepositoryError::Storage(_)));
        assert_eq!(db.find_many(&FleetFilter::default()).unwrap(), before);
    }

    #[test]
    fn test_failed_save_rolls_back_sqlite() {
        assert_failed_save_rolls_back(SqliteFleetDatabase::open_in_memory().unwrap());
    }

    #[test]
    fn test_failed_save_rolls_back_in_memory() {
        assert_failed_save_rolls_back(InMemoryFleetDatabase::new());
    }
}
