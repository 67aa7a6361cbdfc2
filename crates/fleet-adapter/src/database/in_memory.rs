//! In-Memory Storage Backend
//!
//! Same tables and contract as the SQLite backend, kept in maps.
//! Useful for testing and development.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use fleet_domain::{FleetId, PlateNumber, UserId};

use super::{
    DatabaseError, FleetDatabase, FleetFilter, FleetHeaderRow, FleetRow, FleetStore, VehicleRow,
};

type VehicleKey = (String, String);

#[derive(Debug, Clone, Copy, PartialEq)]
struct StoredLocation {
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    /// id -> user_id
    fleets: BTreeMap<String, String>,
    /// (fleet_id, plate_number) -> vehicle_type
    vehicles: BTreeMap<VehicleKey, String>,
    locations: BTreeMap<VehicleKey, StoredLocation>,
}

impl Tables {
    fn vehicles_of<'a>(
        &'a self,
        fleet_id: &'a str,
    ) -> impl Iterator<Item = (&'a VehicleKey, &'a String)> {
        self.vehicles
            .range((fleet_id.to_string(), String::new())..)
            .take_while(move |((fid, _), _)| fid == fleet_id)
    }

    fn find_one(&self, id: &FleetId) -> Option<FleetHeaderRow> {
        self.fleets.get(id.as_str()).map(|user_id| FleetHeaderRow {
            fleet_id: id.to_string(),
            fleet_user_id: user_id.clone(),
        })
    }

    fn find_many(&self, filter: &FleetFilter) -> Vec<FleetRow> {
        let mut rows = Vec::new();

        let matching = self.fleets.iter().filter(|(id, user_id)| {
            filter.id.as_ref().map_or(true, |f| f.as_str() == id.as_str())
                && filter
                    .user_id
                    .as_ref()
                    .map_or(true, |u| u.as_str() == user_id.as_str())
        });

        for (fleet_id, user_id) in matching {
            let before = rows.len();

            for ((_, plate), vehicle_type) in self.vehicles_of(fleet_id) {
                let location = self.locations.get(&(fleet_id.clone(), plate.clone()));
                rows.push(FleetRow {
                    fleet_id: fleet_id.clone(),
                    fleet_user_id: user_id.clone(),
                    vehicle_plate_number: Some(plate.clone()),
                    vehicle_type: Some(vehicle_type.clone()),
                    latitude: location.map(|l| l.latitude),
                    longitude: location.map(|l| l.longitude),
                    altitude: location.and_then(|l| l.altitude),
                });
            }

            if rows.len() == before {
                rows.push(FleetRow {
                    fleet_id: fleet_id.clone(),
                    fleet_user_id: user_id.clone(),
                    vehicle_plate_number: None,
                    vehicle_type: None,
                    latitude: None,
                    longitude: None,
                    altitude: None,
                });
            }
        }

        // Same order as the SQL backend; empty plates sort first like NULLs
        rows.sort_by(|a, b| {
            (&a.fleet_user_id, &a.vehicle_plate_number)
                .cmp(&(&b.fleet_user_id, &b.vehicle_plate_number))
        });
        rows
    }

    fn find_vehicles_by_fleet_id(&self, fleet_id: &FleetId) -> Vec<VehicleRow> {
        self.vehicles_of(fleet_id.as_str())
            .map(|((fid, plate), vehicle_type)| VehicleRow {
                fleet_id: fid.clone(),
                plate_number: plate.clone(),
                vehicle_type: vehicle_type.clone(),
            })
            .collect()
    }

    fn exists(&self, filter: &FleetFilter) -> bool {
        match (&filter.id, &filter.user_id) {
            (Some(id), _) => self.fleets.contains_key(id.as_str()),
            (None, Some(user_id)) => self.fleets.values().any(|u| u == user_id.as_str()),
            (None, None) => false,
        }
    }

    fn upsert_fleet(&mut self, fleet_id: &FleetId, user_id: &UserId) {
        self.fleets.insert(fleet_id.to_string(), user_id.to_string());
    }

    fn delete_fleet(&mut self, fleet_id: &FleetId) {
        self.fleets.remove(fleet_id.as_str());
        self.vehicles.retain(|(fid, _), _| fid != fleet_id.as_str());
        self.locations.retain(|(fid, _), _| fid != fleet_id.as_str());
    }

    fn upsert_vehicle(
        &mut self,
        fleet_id: &FleetId,
        plate_number: &PlateNumber,
        vehicle_type: &str,
    ) -> Result<(), DatabaseError> {
        if !self.fleets.contains_key(fleet_id.as_str()) {
            return Err(DatabaseError::Constraint(format!(
                "vehicle {} references unknown fleet {}",
                plate_number, fleet_id
            )));
        }
        self.vehicles
            .insert(key(fleet_id, plate_number), vehicle_type.to_string());
        Ok(())
    }

    fn delete_vehicle(&mut self, fleet_id: &FleetId, plate_number: &PlateNumber) {
        let key = key(fleet_id, plate_number);
        self.vehicles.remove(&key);
        self.locations.remove(&key);
    }

    fn upsert_location(
        &mut self,
        fleet_id: &FleetId,
        plate_number: &PlateNumber,
        location: StoredLocation,
    ) -> Result<(), DatabaseError> {
        let key = key(fleet_id, plate_number);
        if !self.vehicles.contains_key(&key) {
            return Err(DatabaseError::Constraint(format!(
                "location references unknown vehicle {} in fleet {}",
                plate_number, fleet_id
            )));
        }
        self.locations.insert(key, location);
        Ok(())
    }

    fn delete_location(&mut self, fleet_id: &FleetId, plate_number: &PlateNumber) {
        self.locations.remove(&key(fleet_id, plate_number));
    }
}

fn key(fleet_id: &FleetId, plate_number: &PlateNumber) -> VehicleKey {
    (fleet_id.to_string(), plate_number.to_string())
}

/// In-memory fleet storage
///
/// Clones share the same tables. A transaction holds the write lock from
/// start to finish: other handles wait for it and never see its
/// intermediate writes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFleetDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryFleetDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, DatabaseError> {
        self.tables.read().map_err(|_| DatabaseError::Lock("read"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, DatabaseError> {
        self.tables.write().map_err(|_| DatabaseError::Lock("write"))
    }
}

/// Private copy of the tables a transaction works on
struct Staged(RefCell<Tables>);

impl Staged {
    fn read(&self) -> Result<Ref<'_, Tables>, DatabaseError> {
        Ok(self.0.borrow())
    }

    fn write(&self) -> Result<RefMut<'_, Tables>, DatabaseError> {
        Ok(self.0.borrow_mut())
    }
}

impl FleetDatabase for InMemoryFleetDatabase {
    fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn FleetStore) -> Result<T, E>,
        E: From<DatabaseError>,
    {
        let mut tables = self.write().map_err(E::from)?;
        let staged = Staged(RefCell::new((*tables).clone()));

        // Dropping `staged` without swapping it in rolls back
        let out = work(&staged)?;
        *tables = staged.0.into_inner();
        Ok(out)
    }
}

/// `FleetStore` over any type with `read`/`write` accessors to [`Tables`]
macro_rules! table_store {
    ($store:ty) => {
        impl FleetStore for $store {
            fn find_one(
                &self,
                id: &FleetId,
            ) -> Result<Option<FleetHeaderRow>, DatabaseError> {
                Ok(self.read()?.find_one(id))
            }

            fn find_many(
                &self,
                filter: &FleetFilter,
            ) -> Result<Vec<FleetRow>, DatabaseError> {
                Ok(self.read()?.find_many(filter))
            }

            fn find_vehicles_by_fleet_id(
                &self,
                fleet_id: &FleetId,
            ) -> Result<Vec<VehicleRow>, DatabaseError> {
                Ok(self.read()?.find_vehicles_by_fleet_id(fleet_id))
            }

            fn exists(&self, filter: &FleetFilter) -> Result<bool, DatabaseError> {
                Ok(self.read()?.exists(filter))
            }

            fn upsert_fleet(
                &self,
                fleet_id: &FleetId,
                user_id: &UserId,
            ) -> Result<(), DatabaseError> {
                self.write()?.upsert_fleet(fleet_id, user_id);
                Ok(())
            }

            fn delete_fleet(&self, fleet_id: &FleetId) -> Result<(), DatabaseError> {
                self.write()?.delete_fleet(fleet_id);
                Ok(())
            }

            fn upsert_vehicle(
                &self,
                fleet_id: &FleetId,
                plate_number: &PlateNumber,
                vehicle_type: &str,
            ) -> Result<(), DatabaseError> {
                self.write()?.upsert_vehicle(fleet_id, plate_number, vehicle_type)
            }

            fn delete_vehicle(
                &self,
                fleet_id: &FleetId,
                plate_number: &PlateNumber,
            ) -> Result<(), DatabaseError> {
                self.write()?.delete_vehicle(fleet_id, plate_number);
                Ok(())
            }

            fn upsert_location(
                &self,
                fleet_id: &FleetId,
                plate_number: &PlateNumber,
                latitude: f64,
                longitude: f64,
                altitude: Option<f64>,
            ) -> Result<(), DatabaseError> {
                let location = StoredLocation {
                    latitude,
                    longitude,
                    altitude,
                };
                self.write()?.upsert_location(fleet_id, plate_number, location)
            }

            fn delete_location(
                &self,
                fleet_id: &FleetId,
                plate_number: &PlateNumber,
            ) -> Result<(), DatabaseError> {
                self.write()?.delete_location(fleet_id, plate_number);
                Ok(())
            }
        }
    };
}

table_store!(InMemoryFleetDatabase);
table_store!(Staged);
