//! Storage backends
//!
//! A backend stores fleets as three relational tables and hands them back
//! as flattened rows (one row per vehicle, location columns nullable).
//! It knows nothing about the aggregate's rules; those live in the
//! repository that sits on top.
//!
//! ```text
//! fleets(id, user_id)
//!   └── vehicles(fleet_id, plate_number, vehicle_type)
//!         └── vehicle_locations(fleet_id, plate_number, latitude, longitude, altitude?)
//! ```

pub mod in_memory;
pub mod sqlite;

use std::path::PathBuf;

use fleet_domain::{FleetId, PlateNumber, RepositoryError, UserId};
use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to prepare database directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to acquire {0} lock")]
    Lock(&'static str),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<DatabaseError> for RepositoryError {
    fn from(err: DatabaseError) -> Self {
        RepositoryError::storage(err)
    }
}

/// One fleet joined with one of its vehicles and that vehicle's location.
///
/// A fleet without vehicles yields a single row with every vehicle
/// column empty; a vehicle without location has empty location columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FleetRow {
    pub fleet_id: String,
    pub fleet_user_id: String,
    pub vehicle_plate_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
}

/// Fleet columns only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetHeaderRow {
    pub fleet_id: String,
    pub fleet_user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRow {
    pub fleet_id: String,
    pub plate_number: String,
    pub vehicle_type: String,
}

/// Row filter for `find_many` and `exists`.
///
/// Set filters are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetFilter {
    pub id: Option<FleetId>,
    pub user_id: Option<UserId>,
}

impl FleetFilter {
    pub fn by_id(id: FleetId) -> Self {
        Self {
            id: Some(id),
            user_id: None,
        }
    }

    pub fn by_user_id(user_id: UserId) -> Self {
        Self {
            id: None,
            user_id: Some(user_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.user_id.is_none()
    }
}

/// Statement-level operations on the fleet tables.
///
/// Every upsert is insert-or-overwrite by primary key and never
/// disturbs child rows.
pub trait FleetStore {
    fn find_one(&self, id: &FleetId) -> Result<Option<FleetHeaderRow>, DatabaseError>;

    /// Left-outer-joined rows, ordered by user id then plate number.
    /// An empty filter returns every fleet.
    fn find_many(&self, filter: &FleetFilter) -> Result<Vec<FleetRow>, DatabaseError>;

    fn find_vehicles_by_fleet_id(&self, fleet_id: &FleetId)
        -> Result<Vec<VehicleRow>, DatabaseError>;

    /// Matches by id when set, otherwise by user id.
    /// An empty filter matches nothing.
    fn exists(&self, filter: &FleetFilter) -> Result<bool, DatabaseError>;

    fn upsert_fleet(&self, fleet_id: &FleetId, user_id: &UserId) -> Result<(), DatabaseError>;

    /// Removes the fleet with its vehicles and their locations
    fn delete_fleet(&self, fleet_id: &FleetId) -> Result<(), DatabaseError>;

    fn upsert_vehicle(
        &self,
        fleet_id: &FleetId,
        plate_number: &PlateNumber,
        vehicle_type: &str,
    ) -> Result<(), DatabaseError>;

    /// Removes the vehicle and its location
    fn delete_vehicle(&self, fleet_id: &FleetId, plate_number: &PlateNumber)
        -> Result<(), DatabaseError>;

    fn upsert_location(
        &self,
        fleet_id: &FleetId,
        plate_number: &PlateNumber,
        latitude: f64,
        longitude: f64,
        altitude: Option<f64>,
    ) -> Result<(), DatabaseError>;

    fn delete_location(
        &self,
        fleet_id: &FleetId,
        plate_number: &PlateNumber,
    ) -> Result<(), DatabaseError>;
}

/// A store that can run several statements as one atomic unit
pub trait FleetDatabase: FleetStore {
    /// Run `work` inside a transaction.
    ///
    /// Everything `work` does through the given store is committed when it
    /// returns `Ok` and rolled back when it returns `Err`.
    fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn FleetStore) -> Result<T, E>,
        E: From<DatabaseError>;
}
