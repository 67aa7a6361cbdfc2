//! SQLite storage backend

use std::path::Path;

use fleet_domain::{FleetId, PlateNumber, UserId};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tracing::debug;

use super::{
    DatabaseError, FleetDatabase, FleetFilter, FleetHeaderRow, FleetRow, FleetStore, VehicleRow,
};

/// Path understood as "no file, keep everything in memory"
pub const IN_MEMORY_PATH: &str = ":memory:";

const SCHEMA: &str = r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS fleets (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS vehicles (
        fleet_id TEXT NOT NULL,
        plate_number TEXT NOT NULL,
        vehicle_type TEXT NOT NULL,
        PRIMARY KEY (fleet_id, plate_number),
        FOREIGN KEY (fleet_id) REFERENCES fleets(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS vehicle_locations (
        fleet_id TEXT NOT NULL,
        plate_number TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        altitude REAL,
        PRIMARY KEY (fleet_id, plate_number),
        FOREIGN KEY (fleet_id, plate_number)
            REFERENCES vehicles(fleet_id, plate_number) ON DELETE CASCADE
    );
"#;

const FIND_MANY: &str = r#"
    SELECT
        f.id AS fleet_id,
        f.user_id AS fleet_user_id,
        v.plate_number AS vehicle_plate_number,
        v.vehicle_type AS vehicle_type,
        vl.latitude AS latitude,
        vl.longitude AS longitude,
        vl.altitude AS altitude
    FROM fleets f
    LEFT JOIN vehicles v ON f.id = v.fleet_id
    LEFT JOIN vehicle_locations vl
        ON v.fleet_id = vl.fleet_id AND v.plate_number = vl.plate_number
    WHERE 1 = 1
"#;

/// Fleet storage in a single SQLite file
pub struct SqliteFleetDatabase {
    conn: Connection,
}

impl SqliteFleetDatabase {
    /// Open (or create) the database at `path` and bootstrap the schema.
    ///
    /// Missing parent directories are created. `:memory:` opens a
    /// private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();

        if path != Path::new(IN_MEMORY_PATH) {
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    std::fs::create_dir_all(dir).map_err(|source| DatabaseError::Directory {
                        path: dir.to_path_buf(),
                        source,
                    })?;
                }
            }
        }

        debug!(path = %path.display(), "opening fleet database");
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, DatabaseError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Drop every fleet (and, by cascade, every vehicle and location).
    /// Meant for resetting state between test scenarios.
    pub fn clear_all_fleets(&self) -> Result<(), DatabaseError> {
        self.conn.execute("DELETE FROM fleets", [])?;
        Ok(())
    }

    pub fn close(self) -> Result<(), DatabaseError> {
        self.conn.close().map_err(|(_, err)| err.into())
    }
}

impl FleetDatabase for SqliteFleetDatabase {
    fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn FleetStore) -> Result<T, E>,
        E: From<DatabaseError>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|err| E::from(DatabaseError::from(err)))?;

        // Dropping `tx` without commit rolls back
        let out = work(&*tx)?;
        tx.commit().map_err(|err| E::from(DatabaseError::from(err)))?;
        Ok(out)
    }
}

impl FleetStore for SqliteFleetDatabase {
    fn find_one(&self, id: &FleetId) -> Result<Option<FleetHeaderRow>, DatabaseError> {
        self.conn.find_one(id)
    }

    fn find_many(&self, filter: &FleetFilter) -> Result<Vec<FleetRow>, DatabaseError> {
        self.conn.find_many(filter)
    }

    fn find_vehicles_by_fleet_id(
        &self,
        fleet_id: &FleetId,
    ) -> Result<Vec<VehicleRow>, DatabaseError> {
        self.conn.find_vehicles_by_fleet_id(fleet_id)
    }

    fn exists(&self, filter: &FleetFilter) -> Result<bool, DatabaseError> {
        self.conn.exists(filter)
    }

    fn upsert_fleet(&self, fleet_id: &FleetId, user_id: &UserId) -> Result<(), DatabaseError> {
        self.conn.upsert_fleet(fleet_id, user_id)
    }

    fn delete_fleet(&self, fleet_id: &FleetId) -> Result<(), DatabaseError> {
        self.conn.delete_fleet(fleet_id)
    }

    fn upsert_vehicle(
        &self,
        fleet_id: &FleetId,
        plate_number: &PlateNumber,
        vehicle_type: &str,
    ) -> Result<(), DatabaseError> {
        self.conn.upsert_vehicle(fleet_id, plate_number, vehicle_type)
    }

    fn delete_vehicle(
        &self,
        fleet_id: &FleetId,
        plate_number: &PlateNumber,
    ) -> Result<(), DatabaseError> {
        self.conn.delete_vehicle(fleet_id, plate_number)
    }

    fn upsert_location(
        &self,
        fleet_id: &FleetId,
        plate_number: &PlateNumber,
        latitude: f64,
        longitude: f64,
        altitude: Option<f64>,
    ) -> Result<(), DatabaseError> {
        self.conn
            .upsert_location(fleet_id, plate_number, latitude, longitude, altitude)
    }

    fn delete_location(
        &self,
        fleet_id: &FleetId,
        plate_number: &PlateNumber,
    ) -> Result<(), DatabaseError> {
        self.conn.delete_location(fleet_id, plate_number)
    }
}

// The statements themselves. Implemented on the connection so a
// transaction (which derefs to `Connection`) can serve as the store.
impl FleetStore for Connection {
    fn find_one(&self, id: &FleetId) -> Result<Option<FleetHeaderRow>, DatabaseError> {
        let row = self
            .query_row(
                "SELECT f.id AS fleet_id, f.user_id AS fleet_user_id \
                 FROM fleets f WHERE f.id = ?1 LIMIT 1",
                [id.as_str()],
                |row| {
                    Ok(FleetHeaderRow {
                        fleet_id: row.get("fleet_id")?,
                        fleet_user_id: row.get("fleet_user_id")?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    fn find_many(&self, filter: &FleetFilter) -> Result<Vec<FleetRow>, DatabaseError> {
        let mut sql = String::from(FIND_MANY);
        let mut args: Vec<&str> = Vec::new();

        if let Some(id) = &filter.id {
            sql.push_str(" AND f.id = ?");
            args.push(id.as_str());
        }
        if let Some(user_id) = &filter.user_id {
            sql.push_str(" AND f.user_id = ?");
            args.push(user_id.as_str());
        }
        sql.push_str(" ORDER BY f.user_id, v.plate_number");

        let mut stmt = self.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(args), |row| {
                Ok(FleetRow {
                    fleet_id: row.get("fleet_id")?,
                    fleet_user_id: row.get("fleet_user_id")?,
                    vehicle_plate_number: row.get("vehicle_plate_number")?,
                    vehicle_type: row.get("vehicle_type")?,
                    latitude: row.get("latitude")?,
                    longitude: row.get("longitude")?,
                    altitude: row.get("altitude")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(rows = rows.len(), "fetched fleet rows");
        Ok(rows)
    }

    fn find_vehicles_by_fleet_id(
        &self,
        fleet_id: &FleetId,
    ) -> Result<Vec<VehicleRow>, DatabaseError> {
        let mut stmt = self.prepare(
            "SELECT fleet_id, plate_number, vehicle_type FROM vehicles WHERE fleet_id = ?1",
        )?;
        let rows = stmt
            .query_map([fleet_id.as_str()], |row| {
                Ok(VehicleRow {
                    fleet_id: row.get("fleet_id")?,
                    plate_number: row.get("plate_number")?,
                    vehicle_type: row.get("vehicle_type")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn exists(&self, filter: &FleetFilter) -> Result<bool, DatabaseError> {
        let (sql, arg) = match (&filter.id, &filter.user_id) {
            (Some(id), _) => ("SELECT 1 FROM fleets WHERE id = ?1 LIMIT 1", id.as_str()),
            (None, Some(user_id)) => (
                "SELECT 1 FROM fleets WHERE user_id = ?1 LIMIT 1",
                user_id.as_str(),
            ),
            (None, None) => return Ok(false),
        };

        let found = self
            .query_row(sql, [arg], |row| row.get::<_, i64>(0))
            .optional()?;
        Ok(found.is_some())
    }

    fn upsert_fleet(&self, fleet_id: &FleetId, user_id: &UserId) -> Result<(), DatabaseError> {
        self.execute(
            "INSERT INTO fleets (id, user_id) VALUES (?1, ?2) \
             ON CONFLICT(id) DO UPDATE SET user_id = excluded.user_id",
            params![fleet_id.as_str(), user_id.as_str()],
        )?;
        Ok(())
    }

    fn delete_fleet(&self, fleet_id: &FleetId) -> Result<(), DatabaseError> {
        self.execute("DELETE FROM fleets WHERE id = ?1", [fleet_id.as_str()])?;
        Ok(())
    }

    fn upsert_vehicle(
        &self,
        fleet_id: &FleetId,
        plate_number: &PlateNumber,
        vehicle_type: &str,
    ) -> Result<(), DatabaseError> {
        self.execute(
            "INSERT INTO vehicles (fleet_id, plate_number, vehicle_type) VALUES (?1, ?2, ?3) \
             ON CONFLICT(fleet_id, plate_number) DO UPDATE SET \
             vehicle_type = excluded.vehicle_type",
            params![fleet_id.as_str(), plate_number.as_str(), vehicle_type],
        )?;
        Ok(())
    }

    fn delete_vehicle(
        &self,
        fleet_id: &FleetId,
        plate_number: &PlateNumber,
    ) -> Result<(), DatabaseError> {
        self.execute(
            "DELETE FROM vehicles WHERE fleet_id = ?1 AND plate_number = ?2",
            params![fleet_id.as_str(), plate_number.as_str()],
        )?;
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
        self.execute(
            "INSERT INTO vehicle_locations (fleet_id, plate_number, latitude, longitude, altitude) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT(fleet_id, plate_number) DO UPDATE SET \
             latitude = excluded.latitude, \
             longitude = excluded.longitude, \
             altitude = excluded.altitude",
            params![
                fleet_id.as_str(),
                plate_number.as_str(),
                latitude,
                longitude,
                altitude
            ],
        )?;
        Ok(())
    }

    fn delete_location(
        &self,
        fleet_id: &FleetId,
        plate_number: &PlateNumber,
    ) -> Result<(), DatabaseError> {
        self.execute(
            "DELETE FROM vehicle_locations WHERE fleet_id = ?1 AND plate_number = ?2",
            params![fleet_id.as_str(), plate_number.as_str()],
        )?;
        Ok(())
    }
}
