//! Rows -> aggregate
//!
//! The join used by the backends fans out one row per vehicle, so a
//! fleet arrives as several rows repeating the same header columns.

use std::collections::{HashMap, HashSet};

use fleet_domain::{create_vehicle, Fleet, FleetId, Location, PlateNumber, RepositoryError, UserId};

use crate::database::FleetRow;

/// Rebuild one Fleet from rows that all belong to it.
///
/// The header comes from the first row. A plate number is processed once:
/// later rows for the same plate, location included, are ignored.
/// A vehicle with no latitude or no longitude stays unlocalized.
pub fn fleet_from_rows(rows: &[FleetRow]) -> Result<Fleet, RepositoryError> {
    let first = rows.first().ok_or_else(|| RepositoryError::Inconsistent {
        fleet_id: "<no rows>".to_string(),
    })?;

    let mut fleet = Fleet::new(
        FleetId::new(first.fleet_id.as_str())?,
        UserId::new(first.fleet_user_id.as_str())?,
    );
    let mut processed: HashSet<&str> = HashSet::new();

    for row in rows {
        let (Some(plate), Some(kind)) = (&row.vehicle_plate_number, &row.vehicle_type) else {
            continue;
        };
        if !processed.insert(plate.as_str()) {
            continue;
        }

        let plate_number = PlateNumber::new(plate.as_str())?;
        fleet.register_vehicle(create_vehicle(kind, plate_number.clone())?)?;

        if let (Some(latitude), Some(longitude)) = (row.latitude, row.longitude) {
            let location = Location::new(latitude, longitude, row.altitude)?;
            fleet.localize_vehicle(&plate_number, location)?;
        }
    }

    Ok(fleet)
}

/// Split rows per fleet id, keeping the order in which fleets first appear
pub fn group_rows_by_fleet(rows: Vec<FleetRow>) -> Vec<Vec<FleetRow>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<FleetRow>> = Vec::new();

    for row in rows {
        match index.get(&row.fleet_id) {
            Some(&i) => groups[i].push(row),
            None => {
                index.insert(row.fleet_id.clone(), groups.len());
                groups.push(vec![row]);
            }
        }
    }

    groups
}
