//! What a command prints
//!
//! Every command produces a [`Report`]. It renders as human-readable text
//! through `Display`, or as JSON with `--json`.

use std::fmt;

use fleet_domain::{Fleet, Location};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationView {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl From<&Location> for LocationView {
    fn from(location: &Location) -> Self {
        Self {
            latitude: location.latitude(),
            longitude: location.longitude(),
            altitude: location.altitude(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleView {
    pub plate_number: String,
    pub vehicle_type: String,
    pub location: Option<LocationView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetView {
    pub fleet_id: String,
    pub user_id: String,
    pub vehicle_count: usize,
    /// Sorted by plate number
    pub vehicles: Vec<VehicleView>,
}

impl From<&Fleet> for FleetView {
    fn from(fleet: &Fleet) -> Self {
        let mut vehicles: Vec<VehicleView> = fleet
            .registered_vehicles()
            .into_iter()
            .map(|vehicle| VehicleView {
                plate_number: vehicle.plate_number().to_string(),
                vehicle_type: vehicle.kind().to_string(),
                location: fleet
                    .vehicle_location(vehicle.plate_number())
                    .ok()
                    .flatten()
                    .map(LocationView::from),
            })
            .collect();
        vehicles.sort_by(|a, b| a.plate_number.cmp(&b.plate_number));

        Self {
            fleet_id: fleet.id().to_string(),
            user_id: fleet.user_id().to_string(),
            vehicle_count: fleet.vehicle_count(),
            vehicles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    #[serde(rename_all = "camelCase")]
    FleetCreated { fleet_id: String },

    #[serde(rename_all = "camelCase")]
    VehicleRegistered {
        fleet_id: String,
        plate_number: String,
    },

    #[serde(rename_all = "camelCase")]
    VehicleLocalized {
        fleet_id: String,
        plate_number: String,
        location: LocationView,
    },

    FleetInfo(FleetView),

    #[serde(rename_all = "camelCase")]
    VehicleLocation {
        plate_number: String,
        location: LocationView,
    },

    #[serde(rename_all = "camelCase")]
    UserFleets {
        user_id: String,
        fleet_ids: Vec<String>,
    },
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::FleetCreated { fleet_id } => write!(f, "{}", fleet_id),
            Report::VehicleRegistered {
                fleet_id,
                plate_number,
            } => write!(
                f,
                "Vehicle {} registered successfully to fleet {}",
                plate_number, fleet_id
            ),
            Report::VehicleLocalized {
                plate_number,
                location,
                ..
            } => {
                write!(
                    f,
                    "Vehicle {} localized at {}, {}",
                    plate_number, location.latitude, location.longitude
                )?;
                if let Some(altitude) = location.altitude {
                    write!(f, ", altitude: {}", altitude)?;
                }
                Ok(())
            }
            Report::FleetInfo(fleet) => {
                writeln!(f, "Fleet ID: {}", fleet.fleet_id)?;
                writeln!(f, "User ID: {}", fleet.user_id)?;
                write!(f, "Vehicle Count: {}", fleet.vehicle_count)?;
                if !fleet.vehicles.is_empty() {
                    write!(f, "\nRegistered Vehicles:")?;
                }
                for vehicle in &fleet.vehicles {
                    write!(
                        f,
                        "\n  - {} ({})",
                        vehicle.plate_number, vehicle.vehicle_type
                    )?;
                    match &vehicle.location {
                        Some(location) => {
                            write!(
                                f,
                                " (Location: {}, {}",
                                location.latitude, location.longitude
                            )?;
                            if let Some(altitude) = location.altitude {
                                write!(f, ", {}m", altitude)?;
                            }
                            write!(f, ")")?;
                        }
                        None => write!(f, " (No location)")?,
                    }
                }
                Ok(())
            }
            Report::VehicleLocation {
                plate_number,
                location,
            } => {
                writeln!(f, "Vehicle {} is located at:", plate_number)?;
                writeln!(f, "  Latitude: {}", location.latitude)?;
                write!(f, "  Longitude: {}", location.longitude)?;
                if let Some(altitude) = location.altitude {
                    write!(f, "\n  Altitude: {}m", altitude)?;
                }
                Ok(())
            }
            Report::UserFleets { user_id, fleet_ids } => {
                if fleet_ids.is_empty() {
                    return write!(f, "No fleet found for user {}", user_id);
                }
                write!(f, "{}", fleet_ids.join("\n"))
            }
        }
    }
}
