//! Handlers - One per use case
//!
//! Command handlers borrow the repository mutably (they save);
//! query handlers only read.

pub mod create_fleet;
pub mod fleet_info;
pub mod localize_vehicle;
pub mod register_vehicle;
pub mod user_fleets;
pub mod vehicle_location;

pub use create_fleet::CreateFleetHandler;
pub use fleet_info::FleetInfoHandler;
pub use localize_vehicle::LocalizeVehicleHandler;
pub use register_vehicle::RegisterVehicleHandler;
pub use user_fleets::UserFleetsHandler;
pub use vehicle_location::VehicleLocationHandler;

use fleet_domain::{Fleet, FleetError, FleetId, FleetRepository};

use crate::error::HandlerError;

/// Load a fleet, turning "absent" into [`FleetError::FleetNotFound`]
pub(crate) fn load_fleet<R: FleetRepository>(
    repository: &R,
    fleet_id: &FleetId,
) -> Result<Fleet, HandlerError> {
    repository
        .find_one_by_id(fleet_id)?
        .ok_or_else(|| FleetError::FleetNotFound(fleet_id.clone()).into())
}
