//! Domain Models - The vocabulary of fleet tracking
//!
//! Every name here should match how we talk about the system:
//! a user owns a fleet, vehicles are registered into it and localized.

pub mod fleet;
pub mod identifier;
pub mod location;
pub mod vehicle;
