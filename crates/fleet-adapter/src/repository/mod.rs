//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from fleet-domain on top of a
//! row-oriented storage backend.

pub mod mapping;
pub mod storage;
