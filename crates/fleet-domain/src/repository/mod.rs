//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define HOW the application wants to persist fleets,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼──────────────────────────────
//! trait FleetRepository │  StorageFleetRepository<Sqlite>
//!   fn save()           │  StorageFleetRepository<InMemory>
//!   fn find_one_by_id() │
//! ```

pub mod fleet_repository;
