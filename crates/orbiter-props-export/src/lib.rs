//! orbiter-props Export Pipeline
//!
//! Turns a scene snapshot into an Orbiter vessel header:
//! - collision cage vertices as `TOUCHDOWNVTX` rows
//! - thruster index macros, positions and directions
//! - named thruster group listings
//!
//! [`HeaderExporter`] drives the stages in order: cage extraction, thruster
//! collection, geometry resolution, rendering.

pub mod cage;
pub mod exporter;
pub mod header;
pub mod settings;
pub mod thrusters;

pub use cage::{extract_collision_cage, ContactPoint};
pub use exporter::{ExportSummary, HeaderExporter};
pub use header::{guard_name, HeaderDocument};
pub use settings::{ExportSettings, RocketGroup};
pub use thrusters::{
    collect_thrusters, resolve_geometry, CollectedThrusters, GroupListing, Thruster,
    ThrusterGeometry, ThrusterIndex,
};
