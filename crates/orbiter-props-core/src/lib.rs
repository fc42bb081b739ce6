//! orbiter-props Core Library
//!
//! This crate provides the value types, coordinate conversion and error
//! handling shared by the scene loader and the header exporter.

pub mod coords;
pub mod error;
pub mod numeric;
pub mod types;

pub use coords::to_orbiter;
pub use error::{Error, ResourceKind, Result, ResultExt};
pub use types::*;
