/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Pseudopotential data sets
//!
//! Per-species radial tables, their spline interpolators and the radial
//! overlap matrices derived from them. Everything here is built once at load
//! time and shared read-only afterwards.

pub mod errors;
pub mod pseudopotential;
pub mod radial;

pub use errors::{PotentialError, Result};
pub use pseudopotential::{ChannelTables, PartialWaveChannel, Potential, PotentialTables};
pub use radial::{
    linear_grid, logarithmic_grid, proj_interpolate, wave_interpolate, RadialFunction,
    RadialGridKind,
};
