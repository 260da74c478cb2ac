/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Rayleigh expansions of reciprocal-space projectors
//!
//! Per k-point tables that turn plane-wave coefficients into one-center
//! projector amplitudes without going through real space.

pub mod errors;
pub mod expansion;

pub use errors::{RayleighError, Result};
pub use expansion::{
    band_projections, rayleigh_amplitude, rayleigh_terms, KPointExpansion, RayleighExpansion,
    RayleighExpansions,
};
