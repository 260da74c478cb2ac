/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # paw-rs
//!
//! Projector-augmented-wave (PAW) reconstruction for plane-wave
//! pseudo-wavefunctions.
//!
//! The crate turns tabulated per-species PAW data sets and plane-wave
//! coefficients into all-electron-like quantities:
//!
//! * cubic-spline radial interpolation and spherical harmonics ([`utils`]),
//! * per-atom real-space projector grids on the FFT mesh ([`projector`]),
//! * per-k-point Rayleigh expansions of the reciprocal-space projectors
//!   ([`rayleigh`]),
//! * spherical-Bessel transforms of partial-wave densities and momentum
//!   matrix elements ([`momentum`]).
//!
//! Reading wavefunction and pseudopotential files is left to the caller; the
//! data model they fill is in [`wavefunction`] and [`potential`].

pub mod config;
pub mod geometry;
pub mod momentum;
pub mod potential;
pub mod projector;
pub mod rayleigh;
pub mod utils;
pub mod wavefunction;

pub use config::PawConfig;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
