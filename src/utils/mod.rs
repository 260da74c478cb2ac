/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Utility functions for PAW calculations
//!
//! This module provides the numerical building blocks used throughout the
//! crate: special functions, the cubic spline engine and fallible allocation.

pub mod alloc;
pub mod constants;
pub mod errors;
pub mod math;
pub mod spline;

pub use errors::{Result, UtilsError};
pub use math::{
    associated_legendre, fac, gaunt, real_spherical_harmonic, spherical_bessel_j,
    spherical_harmonic,
};
pub use spline::{spline_integral, CubicSpline, SplineBoundary};
