/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Density transforms and momentum matrix assembly
//!
//! Transforms of partial-wave densities are memoized per species and channel
//! pair in a [`DensityTransformCache`] shared by every matrix element.

pub mod errors;
pub mod matrix;
pub mod transform;

pub use errors::{MomentumError, Result};
pub use matrix::{
    momentum_grid, momentum_matrix, momentum_matrix_element, one_center_momentum,
    pseudo_momentum, StateProjections,
};
pub use transform::{allowed_l, DensityTransform, DensityTransformCache};
