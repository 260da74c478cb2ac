/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Geometry kernel
//!
//! Vector and lattice primitives: fractional/Cartesian conversion, the
//! reciprocal lattice, minimum-image paths and real-space grid indexing.

pub mod errors;
pub mod lattice;
pub mod vector;

pub use errors::{GeometryError, Result};
pub use lattice::{check_grid, determinant, flat_index, frac_from_index, Lattice};
pub use vector::Vector3D;
