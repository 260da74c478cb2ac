/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Periodic cell geometry
//!
//! Lattice vectors are stored as rows (Å). The reciprocal lattice carries the
//! 2π factor, so `a_i · b_j = 2π δ_ij`.

use super::errors::{GeometryError, Result};
use super::vector::Vector3D;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Real-space lattice together with its reciprocal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 3]; 3]", into = "[[f64; 3]; 3]")]
pub struct Lattice {
    vectors: [Vector3D; 3],
    reciprocal: [Vector3D; 3],
    volume: f64,
}

impl Lattice {
    /// Build a lattice from its three row vectors
    pub fn new(vectors: [Vector3D; 3]) -> Result<Self> {
        let [a1, a2, a3] = vectors;
        let det = determinant(&vectors.map(|v| [v.x, v.y, v.z]));
        if det.abs() < 1e-12 {
            return Err(GeometryError::SingularLattice(det));
        }
        let reciprocal = [
            a2.cross(&a3) * (TAU / det),
            a3.cross(&a1) * (TAU / det),
            a1.cross(&a2) * (TAU / det),
        ];
        Ok(Self {
            vectors,
            reciprocal,
            volume: det.abs(),
        })
    }

    /// Simple cubic cell of edge `a`
    pub fn cubic(a: f64) -> Result<Self> {
        Self::new([
            Vector3D::new(a, 0.0, 0.0),
            Vector3D::new(0.0, a, 0.0),
            Vector3D::new(0.0, 0.0, a),
        ])
    }

    /// Lattice vectors (rows)
    pub fn vectors(&self) -> &[Vector3D; 3] {
        &self.vectors
    }

    /// Reciprocal lattice vectors including 2π
    pub fn reciprocal(&self) -> &[Vector3D; 3] {
        &self.reciprocal
    }

    /// Cell volume in Å³
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Fractional to Cartesian coordinates
    pub fn frac_to_cartesian(&self, frac: &Vector3D) -> Vector3D {
        let [a1, a2, a3] = self.vectors;
        a1 * frac.x + a2 * frac.y + a3 * frac.z
    }

    /// Cartesian to fractional coordinates
    pub fn cartesian_to_frac(&self, cart: &Vector3D) -> Vector3D {
        let [b1, b2, b3] = self.reciprocal;
        Vector3D::new(cart.dot(&b1), cart.dot(&b2), cart.dot(&b3)) * (1.0 / TAU)
    }

    /// Fractional reciprocal coordinates (e.g. k + G) to a Cartesian wavevector
    pub fn reciprocal_to_cartesian(&self, frac: &Vector3D) -> Vector3D {
        let [b1, b2, b3] = self.reciprocal;
        b1 * frac.x + b2 * frac.y + b3 * frac.z
    }

    /// Shortest Cartesian displacement from `center` to any periodic image of
    /// `coord` (both fractional), searched over the 27 neighbouring cells.
    ///
    /// # Returns
    ///
    /// The displacement vector and its length
    pub fn min_cart_path(&self, coord: &Vector3D, center: &Vector3D) -> (Vector3D, f64) {
        let base = *coord - *center;
        let mut best = (Vector3D::origin(), f64::INFINITY);
        for i in -1..=1 {
            for j in -1..=1 {
                for k in -1..=1 {
                    let shift = Vector3D::new(i as f64, j as f64, k as f64);
                    let path = self.frac_to_cartesian(&(base + shift));
                    let dist = path.length();
                    if dist < best.1 {
                        best = (path, dist);
                    }
                }
            }
        }
        best
    }

    /// Number of grid steps along each lattice direction needed to enclose a
    /// sphere of radius `rmax` on a grid with `dims` points per direction.
    pub fn grid_half_widths(&self, rmax: f64, dims: [usize; 3]) -> [i64; 3] {
        let [a1, a2, a3] = self.vectors;
        let planes = [a2.cross(&a3), a1.cross(&a3), a1.cross(&a2)];
        let mut widths = [0i64; 3];
        for d in 0..3 {
            widths[d] = (planes[d].length() * rmax / self.volume * dims[d] as f64) as i64 + 1;
        }
        widths
    }
}

impl TryFrom<[[f64; 3]; 3]> for Lattice {
    type Error = GeometryError;

    fn try_from(rows: [[f64; 3]; 3]) -> Result<Self> {
        Self::new([rows[0].into(), rows[1].into(), rows[2].into()])
    }
}

impl From<Lattice> for [[f64; 3]; 3] {
    fn from(lattice: Lattice) -> Self {
        lattice.vectors.map(|v| [v.x, v.y, v.z])
    }
}

/// Determinant of a row-major 3×3 matrix
pub fn determinant(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * m[1][1] * m[2][2] + m[0][1] * m[1][2] * m[2][0] + m[0][2] * m[1][0] * m[2][1]
        - m[0][2] * m[1][1] * m[2][0]
        - m[0][1] * m[1][0] * m[2][2]
        - m[0][0] * m[1][2] * m[2][1]
}

/// Validate real-space grid dimensions
pub fn check_grid(dims: [usize; 3]) -> Result<()> {
    if dims.iter().any(|&d| d == 0) {
        return Err(GeometryError::InvalidGrid(dims));
    }
    Ok(())
}

/// Flat index of grid point (i, j, k), last index fastest
pub fn flat_index(i: usize, j: usize, k: usize, dims: [usize; 3]) -> usize {
    (i * dims[1] + j) * dims[2] + k
}

/// Fractional coordinate of a flat grid index
pub fn frac_from_index(index: usize, dims: [usize; 3]) -> Vector3D {
    let plane = dims[1] * dims[2];
    let i = index / plane;
    let j = (index % plane) / dims[2];
    let k = index % dims[2];
    Vector3D::new(
        i as f64 / dims[0] as f64,
        j as f64 / dims[1] as f64,
        k as f64 / dims[2] as f64,
    )
}
