/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Radial interpolators
//!
//! Tabulated radial functions are evaluated through one of two policies,
//! chosen by the grid they live on:
//!
//! * wave interpolation on a logarithmic grid `r_i = r_0 q^i`; the segment is
//!   `floor(ln(r/r_0)/ln q)` and radii below `r_0` return the first value;
//! * projector interpolation on a linear grid `r_i = i·rmax/N`; the segment is
//!   `floor(r/rmax·N)` clamped to `N-2`, and radii beyond the last point are
//!   rejected.

use super::errors::{PotentialError, Result};
use crate::utils::spline::CubicSpline;

/// Relative tolerance on the spacing of a logarithmic grid
const LOG_GRID_TOLERANCE: f64 = 1e-6;

/// Grid family a radial function is tabulated on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadialGridKind {
    /// `r_i = r_0 · exp(i · log_ratio)`
    Logarithmic { log_ratio: f64 },
    /// `r_i = i · rmax / N`
    Linear { rmax: f64 },
}

/// A tabulated radial function with its spline and angular momentum
#[derive(Debug, Clone, PartialEq)]
pub struct RadialFunction {
    l: i32,
    kind: RadialGridKind,
    spline: CubicSpline,
}

impl RadialFunction {
    /// Tabulate a function on a logarithmic grid
    pub fn logarithmic(name: &str, grid: &[f64], values: &[f64], l: i32) -> Result<Self> {
        let log_ratio = log_grid_ratio(name, grid)?;
        let spline = CubicSpline::new(grid.to_vec(), values.to_vec())?;
        Ok(Self {
            l,
            kind: RadialGridKind::Logarithmic { log_ratio },
            spline,
        })
    }

    /// Tabulate a function on the linear grid `i·rmax/N`, N = `values.len()`
    pub fn linear(name: &str, rmax: f64, values: &[f64], l: i32) -> Result<Self> {
        if !(rmax > 0.0) {
            return Err(PotentialError::invalid(name, format!("non-positive rmax {rmax}")));
        }
        let grid = linear_grid(rmax, values.len());
        let spline = CubicSpline::new(grid, values.to_vec())?;
        Ok(Self {
            l,
            kind: RadialGridKind::Linear { rmax },
            spline,
        })
    }

    /// Angular momentum quantum number
    pub fn l(&self) -> i32 {
        self.l
    }

    /// Grid family
    pub fn kind(&self) -> RadialGridKind {
        self.kind
    }

    /// Tabulation radii
    pub fn grid(&self) -> &[f64] {
        self.spline.x()
    }

    /// Tabulated values
    pub fn values(&self) -> &[f64] {
        self.spline.y()
    }

    /// Underlying spline
    pub fn spline(&self) -> &CubicSpline {
        &self.spline
    }

    /// Number of grid points
    pub fn size(&self) -> usize {
        self.spline.len()
    }

    /// Largest tabulated radius
    pub fn max_radius(&self) -> f64 {
        self.spline.x()[self.spline.len() - 1]
    }

    /// Evaluate at `r` with the policy matching the grid
    pub fn evaluate(&self, r: f64) -> Result<f64> {
        match self.kind {
            RadialGridKind::Logarithmic { log_ratio } => {
                Ok(wave_interpolate(&self.spline, log_ratio, r))
            }
            RadialGridKind::Linear { rmax } => proj_interpolate(&self.spline, rmax, r),
        }
    }
}

/// Wave interpolation on a logarithmic grid; never fails
pub fn wave_interpolate(spline: &CubicSpline, log_ratio: f64, r: f64) -> f64 {
    let x = spline.x();
    if r < x[0] {
        return spline.y()[0];
    }
    let index = ((r / x[0]).ln() / log_ratio) as usize;
    spline.evaluate_segment(index.min(x.len() - 2), r)
}

/// Projector interpolation on a linear grid of nominal extent `rmax`
///
/// Radii outside `[0, r_{N-1}]` are rejected with `OutOfRangeRadius`.
pub fn proj_interpolate(spline: &CubicSpline, rmax: f64, r: f64) -> Result<f64> {
    let size = spline.len();
    let limit = spline.x()[size - 1];
    if !(0.0..=limit).contains(&r) {
        return Err(PotentialError::OutOfRangeRadius { r, limit });
    }
    let index = ((r / rmax * size as f64) as usize).min(size - 2);
    Ok(spline.evaluate_segment(index, r))
}

/// `N` points `i·rmax/N`, endpoint excluded
pub fn linear_grid(rmax: f64, size: usize) -> Vec<f64> {
    (0..size).map(|i| i as f64 * rmax / size as f64).collect()
}

/// `N` points `r0·q^i`
pub fn logarithmic_grid(r0: f64, ratio: f64, size: usize) -> Vec<f64> {
    (0..size).map(|i| r0 * ratio.powi(i as i32)).collect()
}

/// Validate a logarithmic grid and return `ln(r_1/r_0)`
fn log_grid_ratio(name: &str, grid: &[f64]) -> Result<f64> {
    if grid.len() < 2 || !(grid[0] > 0.0) {
        return Err(PotentialError::invalid(
            name,
            "logarithmic grid needs at least two points starting above zero",
        ));
    }
    let log_ratio = (grid[1] / grid[0]).ln();
    if !(log_ratio > 0.0) {
        return Err(PotentialError::invalid(name, "grid is not increasing"));
    }
    for (i, w) in grid.windows(2).enumerate() {
        let step = (w[1] / w[0]).ln();
        if (step - log_ratio).abs() > LOG_GRID_TOLERANCE * log_ratio {
            return Err(PotentialError::invalid(
                name,
                format!("uneven logarithmic spacing at index {}", i + 1),
            ));
        }
    }
    Ok(log_ratio)
}
