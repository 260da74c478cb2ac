/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Cubic spline engine
//!
//! Builds piecewise cubic interpolants over an arbitrary strictly increasing
//! grid by the usual tridiagonal forward elimination and back substitution.
//! On segment i the interpolant is
//!
//! `y_i + t (b_i + t (c_i + t d_i))`, with `t = r - x_i`.

use super::alloc::try_filled;
use super::errors::{Result, UtilsError};

/// Boundary condition imposed on the second derivative at the grid ends
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SplineBoundary {
    /// Zero second derivative at both ends
    #[default]
    Natural,
    /// Prescribed second derivatives at the first and last grid points
    SecondDerivative(f64, f64),
}

/// Natural (or second-derivative-clamped) cubic spline over a 1-D grid
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// First-order coefficients
    b: Vec<f64>,
    /// Second-order coefficients
    c: Vec<f64>,
    /// Third-order coefficients
    d: Vec<f64>,
}

impl CubicSpline {
    /// Minimum number of grid points
    pub const MIN_POINTS: usize = 3;

    /// Build a natural cubic spline through `(x, y)`
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        Self::with_boundary(x, y, SplineBoundary::Natural)
    }

    /// Build a cubic spline with the given end conditions
    pub fn with_boundary(x: Vec<f64>, y: Vec<f64>, boundary: SplineBoundary) -> Result<Self> {
        let n = x.len();
        if n != y.len() {
            return Err(UtilsError::LengthMismatch { x: n, y: y.len() });
        }
        if n < Self::MIN_POINTS {
            return Err(UtilsError::InsufficientPoints {
                needed: Self::MIN_POINTS,
                found: n,
            });
        }
        if let Some(i) = (1..n).find(|&i| x[i] <= x[i - 1]) {
            return Err(UtilsError::NonMonotonicGrid(i));
        }

        let (start, end) = match boundary {
            SplineBoundary::Natural => (0.0, 0.0),
            SplineBoundary::SecondDerivative(start, end) => (start, end),
        };

        // Forward elimination: `m` holds the elimination multipliers and is
        // overwritten by the second derivatives during back substitution.
        let mut m = try_filled("spline second derivatives", n, 0.0)?;
        let mut u = try_filled("spline elimination workspace", n, 0.0)?;
        u[0] = start;
        for i in 1..n - 1 {
            let sig = (x[i] - x[i - 1]) / (x[i + 1] - x[i - 1]);
            let p = sig * m[i - 1] + 2.0;
            m[i] = (sig - 1.0) / p;
            let slope_diff =
                (y[i + 1] - y[i]) / (x[i + 1] - x[i]) - (y[i] - y[i - 1]) / (x[i] - x[i - 1]);
            u[i] = (6.0 * slope_diff / (x[i + 1] - x[i - 1]) - sig * u[i - 1]) / p;
        }

        m[n - 1] = end;
        for i in (0..n - 1).rev() {
            m[i] = m[i] * m[i + 1] + u[i];
        }

        let mut b = try_filled("spline first-order coefficients", n, 0.0)?;
        let mut c = try_filled("spline second-order coefficients", n, 0.0)?;
        let mut d = try_filled("spline third-order coefficients", n, 0.0)?;
        for i in 0..n - 1 {
            let h = x[i + 1] - x[i];
            let r = (m[i + 1] - m[i]) / 6.0;
            d[i] = r / h;
            c[i] = m[i] / 2.0;
            b[i] = (y[i + 1] - y[i]) / h - (c[i] + r) * h;
        }

        Ok(Self { x, y, b, c, d })
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false; construction requires at least three points
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Grid abscissas
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Tabulated ordinates
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Coefficient arrays (first, second, third order)
    pub fn coefficients(&self) -> (&[f64], &[f64], &[f64]) {
        (&self.b, &self.c, &self.d)
    }

    /// Evaluate the cubic of segment `index` at `r`
    ///
    /// `index` must be below `len() - 1`; callers with a closed-form index
    /// clamp before calling.
    #[inline]
    pub fn evaluate_segment(&self, index: usize, r: f64) -> f64 {
        let t = r - self.x[index];
        self.y[index] + t * (self.b[index] + t * (self.c[index] + t * self.d[index]))
    }

    /// Segment containing `r`, found by bisection and clamped to the grid
    pub fn segment(&self, r: f64) -> usize {
        let upper = self.x.partition_point(|&xi| xi <= r);
        upper.saturating_sub(1).min(self.x.len() - 2)
    }

    /// Evaluate the spline at an arbitrary `r`
    ///
    /// Outside the grid the first or last segment's cubic is extended.
    pub fn evaluate(&self, r: f64) -> f64 {
        self.evaluate_segment(self.segment(r), r)
    }

    /// Definite integral over the whole grid from the exact segment antiderivatives
    pub fn integral(&self) -> f64 {
        (0..self.x.len() - 1)
            .map(|i| {
                let h = self.x[i + 1] - self.x[i];
                h * (self.y[i] + h * (self.b[i] / 2.0 + h * (self.c[i] / 3.0 + self.d[i] * h / 4.0)))
            })
            .sum()
    }
}

/// Integrate tabulated values over a grid by fitting a natural spline
pub fn spline_integral(x: &[f64], y: &[f64]) -> Result<f64> {
    Ok(CubicSpline::new(x.to_vec(), y.to_vec())?.integral())
}
