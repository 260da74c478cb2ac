/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Spherical-Bessel transforms of partial-wave densities
//!
//! For channels i, j of one species the augmentation density
//! `ρ_ij(r) = (φ_i φ_j − φ̃_i φ̃_j)(r)` is transformed as
//!
//! `T_l(q) = ∫ ρ_ij(r) j_l(qr) r² dr`
//!
//! for every l allowed by the selection rules, sampled on a uniform |q| grid
//! and splined for reuse.

use super::errors::{MomentumError, Result};
use crate::config::PawConfig;
use crate::geometry::Lattice;
use crate::potential::{PartialWaveChannel, Potential};
use crate::utils::alloc::try_filled;
use crate::utils::constants::{encut_to_wavevector, MAX_BESSEL_L};
use crate::utils::math::spherical_bessel_j;
use crate::utils::spline::{spline_integral, CubicSpline};
use crate::utils::UtilsError;
use log::{debug, info};
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use std::collections::HashMap;

/// Combined angular momenta coupling l1 and l2: |l1−l2| ≤ l ≤ l1+l2, l1+l2+l even
pub fn allowed_l(l1: i32, l2: i32) -> impl Iterator<Item = i32> {
    ((l1 - l2).abs()..=l1 + l2).step_by(2)
}

/// Transforms of one channel pair for every allowed l
#[derive(Debug, Clone, PartialEq)]
pub struct DensityTransform {
    l1: i32,
    l2: i32,
    qmax: f64,
    transforms: Vec<(i32, CubicSpline)>,
}

impl DensityTransform {
    /// Transform the density of two channels on `points` samples over [0, qmax]
    pub fn new(
        first: &PartialWaveChannel,
        second: &PartialWaveChannel,
        qmax: f64,
        points: usize,
    ) -> Result<Self> {
        let (l1, l2) = (first.l(), second.l());
        if let Some(l) = allowed_l(l1, l2).find(|&l| l > MAX_BESSEL_L) {
            return Err(UtilsError::UnsupportedAngularMomentum { l, max: MAX_BESSEL_L }.into());
        }
        if points < CubicSpline::MIN_POINTS {
            return Err(MomentumError::TooFewSamples(points));
        }

        let grid = first.aewave.grid();
        let density: Vec<f64> = first
            .aewave
            .values()
            .iter()
            .zip(second.aewave.values())
            .zip(first.pswave.values().iter().zip(second.pswave.values()))
            .map(|((a1, a2), (p1, p2))| a1 * a2 - p1 * p2)
            .collect();

        let qs: Vec<f64> = (0..points)
            .map(|i| i as f64 * qmax / (points - 1) as f64)
            .collect();
        let mut integrand = try_filled("density transform integrand", grid.len(), 0.0)?;
        let mut transforms = Vec::new();
        for l in allowed_l(l1, l2) {
            let mut values = try_filled("density transform samples", points, 0.0)?;
            for (value, &q) in values.iter_mut().zip(&qs) {
                for ((out, &r), &rho) in integrand.iter_mut().zip(grid).zip(&density) {
                    *out = rho * spherical_bessel_j(l, q * r)?;
                }
                *value = spline_integral(grid, &integrand)?;
            }
            transforms.push((l, CubicSpline::new(qs.clone(), values)?));
        }

        Ok(Self {
            l1,
            l2,
            qmax,
            transforms,
        })
    }

    /// Angular momentum of the first channel
    pub fn l1(&self) -> i32 {
        self.l1
    }

    /// Angular momentum of the second channel
    pub fn l2(&self) -> i32 {
        self.l2
    }

    /// Upper end of the sampled |q| range
    pub fn qmax(&self) -> f64 {
        self.qmax
    }

    /// T_l(q); zero for an l the selection rules exclude
    pub fn evaluate(&self, l: i32, q: f64) -> Result<f64> {
        if q > self.qmax * (1.0 + 1e-12) {
            return Err(MomentumError::TransformRange { q, qmax: self.qmax });
        }
        Ok(self
            .transforms
            .iter()
            .find(|(tl, _)| *tl == l)
            .map_or(0.0, |(_, spline)| spline.evaluate(q)))
    }
}

/// Memoized density transforms of every (species, channel, channel) triple
///
/// Keys are fixed at construction; each entry is computed on first request
/// and initialised exactly once even when requested concurrently.
#[derive(Debug)]
pub struct DensityTransformCache<'a> {
    potentials: &'a [Potential],
    qmax: f64,
    points: usize,
    entries: HashMap<(usize, usize, usize), OnceCell<DensityTransform>>,
}

impl<'a> DensityTransformCache<'a> {
    /// Empty cache over `potentials`, sampling `points` values on [0, qmax]
    pub fn new(potentials: &'a [Potential], qmax: f64, points: usize) -> Self {
        let entries = potentials
            .iter()
            .enumerate()
            .flat_map(|(species, potential)| {
                let n = potential.num_channels();
                (0..n).flat_map(move |j1| (0..n).map(move |j2| ((species, j1, j2), OnceCell::new())))
            })
            .collect();
        Self {
            potentials,
            qmax,
            points,
            entries,
        }
    }

    /// Cache sized for the momentum grid of `config` on `lattice`
    ///
    /// The sampled range covers the cutoff sphere plus the largest k-point
    /// difference, widened by `transform_margin`.
    pub fn from_config(potentials: &'a [Potential], lattice: &Lattice, config: &PawConfig) -> Self {
        let k_extent: f64 = lattice.reciprocal().iter().map(|b| b.length()).sum();
        let qmax = config.transform_margin * (encut_to_wavevector(config.encut) + k_extent);
        Self::new(potentials, qmax, config.transform_points)
    }

    /// Potentials indexed by species
    pub fn potentials(&self) -> &'a [Potential] {
        self.potentials
    }

    /// Upper end of the |q| range every transform is sampled on
    pub fn qmax(&self) -> f64 {
        self.qmax
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no species has channels
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries computed so far
    pub fn filled(&self) -> usize {
        self.entries.values().filter(|c| c.get().is_some()).count()
    }

    /// Transform of channels `j1`, `j2` of `species`, computed on first use
    pub fn get(&self, species: usize, j1: usize, j2: usize) -> Result<&DensityTransform> {
        let cell = self
            .entries
            .get(&(species, j1, j2))
            .ok_or(MomentumError::UnknownTransform { species, j1, j2 })?;
        cell.get_or_try_init(|| {
            let channels = self.potentials[species].channels();
            debug!(
                "Density transform {} ({}, {}) over {} samples",
                self.potentials[species].symbol(),
                j1,
                j2,
                self.points
            );
            DensityTransform::new(&channels[j1], &channels[j2], self.qmax, self.points)
        })
    }

    /// Compute every entry up front, in parallel
    pub fn precompute(&self) -> Result<()> {
        self.entries
            .par_iter()
            .try_for_each(|(&(species, j1, j2), _)| self.get(species, j1, j2).map(|_| ()))?;
        info!("Precomputed {} density transforms", self.entries.len());
        Ok(())
    }
}
