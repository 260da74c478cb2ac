/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Per-species PAW data set
//!
//! A [`Potential`] owns every radial function of one chemical element: for each
//! projector channel the real-space projector, the all-electron and pseudo
//! partial waves (tabulated as r·φ), their difference, the smoothed difference
//! and the reciprocal-space projector. It is immutable once built and is shared
//! read-only by the site, expansion and momentum code.

use super::errors::{PotentialError, Result};
use super::radial::RadialFunction;
use crate::geometry::Vector3D;
use crate::utils::math::spherical_harmonic;
use crate::utils::spline::spline_integral;
use log::debug;
use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Raw tables of one projector channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelTables {
    /// Angular momentum
    pub l: i32,
    /// Real-space projector on the linear projector grid
    pub projector: Vec<f64>,
    /// All-electron partial wave (r·φ) on the wave grid
    pub aewave: Vec<f64>,
    /// Pseudo partial wave (r·φ̃) on the wave grid
    pub pswave: Vec<f64>,
    /// Smoothed partial-wave difference on the linear smooth grid
    pub smooth_diffwave: Vec<f64>,
    /// Reciprocal-space projector on the k grid
    pub kwave: Vec<f64>,
}

/// Raw tables of one species, as handed over by a pseudopotential reader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PotentialTables {
    /// Element symbol
    pub symbol: String,
    /// Projector cutoff radius (Å)
    pub rmax: f64,
    /// Extent of the smooth partial-wave difference grid (Å)
    pub wave_rmax: f64,
    /// Logarithmic partial-wave grid (Å)
    pub wave_grid: Vec<f64>,
    /// Logarithmic reciprocal-space grid (1/Å)
    pub kwave_grid: Vec<f64>,
    /// Projector channels
    pub channels: Vec<ChannelTables>,
}

/// All radial functions of one projector channel
#[derive(Debug, Clone, PartialEq)]
pub struct PartialWaveChannel {
    pub projector: RadialFunction,
    pub aewave: RadialFunction,
    pub pswave: RadialFunction,
    pub diffwave: RadialFunction,
    pub smooth_diffwave: RadialFunction,
    pub kwave: RadialFunction,
}

impl PartialWaveChannel {
    /// Angular momentum of the channel
    pub fn l(&self) -> i32 {
        self.projector.l()
    }

    /// (φ − φ̃)(r)·Y_lm at a Cartesian displacement from the nucleus
    ///
    /// The tables hold r·φ, so the radial value is divided by r; below the
    /// first grid point the first grid radius is used instead.
    pub fn partial_wave_difference(&self, m: i32, path: &Vector3D) -> Result<Complex64> {
        let r = path.length();
        let r0 = self.diffwave.grid()[0];
        let radial = self.diffwave.evaluate(r)? / r.max(r0);
        let (theta, phi) = path.direction();
        Ok(spherical_harmonic(self.l(), m, theta, phi)? * radial)
    }
}

/// One chemical element's PAW data set
#[derive(Debug, Clone)]
pub struct Potential {
    symbol: String,
    rmax: f64,
    wave_rmax: f64,
    channels: Vec<PartialWaveChannel>,
    aepw_overlap: Array2<f64>,
    pspw_overlap: Array2<f64>,
    diff_overlap: Array2<f64>,
}

impl Potential {
    /// Build splines and overlap matrices from raw tables
    pub fn from_tables(tables: &PotentialTables) -> Result<Self> {
        if tables.channels.is_empty() {
            return Err(PotentialError::invalid(&tables.symbol, "no projector channels"));
        }
        if !(tables.wave_rmax > 0.0) {
            return Err(PotentialError::invalid(&tables.symbol, "non-positive wave_rmax"));
        }

        let proj_size = tables.channels[0].projector.len();
        let smooth_size = tables.channels[0].smooth_diffwave.len();
        let mut channels = Vec::with_capacity(tables.channels.len());
        for (j, raw) in tables.channels.iter().enumerate() {
            let name = |what: &str| format!("{} channel {} {}", tables.symbol, j, what);
            if raw.l < 0 {
                return Err(PotentialError::invalid(name("l"), format!("negative l {}", raw.l)));
            }
            if raw.projector.len() != proj_size || raw.smooth_diffwave.len() != smooth_size {
                return Err(PotentialError::invalid(
                    name("grid"),
                    "all channels must share the projector and smooth grids",
                ));
            }
            if raw.aewave.len() != raw.pswave.len() {
                return Err(PotentialError::invalid(
                    name("partial waves"),
                    format!("{} all-electron vs {} pseudo points", raw.aewave.len(), raw.pswave.len()),
                ));
            }

            let diff: Vec<f64> = raw.aewave.iter().zip(&raw.pswave).map(|(a, p)| a - p).collect();
            channels.push(PartialWaveChannel {
                projector: RadialFunction::linear(&name("projector"), tables.rmax, &raw.projector, raw.l)?,
                aewave: RadialFunction::logarithmic(&name("aewave"), &tables.wave_grid, &raw.aewave, raw.l)?,
                pswave: RadialFunction::logarithmic(&name("pswave"), &tables.wave_grid, &raw.pswave, raw.l)?,
                diffwave: RadialFunction::logarithmic(&name("diffwave"), &tables.wave_grid, &diff, raw.l)?,
                smooth_diffwave: RadialFunction::linear(
                    &name("smooth_diffwave"),
                    tables.wave_rmax,
                    &raw.smooth_diffwave,
                    raw.l,
                )?,
                kwave: RadialFunction::logarithmic(&name("kwave"), &tables.kwave_grid, &raw.kwave, raw.l)?,
            });
        }

        let aepw_overlap = overlap_matrix(&channels, |c| &c.aewave)?;
        let pspw_overlap = overlap_matrix(&channels, |c| &c.pswave)?;
        let diff_overlap = &aepw_overlap - &pspw_overlap;

        debug!(
            "Loaded {} with {} channels ({} projector functions), rmax {:.4}",
            tables.symbol,
            channels.len(),
            channels.iter().map(|c| 2 * c.l() + 1).sum::<i32>(),
            tables.rmax
        );

        Ok(Self {
            symbol: tables.symbol.clone(),
            rmax: tables.rmax,
            wave_rmax: tables.wave_rmax,
            channels,
            aepw_overlap,
            pspw_overlap,
            diff_overlap,
        })
    }

    /// Element symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Projector cutoff radius
    pub fn rmax(&self) -> f64 {
        self.rmax
    }

    /// Extent of the smooth partial-wave difference grid
    pub fn wave_rmax(&self) -> f64 {
        self.wave_rmax
    }

    /// Projector channels
    pub fn channels(&self) -> &[PartialWaveChannel] {
        &self.channels
    }

    /// Number of projector channels (radial functions)
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of (channel, m) projector functions
    pub fn total_projs(&self) -> usize {
        self.channels.iter().map(|c| (2 * c.l() + 1) as usize).sum()
    }

    /// Largest channel angular momentum
    pub fn max_l(&self) -> i32 {
        self.channels.iter().map(|c| c.l()).max().unwrap_or(0)
    }

    /// ⟨φ_i|φ_j⟩ radial overlaps of the all-electron partial waves
    pub fn aepw_overlap(&self) -> &Array2<f64> {
        &self.aepw_overlap
    }

    /// ⟨φ̃_i|φ̃_j⟩ radial overlaps of the pseudo partial waves
    pub fn pspw_overlap(&self) -> &Array2<f64> {
        &self.pspw_overlap
    }

    /// Augmentation overlap ⟨φ_i|φ_j⟩ − ⟨φ̃_i|φ̃_j⟩
    pub fn diff_overlap(&self) -> &Array2<f64> {
        &self.diff_overlap
    }
}

/// ∫ u_i u_j dr for channels of equal l, zero otherwise
fn overlap_matrix<F>(channels: &[PartialWaveChannel], select: F) -> Result<Array2<f64>>
where
    F: Fn(&PartialWaveChannel) -> &RadialFunction,
{
    let n = channels.len();
    let mut overlap = Array2::zeros((n, n));
    for i in 0..n {
        for j in i..n {
            if channels[i].l() != channels[j].l() {
                continue;
            }
            let fi = select(&channels[i]);
            let fj = select(&channels[j]);
            let product: Vec<f64> = fi.values().iter().zip(fj.values()).map(|(a, b)| a * b).collect();
            let value = spline_integral(fi.grid(), &product)?;
            overlap[[i, j]] = value;
            overlap[[j, i]] = value;
        }
    }
    Ok(overlap)
}
