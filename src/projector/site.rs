/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Real-space projector sites
//!
//! For every atom the real-space grid points inside its augmentation sphere
//! are collected under the minimum-image convention, and each projector
//! function (channel × m) is evaluated there. Atoms are independent, so the
//! construction is a parallel map producing one owned [`ProjectorSite`] per
//! atom.

use super::errors::{ProjectorError, Result};
use crate::geometry::{check_grid, flat_index, Lattice, Vector3D};
use crate::potential::{PartialWaveChannel, Potential, RadialFunction};
use crate::utils::alloc::try_with_capacity;
use crate::utils::math::spherical_harmonic;
use crate::wavefunction::AtomSite;
use log::{debug, info};
use num_complex::Complex64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Radial function family evaluated on the site grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectorMode {
    /// Real-space projectors p(r) inside `rmax`
    #[default]
    Projector,
    /// Smoothed partial-wave difference inside `wave_rmax`
    PartialWaveDifference,
}

impl ProjectorMode {
    /// Radial function of a channel for this mode
    pub fn radial<'a>(&self, channel: &'a PartialWaveChannel) -> &'a RadialFunction {
        match self {
            Self::Projector => &channel.projector,
            Self::PartialWaveDifference => &channel.smooth_diffwave,
        }
    }

    /// Nominal extent of the radial grid for this mode
    pub fn radius(&self, potential: &Potential) -> f64 {
        match self {
            Self::Projector => potential.rmax(),
            Self::PartialWaveDifference => potential.wave_rmax(),
        }
    }
}

/// Tightened cutoff `rmax·(N−1)/N`, the last point of an N-point linear grid
pub fn tightened_cutoff(rmax: f64, size: usize) -> f64 {
    rmax * (size as f64 - 1.0) / size as f64
}

/// Values of one (channel, m) projector function at the site's grid points
#[derive(Debug, Clone, PartialEq)]
pub struct SiteProjector {
    pub channel: usize,
    pub l: i32,
    pub m: i32,
    pub values: Vec<Complex64>,
}

/// Sparse real-space projector data of one atom
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectorSite {
    atom: usize,
    species: usize,
    frac: Vector3D,
    cutoff: f64,
    indices: Vec<usize>,
    paths: Vec<Vector3D>,
    projectors: Vec<SiteProjector>,
}

impl ProjectorSite {
    /// Index of the atom in the structure
    pub fn atom(&self) -> usize {
        self.atom
    }

    /// Index of the atom's potential
    pub fn species(&self) -> usize {
        self.species
    }

    /// Fractional position, wrapped into the unit cell
    pub fn frac(&self) -> &Vector3D {
        &self.frac
    }

    /// Tightened cutoff radius the grid points were accepted against
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Number of grid points inside the sphere
    pub fn num_points(&self) -> usize {
        self.indices.len()
    }

    /// Flat global grid indices of the points inside the sphere
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Minimum-image Cartesian displacement from the atom to each point
    pub fn paths(&self) -> &[Vector3D] {
        &self.paths
    }

    /// Projector values, channel-major then m ascending
    pub fn projectors(&self) -> &[SiteProjector] {
        &self.projectors
    }

    /// Values of the projector of `channel` with magnetic number `m`
    pub fn projector(&self, channel: usize, m: i32) -> Option<&SiteProjector> {
        self.projectors
            .iter()
            .find(|p| p.channel == channel && p.m == m)
    }
}

/// Build the projector sites of every atom in parallel
///
/// # Arguments
///
/// * `atoms` - Atoms with species index and fractional position
/// * `dims` - Real-space grid dimensions
/// * `lattice` - Periodic cell
/// * `potentials` - Potentials indexed by species
/// * `mode` - Radial function family to evaluate
///
/// # Returns
///
/// One site per atom in input order. Any failing atom fails the whole batch.
pub fn build_projector_sites(
    atoms: &[AtomSite],
    dims: [usize; 3],
    lattice: &Lattice,
    potentials: &[Potential],
    mode: ProjectorMode,
) -> Result<Vec<ProjectorSite>> {
    check_grid(dims)?;
    let sites = atoms
        .par_iter()
        .enumerate()
        .map(|(index, atom)| {
            let potential =
                potentials
                    .get(atom.species)
                    .ok_or(ProjectorError::UnknownSpecies {
                        atom: index,
                        species: atom.species,
                        available: potentials.len(),
                    })?;
            build_site(index, atom, dims, lattice, potential, mode)
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Built {} projector sites ({:?}) with {} grid points in total",
        sites.len(),
        mode,
        sites.iter().map(|s| s.num_points()).sum::<usize>()
    );
    Ok(sites)
}

/// Grid indices visited along one direction around `center`
///
/// A box at least as wide as the grid is replaced by the full range, so that
/// wrapping never visits the same index twice.
fn axis_range(center: i64, half_width: i64, size: usize) -> Vec<usize> {
    if 2 * half_width + 1 >= size as i64 {
        (0..size).collect()
    } else {
        (center - half_width..=center + half_width)
            .map(|i| i.rem_euclid(size as i64) as usize)
            .collect()
    }
}

fn build_site(
    index: usize,
    atom: &AtomSite,
    dims: [usize; 3],
    lattice: &Lattice,
    potential: &Potential,
    mode: ProjectorMode,
) -> Result<ProjectorSite> {
    let channels = potential.channels();
    let radius = mode.radius(potential);
    let grid_size = channels
        .first()
        .map(|c| mode.radial(c).size())
        .unwrap_or(1);
    let cutoff = tightened_cutoff(radius, grid_size);

    let frac = atom.frac.wrapped();
    let half = lattice.grid_half_widths(radius, dims);
    let center = [
        (frac.x * dims[0] as f64).round() as i64,
        (frac.y * dims[1] as f64).round() as i64,
        (frac.z * dims[2] as f64).round() as i64,
    ];
    let ranges: Vec<Vec<usize>> = (0..3)
        .map(|d| axis_range(center[d], half[d], dims[d]))
        .collect();

    let bound = ranges.iter().map(|r| r.len()).product();
    let mut indices = try_with_capacity("projector site grid indices", bound)?;
    let mut paths = try_with_capacity("projector site paths", bound)?;
    for &i in &ranges[0] {
        for &j in &ranges[1] {
            for &k in &ranges[2] {
                let point = Vector3D::new(
                    i as f64 / dims[0] as f64,
                    j as f64 / dims[1] as f64,
                    k as f64 / dims[2] as f64,
                );
                let (path, r) = lattice.min_cart_path(&point, &frac);
                if r < cutoff {
                    indices.push(flat_index(i, j, k, dims));
                    paths.push(path);
                }
            }
        }
    }

    let directions: Vec<(f64, (f64, f64))> =
        paths.iter().map(|p| (p.length(), p.direction())).collect();
    let mut projectors = try_with_capacity("projector site values", potential.total_projs())?;
    for (channel_index, channel) in channels.iter().enumerate() {
        let radial = mode.radial(channel);
        let l = channel.l();
        for m in -l..=l {
            let mut values = try_with_capacity("projector values", indices.len())?;
            for &(r, (theta, phi)) in &directions {
                values.push(spherical_harmonic(l, m, theta, phi)? * radial.evaluate(r)?);
            }
            projectors.push(SiteProjector {
                channel: channel_index,
                l,
                m,
                values,
            });
        }
    }

    debug!(
        "Atom {} ({}): {} grid points within {:.4}",
        index,
        potential.symbol(),
        indices.len(),
        cutoff
    );

    Ok(ProjectorSite {
        atom: index,
        species: atom.species,
        frac,
        cutoff,
        indices,
        paths,
        projectors,
    })
}
