/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Momentum matrix elements
//!
//! The element between states ψ₁ (k₁) and ψ₂ (k₂) at the reciprocal-lattice
//! vector G_P is
//!
//! `M₁₂(G_P) = ⟨ψ₁| e^{i(k₁−k₂+G_P)·r} |ψ₂⟩`
//!
//! evaluated in PAW form: the plane-wave overlap of the pseudo coefficients
//! plus, for every atom, the one-center correction built from the density
//! transforms and the Rayleigh-expanded projector amplitudes of both states.

use super::errors::{MomentumError, Result};
use super::transform::{allowed_l, DensityTransform, DensityTransformCache};
use crate::geometry::{Lattice, Vector3D};
use crate::potential::PartialWaveChannel;
use crate::rayleigh::{band_projections, RayleighExpansions};
use crate::utils::constants::{encut_to_wavevector, HBAR2_OVER_2M};
use crate::utils::math::{gaunt, i_pow, spherical_harmonic};
use crate::wavefunction::{AtomSite, Band, KPoint, PseudoWavefunction, StateIndex};
use log::info;
use num_complex::Complex64;
use rayon::prelude::*;
use std::collections::HashMap;
use std::f64::consts::{PI, TAU};

/// One-center amplitudes of a state, `[atom][channel][l+m]`
pub type StateProjections = Vec<Vec<Vec<Complex64>>>;

/// Integer reciprocal-lattice vectors inside the kinetic cutoff
///
/// Every G with `ħ²/2m·|G|² ≤ encut` in lexicographic index order.
pub fn momentum_grid(lattice: &Lattice, encut: f64) -> Result<Vec<[i32; 3]>> {
    if !(encut > 0.0) {
        return Err(MomentumError::InvalidCutoff(encut));
    }
    let gcut = encut_to_wavevector(encut);
    let bounds: Vec<i32> = lattice
        .vectors()
        .iter()
        .map(|a| (gcut * a.length() / TAU) as i32 + 1)
        .collect();

    let mut grid = Vec::new();
    for i in -bounds[0]..=bounds[0] {
        for j in -bounds[1]..=bounds[1] {
            for k in -bounds[2]..=bounds[2] {
                let g = [i, j, k];
                let cart = lattice.reciprocal_to_cartesian(&Vector3D::from_indices(g));
                if HBAR2_OVER_2M * cart.dot(&cart) <= encut {
                    grid.push(g);
                }
            }
        }
    }
    Ok(grid)
}

/// Plane-wave part Σ_G₂ C₁*(G₂+G_P) C₂(G₂)
pub fn pseudo_momentum(
    kpoint1: &KPoint,
    band1: &Band,
    kpoint2: &KPoint,
    band2: &Band,
    g_p: [i32; 3],
) -> Complex64 {
    pseudo_term(&kpoint1.g_lookup(), band1, kpoint2, band2, g_p)
}

fn pseudo_term(
    lookup1: &HashMap<[i32; 3], usize>,
    band1: &Band,
    kpoint2: &KPoint,
    band2: &Band,
    g_p: [i32; 3],
) -> Complex64 {
    kpoint2
        .gs
        .iter()
        .zip(&band2.coeffs)
        .filter_map(|(g2, c2)| {
            let g1 = [g2[0] + g_p[0], g2[1] + g_p[1], g2[2] + g_p[2]];
            lookup1.get(&g1).map(|&w1| band1.coeffs[w1].conj() * c2)
        })
        .sum()
}

/// Angular-radial coupling of (l1, m1) and (l2, m2) through e^{iQ·r}
///
/// `4π Σ_l i^l Y*_{l,m1−m2}(Q̂) T_l(|Q|) G(l1 m1; l m1−m2; l2 m2)`
fn coupling(
    transform: &DensityTransform,
    (l1, m1): (i32, i32),
    (l2, m2): (i32, i32),
    q: f64,
    (theta, phi): (f64, f64),
) -> Result<Complex64> {
    let m = m1 - m2;
    let mut total = Complex64::new(0.0, 0.0);
    for l in allowed_l(l1, l2) {
        if m.abs() > l {
            continue;
        }
        let angular = gaunt(l1, m1, l, m, l2, m2);
        if angular == 0.0 {
            continue;
        }
        let radial = transform.evaluate(l, q)?;
        total += i_pow(l) * spherical_harmonic(l, m, theta, phi)?.conj() * (radial * angular);
    }
    Ok(total * (4.0 * PI))
}

/// One-center correction summed over atoms
///
/// # Arguments
///
/// * `lattice` - Periodic cell
/// * `atoms` - Atoms with species and fractional positions
/// * `cache` - Density transforms of every species
/// * `proj1`, `proj2` - One-center amplitudes of both states
/// * `q` - Cartesian transfer k₁ − k₂ + G_P
/// * `g_p` - Reciprocal-lattice vector of the element
pub fn one_center_momentum(
    lattice: &Lattice,
    atoms: &[AtomSite],
    cache: &DensityTransformCache,
    proj1: &StateProjections,
    proj2: &StateProjections,
    q: &Vector3D,
    g_p: [i32; 3],
) -> Result<Complex64> {
    if proj1.len() != atoms.len() || proj2.len() != atoms.len() {
        return Err(MomentumError::ProjectionShape(format!(
            "{} and {} atoms of amplitudes for {} atoms",
            proj1.len(),
            proj2.len(),
            atoms.len()
        )));
    }
    let q_len = q.length();
    let direction = q.direction();
    let g = Vector3D::from_indices(g_p);
    let mut total = Complex64::new(0.0, 0.0);
    for (a, atom) in atoms.iter().enumerate() {
        let channels = cache
            .potentials()
            .get(atom.species)
            .ok_or(MomentumError::UnknownSpecies {
                atom: a,
                species: atom.species,
            })?
            .channels();
        let (site1, site2) = (&proj1[a], &proj2[a]);
        check_site_shape(a, site1, channels)?;
        check_site_shape(a, site2, channels)?;
        let mut site = Complex64::new(0.0, 0.0);
        for (j1, c1) in channels.iter().enumerate() {
            for (j2, c2) in channels.iter().enumerate() {
                let transform = cache.get(atom.species, j1, j2)?;
                let (l1, l2) = (c1.l(), c2.l());
                for m1 in -l1..=l1 {
                    let p1 = site1[j1][(m1 + l1) as usize].conj();
                    for m2 in -l2..=l2 {
                        let p2 = site2[j2][(m2 + l2) as usize];
                        site += p1 * coupling(transform, (l1, m1), (l2, m2), q_len, direction)? * p2;
                    }
                }
            }
        }
        let phase = Complex64::new(0.0, TAU * g.dot(&atom.frac)).exp();
        total += phase * site;
    }
    Ok(total / lattice.volume())
}

fn check_site_shape(atom: usize, site: &[Vec<Complex64>], channels: &[PartialWaveChannel]) -> Result<()> {
    let matches = site.len() == channels.len()
        && site
            .iter()
            .zip(channels)
            .all(|(values, channel)| values.len() == (2 * channel.l() + 1) as usize);
    if matches {
        Ok(())
    } else {
        Err(MomentumError::ProjectionShape(format!(
            "atom {} amplitudes do not match its {} channels",
            atom,
            channels.len()
        )))
    }
}

/// Cartesian transfer k₁ − k₂ + G_P
fn transfer(lattice: &Lattice, kpoint1: &KPoint, kpoint2: &KPoint, g_p: [i32; 3]) -> Vector3D {
    lattice.reciprocal_to_cartesian(&(Vector3D::from_indices(g_p) + kpoint1.k - kpoint2.k))
}

/// Momentum matrix element between two states at one G_P
///
/// States of different spin do not couple and give zero.
pub fn momentum_matrix_element(
    wavefunction: &PseudoWavefunction,
    atoms: &[AtomSite],
    expansions: &RayleighExpansions,
    cache: &DensityTransformCache,
    state1: StateIndex,
    state2: StateIndex,
    g_p: [i32; 3],
) -> Result<Complex64> {
    let (kpoint1, band1) = wavefunction.state(state1)?;
    let (kpoint2, band2) = wavefunction.state(state2)?;
    if kpoint1.spin != kpoint2.spin {
        return Ok(Complex64::new(0.0, 0.0));
    }
    let proj1 = band_projections(kpoint1, band1, expansions.slot(state1.kpoint)?, atoms)?;
    let proj2 = band_projections(kpoint2, band2, expansions.slot(state2.kpoint)?, atoms)?;
    let lattice = wavefunction.lattice();
    let q = transfer(lattice, kpoint1, kpoint2, g_p);
    let pseudo = pseudo_momentum(kpoint1, band1, kpoint2, band2, g_p);
    Ok(pseudo + one_center_momentum(lattice, atoms, cache, &proj1, &proj2, &q, g_p)?)
}

/// Momentum matrix elements at every G_P of the cutoff grid, in parallel
///
/// # Returns
///
/// `(G_P, M₁₂(G_P))` pairs in the order of [`momentum_grid`]
pub fn momentum_matrix(
    wavefunction: &PseudoWavefunction,
    atoms: &[AtomSite],
    expansions: &RayleighExpansions,
    cache: &DensityTransformCache,
    state1: StateIndex,
    state2: StateIndex,
    encut: f64,
) -> Result<Vec<([i32; 3], Complex64)>> {
    let lattice = wavefunction.lattice();
    let grid = momentum_grid(lattice, encut)?;
    let (kpoint1, band1) = wavefunction.state(state1)?;
    let (kpoint2, band2) = wavefunction.state(state2)?;
    if kpoint1.spin != kpoint2.spin {
        return Ok(grid.into_iter().map(|g| (g, Complex64::new(0.0, 0.0))).collect());
    }

    cache.precompute()?;
    let proj1 = band_projections(kpoint1, band1, expansions.slot(state1.kpoint)?, atoms)?;
    let proj2 = band_projections(kpoint2, band2, expansions.slot(state2.kpoint)?, atoms)?;
    let lookup1 = kpoint1.g_lookup();

    let elements = grid
        .par_iter()
        .map(|&g_p| -> Result<([i32; 3], Complex64)> {
            let q = transfer(lattice, kpoint1, kpoint2, g_p);
            let pseudo = pseudo_term(&lookup1, band1, kpoint2, band2, g_p);
            let one_center = one_center_momentum(lattice, atoms, cache, &proj1, &proj2, &q, g_p)?;
            Ok((g_p, pseudo + one_center))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Momentum matrix for states {:?} -> {:?}: {} G vectors",
        state1,
        state2,
        elements.len()
    );
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kpoint(gs: Vec<[i32; 3]>, coeffs: Vec<Complex64>) -> (KPoint, Band) {
        let band = Band {
            energy: 0.0,
            occupation: 1.0,
            coeffs,
        };
        (
            KPoint {
                k: Vector3D::origin(),
                spin: 0,
                gs,
                bands: vec![band.clone()],
            },
            band,
        )
    }

    #[test]
    fn test_momentum_grid() {
        let lattice = Lattice::cubic(2.0 * PI).unwrap();
        // |b| = 1, so the cutoff sphere has radius sqrt(encut / HBAR2_OVER_2M)
        let grid = momentum_grid(&lattice, HBAR2_OVER_2M * 1.01).unwrap();
        assert_eq!(grid.len(), 7);
        assert!(grid.contains(&[0, 0, 0]));
        assert!(grid.contains(&[0, -1, 0]));
        for g in &grid {
            assert!(grid.contains(&[-g[0], -g[1], -g[2]]));
        }
        let grid = momentum_grid(&lattice, HBAR2_OVER_2M * 2.01).unwrap();
        assert_eq!(grid.len(), 19);
        assert!(matches!(
            momentum_grid(&lattice, 0.0),
            Err(MomentumError::InvalidCutoff(_))
        ));
    }

    #[test]
    fn test_pseudo_momentum() {
        let gs = vec![[0, 0, 0], [1, 0, 0], [0, 1, 0]];
        let c = |re: f64, im: f64| Complex64::new(re, im);
        let (k1, b1) = kpoint(gs.clone(), vec![c(0.6, 0.0), c(0.0, 0.8), c(0.0, 0.0)]);
        let (k2, b2) = kpoint(gs, vec![c(0.0, 0.0), c(0.3, 0.4), c(1.0, 0.0)]);

        // G_P = 0: plain overlap
        let overlap = pseudo_momentum(&k1, &b1, &k2, &b2, [0, 0, 0]);
        assert!((overlap - c(0.32, -0.24)).norm() < 1e-14);
        // G_P = (1, 0, 0): C1(1,0,0)* C2(0,0,0)
        assert_eq!(pseudo_momentum(&k1, &b1, &k2, &b2, [1, 0, 0]), c(0.0, 0.0));
        // G_P = (1, -1, 0): C1(1,0,0)* C2(0,1,0)
        let shifted = pseudo_momentum(&k1, &b1, &k2, &b2, [1, -1, 0]);
        assert!((shifted - c(0.0, -0.8)).norm() < 1e-14);
        // norm of a state
        assert!((pseudo_momentum(&k1, &b1, &k1, &b1, [0, 0, 0]) - c(1.0, 0.0)).norm() < 1e-14);
    }
}
