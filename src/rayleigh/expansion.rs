/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Plane-wave (Rayleigh) expansions of projector functions
//!
//! For a k-point with plane waves G_w and a projector channel of angular
//! momentum l, the table `terms[w, l+m] = Y*_lm(p̂_w) · P(|p_w|)` with
//! `p_w = k + G_w` lets the one-center amplitude of any band at that k-point
//! be evaluated as a single sum over plane waves:
//!
//! `a_lm = 4π i^l Σ_w e^{2πi G_w·τ} C_w terms[w, l+m]`.
//!
//! Spin channels share a k-point's plane waves, so expansions are built once
//! per irreducible k-point and shared through `Arc` with the other spin.

use super::errors::{RayleighError, Result};
use crate::geometry::{Lattice, Vector3D};
use crate::potential::{PartialWaveChannel, Potential};
use crate::utils::alloc::try_with_capacity;
use crate::utils::constants::K_ZERO_TOLERANCE;
use crate::utils::math::{i_pow, spherical_harmonic};
use crate::wavefunction::{AtomSite, Band, KPoint, PseudoWavefunction};
use log::{debug, trace};
use ndarray::Array2;
use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::{PI, TAU};
use std::sync::Arc;

/// Expansion table of one projector channel at one k-point
#[derive(Debug, Clone, PartialEq)]
pub struct RayleighExpansion {
    l: i32,
    terms: Array2<Complex64>,
}

impl RayleighExpansion {
    /// Angular momentum of the channel
    pub fn l(&self) -> i32 {
        self.l
    }

    /// Coefficient table, shape (plane waves, 2l+1)
    pub fn terms(&self) -> &Array2<Complex64> {
        &self.terms
    }

    /// Number of plane waves the table covers
    pub fn num_waves(&self) -> usize {
        self.terms.nrows()
    }
}

/// Build the expansion table of `channel` over the plane waves of `kpoint`
pub fn rayleigh_terms(
    channel: &PartialWaveChannel,
    kpoint: &KPoint,
    lattice: &Lattice,
) -> Result<RayleighExpansion> {
    let l = channel.l();
    let width = (2 * l + 1) as usize;
    let waves = kpoint.num_waves();
    let mut data = try_with_capacity("rayleigh terms", waves.saturating_mul(width))?;
    for g in &kpoint.gs {
        let p = lattice.reciprocal_to_cartesian(&(kpoint.k + Vector3D::from_indices(*g)));
        let magnitude = p.length();
        let radial = channel.kwave.evaluate(magnitude)?;
        // Direction of a vanishing k + G is taken along the polar axis
        let (theta, phi) = if magnitude < K_ZERO_TOLERANCE {
            (0.0, 0.0)
        } else {
            p.direction()
        };
        for m in -l..=l {
            data.push(spherical_harmonic(l, m, theta, phi)?.conj() * radial);
        }
    }
    let terms = Array2::from_shape_vec((waves, width), data)
        .map_err(|e| RayleighError::Shape(e.to_string()))?;
    Ok(RayleighExpansion { l, terms })
}

/// Expansions of every species' channels at one k-point, `[species][channel]`
#[derive(Debug, Clone, PartialEq)]
pub struct KPointExpansion {
    species: Vec<Vec<RayleighExpansion>>,
}

impl KPointExpansion {
    /// Build the expansions of all species at one k-point
    pub fn build(kpoint: &KPoint, lattice: &Lattice, potentials: &[Potential]) -> Result<Self> {
        let mut species = try_with_capacity("rayleigh species tables", potentials.len())?;
        for potential in potentials {
            let mut channels = try_with_capacity("rayleigh channel tables", potential.num_channels())?;
            for channel in potential.channels() {
                channels.push(rayleigh_terms(channel, kpoint, lattice)?);
            }
            species.push(channels);
        }
        Ok(Self { species })
    }

    /// Expansion of `channel` of `species`
    pub fn channel(&self, species: usize, channel: usize) -> Result<&RayleighExpansion> {
        self.species
            .get(species)
            .and_then(|s| s.get(channel))
            .ok_or(RayleighError::MissingChannel { species, channel })
    }

    /// Expansions of every channel of `species`
    pub fn species(&self, species: usize) -> Option<&[RayleighExpansion]> {
        self.species.get(species).map(|s| s.as_slice())
    }
}

/// Expansions of every (k-point, spin) slot of a wavefunction
#[derive(Debug, Clone)]
pub struct RayleighExpansions {
    num_kpoints: usize,
    slots: Vec<Arc<KPointExpansion>>,
}

impl RayleighExpansions {
    /// Build the expansions for all irreducible k-points in parallel
    ///
    /// Only the first spin channel is computed; the other spin's slots share
    /// the same tables.
    pub fn build(wavefunction: &PseudoWavefunction, potentials: &[Potential]) -> Result<Self> {
        let nwk = wavefunction.num_kpoints();
        let lattice = wavefunction.lattice();
        let unique = wavefunction.kpoints()[..nwk]
            .par_iter()
            .enumerate()
            .map(|(index, kpoint)| {
                trace!("Rayleigh expansion for k-point {} ({} waves)", index, kpoint.num_waves());
                KPointExpansion::build(kpoint, lattice, potentials).map(Arc::new)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut slots = try_with_capacity("rayleigh k-point slots", nwk * wavefunction.num_spins())?;
        for _ in 0..wavefunction.num_spins() {
            slots.extend(unique.iter().cloned());
        }
        debug!(
            "Built Rayleigh expansions for {} k-points x {} spins, {} species",
            nwk,
            wavefunction.num_spins(),
            potentials.len()
        );
        Ok(Self {
            num_kpoints: nwk,
            slots,
        })
    }

    /// Share these expansions with a wavefunction of identical layout
    pub fn replicate_for(
        &self,
        source: &PseudoWavefunction,
        target: &PseudoWavefunction,
    ) -> Result<Self> {
        if !source.same_basis_layout(target) || source.kpoints().len() != self.slots.len() {
            return Err(RayleighError::LayoutMismatch);
        }
        Ok(self.clone())
    }

    /// Irreducible k-points per spin
    pub fn num_kpoints(&self) -> usize {
        self.num_kpoints
    }

    /// Number of (k-point, spin) slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the wavefunction had no k-points
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Expansions at a (k-point, spin) slot
    pub fn slot(&self, slot: usize) -> Result<&KPointExpansion> {
        self.slots
            .get(slot)
            .map(|e| e.as_ref())
            .ok_or(RayleighError::MissingKPoint(slot))
    }

    /// True when two slots share the same tables
    pub fn shares_tables(&self, a: usize, b: usize) -> bool {
        match (self.slots.get(a), self.slots.get(b)) {
            (Some(x), Some(y)) => Arc::ptr_eq(x, y),
            _ => false,
        }
    }
}

/// One-center amplitude of a band for every m of one channel
///
/// # Arguments
///
/// * `coeffs` - Plane-wave coefficients of the band
/// * `gs` - Plane-wave G vectors matching `coeffs`
/// * `expansion` - Expansion table of the channel at the band's k-point
/// * `frac` - Fractional position τ of the atom
///
/// # Returns
///
/// `4π i^l Σ_w e^{2πi G_w·τ} C_w terms[w, l+m]` for m = −l..=l
pub fn rayleigh_amplitude(
    coeffs: &[Complex64],
    gs: &[[i32; 3]],
    expansion: &RayleighExpansion,
    frac: &Vector3D,
) -> Result<Vec<Complex64>> {
    let waves = expansion.num_waves();
    if coeffs.len() != waves || gs.len() != waves {
        return Err(RayleighError::CoefficientCount {
            coeffs: coeffs.len(),
            waves,
        });
    }
    let l = expansion.l();
    let mut amplitude = vec![Complex64::new(0.0, 0.0); (2 * l + 1) as usize];
    for (w, (c, g)) in coeffs.iter().zip(gs).enumerate() {
        let phase = Complex64::new(0.0, TAU * Vector3D::from_indices(*g).dot(frac)).exp();
        let weight = phase * c;
        for (a, t) in amplitude.iter_mut().zip(expansion.terms().row(w)) {
            *a += weight * t;
        }
    }
    let prefactor = i_pow(l) * (4.0 * PI);
    Ok(amplitude.into_iter().map(|a| a * prefactor).collect())
}

/// One-center amplitudes of a band at every atom, `[atom][channel][l+m]`
pub fn band_projections(
    kpoint: &KPoint,
    band: &Band,
    expansion: &KPointExpansion,
    atoms: &[AtomSite],
) -> Result<Vec<Vec<Vec<Complex64>>>> {
    atoms
        .iter()
        .map(|atom| -> Result<Vec<Vec<Complex64>>> {
            let channels = expansion.species(atom.species).ok_or(RayleighError::MissingChannel {
                species: atom.species,
                channel: 0,
            })?;
            channels
                .iter()
                .map(|e| rayleigh_amplitude(&band.coeffs, &kpoint.gs, e, &atom.frac))
                .collect()
        })
        .collect()
}
