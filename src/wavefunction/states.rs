/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Plane-wave pseudo-wavefunction
//!
//! The coefficients are produced by an external reader; this module only fixes
//! the layout the PAW core consumes. k-points are stored spin-major: the state
//! set of spin `s` at irreducible k-point `k` lives at index `k + nwk·s`.

use super::errors::{Result, WavefunctionError};
use crate::geometry::{Lattice, Vector3D};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One electronic band at one k-point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Band energy (eV)
    pub energy: f64,
    /// Occupation number
    pub occupation: f64,
    /// Plane-wave coefficients, one per entry of the k-point's G list
    pub coeffs: Vec<Complex64>,
}

/// Plane-wave basis and bands of one (k-point, spin) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KPoint {
    /// k in fractional reciprocal coordinates
    pub k: Vector3D,
    /// Spin index
    pub spin: usize,
    /// Integer reciprocal-lattice vectors of the plane waves
    pub gs: Vec<[i32; 3]>,
    /// Bands
    pub bands: Vec<Band>,
}

impl KPoint {
    /// Number of plane waves
    pub fn num_waves(&self) -> usize {
        self.gs.len()
    }

    /// Map from G vector to its plane-wave index
    pub fn g_lookup(&self) -> HashMap<[i32; 3], usize> {
        self.gs.iter().enumerate().map(|(w, g)| (*g, w)).collect()
    }
}

/// Identifies one state: global k-point slot (spin included) and band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateIndex {
    pub kpoint: usize,
    pub band: usize,
}

impl StateIndex {
    pub fn new(kpoint: usize, band: usize) -> Self {
        Self { kpoint, band }
    }
}

/// Atom of the structure: species index into the potential list and
/// fractional position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtomSite {
    pub species: usize,
    pub frac: Vector3D,
}

impl AtomSite {
    pub fn new(species: usize, frac: Vector3D) -> Self {
        Self { species, frac }
    }
}

/// Pseudo-wavefunction of a periodic structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PseudoWavefunction {
    lattice: Lattice,
    num_kpoints: usize,
    num_spins: usize,
    kpoints: Vec<KPoint>,
}

impl PseudoWavefunction {
    /// Assemble and validate a wavefunction
    ///
    /// # Arguments
    ///
    /// * `lattice` - Real-space cell
    /// * `num_kpoints` - Number of irreducible k-points per spin (nwk)
    /// * `num_spins` - 1 or 2
    /// * `kpoints` - `num_kpoints * num_spins` entries, spin-major
    pub fn new(
        lattice: Lattice,
        num_kpoints: usize,
        num_spins: usize,
        kpoints: Vec<KPoint>,
    ) -> Result<Self> {
        let expected = num_kpoints * num_spins;
        if kpoints.len() != expected {
            return Err(WavefunctionError::KPointCount {
                expected,
                found: kpoints.len(),
                num_kpoints,
                num_spins,
            });
        }
        for (index, kpoint) in kpoints.iter().enumerate() {
            let slot = index / num_kpoints;
            if kpoint.spin != slot {
                return Err(WavefunctionError::SpinMismatch {
                    kpoint: index,
                    expected: slot,
                    found: kpoint.spin,
                });
            }
            if let Some((band, b)) = kpoint
                .bands
                .iter()
                .enumerate()
                .find(|(_, b)| b.coeffs.len() != kpoint.gs.len())
            {
                return Err(WavefunctionError::CoefficientCount {
                    kpoint: index,
                    band,
                    coeffs: b.coeffs.len(),
                    waves: kpoint.gs.len(),
                });
            }
        }
        // Spin slots reuse the spin-0 k-point tables, so k and the ordered G list must agree
        for (index, kpoint) in kpoints.iter().enumerate().skip(num_kpoints) {
            let first = &kpoints[index % num_kpoints];
            if kpoint.k != first.k || kpoint.gs != first.gs {
                return Err(WavefunctionError::SpinBasisMismatch {
                    kpoint: index % num_kpoints,
                    spin: index / num_kpoints,
                });
            }
        }
        Ok(Self {
            lattice,
            num_kpoints,
            num_spins,
            kpoints,
        })
    }

    /// Real-space cell
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Irreducible k-points per spin (nwk)
    pub fn num_kpoints(&self) -> usize {
        self.num_kpoints
    }

    /// Number of spin channels
    pub fn num_spins(&self) -> usize {
        self.num_spins
    }

    /// All (k-point, spin) slots, spin-major
    pub fn kpoints(&self) -> &[KPoint] {
        &self.kpoints
    }

    /// Slot index of k-point `k` in spin channel `spin`
    pub fn slot(&self, k: usize, spin: usize) -> usize {
        k + self.num_kpoints * spin
    }

    /// Look up a state
    pub fn state(&self, index: StateIndex) -> Result<(&KPoint, &Band)> {
        let missing = WavefunctionError::MissingState {
            kpoint: index.kpoint,
            band: index.band,
        };
        let kpoint = self.kpoints.get(index.kpoint).ok_or(missing.clone())?;
        let band = kpoint.bands.get(index.band).ok_or(missing)?;
        Ok((kpoint, band))
    }

    /// True when `other` has the same k-points and ordered plane-wave lists,
    /// so k-point dependent tables can be shared between the two
    pub fn same_basis_layout(&self, other: &Self) -> bool {
        self.num_kpoints == other.num_kpoints
            && self.num_spins == other.num_spins
            && self
                .kpoints
                .iter()
                .zip(&other.kpoints)
                .all(|(a, b)| a.k == b.k && a.gs == b.gs)
    }
}
