/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the pseudo-wavefunction data model

use thiserror::Error;

/// Result type for wavefunction operations
pub type Result<T> = std::result::Result<T, WavefunctionError>;

/// Errors raised while assembling or indexing a pseudo-wavefunction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WavefunctionError {
    #[error("Expected {expected} k-points ({num_kpoints} x {num_spins} spins), found {found}")]
    KPointCount {
        expected: usize,
        found: usize,
        num_kpoints: usize,
        num_spins: usize,
    },

    #[error("k-point {kpoint} band {band}: {coeffs} coefficients for {waves} plane waves")]
    CoefficientCount {
        kpoint: usize,
        band: usize,
        coeffs: usize,
        waves: usize,
    },

    #[error("k-point {kpoint} is stored at spin slot {expected} but labelled spin {found}")]
    SpinMismatch {
        kpoint: usize,
        expected: usize,
        found: usize,
    },

    #[error("k-point {kpoint} in spin {spin} differs in k or plane-wave list from spin 0")]
    SpinBasisMismatch { kpoint: usize, spin: usize },

    #[error("No state at k-point {kpoint}, band {band}")]
    MissingState { kpoint: usize, band: usize },
}
