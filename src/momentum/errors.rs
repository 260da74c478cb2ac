/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for density transforms and momentum matrix assembly

use thiserror::Error;

/// Result type for momentum matrix operations
pub type Result<T> = std::result::Result<T, MomentumError>;

/// Errors raised while assembling momentum matrix elements
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MomentumError {
    /// A transform was requested beyond its sampled |G| range
    #[error("|Q| = {q} beyond the sampled transform range {qmax}")]
    TransformRange { q: f64, qmax: f64 },

    #[error("No density transform for species {species}, channels ({j1}, {j2})")]
    UnknownTransform { species: usize, j1: usize, j2: usize },

    #[error("Atom {atom} has species {species} with no potential in the transform cache")]
    UnknownSpecies { atom: usize, species: usize },

    /// One-center amplitudes do not match the atoms or their channels
    #[error("Projection shape mismatch: {0}")]
    ProjectionShape(String),

    #[error("Invalid plane-wave cutoff {0}")]
    InvalidCutoff(f64),

    #[error("Density transform needs at least 3 samples, got {0}")]
    TooFewSamples(usize),

    #[error("Utils error: {0}")]
    UtilsError(#[from] crate::utils::UtilsError),

    #[error("Rayleigh error: {0}")]
    RayleighError(#[from] crate::rayleigh::RayleighError),

    #[error("Wavefunction error: {0}")]
    WavefunctionError(#[from] crate::wavefunction::WavefunctionError),
}
