/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for Rayleigh expansions

use thiserror::Error;

/// Result type for Rayleigh expansion operations
pub type Result<T> = std::result::Result<T, RayleighError>;

/// Errors raised while building or using Rayleigh expansions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RayleighError {
    /// Replication target does not share the plane-wave layout
    #[error("Wavefunction layout differs, expansions cannot be shared")]
    LayoutMismatch,

    #[error("No expansion for k-point slot {0}")]
    MissingKPoint(usize),

    #[error("No expansion for species {species}, channel {channel}")]
    MissingChannel { species: usize, channel: usize },

    #[error("{coeffs} coefficients for an expansion over {waves} plane waves")]
    CoefficientCount { coeffs: usize, waves: usize },

    #[error("Expansion table shape: {0}")]
    Shape(String),

    #[error("Potential error: {0}")]
    PotentialError(#[from] crate::potential::PotentialError),

    #[error("Wavefunction error: {0}")]
    WavefunctionError(#[from] crate::wavefunction::WavefunctionError),

    #[error("Utils error: {0}")]
    UtilsError(#[from] crate::utils::UtilsError),
}
