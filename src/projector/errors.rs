/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for projector site construction

use thiserror::Error;

/// Result type for projector site operations
pub type Result<T> = std::result::Result<T, ProjectorError>;

/// Errors raised while building per-atom projector grids
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectorError {
    /// An atom refers to a species with no loaded potential
    #[error("Atom {atom} refers to species {species}, but only {available} potentials are loaded")]
    UnknownSpecies {
        atom: usize,
        species: usize,
        available: usize,
    },

    #[error("Geometry error: {0}")]
    GeometryError(#[from] crate::geometry::GeometryError),

    #[error("Potential error: {0}")]
    PotentialError(#[from] crate::potential::PotentialError),

    #[error("Utils error: {0}")]
    UtilsError(#[from] crate::utils::UtilsError),
}
