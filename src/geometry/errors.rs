/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the geometry module

/// Error types for the geometry module
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Singular lattice: cell volume {0}")]
    SingularLattice(f64),

    #[error("Invalid grid dimensions: {0:?}")]
    InvalidGrid([usize; 3]),
}

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, GeometryError>;
