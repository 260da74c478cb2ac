/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the utils module

use thiserror::Error;

/// Errors that can occur in the utils module
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    /// A table could not be allocated
    #[error("Allocation failed for {table} ({size} elements)")]
    AllocationFailure { table: &'static str, size: usize },

    /// Angular momentum outside the closed-form range
    #[error("Unsupported angular momentum l={l} (maximum {max})")]
    UnsupportedAngularMomentum { l: i32, max: i32 },

    /// Invalid (l, m) pair
    #[error("Invalid quantum numbers: l={l}, m={m}")]
    InvalidQuantumNumbers { l: i32, m: i32 },

    /// Not enough points to build an interpolant
    #[error("Spline requires at least {needed} points, got {found}")]
    InsufficientPoints { needed: usize, found: usize },

    /// Abscissas and ordinates differ in length
    #[error("Length mismatch: {x} abscissas, {y} ordinates")]
    LengthMismatch { x: usize, y: usize },

    /// Abscissas are not strictly increasing
    #[error("Grid is not strictly increasing at index {0}")]
    NonMonotonicGrid(usize),
}

/// A specialized Result type for utils operations
pub type Result<T> = std::result::Result<T, UtilsError>;
