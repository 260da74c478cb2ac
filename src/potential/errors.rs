/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for pseudopotential tables and radial interpolation

use thiserror::Error;

/// Result type for potential operations
pub type Result<T> = std::result::Result<T, PotentialError>;

/// Error type for potential-related operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PotentialError {
    /// A tabulated function or grid is malformed
    #[error("Invalid table {table}: {reason}")]
    InvalidTable { table: String, reason: String },

    /// Projector-policy interpolation requested beyond the tabulated range
    #[error("Radius {r} outside the tabulated range [0, {limit}]")]
    OutOfRangeRadius { r: f64, limit: f64 },

    /// Propagation of error from utils module
    #[error("Utils error: {0}")]
    UtilsError(#[from] crate::utils::errors::UtilsError),
}

impl PotentialError {
    pub(crate) fn invalid(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTable {
            table: table.into(),
            reason: reason.into(),
        }
    }
}
