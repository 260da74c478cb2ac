/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Fallible allocation of large tables

use super::errors::{Result, UtilsError};

/// Allocate a vector of `size` copies of `value`, reporting failure as an error
/// naming the table instead of aborting.
pub fn try_filled<T: Clone>(table: &'static str, size: usize, value: T) -> Result<Vec<T>> {
    let mut buffer = try_with_capacity(table, size)?;
    buffer.resize(size, value);
    Ok(buffer)
}

/// Allocate an empty vector able to hold `size` elements.
pub fn try_with_capacity<T>(table: &'static str, size: usize) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(size)
        .map_err(|_| UtilsError::AllocationFailure { table, size })?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_filled() {
        let v = try_filled("test table", 5, 1.5).unwrap();
        assert_eq!(v, vec![1.5; 5]);
    }

    #[test]
    fn test_absurd_allocation_is_reported() {
        let err = try_with_capacity::<u64>("huge table", usize::MAX / 2).unwrap_err();
        assert_eq!(
            err,
            UtilsError::AllocationFailure {
                table: "huge table",
                size: usize::MAX / 2
            }
        );
    }
}
