/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Physical and numerical constants

/// ħ²/2mₑ in eV·Å²
pub const HBAR2_OVER_2M: f64 = 3.809_982_12;

/// Wavevector magnitude below which a direction is undefined
pub const K_ZERO_TOLERANCE: f64 = 1e-11;

/// Largest l for which closed-form spherical Bessel functions are provided
pub const MAX_BESSEL_L: i32 = 3;

/// Largest l for which spherical harmonics are evaluated
pub const MAX_HARMONIC_L: i32 = 4;

/// Convert a plane-wave kinetic cutoff in eV to a wavevector cutoff in 1/Å
pub fn encut_to_wavevector(encut: f64) -> f64 {
    (encut / HBAR2_OVER_2M).sqrt()
}
