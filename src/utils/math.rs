/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Mathematical utility functions for PAW reconstruction
//!
//! This module provides the special functions used by the projector and
//! momentum code: factorials, associated Legendre polynomials, real and
//! complex spherical harmonics, closed-form spherical Bessel functions and
//! Gaunt integrals.

use super::constants::{MAX_BESSEL_L, MAX_HARMONIC_L};
use super::errors::{Result, UtilsError};
use num_complex::Complex64;
use std::f64::consts::{PI, SQRT_2};

/// Factorial of n as a floating point number
///
/// # Arguments
///
/// * `n` - The non-negative integer for which to calculate the factorial
///
/// # Returns
///
/// n! (`1.0` for `n == 0`)
pub fn fac(n: u32) -> f64 {
    (2..=n).fold(1.0, |acc, i| acc * i as f64)
}

/// Double factorial n!! as a floating point number
pub fn double_fac(n: u32) -> f64 {
    let mut result = 1.0;
    let mut i = n;
    while i > 1 {
        result *= i as f64;
        i -= 2;
    }
    result
}

/// Associated Legendre polynomial P_l^m(x), Condon-Shortley phase included
///
/// Evaluated from the closed-form factorial sum obtained by differentiating
/// the Rodrigues formula, which is exact for the small l used here.
///
/// # Arguments
///
/// * `l` - The degree of the polynomial (l ≥ 0)
/// * `m` - The order of the polynomial (|m| ≤ l)
/// * `x` - The input value (-1 ≤ x ≤ 1)
///
/// # Returns
///
/// The value of P_l^m(x) or an error if parameters are invalid
pub fn associated_legendre(l: i32, m: i32, x: f64) -> Result<f64> {
    if l < 0 || m.abs() > l {
        return Err(UtilsError::InvalidQuantumNumbers { l, m });
    }

    // P_l^(-m) = (-1)^m (l-m)!/(l+m)! P_l^m
    if m < 0 {
        let abs_m = -m;
        let sign = if abs_m % 2 == 0 { 1.0 } else { -1.0 };
        let ratio = fac((l - abs_m) as u32) / fac((l + abs_m) as u32);
        return Ok(sign * ratio * associated_legendre(l, abs_m, x)?);
    }

    let x = x.clamp(-1.0, 1.0);
    let mut total = 0.0;
    let mut n = l;
    while n >= 0 && 2 * n - l - m >= 0 {
        let power = 2 * n - l - m;
        let sign = if (l - n) % 2 == 0 { 1.0 } else { -1.0 };
        total += sign * x.powi(power) * fac((2 * n) as u32)
            / fac(power as u32)
            / fac(n as u32)
            / fac((l - n) as u32);
        n -= 1;
    }

    let phase = if m % 2 == 0 { 1.0 } else { -1.0 };
    Ok(phase * total * (1.0 - x * x).powf(m as f64 / 2.0) / 2f64.powi(l))
}

/// Normalization sqrt((2l+1)/4π · (l-m)!/(l+m)!)
fn harmonic_norm(l: i32, m: i32) -> f64 {
    ((2 * l + 1) as f64 / (4.0 * PI) * fac((l - m) as u32) / fac((l + m) as u32)).sqrt()
}

fn check_harmonic(l: i32, m: i32) -> Result<()> {
    if l > MAX_HARMONIC_L {
        return Err(UtilsError::UnsupportedAngularMomentum {
            l,
            max: MAX_HARMONIC_L,
        });
    }
    if l < 0 || m.abs() > l {
        return Err(UtilsError::InvalidQuantumNumbers { l, m });
    }
    Ok(())
}

/// Complex spherical harmonic Y_l^m(θ, φ)
///
/// Standard convention with the Condon-Shortley phase, so that
/// Y_l^m* = (-1)^m Y_l^-m.
///
/// # Arguments
///
/// * `l` - The degree (0 ≤ l ≤ 4)
/// * `m` - The order (-l ≤ m ≤ l)
/// * `theta` - The polar angle in radians (0 ≤ θ ≤ π)
/// * `phi` - The azimuthal angle in radians (0 ≤ φ < 2π)
pub fn spherical_harmonic(l: i32, m: i32, theta: f64, phi: f64) -> Result<Complex64> {
    check_harmonic(l, m)?;
    let p_lm = associated_legendre(l, m, theta.cos())?;
    let exp_imp = Complex64::new(0.0, m as f64 * phi).exp();
    Ok(harmonic_norm(l, m) * p_lm * exp_imp)
}

/// Real spherical harmonic
///
/// m < 0 carries √2·cos(|m|φ), m > 0 carries √2·sin(mφ) and m = 0 is the bare
/// normalized polynomial. The set is orthonormal over the sphere.
pub fn real_spherical_harmonic(l: i32, m: i32, theta: f64, phi: f64) -> Result<f64> {
    check_harmonic(l, m)?;
    let abs_m = m.abs();
    let polar = harmonic_norm(l, abs_m) * associated_legendre(l, abs_m, theta.cos())?;
    let azimuthal = match m {
        0 => 1.0,
        m if m < 0 => SQRT_2 * (abs_m as f64 * phi).cos(),
        _ => SQRT_2 * (abs_m as f64 * phi).sin(),
    };
    Ok(polar * azimuthal)
}

/// Spherical Bessel function of the first kind j_l(x) for l = 0..=3
///
/// Closed forms are used away from the origin; below x = 1 the ascending
/// series is summed instead, since the closed forms cancel catastrophically
/// there.
///
/// # Returns
///
/// The value of j_l(x), or `UnsupportedAngularMomentum` for l > 3
pub fn spherical_bessel_j(l: i32, x: f64) -> Result<f64> {
    if !(0..=MAX_BESSEL_L).contains(&l) {
        return Err(UtilsError::UnsupportedAngularMomentum {
            l,
            max: MAX_BESSEL_L,
        });
    }

    if x.abs() < 1.0 {
        return Ok(spherical_bessel_j_series(l, x));
    }

    let (s, c) = x.sin_cos();
    let value = match l {
        0 => s / x,
        1 => s / (x * x) - c / x,
        2 => (3.0 / (x * x) - 1.0) * s / x - 3.0 * c / (x * x),
        _ => (15.0 / (x * x * x) - 6.0 / x) * s / x - (15.0 / (x * x) - 1.0) * c / x,
    };
    Ok(value)
}

/// Ascending series x^l/(2l+1)!! Σ (-x²/2)^k / (k! (2l+3)(2l+5)...(2l+2k+1))
fn spherical_bessel_j_series(l: i32, x: f64) -> f64 {
    let x2 = x * x;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..30 {
        term *= -x2 / (2.0 * k as f64 * (2 * l + 2 * k + 1) as f64);
        sum += term;
        if term.abs() < 1e-17 * sum.abs() {
            break;
        }
    }
    x.powi(l) / double_fac((2 * l + 1) as u32) * sum
}

/// Check the triangle inequality condition for angular momentum addition
fn triangle_condition(l1: i32, l2: i32, l3: i32) -> bool {
    l1 + l2 >= l3 && l1 + l3 >= l2 && l2 + l3 >= l1
}

/// Wigner 3j symbol via the Racah formula
pub fn wigner_3j(j1: i32, j2: i32, j3: i32, m1: i32, m2: i32, m3: i32) -> f64 {
    if m1 + m2 + m3 != 0
        || !triangle_condition(j1, j2, j3)
        || m1.abs() > j1
        || m2.abs() > j2
        || m3.abs() > j3
    {
        return 0.0;
    }

    let f = |n: i32| fac(n as u32);

    let triangle = (f(j1 + j2 - j3) * f(j1 - j2 + j3) * f(-j1 + j2 + j3) / f(j1 + j2 + j3 + 1)).sqrt();
    let norm = (f(j1 + m1) * f(j1 - m1) * f(j2 + m2) * f(j2 - m2) * f(j3 + m3) * f(j3 - m3)).sqrt();

    let k_min = 0.max(j2 - j3 - m1).max(j1 - j3 + m2);
    let k_max = (j1 + j2 - j3).min(j1 - m1).min(j2 + m2);

    let mut sum = 0.0;
    for k in k_min..=k_max {
        let denom = f(k)
            * f(j1 + j2 - j3 - k)
            * f(j1 - m1 - k)
            * f(j2 + m2 - k)
            * f(j3 - j2 + m1 + k)
            * f(j3 - j1 - m2 + k);
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        sum += sign / denom;
    }

    let phase = if (j1 - j2 - m3).rem_euclid(2) == 0 { 1.0 } else { -1.0 };
    phase * triangle * norm * sum
}

/// Gaunt integral ∫ Y*_{l1 m1} Y_{l m} Y_{l2 m2} dΩ over complex harmonics
///
/// Zero unless m1 = m + m2, l1 + l + l2 is even and the triangle rule holds.
pub fn gaunt(l1: i32, m1: i32, l: i32, m: i32, l2: i32, m2: i32) -> f64 {
    if m1 != m + m2 || (l1 + l + l2) % 2 != 0 || !triangle_condition(l1, l, l2) {
        return 0.0;
    }
    let norm = ((2 * l1 + 1) * (2 * l + 1) * (2 * l2 + 1)) as f64 / (4.0 * PI);
    let phase = if m1.rem_euclid(2) == 0 { 1.0 } else { -1.0 };
    phase * norm.sqrt() * wigner_3j(l1, l, l2, 0, 0, 0) * wigner_3j(l1, l, l2, -m1, m, m2)
}

/// i^l
pub fn i_pow(l: i32) -> Complex64 {
    match l.rem_euclid(4) {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, 1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, -1.0),
    }
}
