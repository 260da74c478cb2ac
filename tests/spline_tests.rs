/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use paw_rs::utils::{real_spherical_harmonic, spherical_harmonic, CubicSpline, SplineBoundary};
use rstest::rstest;
use std::f64::consts::PI;

fn cubic(c: [f64; 4], x: f64) -> f64 {
    c[0] + x * (c[1] + x * (c[2] + x * c[3]))
}

fn cubic_second(c: [f64; 4], x: f64) -> f64 {
    2.0 * c[2] + 6.0 * c[3] * x
}

fn cubic_integral(c: [f64; 4], a: f64, b: f64) -> f64 {
    let anti = |x: f64| x * (c[0] + x * (c[1] / 2.0 + x * (c[2] / 3.0 + x * c[3] / 4.0)));
    anti(b) - anti(a)
}

#[rstest]
#[case::uniform((0..12).map(|i| 0.25 * i as f64).collect(), [1.0, -0.5, 0.25, 0.1])]
#[case::logarithmic((0..20).map(|i| 0.01 * 1.25f64.powi(i)).collect(), [-2.0, 0.3, -1.1, 0.4])]
#[case::irregular(vec![-1.0, -0.7, -0.1, 0.0, 0.35, 1.2, 1.25, 2.0], [0.0, 1.0, 0.0, -0.3])]
fn test_spline_reproduces_sampled_cubic(#[case] x: Vec<f64>, #[case] c: [f64; 4]) {
    let y: Vec<f64> = x.iter().map(|&r| cubic(c, r)).collect();
    let first = x[0];
    let last = x[x.len() - 1];
    let boundary = SplineBoundary::SecondDerivative(cubic_second(c, first), cubic_second(c, last));
    let spline = CubicSpline::with_boundary(x.clone(), y.clone(), boundary).unwrap();

    for (xi, yi) in x.iter().zip(&y) {
        assert_relative_eq!(spline.evaluate(*xi), *yi, epsilon = 1e-12);
    }
    for w in x.windows(2) {
        for t in [0.2, 0.5, 0.9] {
            let r = w[0] + t * (w[1] - w[0]);
            assert_relative_eq!(spline.evaluate(r), cubic(c, r), epsilon = 1e-10);
        }
    }
    assert_relative_eq!(
        spline.integral(),
        cubic_integral(c, first, last),
        max_relative = 1e-10,
        epsilon = 1e-12
    );
}

#[rstest]
fn test_complex_harmonic_conjugate_symmetry(
    #[values(0, 1, 2, 3, 4)] l: i32,
    #[values((0.3, 0.1), (1.2, 2.5), (2.9, 5.9), (PI / 2.0, PI))] angles: (f64, f64),
) {
    let (theta, phi) = angles;
    for m in -l..=l {
        let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
        let lhs = spherical_harmonic(l, m, theta, phi).unwrap().conj();
        let rhs = spherical_harmonic(l, -m, theta, phi).unwrap() * sign;
        assert_relative_eq!(lhs.re, rhs.re, epsilon = 1e-12);
        assert_relative_eq!(lhs.im, rhs.im, epsilon = 1e-12);
    }
}

#[test]
fn test_real_harmonics_are_orthonormal() {
    // Midpoint rule in cos(θ), uniform in φ
    let n_theta = 1000;
    let n_phi = 24;
    let weight = (2.0 / n_theta as f64) * (2.0 * PI / n_phi as f64);
    let lm: Vec<(i32, i32)> = (0..=3).flat_map(|l| (-l..=l).map(move |m| (l, m))).collect();

    let mut gram = vec![vec![0.0; lm.len()]; lm.len()];
    for i in 0..n_theta {
        let theta = (-1.0 + (i as f64 + 0.5) * 2.0 / n_theta as f64).acos();
        for j in 0..n_phi {
            let phi = j as f64 * 2.0 * PI / n_phi as f64;
            let values: Vec<f64> = lm
                .iter()
                .map(|&(l, m)| real_spherical_harmonic(l, m, theta, phi).unwrap())
                .collect();
            for a in 0..lm.len() {
                for b in 0..lm.len() {
                    gram[a][b] += weight * values[a] * values[b];
                }
            }
        }
    }

    for a in 0..lm.len() {
        for b in 0..lm.len() {
            let expected = if a == b { 1.0 } else { 0.0 };
            assert!(
                (gram[a][b] - expected).abs() < 1e-4,
                "<Y{:?}|Y{:?}> = {}",
                lm[a],
                lm[b],
                gram[a][b]
            );
        }
    }
}
