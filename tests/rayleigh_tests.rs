/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use num_complex::Complex64;
use paw_rs::geometry::{Lattice, Vector3D};
use paw_rs::potential::{linear_grid, logarithmic_grid, ChannelTables, Potential, PotentialTables};
use paw_rs::rayleigh::{rayleigh_amplitude, rayleigh_terms, RayleighExpansions};
use paw_rs::wavefunction::{Band, KPoint, PseudoWavefunction};
use rstest::rstest;
use std::f64::consts::PI;

/// Gaussian projector p(r) = exp(-α r²)
const ALPHA: f64 = 4.0;

/// ∫ p(r) j_0(qr) r² dr = √π / (4 α^{3/2}) · exp(-q² / 4α)
fn gaussian_transform(q: f64) -> f64 {
    PI.sqrt() / (4.0 * ALPHA.powf(1.5)) * (-q * q / (4.0 * ALPHA)).exp()
}

fn gaussian_potential() -> Potential {
    let wave_grid = logarithmic_grid(1e-3, 1.05, 150);
    let kwave_grid = logarithmic_grid(1e-3, 1.03, 300);
    Potential::from_tables(&PotentialTables {
        symbol: "G".to_string(),
        rmax: 2.0,
        wave_rmax: 2.0,
        wave_grid: wave_grid.clone(),
        kwave_grid: kwave_grid.clone(),
        channels: vec![ChannelTables {
            l: 0,
            projector: linear_grid(2.0, 100)
                .iter()
                .map(|r| (-ALPHA * r * r).exp())
                .collect(),
            aewave: wave_grid.iter().map(|r| r * (-r).exp()).collect(),
            pswave: wave_grid.iter().map(|r| r * (-r).exp()).collect(),
            smooth_diffwave: vec![0.0; 100],
            kwave: kwave_grid.iter().map(|&k| gaussian_transform(k)).collect(),
        }],
    })
    .unwrap()
}

fn plane_waves() -> (Vec<[i32; 3]>, Vec<Complex64>) {
    let gs = vec![[0, 0, 0], [1, 0, 0], [-1, 0, 0], [0, 1, 1], [0, 0, -2], [1, -1, 0]];
    let coeffs = vec![
        Complex64::new(0.7, 0.0),
        Complex64::new(0.2, -0.1),
        Complex64::new(0.2, 0.1),
        Complex64::new(-0.1, 0.3),
        Complex64::new(0.05, 0.05),
        Complex64::new(0.0, -0.25),
    ];
    (gs, coeffs)
}

/// ∫ p(|s|) Y_00 ψ(τ + s) d³s on a Cartesian grid, ψ = Σ C_G exp(iG·r)
fn direct_amplitude(lattice: &Lattice, frac: &Vector3D) -> Complex64 {
    let (gs, coeffs) = plane_waves();
    let tau = lattice.frac_to_cartesian(frac);
    let carts: Vec<Vector3D> = gs
        .iter()
        .map(|g| lattice.reciprocal_to_cartesian(&Vector3D::from_indices(*g)))
        .collect();
    let y00 = 0.5 / PI.sqrt();
    let h = 0.04;
    let n = 36;
    let mut total = Complex64::new(0.0, 0.0);
    for i in -n..=n {
        for j in -n..=n {
            for k in -n..=n {
                let s = Vector3D::new(i as f64 * h, j as f64 * h, k as f64 * h);
                let p = (-ALPHA * s.dot(&s)).exp();
                if p < 1e-14 {
                    continue;
                }
                let r = tau + s;
                let psi: Complex64 = carts
                    .iter()
                    .zip(&coeffs)
                    .map(|(g, c)| c * Complex64::new(0.0, g.dot(&r)).exp())
                    .sum();
                total += psi * p;
            }
        }
    }
    total * y00 * h * h * h
}

#[rstest]
#[case::origin(Vector3D::new(0.0, 0.0, 0.0))]
#[case::general(Vector3D::new(0.13, 0.71, 0.42))]
fn test_s_amplitude_matches_real_space_integral(#[case] frac: Vector3D) {
    let lattice = Lattice::cubic(4.0).unwrap();
    let pot = gaussian_potential();
    let (gs, coeffs) = plane_waves();
    let kpoint = KPoint {
        k: Vector3D::origin(),
        spin: 0,
        gs: gs.clone(),
        bands: vec![],
    };
    let expansion = rayleigh_terms(&pot.channels()[0], &kpoint, &lattice).unwrap();
    let amplitude = rayleigh_amplitude(&coeffs, &gs, &expansion, &frac).unwrap();
    assert_eq!(amplitude.len(), 1);

    let direct = direct_amplitude(&lattice, &frac);
    let tolerance = 0.01 * direct.norm();
    assert!(
        (amplitude[0] - direct).norm() < tolerance,
        "expansion {} vs real space {}",
        amplitude[0],
        direct
    );
}

#[test]
fn test_expansions_for_every_slot() {
    let _ = env_logger::builder().is_test(true).try_init();
    let lattice = Lattice::cubic(4.0).unwrap();
    let pot = gaussian_potential();
    let (gs, coeffs) = plane_waves();
    let kpoints = (0..2)
        .flat_map(|spin| {
            let gs = gs.clone();
            let coeffs = coeffs.clone();
            [0.0, 0.5].into_iter().map(move |kx| KPoint {
                k: Vector3D::new(kx, 0.0, 0.0),
                spin,
                gs: gs.clone(),
                bands: vec![Band {
                    energy: -2.0,
                    occupation: 1.0,
                    coeffs: coeffs.clone(),
                }],
            })
        })
        .collect();
    let wf = PseudoWavefunction::new(lattice, 2, 2, kpoints).unwrap();
    let expansions = RayleighExpansions::build(&wf, std::slice::from_ref(&pot)).unwrap();
    assert_eq!(expansions.len(), 4);
    assert!(expansions.shares_tables(1, 3));

    // k = (0.5, 0, 0), G = (-1, 0, 0): |k + G| = π/4
    let table = expansions.slot(3).unwrap().channel(0, 0).unwrap();
    let expected = gaussian_transform(PI / 4.0) * 0.5 / PI.sqrt();
    assert_relative_eq!(table.terms()[[2, 0]].re, expected, max_relative = 1e-4);
}
