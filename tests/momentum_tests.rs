/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use num_complex::Complex64;
use paw_rs::geometry::{Lattice, Vector3D};
use paw_rs::momentum::{
    momentum_grid, momentum_matrix, momentum_matrix_element, one_center_momentum,
    pseudo_momentum, DensityTransformCache, MomentumError,
};
use paw_rs::potential::{linear_grid, logarithmic_grid, ChannelTables, Potential, PotentialTables};
use paw_rs::rayleigh::{band_projections, RayleighExpansions};
use paw_rs::wavefunction::{AtomSite, Band, KPoint, PseudoWavefunction, StateIndex};
use paw_rs::PawConfig;

fn potential(symbol: &str, ls: &[i32], width: f64) -> Potential {
    let wave_grid = logarithmic_grid(1e-4, 1.04, 330);
    let kwave_grid = logarithmic_grid(1e-3, 1.04, 250);
    let channels = ls
        .iter()
        .enumerate()
        .map(|(n, &l)| {
            let scale = width * (1.0 + 0.3 * n as f64);
            ChannelTables {
                l,
                projector: linear_grid(1.5, 60).iter().map(|r| (-r * r / scale).exp()).collect(),
                aewave: wave_grid
                    .iter()
                    .map(|r| r.powi(l + 1) * (-r / scale).exp())
                    .collect(),
                pswave: wave_grid
                    .iter()
                    .map(|r| r.powi(l + 1) * (-r * r / scale).exp())
                    .collect(),
                smooth_diffwave: vec![0.0; 60],
                kwave: kwave_grid
                    .iter()
                    .map(|k| k.powi(l) * (-k * k * scale / 4.0).exp())
                    .collect(),
            }
        })
        .collect();
    Potential::from_tables(&PotentialTables {
        symbol: symbol.to_string(),
        rmax: 1.5,
        wave_rmax: 1.5,
        wave_grid,
        kwave_grid,
        channels,
    })
    .unwrap()
}

fn lattice() -> Lattice {
    Lattice::new([
        Vector3D::new(4.0, 0.0, 0.0),
        Vector3D::new(0.3, 4.2, 0.0),
        Vector3D::new(0.0, 0.2, 3.8),
    ])
    .unwrap()
}

fn coefficients(gs: &[[i32; 3]], seed: f64) -> Vec<Complex64> {
    gs.iter()
        .enumerate()
        .map(|(w, g)| {
            let damp = (-0.3 * (g[0] * g[0] + g[1] * g[1] + g[2] * g[2]) as f64).exp();
            Complex64::new((1.3 * w as f64 + seed).sin(), (0.7 * w as f64 - seed).cos()) * damp
        })
        .collect()
}

fn wavefunction(num_spins: usize) -> PseudoWavefunction {
    let gs: Vec<[i32; 3]> = (-1..=1)
        .flat_map(|i| (-1..=1).flat_map(move |j| (-1..=1).map(move |k| [i, j, k])))
        .collect();
    let kvecs = [Vector3D::new(0.0, 0.0, 0.0), Vector3D::new(0.25, 0.0, 0.5)];
    let mut kpoints = Vec::new();
    for spin in 0..num_spins {
        for (n, k) in kvecs.iter().enumerate() {
            let bands = (0..2)
                .map(|b| Band {
                    energy: b as f64,
                    occupation: 1.0 - b as f64,
                    coeffs: coefficients(&gs, 0.4 * (n + 2 * b) as f64 + 0.1 * spin as f64),
                })
                .collect();
            kpoints.push(KPoint {
                k: *k,
                spin,
                gs: gs.clone(),
                bands,
            });
        }
    }
    PseudoWavefunction::new(lattice(), kvecs.len(), num_spins, kpoints).unwrap()
}

fn atoms() -> Vec<AtomSite> {
    vec![
        AtomSite::new(0, Vector3D::new(0.1, 0.2, 0.3)),
        AtomSite::new(1, Vector3D::new(0.6, 0.55, 0.4)),
    ]
}

fn config() -> PawConfig {
    PawConfig {
        encut: 40.0,
        transform_points: 120,
        ..PawConfig::default()
    }
}

#[test]
fn test_conjugate_symmetry() {
    let _ = env_logger::builder().is_test(true).try_init();
    let potentials = vec![potential("A", &[0, 1], 0.5), potential("B", &[0], 0.8)];
    let wf = wavefunction(1);
    let atoms = atoms();
    let expansions = RayleighExpansions::build(&wf, &potentials).unwrap();
    let cache = DensityTransformCache::from_config(&potentials, wf.lattice(), &config());

    let s1 = StateIndex::new(0, 0);
    let s2 = StateIndex::new(1, 1);
    let grid = momentum_grid(wf.lattice(), config().encut).unwrap();
    assert!(grid.len() > 10);

    let mut one_center_seen = false;
    for &g in &grid {
        let minus = [-g[0], -g[1], -g[2]];
        let m12 = momentum_matrix_element(&wf, &atoms, &expansions, &cache, s1, s2, g).unwrap();
        let m21 = momentum_matrix_element(&wf, &atoms, &expansions, &cache, s2, s1, minus).unwrap();
        assert!(
            (m12 - m21.conj()).norm() < 1e-10 * (1.0 + m12.norm()),
            "G = {:?}: {} vs {}",
            g,
            m12,
            m21.conj()
        );

        let (k1, b1) = wf.state(s1).unwrap();
        let (k2, b2) = wf.state(s2).unwrap();
        if (m12 - pseudo_momentum(k1, b1, k2, b2, g)).norm() > 1e-8 {
            one_center_seen = true;
        }
    }
    assert!(one_center_seen, "one-center correction never contributed");
}

#[test]
fn test_diagonal_element_is_real() {
    let potentials = vec![potential("A", &[0, 1], 0.5), potential("B", &[0], 0.8)];
    let wf = wavefunction(1);
    let expansions = RayleighExpansions::build(&wf, &potentials).unwrap();
    let cache = DensityTransformCache::from_config(&potentials, wf.lattice(), &config());
    let s = StateIndex::new(1, 0);
    let m = momentum_matrix_element(&wf, &atoms(), &expansions, &cache, s, s, [0, 0, 0]).unwrap();
    assert!(m.im.abs() < 1e-12 * (1.0 + m.re.abs()));
}

#[test]
fn test_matrix_matches_elements() {
    let potentials = vec![potential("A", &[0, 1], 0.5), potential("B", &[0], 0.8)];
    let wf = wavefunction(1);
    let atoms = atoms();
    let expansions = RayleighExpansions::build(&wf, &potentials).unwrap();
    let cache = DensityTransformCache::from_config(&potentials, wf.lattice(), &config());
    let s1 = StateIndex::new(0, 1);
    let s2 = StateIndex::new(1, 0);

    let matrix =
        momentum_matrix(&wf, &atoms, &expansions, &cache, s1, s2, config().encut).unwrap();
    assert_eq!(cache.filled(), cache.len());
    let grid = momentum_grid(wf.lattice(), config().encut).unwrap();
    assert_eq!(matrix.len(), grid.len());
    for ((g, value), expected_g) in matrix.iter().zip(&grid) {
        assert_eq!(g, expected_g);
        let single = momentum_matrix_element(&wf, &atoms, &expansions, &cache, s1, s2, *g).unwrap();
        assert!((value - single).norm() < 1e-12 * (1.0 + single.norm()));
    }
}

#[test]
fn test_spin_channels_do_not_couple() {
    let potentials = vec![potential("A", &[0, 1], 0.5), potential("B", &[0], 0.8)];
    let wf = wavefunction(2);
    let expansions = RayleighExpansions::build(&wf, &potentials).unwrap();
    let cache = DensityTransformCache::from_config(&potentials, wf.lattice(), &config());
    let up = StateIndex::new(wf.slot(0, 0), 0);
    let down = StateIndex::new(wf.slot(0, 1), 0);
    let m = momentum_matrix_element(&wf, &atoms(), &expansions, &cache, up, down, [0, 0, 0]).unwrap();
    assert_eq!(m, Complex64::new(0.0, 0.0));
    assert!(momentum_matrix_element(&wf, &atoms(), &expansions, &cache, up, up, [0, 0, 0])
        .unwrap()
        .norm()
        > 0.0);
}

#[test]
fn test_species_missing_from_cache() {
    let potentials = vec![potential("A", &[0, 1], 0.5), potential("B", &[0], 0.8)];
    let wf = wavefunction(1);
    let expansions = RayleighExpansions::build(&wf, &potentials).unwrap();
    let cache = DensityTransformCache::from_config(&potentials[..1], wf.lattice(), &config());
    let s = StateIndex::new(0, 0);
    assert_eq!(
        momentum_matrix_element(&wf, &atoms(), &expansions, &cache, s, s, [0, 0, 0]),
        Err(MomentumError::UnknownSpecies {
            atom: 1,
            species: 1
        })
    );
    assert!(matches!(
        momentum_matrix(&wf, &atoms(), &expansions, &cache, s, s, config().encut),
        Err(MomentumError::UnknownSpecies { atom: 1, .. })
    ));
}

#[test]
fn test_one_center_rejects_mismatched_amplitudes() {
    let potentials = vec![potential("A", &[0, 1], 0.5), potential("B", &[0], 0.8)];
    let wf = wavefunction(1);
    let atoms = atoms();
    let expansions = RayleighExpansions::build(&wf, &potentials).unwrap();
    let cache = DensityTransformCache::from_config(&potentials, wf.lattice(), &config());
    let (kpoint, band) = wf.state(StateIndex::new(0, 0)).unwrap();
    let proj = band_projections(kpoint, band, expansions.slot(0).unwrap(), &atoms).unwrap();
    let q = Vector3D::new(0.3, 0.0, 0.0);

    assert!(one_center_momentum(wf.lattice(), &atoms, &cache, &proj, &proj, &q, [0, 0, 0]).is_ok());

    let short = proj[..1].to_vec();
    assert!(matches!(
        one_center_momentum(wf.lattice(), &atoms, &cache, &proj, &short, &q, [0, 0, 0]),
        Err(MomentumError::ProjectionShape(_))
    ));

    let mut truncated = proj.clone();
    truncated[0][1].pop();
    assert!(matches!(
        one_center_momentum(wf.lattice(), &atoms, &cache, &truncated, &proj, &q, [0, 0, 0]),
        Err(MomentumError::ProjectionShape(_))
    ));
}
