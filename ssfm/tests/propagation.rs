use std::io;
use approx::assert_abs_diff_eq;
use ndarray as nd;
use num_complex::Complex64 as C64;
use ssfm::{
    energy::{ energies, norms },
    export::Export,
    grid::Grid,
    nonlinear::{ DisorderGain, Linear, PowerLaw },
    operators::{ OperatorSet, TimeMode },
    timedep::{ split_step, Propagator },
    utils::wf_norm,
};

#[derive(Default)]
struct Recorder {
    steps: Vec<usize>,
    totals: Vec<f64>,
}

impl Export for Recorder {
    fn emit(
        &mut self,
        step: usize,
        x: &nd::Array1<f64>,
        density: &nd::Array1<f64>,
        v: &nd::Array1<f64>,
    ) -> io::Result<()>
    {
        assert_eq!(x.len(), density.len());
        assert_eq!(x.len(), v.len());
        self.steps.push(step);
        self.totals.push(density.sum() * (x[1] - x[0]));
        Ok(())
    }
}

struct Broken {
    calls: usize,
}

impl Export for Broken {
    fn emit(
        &mut self,
        _step: usize,
        _x: &nd::Array1<f64>,
        _density: &nd::Array1<f64>,
        _v: &nd::Array1<f64>,
    ) -> io::Result<()>
    {
        self.calls += 1;
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }
}

#[test]
fn reference_scenario() {
    let grid = Grid::new(5.0, 4096, 0.05, 100, TimeMode::Real).unwrap();
    let ops = OperatorSet::harmonic(&grid, 0.0, -1.0);
    let q = split_step(&grid, &ops, Linear).unwrap();
    assert_eq!(q.dim(), (100, 4096));
    let first = wf_norm(&q.row(0), grid.dx());
    let last = wf_norm(&q.row(99), grid.dx());
    assert_abs_diff_eq!(first, last, epsilon = 1e-6);
    // the unnormalized packet carries √π
    assert_abs_diff_eq!(first, std::f64::consts::PI.sqrt(), epsilon = 1e-6);
}

#[test]
fn real_time_conserves_norm() {
    for (voffset, harmonic) in [(0.0, true), (0.0, false), (1.0, true)] {
        let grid = Grid::new(10.0, 512, 0.01, 400, TimeMode::Real).unwrap();
        let ops
            = if harmonic {
                OperatorSet::harmonic(&grid, voffset, -1.0)
            } else {
                OperatorSet::new(
                    &grid,
                    |_| 0.0,
                    |x| C64::from((-(x + 1.0).powi(2) / 2.0).exp()) * C64::cis(2.0 * x),
                )
            };
        let n0 = wf_norm(&ops.field, grid.dx());
        let q = split_step(&grid, &ops, Linear).unwrap();
        norms(&grid, &q).iter()
            .for_each(|n| { assert!(((n - n0) / n0).abs() < 1e-9); });
    }
}

#[test]
fn real_time_nonlinear_conserves_norm() {
    // the nonlinear factor is a pure phase in real time
    let grid = Grid::new(20.0, 512, 0.005, 200, TimeMode::Real).unwrap();
    let ops = OperatorSet::new(&grid, |_| 0.0, |x| C64::from(1.0 / x.cosh()));
    let n0 = wf_norm(&ops.field, grid.dx());
    let law = PowerLaw { p: 1.0, q: 3.0, alpha: 0.1 };
    let q = split_step(&grid, &ops, law).unwrap();
    norms(&grid, &q).iter()
        .for_each(|n| { assert!(((n - n0) / n0).abs() < 1e-9); });
}

#[test]
fn real_time_disorder_gain_conserves_norm() {
    // real W: the modulated gain only ever rotates the phase in real time
    let grid = Grid::new(10.0, 512, 0.01, 400, TimeMode::Real).unwrap();
    let ops = OperatorSet::harmonic(&grid, 0.0, -1.0);
    let n0 = wf_norm(&ops.field, grid.dx());
    let law = DisorderGain::new(&grid, 0.8, 1.0, 0.3, 0.5, 4.0, 11);
    let q = split_step(&grid, &ops, law).unwrap();
    norms(&grid, &q).iter()
        .for_each(|n| { assert!(((n - n0) / n0).abs() < 1e-9); });
}

#[test]
fn disorder_gain_modulation_changes_trajectory() {
    let grid = Grid::new(10.0, 256, 0.01, 50, TimeMode::Real).unwrap();
    let ops = OperatorSet::harmonic(&grid, 0.0, -1.0);
    let run = |epsilon: f64| -> nd::Array2<C64> {
        let law = DisorderGain::new(&grid, 1.0, 0.5, 0.2, epsilon, 5.0, 21);
        split_step(&grid, &ops, law).unwrap()
    };
    let flat = run(0.0);
    let modulated = run(0.5);
    // sin(ω t) vanishes at t = 0, so the first step is unaffected
    let first: f64
        = flat.row(0).iter().zip(modulated.row(0))
        .map(|(a, b)| (a - b).norm())
        .fold(0.0, f64::max);
    assert!(first < 1e-14);
    let last: f64
        = flat.row(49).iter().zip(modulated.row(49))
        .map(|(a, b)| (a - b).norm())
        .fold(0.0, f64::max);
    assert!(last > 1e-4);
}

#[test]
fn imaginary_time_nonlinear_enforces_unit_norm() {
    let grid = Grid::new(8.0, 256, 0.01, 300, TimeMode::Imaginary).unwrap();
    let ops = OperatorSet::harmonic(&grid, 0.0, 1.0);
    let law = PowerLaw { p: 1.0, q: 3.0, alpha: 0.1 };
    let q = split_step(&grid, &ops, law).unwrap();
    norms(&grid, &q).iter()
        .for_each(|n| { assert_abs_diff_eq!(*n, 1.0, epsilon = 1e-12); });
    let moved: f64
        = q.row(299).iter().zip(q.row(0))
        .map(|(a, b)| (a - b).norm())
        .fold(0.0, f64::max);
    assert!(moved > 1e-6);
}

#[test]
fn imaginary_time_enforces_unit_norm() {
    let grid = Grid::new(8.0, 256, 0.02, 200, TimeMode::Imaginary).unwrap();
    let ops = OperatorSet::harmonic(&grid, 0.5, -2.0);
    let q = split_step(&grid, &ops, Linear).unwrap();
    norms(&grid, &q).iter()
        .for_each(|n| { assert_abs_diff_eq!(*n, 1.0, epsilon = 1e-12); });
}

#[test]
fn ground_state_convergence() {
    let grid = Grid::new(10.0, 256, 0.005, 2000, TimeMode::Imaginary).unwrap();
    let ops = OperatorSet::harmonic(&grid, 0.0, 1.0);
    let q = split_step(&grid, &ops, Linear).unwrap();
    let e = energies(&grid, &ops.v, &q).unwrap();
    // energy never increases beyond splitting noise
    e.iter().zip(e.iter().skip(1))
        .for_each(|(a, b)| { assert!(*b <= *a + 1e-9, "{} -> {}", a, b); });
    assert!(e[0] < 1.0);
    assert_abs_diff_eq!(e[e.len() - 1], 0.5, epsilon = 1e-4);
}

#[test]
fn ground_state_improves_with_smaller_dt() {
    let final_energy = |dt: f64, steps: usize| -> f64 {
        let grid = Grid::new(10.0, 256, dt, steps, TimeMode::Imaginary).unwrap();
        let ops = OperatorSet::harmonic(&grid, 0.0, 1.0);
        let q = split_step(&grid, &ops, Linear).unwrap();
        let e = energies(&grid, &ops.v, &q).unwrap();
        e[steps - 1]
    };
    let coarse = (final_energy(0.2, 100) - 0.5).abs();
    let fine = (final_energy(0.05, 400) - 0.5).abs();
    assert!(fine < coarse);
    assert!(fine < 1e-3);
}

#[test]
fn single_step_run() {
    let grid = Grid::new(5.0, 128, 0.05, 1, TimeMode::Real).unwrap();
    let ops = OperatorSet::harmonic(&grid, 0.0, -1.0);
    let prop = Propagator::linear(&grid, &ops).unwrap();
    let q = prop.run().unwrap();
    assert_eq!(q.nrows(), 1);
    let stepped = prop.step(&ops.field, 0).unwrap();
    q.row(0).iter().zip(&stepped)
        .for_each(|(a, b)| { assert_abs_diff_eq!((a - b).norm(), 0.0, epsilon = 1e-14); });
    let moved: f64
        = q.row(0).iter().zip(&ops.field)
        .map(|(a, b)| (a - b).norm())
        .fold(0.0, f64::max);
    assert!(moved > 1e-3);
}

#[test]
fn export_is_throttled() {
    let grid = Grid::new(5.0, 64, 0.01, 1000, TimeMode::Real).unwrap();
    let ops = OperatorSet::harmonic(&grid, 0.0, -1.0);
    let mut rec = Recorder::default();
    let q = Propagator::linear(&grid, &ops).unwrap().run_exported(&mut rec).unwrap();
    assert_eq!(q.nrows(), 1000);
    assert_eq!(rec.steps.len(), 100);
    assert!(rec.steps.iter().enumerate().all(|(n, s)| *s == 10 * n));
    rec.totals.iter()
        .for_each(|t| { assert_abs_diff_eq!(*t, std::f64::consts::PI.sqrt(), epsilon = 1e-6); });
}

#[test]
fn short_runs_export_every_step() {
    let grid = Grid::new(5.0, 64, 0.01, 7, TimeMode::Imaginary).unwrap();
    let ops = OperatorSet::harmonic(&grid, 0.0, -1.0);
    let mut rec = Recorder::default();
    Propagator::linear(&grid, &ops).unwrap().run_exported(&mut rec).unwrap();
    assert_eq!(rec.steps, (0..7).collect::<Vec<_>>());
    rec.totals.iter()
        .for_each(|t| { assert_abs_diff_eq!(*t, 1.0, epsilon = 1e-12); });
}

#[test]
fn export_failure_does_not_abort() {
    let grid = Grid::new(5.0, 64, 0.01, 300, TimeMode::Real).unwrap();
    let ops = OperatorSet::harmonic(&grid, 0.0, -1.0);
    let mut broken = Broken { calls: 0 };
    let prop = Propagator::linear(&grid, &ops).unwrap();
    let exported = prop.run_exported(&mut broken).unwrap();
    assert_eq!(broken.calls, 100);
    let plain = prop.run().unwrap();
    assert_eq!(exported, plain);
}
