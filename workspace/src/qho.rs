use std::f64::consts::PI;
use ndarray as nd;
use num_complex::Complex64 as C64;
use lib::{ init_logging, mkdir, write_npz };
use ssfm::{
    energy,
    grid::Grid,
    nonlinear::Linear,
    operators::{ OperatorSet, TimeMode },
    timedep,
    utils::wf_dot,
};

// a displaced Gaussian sloshing in the harmonic trap

fn main() -> lib::anyhow::Result<()> {
    init_logging(None)?;

    let grid = Grid::new(5.0, 4096, 0.05, 100, TimeMode::Real)?;
    let ops = OperatorSet::harmonic(&grid, 0.0, -1.0);
    let q: nd::Array2<C64> = timedep::split_step(&grid, &ops, Linear)?;

    let e: nd::Array1<f64> = energy::energies(&grid, &ops.v, &q)?;
    let n: nd::Array1<f64> = energy::norms(&grid, &q);
    log::info!("energy: {:.6} -> {:.6}", e[0], e[e.len() - 1]);
    log::info!("norm: {:.6} -> {:.6}", n[0], n[n.len() - 1]);

    // overlap with the trap ground state, π^(-1/4) exp(-x²/2)
    let gs: nd::Array1<C64>
        = grid.x().mapv(|x| C64::from(PI.powf(-0.25) * (-x.powi(2) / 2.0).exp()));
    let a0: nd::Array1<f64>
        = q.outer_iter()
        .map(|qi| wf_dot(&gs, &qi, grid.dx()).norm_sqr())
        .collect();

    let outdir = mkdir("output")?;
    write_npz!(
        outdir.join("qho.npz"),
        arrays: {
            "x" => grid.x(),
            "t" => &grid.times(),
            "v" => &ops.v,
            "q" => &q,
            "e" => &e,
            "n" => &n,
            "a0" => &a0,
        }
    )?;
    Ok(())
}
