use ndarray as nd;
use num_complex::Complex64 as C64;
use lib::{ init_logging, mkdir, write_npz };
use ssfm::{
    energy,
    export::DatExport,
    grid::Grid,
    operators::{ OperatorSet, TimeMode },
    timedep::Propagator,
};

// relax an off-center packet into the ground state of a shifted trap

const TRAP_OFFSET: f64 = 1.5;

fn main() -> lib::anyhow::Result<()> {
    init_logging(None)?;

    let grid = Grid::new(8.0, 512, 0.005, 3000, TimeMode::Imaginary)?;
    let ops = OperatorSet::harmonic(&grid, TRAP_OFFSET, -1.0);
    let outdir = mkdir("output")?;
    let mut export = DatExport::new(outdir.join("ground_state"));
    let q: nd::Array2<C64>
        = Propagator::linear(&grid, &ops)?.run_exported(&mut export)?;

    let e: nd::Array1<f64> = energy::energies(&grid, &ops.v, &q)?;
    e.iter().enumerate()
        .step_by((grid.timesteps() / 10).max(1))
        .for_each(|(i, ei)| { log::info!("t = {:.3}: E = {:.8}", grid.t(i), ei); });
    let last = e[e.len() - 1];
    log::info!("final energy {:.8} (exact 0.5, error {:.2e})", last, last - 0.5);

    let gs: nd::Array1<C64> = q.row(grid.timesteps() - 1).to_owned();
    let center: f64
        = grid.x().iter().zip(&gs)
        .map(|(x, qj)| x * qj.norm_sqr())
        .sum::<f64>() * grid.dx();
    log::info!("ground state centered at {:.6} (trap at {})", center, TRAP_OFFSET);

    write_npz!(
        outdir.join("ground_state.npz"),
        arrays: {
            "x" => grid.x(),
            "t" => &grid.times(),
            "v" => &ops.v,
            "gs" => &gs,
            "e" => &e,
        }
    )?;
    Ok(())
}
