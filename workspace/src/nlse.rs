use ndarray as nd;
use num_complex::Complex64 as C64;
use lib::{ init_logging, mkdir, write_npz };
use ssfm::{
    grid::Grid,
    nonlinear::PowerLaw,
    operators::{ OperatorSet, Potential, Profile, TimeMode },
    timedep,
    utils::density,
};

// propagate a power-law soliton sitting on a weak uniform background

const P: f64 = 3.0;
const Q: f64 = 6.0;
const ALPHA: f64 = 0.1;

fn main() -> lib::anyhow::Result<()> {
    init_logging(None)?;

    let profile = Profile::Soliton {
        omega: 1.0,
        p: P,
        alpha: ALPHA,
        offset: 0.0,
        background: 0.1,
    };
    profile.check()?;
    let potential = Potential::Free;
    let grid = Grid::new(5.0, 4096, 0.02, 500, TimeMode::Real)?;
    let ops = OperatorSet::new(&grid, |x| potential.eval(x), |x| profile.eval(x));
    let law = PowerLaw { p: P, q: Q, alpha: ALPHA };
    let q: nd::Array2<C64> = timedep::split_step(&grid, &ops, law)?;

    let peaks: nd::Array1<f64>
        = q.outer_iter()
        .map(|qi| density(&qi).fold(0.0, |acc, a| f64::max(acc, *a)))
        .collect();
    log::info!("peak density: {:.6} -> {:.6}", peaks[0], peaks[peaks.len() - 1]);

    let outdir = mkdir("output")?;
    write_npz!(
        outdir.join("nlse.npz"),
        arrays: {
            "x" => grid.x(),
            "t" => &grid.times(),
            "q" => &q,
            "peak" => &peaks,
        }
    )?;
    Ok(())
}
