use ssfm::{
    energy,
    grid::Grid,
    nonlinear::Linear,
    operators::{ OperatorSet, TimeMode },
    timedep,
    utils::wf_norm,
};

// evolve a displaced Gaussian in the harmonic trap, first in real time, then in
// imaginary time to recover the ground state

fn main() {
    const XMAX: f64 = 5.0;
    const RES: usize = 4096;
    const OFFSET: f64 = -1.0; // initial displacement of the packet

    // real time: the packet oscillates about the trap center, keeping its norm
    // and energy
    let grid = Grid::new(XMAX, RES, 0.05, 100, TimeMode::Real).unwrap();
    let ops = OperatorSet::harmonic(&grid, 0.0, OFFSET);
    let q = timedep::split_step(&grid, &ops, Linear).unwrap();
    let e = energy::energies(&grid, &ops.v, &q).unwrap();
    println!("real time:");
    println!("  norm:   {:.9} -> {:.9}",
        wf_norm(&q.row(0), grid.dx()), wf_norm(&q.row(99), grid.dx()));
    println!("  energy: {:.9} -> {:.9}", e[0], e[99]);

    // imaginary time: every excited component decays away
    let grid = Grid::new(XMAX, 256, 0.01, 1000, TimeMode::Imaginary).unwrap();
    let ops = OperatorSet::harmonic(&grid, 0.0, OFFSET);
    let q = timedep::split_step(&grid, &ops, Linear).unwrap();
    let e = energy::energies(&grid, &ops.v, &q).unwrap();
    println!("imaginary time:");
    println!("  expected: {:.3e}", 0.5);
    println!("  computed: {:.3e}", e[999]);
}
