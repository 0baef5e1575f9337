//! Energy expectation values of field snapshots.
//!
//! The Hamiltonian is applied the same way the propagator applies it: the
//! kinetic term `½ k²` by multiplication in momentum space and the potential
//! by multiplication in position space,
//! ```text
//! E = dx Re Σ [ ½ conj(ψ) iFFT[k² FFT[ψ]] + conj(ψ) V ψ ]
//! ```
//! No normalization is applied, so `E` is the true energy only for snapshots
//! of unit total probability.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    Arr2,
    error::LengthError,
    grid::Grid,
    utils::wf_norm,
};

/// Compute `⟨ψ|H|ψ⟩` for a single snapshot `q` in the potential `v`.
///
/// Fails if `v` or `q` do not match the grid size.
pub fn energy<S, T>(grid: &Grid, v: &Arr1<S>, q: &Arr1<T>)
    -> Result<f64, LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    LengthError::check(grid.x(), v)?;
    LengthError::check(grid.x(), q)?;
    let tr = grid.transform();
    let mut hk = tr.forward(q);
    hk.iter_mut().zip(grid.k())
        .for_each(|(hkj, kj)| { *hkj *= kj.powi(2); });
    tr.inverse_inplace(&mut hk);
    let total: f64
        = nd::Zip::from(&hk).and(v).and(q)
        .fold(0.0, |acc, hkj, vj, qj| {
            acc + (0.5 * qj.conj() * hkj + qj.conj() * *vj * qj).re
        });
    Ok(total * grid.dx())
}

/// Compute the energy of every snapshot in a time series (time along the
/// first axis).
pub fn energies<S, T>(grid: &Grid, v: &Arr1<S>, q: &Arr2<T>)
    -> Result<nd::Array1<f64>, LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = C64>,
{
    q.outer_iter()
        .map(|qi| energy(grid, v, &qi))
        .collect()
}

/// Compute the total probability of every snapshot in a time series (time
/// along the first axis).
pub fn norms<S>(grid: &Grid, q: &Arr2<S>) -> nd::Array1<f64>
where S: nd::Data<Elem = C64>
{
    q.outer_iter()
        .map(|qi| wf_norm(&qi, grid.dx()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::{ operators::{ OperatorSet, TimeMode }, utils::wf_normalized };

    #[test]
    fn harmonic_ground_state() {
        let grid = Grid::new(10.0, 256, 0.01, 1, TimeMode::Imaginary).unwrap();
        let ops = OperatorSet::harmonic(&grid, 0.0, 0.0);
        let q = wf_normalized(&ops.field, grid.dx());
        assert_abs_diff_eq!(energy(&grid, &ops.v, &q).unwrap(), 0.5, epsilon = 1e-10);
    }

    #[test]
    fn displaced_coherent_state() {
        // a ground state displaced by `a` carries an extra a²/2
        let grid = Grid::new(10.0, 256, 0.01, 1, TimeMode::Real).unwrap();
        let ops = OperatorSet::harmonic(&grid, 0.0, 1.5);
        let q = wf_normalized(&ops.field, grid.dx());
        assert_abs_diff_eq!(energy(&grid, &ops.v, &q).unwrap(), 0.5 + 1.125, epsilon = 1e-10);
    }

    #[test]
    fn plane_wave_kinetic_energy() {
        let grid = Grid::new(std::f64::consts::PI, 64, 0.01, 1, TimeMode::Real).unwrap();
        let v: nd::Array1<f64> = nd::Array1::zeros(64);
        // k = 3 is on the grid since dk = 1
        let q = grid.x().mapv(|x| C64::cis(3.0 * x));
        let q = wf_normalized(&q, grid.dx());
        assert_abs_diff_eq!(energy(&grid, &v, &q).unwrap(), 4.5, epsilon = 1e-10);
    }

    #[test]
    fn series_and_lengths() {
        let grid = Grid::new(10.0, 128, 0.01, 1, TimeMode::Real).unwrap();
        let ops = OperatorSet::harmonic(&grid, 0.0, 0.0);
        let q = wf_normalized(&ops.field, grid.dx());
        let series = nd::stack(nd::Axis(0), &[q.view(), (q.clone() * 2.0).view()]).unwrap();
        let e = energies(&grid, &ops.v, &series).unwrap();
        assert_abs_diff_eq!(e[0], 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(e[1], 2.0, epsilon = 1e-10);
        let n = norms(&grid, &series);
        assert_abs_diff_eq!(n[1], 4.0, epsilon = 1e-12);
        let short: nd::Array1<f64> = nd::Array1::zeros(10);
        assert!(energy(&grid, &short, &q).is_err());
    }
}
