//! Provides the split-step Fourier propagation of the 1+1-dimensional
//! (nonlinear) Schrödinger equation, in real or imaginary time.
//!
//! In all 2D arrays, the first (or zero-th) axis indexes time.
//!
//! Each step maps the field at the start of the step to the field at its end:
//! ```text
//! R = exp(-½ W dt φ)      W (complex) from the Nonlinearity, at the current field
//! ψ ← R ψ
//! ψ ← iFFT[K FFT[ψ]]
//! ψ ← R ψ                 same R as above
//! ψ ← ψ / √(Σ|ψ|² dx)     imaginary time only
//! ```
//! Snapshot `i` of a run is the field at the end of step `i`, so a run of `n`
//! steps records `n` snapshots and none of them is the untouched initial
//! field.

use std::borrow::Cow;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    error::{ LengthError, TError },
    export::{ Export, Throttle },
    grid::Grid,
    nonlinear::{ Linear, Nonlinearity },
    operators::{ half_step, OperatorSet },
    utils::{ density, wf_norm },
};

pub type TResult<T> = Result<T, TError>;

fn apply_split_potential<S, T>(r: &Arr1<S>, q: &mut Arr1<T>)
where
    S: nd::Data<Elem = C64>,
    T: nd::DataMut<Elem = C64>,
{
    q.iter_mut().zip(r)
        .for_each(|(qj, rj)| { *qj *= *rj; });
}

fn apply_split_kinetic<S, T>(grid: &Grid, k: &Arr1<S>, q: &mut Arr1<T>)
where
    S: nd::Data<Elem = C64>,
    T: nd::DataMut<Elem = C64>,
{
    let tr = grid.transform();
    tr.forward_inplace(q);
    q.iter_mut().zip(k)
        .for_each(|(qj, kj)| { *qj *= *kj; });
    tr.inverse_inplace(q);
}

/// Split-step propagator for a single run.
///
/// Borrows the grid and operators of the run; the evolving field is passed
/// through [`Self::step`] by value, so every snapshot is a fresh array.
#[derive(Clone, Debug)]
pub struct Propagator<'a, N> {
    grid: &'a Grid,
    ops: &'a OperatorSet,
    law: N,
}

impl<'a> Propagator<'a, Linear> {
    /// Create a propagator for the linear Schrödinger equation.
    pub fn linear(grid: &'a Grid, ops: &'a OperatorSet) -> TResult<Self> {
        Self::new(grid, ops, Linear)
    }
}

impl<'a, N> Propagator<'a, N>
where N: Nonlinearity
{
    /// Create a new propagator.
    ///
    /// Fails if the operators or the law were set up over a grid of a
    /// different size.
    pub fn new(grid: &'a Grid, ops: &'a OperatorSet, law: N) -> TResult<Self> {
        LengthError::check(grid.x(), &ops.v)?;
        LengthError::check(grid.x(), &ops.r)?;
        LengthError::check(grid.x(), &ops.k)?;
        LengthError::check(grid.x(), &ops.field)?;
        law.check(grid)?;
        Ok(Self { grid, ops, law })
    }

    /// The grid of the run.
    pub fn grid(&self) -> &Grid { self.grid }

    /// The operators of the run.
    pub fn operators(&self) -> &OperatorSet { self.ops }

    /// Position-space half-step factor for step `step` beginning in state `q`.
    ///
    /// Static laws reuse the prebuilt factor; all others evaluate the
    /// effective potential at `q`. Fails if the law returns a potential of the
    /// wrong size.
    pub fn half_step_factor(&self, q: &nd::Array1<C64>, step: usize)
        -> TResult<Cow<'_, nd::Array1<C64>>>
    {
        if self.law.is_static() {
            Ok(Cow::Borrowed(&self.ops.r))
        } else {
            let w = self.law.potential(self.grid, &self.ops.v, q, step);
            LengthError::check(self.grid.x(), &w)?;
            Ok(Cow::Owned(half_step(self.grid, &w)))
        }
    }

    /// Take step `step` from state `q`, returning the new state.
    ///
    /// In imaginary time the returned state is renormalized to unit total
    /// probability; this fails with [`TError::Degenerate`] if the field has
    /// decayed to zero (or become NaN).
    ///
    /// *Panics if `q` does not match the grid size.*
    pub fn step(&self, q: &nd::Array1<C64>, step: usize)
        -> TResult<nd::Array1<C64>>
    {
        let r = self.half_step_factor(q, step)?;
        let mut next = q.clone();
        apply_split_potential(&*r, &mut next);
        apply_split_kinetic(self.grid, &self.ops.k, &mut next);
        apply_split_potential(&*r, &mut next);
        if self.grid.mode().is_imaginary() {
            let renorm = wf_norm(&next, self.grid.dx());
            TError::check_renorm(step, renorm)?;
            let scale = renorm.sqrt();
            next.map_inplace(|qj| { *qj /= scale; });
        }
        Ok(next)
    }

    /// Run all steps from the initial field, returning one snapshot per step.
    pub fn run(&self) -> TResult<nd::Array2<C64>> {
        self.run_inner(None)
    }

    /// Like [`Self::run`], but also hand throttled density frames to an
    /// exporter.
    ///
    /// Export failures are logged and otherwise ignored.
    pub fn run_exported<E>(&self, export: &mut E) -> TResult<nd::Array2<C64>>
    where E: Export
    {
        self.run_inner(Some(export as &mut dyn Export))
    }

    fn run_inner(&self, mut export: Option<&mut dyn Export>)
        -> TResult<nd::Array2<C64>>
    {
        let n = self.grid.timesteps();
        let throttle = Throttle::new(n);
        log::info!(
            "split-step run: {} steps of dt = {} over {} points ({:?} time)",
            n, self.grid.dt(), self.grid.len(), self.grid.mode(),
        );
        let mut q: nd::Array2<C64> = nd::Array2::zeros((n, self.grid.len()));
        let mut q_temp: nd::Array1<C64> = self.ops.field.clone();
        for (i, mut qi) in q.axis_iter_mut(nd::Axis(0)).enumerate() {
            q_temp = self.step(&q_temp, i)?;
            qi.assign(&q_temp);
            if !throttle.should_emit(i) { continue; }
            let rho = density(&q_temp);
            log::debug!(
                "step {}/{}: total probability {:.12e}",
                i + 1, n, rho.sum() * self.grid.dx(),
            );
            if let Some(exp) = export.as_mut() {
                if let Err(err) = exp.emit(i, self.grid.x(), &rho, &self.ops.v) {
                    log::warn!("export failed at step {}: {}", i, err);
                }
            }
        }
        log::info!("split-step run finished");
        Ok(q)
    }
}

/// Perform split-step integration over all steps of a run.
///
/// See also [`Propagator`].
pub fn split_step<N>(grid: &Grid, ops: &OperatorSet, law: N)
    -> TResult<nd::Array2<C64>>
where N: Nonlinearity
{
    Propagator::new(grid, ops, law)?.run()
}
