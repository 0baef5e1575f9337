//! Spatial and spectral sampling grids for a periodic one-dimensional box.
//!
//! ```
//! use ssfm::{ grid::Grid, operators::TimeMode };
//!
//! let grid = Grid::new(5.0, 8, 0.05, 100, TimeMode::Real).unwrap();
//! assert_eq!(grid.dx(), 1.25);
//! assert_eq!(grid.x()[0], -4.375);
//! assert_eq!(grid.k()[4], -4.0 * grid.dk());
//! ```

use std::f64::consts::PI;
use ndarray as nd;
use crate::{
    error::ParamError,
    operators::TimeMode,
    utils::{ fft_wavenumbers, Transform },
};

pub type GridResult<T> = Result<T, ParamError>;

/// Immutable sampling grids and time-stepping parameters for a single run.
///
/// For a box `[-xmax, xmax)` of `res` points, the spatial samples sit at cell
/// centers,
/// ```text
/// dx   = 2 xmax / res
/// x[j] = -xmax + dx/2 + j dx
/// ```
/// and the (angular) wavenumbers are laid out in unshifted FFT order with
/// spacing `dk = π / xmax`; see [`fft_wavenumbers`].
#[derive(Clone, Debug)]
pub struct Grid {
    xmax: f64,
    res: usize,
    dt: f64,
    timesteps: usize,
    mode: TimeMode,
    dx: f64,
    dk: f64,
    x: nd::Array1<f64>,
    k: nd::Array1<f64>,
    transform: Transform,
}

impl Grid {
    /// Derive all grids from scalar inputs.
    ///
    /// Fails if `xmax` is not positive, `res` is not a positive even integer,
    /// `dt` is zero, or `timesteps` is zero. Non-finite `xmax` or `dt` are
    /// rejected as well.
    pub fn new(
        xmax: f64,
        res: usize,
        dt: f64,
        timesteps: usize,
        mode: TimeMode,
    ) -> GridResult<Self>
    {
        ParamError::check_xmax(xmax)?;
        ParamError::check_resolution(res)?;
        ParamError::check_dt(dt)?;
        ParamError::check_timesteps(timesteps)?;
        let dx = 2.0 * xmax / res as f64;
        let x: nd::Array1<f64>
            = nd::Array1::from_shape_fn(res, |j| -xmax + dx / 2.0 + j as f64 * dx);
        let dk = PI / xmax;
        let k = fft_wavenumbers(res, dk);
        let transform = Transform::new(res);
        Ok(Self { xmax, res, dt, timesteps, mode, dx, dk, x, k, transform })
    }

    /// Half-width of the box.
    pub fn xmax(&self) -> f64 { self.xmax }

    /// Number of grid points.
    pub fn len(&self) -> usize { self.res }

    /// Always `false`; a valid grid has at least two points.
    pub fn is_empty(&self) -> bool { self.res == 0 }

    /// Time step.
    pub fn dt(&self) -> f64 { self.dt }

    /// Number of steps taken in a run.
    pub fn timesteps(&self) -> usize { self.timesteps }

    /// Real- or imaginary-time evolution.
    pub fn mode(&self) -> TimeMode { self.mode }

    /// Spatial grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Wavenumber grid spacing.
    pub fn dk(&self) -> f64 { self.dk }

    /// Spatial coordinates.
    pub fn x(&self) -> &nd::Array1<f64> { &self.x }

    /// Angular wavenumbers, in unshifted FFT order.
    pub fn k(&self) -> &nd::Array1<f64> { &self.k }

    /// FFT plans sized to the grid.
    pub fn transform(&self) -> &Transform { &self.transform }

    /// Elapsed evolution time at the end of step `i`, i.e. `(i + 1) dt`.
    pub fn t(&self, i: usize) -> f64 { (i + 1) as f64 * self.dt }

    /// Evolution times matching each recorded snapshot of a run.
    pub fn times(&self) -> nd::Array1<f64> {
        (0..self.timesteps).map(|i| self.t(i)).collect()
    }
}
