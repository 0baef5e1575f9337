//! Provides functions and higher-level constructs for the integration of the
//! one-dimensional, time-dependent (nonlinear) Schrödinger equation via the
//! split-step Fourier method on a periodic grid.
//!
//! Provides implementations for the following:
//! - Real-time propagation (unitary)
//! - Imaginary-time propagation with per-step renormalization (ground states)
//! - Pluggable nonlinear terms:
//!     - Linear (static potential)
//!     - Competing power laws, e.g. cubic-quintic
//!     - Modulated gain with cubic self-interaction over a disordered
//!       landscape
//! - Energy expectation values of any snapshot
//! - Throttled export of density profiles for external plotters
//!
//! ```
//! use ssfm::{ energy, grid::Grid, nonlinear::Linear, operators::*, timedep };
//!
//! // relax a displaced wave packet into the ground state of ½x²
//! let grid = Grid::new(8.0, 256, 0.01, 1500, TimeMode::Imaginary).unwrap();
//! let ops = OperatorSet::harmonic(&grid, 0.0, 1.0);
//! let q = timedep::split_step(&grid, &ops, Linear).unwrap();
//! let e = energy::energy(&grid, &ops.v, &q.row(grid.timesteps() - 1)).unwrap();
//! assert!((e - 0.5).abs() < 1e-3);
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod config;
pub mod energy;
pub mod error;
pub mod export;
pub mod grid;
pub mod nonlinear;
pub mod operators;
pub mod timedep;
pub mod utils;

pub mod docs;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
