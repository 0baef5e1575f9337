//! Construction of the potential, the initial field, and the split-step
//! propagators.
//!
//! For a potential (or effective potential) `V` and wavenumbers `k`, one step
//! of size `dt` uses the factors
//! ```text
//! R = exp(-½ V dt φ)    (applied twice, in position space)
//! K = exp(-½ k² dt φ)   (applied once, in momentum space)
//! ```
//! where `φ = i` in real time and `φ = 1` in imaginary time. The choice of `φ`
//! is made in exactly one place, [`TimeMode::propagator`].
//!
//! `V` may be complex. In real time a positive imaginary part is gain, since
//! `|exp(-½ i (a + i b) dt)| = exp(½ b dt)`.

use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{
    Arr1,
    error::{ LengthError, ParamError },
    grid::Grid,
};

/// Real- or imaginary-time evolution.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    /// Unitary evolution; propagators are pure phases and the total
    /// probability is conserved.
    #[default]
    Real,
    /// Evolution under `t → -i t`; propagators are decaying exponentials and
    /// the field is renormalized after every step.
    Imaginary,
}

impl TimeMode {
    /// Select a mode from an `imaginary_time` flag.
    pub fn from_flag(imaginary_time: bool) -> Self {
        if imaginary_time { Self::Imaginary } else { Self::Real }
    }

    /// Return `true` for [`Self::Imaginary`].
    pub fn is_imaginary(self) -> bool { matches!(self, Self::Imaginary) }

    /// Exponentiate an action `θ` with the mode's phase factor.
    ///
    /// Gives `exp(-i θ)` in real time and `exp(-θ)` in imaginary time. For
    /// real `θ` these are of unit modulus and real and positive,
    /// respectively.
    pub fn propagator<T>(self, theta: T) -> C64
    where T: Into<C64>
    {
        let theta: C64 = theta.into();
        match self {
            Self::Real => (-C64::i() * theta).exp(),
            Self::Imaginary => (-theta).exp(),
        }
    }
}

/// Build the position-space half-step factor `R = exp(-½ W dt φ)` for an
/// effective potential `W`, real or complex.
pub fn half_step<S, A>(grid: &Grid, w: &Arr1<S>) -> nd::Array1<C64>
where
    S: nd::Data<Elem = A>,
    A: Copy + Into<C64>,
{
    let mode = grid.mode();
    let dt = grid.dt();
    w.mapv(|wj| {
        let wj: C64 = wj.into();
        mode.propagator(wj * (0.5 * dt))
    })
}

/// Build the momentum-space full-step factor `K = exp(-½ k² dt φ)`.
pub fn kinetic_step(grid: &Grid) -> nd::Array1<C64> {
    let mode = grid.mode();
    let dt = grid.dt();
    grid.k().mapv(|kj| mode.propagator(0.5 * kj.powi(2) * dt))
}

/// A potential energy landscape, as a function of position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Potential {
    /// No potential.
    Free,
    /// `½ (x - offset)²`.
    Harmonic {
        #[serde(default)]
        offset: f64,
    },
}

impl Default for Potential {
    fn default() -> Self { Self::Harmonic { offset: 0.0 } }
}

impl Potential {
    /// Evaluate at a single position.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Free => 0.0,
            Self::Harmonic { offset } => 0.5 * (x - offset).powi(2),
        }
    }
}

/// A closed-form initial field profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Profile {
    /// `exp(-(x - offset)² / 2)`.
    Gaussian {
        #[serde(default)]
        offset: f64,
    },
    /// Rational soliton ansatz for the power-law nonlinearity,
    /// ```text
    /// (ω / (1 + √(1 - α ω) cosh(2 p √ω (x - offset))))^(1/2p) + background
    /// ```
    Soliton {
        omega: f64,
        p: f64,
        alpha: f64,
        #[serde(default)]
        offset: f64,
        #[serde(default)]
        background: f64,
    },
    /// A sum of sinusoids, `Σ a sin(2π f x)` over `(a, f)` pairs.
    Tones {
        tones: Vec<(f64, f64)>,
    },
}

impl Default for Profile {
    fn default() -> Self { Self::Gaussian { offset: 0.0 } }
}

impl Profile {
    /// Check that the profile is well defined everywhere.
    pub fn check(&self) -> Result<(), ParamError> {
        match self {
            Self::Soliton { omega, alpha, .. } => {
                (*omega > 0.0 && alpha * omega <= 1.0)
                    .then_some(())
                    .ok_or(ParamError::BadSoliton { omega: *omega, alpha: *alpha })
            },
            _ => Ok(()),
        }
    }

    /// Evaluate at a single position.
    pub fn eval(&self, x: f64) -> C64 {
        match self {
            Self::Gaussian { offset } => {
                C64::from((-(x - offset).powi(2) / 2.0).exp())
            },
            Self::Soliton { omega, p, alpha, offset, background } => {
                let denom
                    = 1.0 + (1.0 - alpha * omega).sqrt()
                    * (2.0 * p * omega.sqrt() * (x - offset)).cosh();
                C64::from((omega / denom).powf(0.5 / p) + background)
            },
            Self::Tones { tones } => {
                let val: f64
                    = tones.iter()
                    .map(|(a, f)| a * (std::f64::consts::TAU * f * x).sin())
                    .sum();
                C64::from(val)
            },
        }
    }
}

/// Potential, propagators, and initial field for a single run.
///
/// `r` is built from `v` alone; runs with a nonlinear term rebuild the
/// position-space factor every step instead.
#[derive(Clone, Debug)]
pub struct OperatorSet {
    /// Potential.
    pub v: nd::Array1<f64>,
    /// Position-space half-step factor.
    pub r: nd::Array1<C64>,
    /// Momentum-space full-step factor.
    pub k: nd::Array1<C64>,
    /// Initial field.
    pub field: nd::Array1<C64>,
}

impl OperatorSet {
    /// Build from a harmonic potential centered at `voffset` and a Gaussian
    /// wave packet centered at `wfcoffset`.
    pub fn harmonic(grid: &Grid, voffset: f64, wfcoffset: f64) -> Self {
        let potential = Potential::Harmonic { offset: voffset };
        let profile = Profile::Gaussian { offset: wfcoffset };
        Self::new(grid, |x| potential.eval(x), |x| profile.eval(x))
    }

    /// Build from arbitrary potential and initial-field functions of
    /// position.
    pub fn new<P, F>(grid: &Grid, potential: P, field: F) -> Self
    where
        P: Fn(f64) -> f64,
        F: Fn(f64) -> C64,
    {
        let v: nd::Array1<f64> = grid.x().mapv(potential);
        let field: nd::Array1<C64> = grid.x().mapv(field);
        let r = half_step(grid, &v);
        let k = kinetic_step(grid);
        Self { v, r, k, field }
    }

    /// Build from sampled potential and initial-field arrays.
    ///
    /// Fails if either array's length differs from the grid's.
    pub fn from_arrays(
        grid: &Grid,
        v: nd::Array1<f64>,
        field: nd::Array1<C64>,
    ) -> Result<Self, LengthError>
    {
        LengthError::check(grid.x(), &v)?;
        LengthError::check(grid.x(), &field)?;
        let r = half_step(grid, &v);
        let k = kinetic_step(grid);
        Ok(Self { v, r, k, field })
    }

    /// Number of grid points covered.
    pub fn len(&self) -> usize { self.v.len() }

    /// Return `true` if the operators cover no grid points.
    pub fn is_empty(&self) -> bool { self.v.is_empty() }
}
