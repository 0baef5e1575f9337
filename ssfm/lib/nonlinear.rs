//! Pluggable laws for the position-space part of a split step.
//!
//! A [`Nonlinearity`] maps the current field to an effective potential `W`,
//! which the propagation engine exponentiates into the half-step factor
//! `exp(-½ W dt φ)` (see [`operators`][crate::operators]). `W` is complex; its
//! real part modulates the phase and its imaginary part is a gain (positive)
//! or loss (negative) in real time. For nonlinear
//! Schrödinger equations written as
//! ```text
//!   ∂ψ     1 ∂²ψ
//! i -- = - - --- + V ψ - N(|ψ|) ψ
//!   ∂t     2 ∂x²
//! ```
//! the effective potential is `W = V - N(|ψ|)`.
//!
//! `W` is evaluated once per step from the field at the start of the step and
//! used for both half-steps.

use ndarray as nd;
use num_complex::Complex64 as C64;
use rand::{ Rng, SeedableRng, rngs::StdRng };
use crate::{ error::LengthError, grid::Grid };

/// Maps the current field to the effective potential of the position-space
/// half-steps.
pub trait Nonlinearity {
    /// Compute the effective potential for the step with index `step`, given
    /// the base potential `v` and the field `q` at the start of the step.
    ///
    /// The result must have one element per grid point.
    fn potential(
        &self,
        grid: &Grid,
        v: &nd::Array1<f64>,
        q: &nd::Array1<C64>,
        step: usize,
    ) -> nd::Array1<C64>;

    /// Return `true` if the effective potential never depends on the field or
    /// the step index, allowing the half-step factor to be built once per
    /// run.
    fn is_static(&self) -> bool { false }

    /// Check that the law can be evaluated over `grid`, e.g. that any state
    /// it samples over space has the grid's size.
    fn check(&self, _grid: &Grid) -> Result<(), LengthError> { Ok(()) }
}

impl<T> Nonlinearity for &T
where T: Nonlinearity + ?Sized
{
    fn potential(
        &self,
        grid: &Grid,
        v: &nd::Array1<f64>,
        q: &nd::Array1<C64>,
        step: usize,
    ) -> nd::Array1<C64>
    {
        (**self).potential(grid, v, q, step)
    }

    fn is_static(&self) -> bool { (**self).is_static() }

    fn check(&self, grid: &Grid) -> Result<(), LengthError> {
        (**self).check(grid)
    }
}

impl<T> Nonlinearity for Box<T>
where T: Nonlinearity + ?Sized
{
    fn potential(
        &self,
        grid: &Grid,
        v: &nd::Array1<f64>,
        q: &nd::Array1<C64>,
        step: usize,
    ) -> nd::Array1<C64>
    {
        (**self).potential(grid, v, q, step)
    }

    fn is_static(&self) -> bool { (**self).is_static() }

    fn check(&self, grid: &Grid) -> Result<(), LengthError> {
        (**self).check(grid)
    }
}

/// The linear Schrödinger equation: `W = V`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Linear;

impl Nonlinearity for Linear {
    fn potential(
        &self,
        _grid: &Grid,
        v: &nd::Array1<f64>,
        _q: &nd::Array1<C64>,
        _step: usize,
    ) -> nd::Array1<C64>
    {
        v.mapv(C64::from)
    }

    fn is_static(&self) -> bool { true }
}

/// Competing power-law nonlinearities,
/// ```text
/// N(|ψ|) = -2 (p + 1) |ψ|^(p + 1) + α (q + 1) |ψ|^(q + 1)
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PowerLaw {
    pub p: f64,
    pub q: f64,
    pub alpha: f64,
}

impl PowerLaw {
    /// Evaluate `N` for a single amplitude.
    pub fn law(&self, a: f64) -> f64 {
        -2.0 * (self.p + 1.0) * a.powf(self.p + 1.0)
            + self.alpha * (self.q + 1.0) * a.powf(self.q + 1.0)
    }
}

impl Nonlinearity for PowerLaw {
    fn potential(
        &self,
        _grid: &Grid,
        v: &nd::Array1<f64>,
        q: &nd::Array1<C64>,
        _step: usize,
    ) -> nd::Array1<C64>
    {
        nd::Zip::from(v).and(q)
            .map_collect(|&vj, qj| C64::from(vj - self.law(qj.norm())))
    }
}

/// Periodically modulated linear gain with cubic self-interaction over a
/// static disorder landscape,
/// ```text
/// N(|ψ|, t) = -γ₁ (1 + ε sin(ω t)) |ψ| + γ₂ |ψ|²
/// W         = V + D η(x) - N
/// ```
/// where `η` is drawn uniformly from `[-1, 1]` at each grid point and `t` is
/// the evolution time at the start of the step.
#[derive(Clone, Debug, PartialEq)]
pub struct DisorderGain {
    pub gamma1: f64,
    pub gamma2: f64,
    pub epsilon: f64,
    pub omega: f64,
    disorder: nd::Array1<f64>,
}

impl DisorderGain {
    /// Draw a disorder landscape of strength `strength` over `grid` from a
    /// generator seeded with `seed`.
    pub fn new(
        grid: &Grid,
        gamma1: f64,
        gamma2: f64,
        strength: f64,
        epsilon: f64,
        omega: f64,
        seed: u64,
    ) -> Self
    {
        let mut rng = StdRng::seed_from_u64(seed);
        let disorder: nd::Array1<f64>
            = nd::Array1::from_shape_fn(
                grid.len(), |_| strength * rng.gen_range(-1.0..=1.0));
        Self { gamma1, gamma2, epsilon, omega, disorder }
    }

    /// The sampled disorder landscape `D η(x)`.
    pub fn disorder(&self) -> &nd::Array1<f64> { &self.disorder }

    /// Evaluate `N` for a single amplitude at time `t`.
    pub fn law(&self, a: f64, t: f64) -> f64 {
        let gain = self.gamma1 * (1.0 + self.epsilon * (self.omega * t).sin());
        -gain * a + self.gamma2 * a.powi(2)
    }
}

impl Nonlinearity for DisorderGain {
    fn potential(
        &self,
        grid: &Grid,
        v: &nd::Array1<f64>,
        q: &nd::Array1<C64>,
        step: usize,
    ) -> nd::Array1<C64>
    {
        let t = step as f64 * grid.dt();
        nd::Zip::from(v).and(&self.disorder).and(q)
            .map_collect(|&vj, &dj, qj| C64::from(vj + dj - self.law(qj.norm(), t)))
    }

    fn check(&self, grid: &Grid) -> Result<(), LengthError> {
        LengthError::check(grid.x(), &self.disorder)
    }
}
