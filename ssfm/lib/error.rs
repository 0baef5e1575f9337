//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring equal-length arrays encounters arrays
/// with unequal length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when grid or run parameters violate their preconditions.
///
/// These are raised before any computation takes place and can only be fixed
/// by correcting the inputs.
#[derive(Debug, Error)]
pub enum ParamError {
    /// Returned when a non-positive or non-finite box half-width is
    /// encountered.
    #[error("xmax must be positive and finite; got {0}")]
    BadXmax(f64),

    /// Returned when the grid resolution is zero or odd.
    #[error("resolution must be a positive even integer; got {0}")]
    BadResolution(usize),

    /// Returned when the time step is zero or non-finite.
    #[error("dt must be non-zero and finite; got {0}")]
    BadDt(f64),

    /// Returned when zero time steps are requested.
    #[error("timesteps must be greater than 0; got {0}")]
    BadTimesteps(usize),

    /// Returned when a soliton profile is requested outside its domain of
    /// existence, `omega > 0` and `alpha * omega <= 1`.
    #[error("soliton profile requires omega > 0 and alpha * omega <= 1; got omega = {omega}, alpha = {alpha}")]
    BadSoliton { omega: f64, alpha: f64 },
}

impl ParamError {
    pub(crate) fn check_xmax(xmax: f64) -> Result<(), Self> {
        (xmax > 0.0 && xmax.is_finite()).then_some(()).ok_or(Self::BadXmax(xmax))
    }

    pub(crate) fn check_resolution(res: usize) -> Result<(), Self> {
        (res != 0 && res % 2 == 0).then_some(()).ok_or(Self::BadResolution(res))
    }

    pub(crate) fn check_dt(dt: f64) -> Result<(), Self> {
        (dt != 0.0 && dt.is_finite()).then_some(()).ok_or(Self::BadDt(dt))
    }

    pub(crate) fn check_timesteps(timesteps: usize) -> Result<(), Self> {
        (timesteps != 0).then_some(()).ok_or(Self::BadTimesteps(timesteps))
    }
}

/// Returned from time-dependent wavefunction solver functions.
#[derive(Debug, Error)]
pub enum TError {
    /// Returned when the total probability of the field is not positive at
    /// the renormalization step of imaginary-time propagation, i.e. the field
    /// has decayed to numerical zero.
    #[error("degenerate state: renormalization factor must be positive; got {renorm} at step {step}")]
    Degenerate { step: usize, renorm: f64 },

    /// [`ParamError`]
    #[error("parameter error: {0}")]
    Param(#[from] ParamError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl TError {
    pub(crate) fn check_renorm(step: usize, renorm: f64) -> Result<(), Self> {
        (renorm > 0.0).then_some(()).ok_or(Self::Degenerate { step, renorm })
    }
}

/// Returned from functions in [`config`][crate::config].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when a configuration file cannot be read.
    #[error("unable to read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },

    /// Returned when a configuration file is not valid TOML or does not match
    /// the expected layout.
    #[error("unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// [`ParamError`]
    #[error("parameter error: {0}")]
    Param(#[from] ParamError),
}
