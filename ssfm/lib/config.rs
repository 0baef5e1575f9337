//! Run configuration, deserialized from TOML.
//!
//! ```
//! use ssfm::config::SimConfig;
//!
//! let config: SimConfig = r#"
//!     xmax = 5.0
//!     resolution = 256
//!     dt = 0.05
//!     timesteps = 100
//!
//!     [potential]
//!     kind = "harmonic"
//!     offset = 0.0
//!
//!     [profile]
//!     kind = "gaussian"
//!     offset = -1.0
//! "#.parse().unwrap();
//! let mut sim = config.build().unwrap();
//! let q = sim.run().unwrap();
//! assert_eq!(q.dim(), (100, 256));
//! ```

use std::{ path::{ Path, PathBuf }, str::FromStr };
use ndarray as nd;
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ ConfigError, ParamError },
    export::DatExport,
    grid::Grid,
    nonlinear::{ DisorderGain, Linear, Nonlinearity, PowerLaw },
    operators::{ OperatorSet, Potential, Profile, TimeMode },
    timedep::{ Propagator, TResult },
};

/// Choice of [`Nonlinearity`], with its coefficients.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LawConfig {
    /// [`Linear`]
    #[default]
    Linear,
    /// [`PowerLaw`]
    PowerLaw { p: f64, q: f64, alpha: f64 },
    /// [`DisorderGain`]; `disorder` is the landscape strength `D`.
    DisorderGain {
        gamma1: f64,
        gamma2: f64,
        #[serde(default)]
        disorder: f64,
        #[serde(default)]
        epsilon: f64,
        #[serde(default)]
        omega: f64,
        #[serde(default)]
        seed: u64,
    },
}

impl LawConfig {
    /// Instantiate the law over a grid.
    pub fn build(&self, grid: &Grid) -> Box<dyn Nonlinearity> {
        match self {
            Self::Linear => Box::new(Linear),
            Self::PowerLaw { p, q, alpha } => {
                Box::new(PowerLaw { p: *p, q: *q, alpha: *alpha })
            },
            Self::DisorderGain { gamma1, gamma2, disorder, epsilon, omega, seed } => {
                Box::new(DisorderGain::new(
                    grid, *gamma1, *gamma2, *disorder, *epsilon, *omega, *seed))
            },
        }
    }
}

/// Settings for [`DatExport`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output directory.
    pub dir: PathBuf,
}

/// All inputs to a single run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Half-width of the periodic box.
    pub xmax: f64,
    /// Number of grid points; must be even.
    pub resolution: usize,
    /// Time step.
    pub dt: f64,
    /// Number of steps.
    pub timesteps: usize,
    /// Evolve in imaginary time, renormalizing after every step.
    #[serde(default)]
    pub imaginary_time: bool,
    /// Potential; defaults to a centered harmonic trap.
    #[serde(default)]
    pub potential: Potential,
    /// Initial field; defaults to a centered Gaussian.
    #[serde(default)]
    pub profile: Profile,
    /// Nonlinear term; defaults to none.
    #[serde(default)]
    pub nonlinearity: LawConfig,
    /// Write throttled `.dat` frames if present.
    #[serde(default)]
    pub export: Option<ExportConfig>,
}

impl FromStr for SimConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Read a [`SimConfig`] from a TOML file.
pub fn read_toml<P>(path: P) -> Result<SimConfig, ConfigError>
where P: AsRef<Path>
{
    let path = path.as_ref();
    let contents
        = std::fs::read_to_string(path)
        .map_err(|source| {
            ConfigError::Read { path: path.display().to_string(), source }
        })?;
    contents.parse()
}

impl SimConfig {
    /// Validate the grid parameters and derive the [`Grid`].
    pub fn grid(&self) -> Result<Grid, ParamError> {
        Grid::new(
            self.xmax,
            self.resolution,
            self.dt,
            self.timesteps,
            TimeMode::from_flag(self.imaginary_time),
        )
    }

    /// Validate everything and assemble a ready-to-run [`Simulation`].
    pub fn build(&self) -> Result<Simulation, ConfigError> {
        self.profile.check()?;
        let grid = self.grid()?;
        let ops = OperatorSet::new(
            &grid, |x| self.potential.eval(x), |x| self.profile.eval(x));
        let law = self.nonlinearity.build(&grid);
        let export = self.export.as_ref().map(|ex| DatExport::new(&ex.dir));
        Ok(Simulation { grid, ops, law, export })
    }
}

/// A fully assembled run.
pub struct Simulation {
    pub grid: Grid,
    pub ops: OperatorSet,
    pub law: Box<dyn Nonlinearity>,
    pub export: Option<DatExport>,
}

impl Simulation {
    /// Run all steps, exporting frames if an exporter is configured.
    pub fn run(&mut self) -> TResult<nd::Array2<C64>> {
        let prop = Propagator::new(&self.grid, &self.ops, self.law.as_ref())?;
        match self.export.as_mut() {
            Some(export) => prop.run_exported(export),
            None => prop.run(),
        }
    }
}
