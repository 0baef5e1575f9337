//! Best-effort, throttled export of density profiles during a run.
//!
//! Exporters only ever read the current snapshot. Failures are reported to
//! the caller of [`Export::emit`]; the propagation engine logs them and moves
//! on, so an unwritable destination never aborts a run.

use std::{
    fs,
    io::{ self, BufWriter, Write },
    path::{ Path, PathBuf },
};
use ndarray as nd;

/// Receives `(x, |ψ|², V)` frames at throttled steps.
pub trait Export {
    /// Handle the frame for step `step`.
    fn emit(
        &mut self,
        step: usize,
        x: &nd::Array1<f64>,
        density: &nd::Array1<f64>,
        v: &nd::Array1<f64>,
    ) -> io::Result<()>;
}

/// Decides which steps of a run are exported.
///
/// Frames are emitted on steps `i` with `i % cadence == 0`, where
/// `cadence = max(1, timesteps / 100)`. Runs of fewer than 200 steps export
/// every step (up to 199 frames); longer runs export between 100 and 150
/// frames.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Throttle {
    cadence: usize,
}

impl Throttle {
    /// Target number of frames per run.
    pub const FRAMES: usize = 100;

    /// Set the cadence for a run of `timesteps` steps.
    pub fn new(timesteps: usize) -> Self {
        Self { cadence: (timesteps / Self::FRAMES).max(1) }
    }

    /// Number of steps between successive frames.
    pub fn cadence(&self) -> usize { self.cadence }

    /// Return `true` if step `step` should be exported.
    pub fn should_emit(&self, step: usize) -> bool { step % self.cadence == 0 }
}

/// Writes each frame to its own tab-separated text file,
/// `output{step:05}.dat`, with one `x  density  potential` line per grid point.
#[derive(Clone, Debug)]
pub struct DatExport {
    dir: PathBuf,
}

impl DatExport {
    /// Write files under `dir`, which is created on first use.
    pub fn new<P>(dir: P) -> Self
    where P: AsRef<Path>
    {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// Destination directory.
    pub fn dir(&self) -> &Path { &self.dir }

    /// Path of the file written for step `step`.
    pub fn path(&self, step: usize) -> PathBuf {
        self.dir.join(format!("output{:05}.dat", step))
    }
}

impl Export for DatExport {
    fn emit(
        &mut self,
        step: usize,
        x: &nd::Array1<f64>,
        density: &nd::Array1<f64>,
        v: &nd::Array1<f64>,
    ) -> io::Result<()>
    {
        fs::create_dir_all(&self.dir)?;
        let mut out = BufWriter::new(fs::File::create(self.path(step))?);
        for ((xj, dj), vj) in x.iter().zip(density).zip(v) {
            writeln!(out, "{}\t{}\t{}", xj, dj, vj)?;
        }
        out.flush()
    }
}
