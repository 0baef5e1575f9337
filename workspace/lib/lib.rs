//! Shared plumbing for the driver binaries.

use std::{ path::{ Path, PathBuf }, str::FromStr };
use log::LevelFilter;

pub use anyhow;
pub use ndarray_npy;

/// Initialize `env_logger` at the given level (`"off"`, `"error"`, ...,
/// `"trace"`), defaulting to `"info"`.
pub fn init_logging(verbosity: Option<&str>) -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::from_str(verbosity.unwrap_or("info"))?)
        .init();
    Ok(())
}

/// Create a directory (and its parents) if it doesn't already exist,
/// returning its path.
pub fn mkdir<P>(dir: P) -> anyhow::Result<PathBuf>
where P: AsRef<Path>
{
    let dir = dir.as_ref().to_path_buf();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Write a set of named arrays to a `.npz` archive.
///
/// ```ignore
/// write_npz!(
///     outdir.join("run.npz"),
///     arrays: {
///         "x" => grid.x(),
///         "q" => &q,
///     }
/// )?;
/// ```
#[macro_export]
macro_rules! write_npz {
    (
        $path:expr,
        arrays: { $( $name:expr => $arr:expr ),* $(,)? } $(,)?
    ) => {
        (|| -> $crate::anyhow::Result<()> {
            let file = std::fs::File::create($path)?;
            let mut npz = $crate::ndarray_npy::NpzWriter::new(file);
            $( npz.add_array($name, $arr)?; )*
            npz.finish()?;
            Ok(())
        })()
    }
}
