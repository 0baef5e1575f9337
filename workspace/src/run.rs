use std::path::PathBuf;
use clap::Parser;
use lib::{ init_logging, mkdir, write_npz };
use ssfm::{ config::read_toml, energy };

/// Run a split-step simulation described by a TOML file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the run configuration.
    #[arg(short, long)]
    config: PathBuf,

    /// Log level: off, error, warn, info, debug, or trace.
    #[arg(short, long, default_value = "info")]
    verbosity: String,

    /// Directory for the final `.npz` archive.
    #[arg(short, long, default_value = "output")]
    output: PathBuf,
}

fn main() -> lib::anyhow::Result<()> {
    let args = Args::parse();
    init_logging(Some(args.verbosity.as_str()))?;

    let config = read_toml(&args.config)?;
    log::info!("loaded {}", args.config.display());
    log::debug!("{:?}", config);
    let mut sim = config.build()?;
    let q = sim.run()?;
    let e = energy::energies(&sim.grid, &sim.ops.v, &q)?;
    let n = energy::norms(&sim.grid, &q);

    let name
        = args.config.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("run");
    let outdir = mkdir(&args.output)?;
    let outfile = outdir.join(format!("{}.npz", name));
    write_npz!(
        &outfile,
        arrays: {
            "x" => sim.grid.x(),
            "t" => &sim.grid.times(),
            "v" => &sim.ops.v,
            "q" => &q,
            "e" => &e,
            "n" => &n,
        }
    )?;
    log::info!("wrote {}", outfile.display());
    Ok(())
}
