//! Sweep command: expand a TOML sweep definition into control files.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use remora_sweep::generate_sweep_inputs;

use crate::cli::SweepArgs;
use crate::config::SweepToml;

pub fn run(args: SweepArgs) -> Result<()> {
    let _cmd = info_span!("sweep").entered();

    let toml = SweepToml::load(&args.config)?;
    if toml.axes.is_empty() {
        bail!("no sweep axes: add at least one [[axis]] table to {}", args.config.display());
    }

    let config_dir = args.config.parent().unwrap_or(Path::new("."));
    let config = toml.into_sweep_config(config_dir)?;
    info!(
        n_axes = config.axes().len(),
        output_dir = %config.output_dir().display(),
        "sweep configured"
    );

    let results = generate_sweep_inputs(&config).context("sweep generation failed")?;
    for (name, path) in &results {
        println!("{name}\t{}", path.display());
    }
    Ok(())
}
