//! Inspect command: summarize an output dataset.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use remora_output::{OutputReader, open_output};

use crate::cli::InspectArgs;

pub fn run(args: InspectArgs) -> Result<()> {
    let mut output = open_output(&args.path)
        .with_context(|| format!("failed to open output: {}", args.path.display()))?;
    info!(path = %args.path.display(), format = output.format_name(), "output opened");

    let result = summarize(&output, &args.path, &args);
    output
        .close()
        .with_context(|| format!("failed to close output: {}", args.path.display()))?;
    result
}

fn summarize(output: &impl OutputReader, path: &Path, args: &InspectArgs) -> Result<()> {
    println!("{}", path.display());

    let dims = output.dimensions().context("failed to read dimensions")?;
    let dims: Vec<String> = dims.iter().map(|(name, len)| format!("{name}={len}")).collect();
    println!("dimensions: {}", dims.join(" "));

    let times = output.time_steps().context("failed to read time steps")?;
    match (times.first(), times.last()) {
        (Some(first), Some(last)) => {
            println!("time steps: {} ({first} .. {last})", times.len());
        }
        _ => println!("time steps: 0"),
    }

    println!("variables:");
    for name in output.variables().context("failed to list variables")? {
        let info = output
            .variable_info(&name)
            .with_context(|| format!("failed to read metadata for {name}"))?;
        let units = if info.units.is_empty() {
            String::new()
        } else {
            format!(" [{}]", info.units)
        };
        println!("  {name}({}) {:?}{units}", info.dims.join(", "), info.shape);
    }

    if let Some(variable) = &args.variable {
        let stats = output
            .statistics(variable, args.time)
            .with_context(|| format!("failed to read {variable} at time index {}", args.time))?;
        println!(
            "{variable} @ t={}: min={} max={} mean={}",
            args.time, stats.min, stats.max, stats.mean
        );
    }
    Ok(())
}
