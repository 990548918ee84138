use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tools for REMORA ocean model runs.
#[derive(Parser)]
#[command(
    name = "remora",
    version,
    about = "Configure, validate, sweep and inspect REMORA runs"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Check a control file against the rule catalogue.
    Validate(ValidateArgs),
    /// Re-emit a control file in canonical layout.
    Format(FormatArgs),
    /// Show parameter differences between two control files.
    Diff(DiffArgs),
    /// Generate one control file per parameter combination.
    Sweep(SweepArgs),
    /// Summarize a NetCDF file, plotfile or plotfile series.
    Inspect(InspectArgs),
}

/// Arguments for the `validate` subcommand.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Control file to check.
    pub file: PathBuf,

    /// Number of MPI ranks the run will use.
    #[arg(short, long, default_value_t = 1)]
    pub procs: usize,

    /// Also check values against the built-in parameter schema.
    #[arg(long)]
    pub schema: bool,
}

/// Arguments for the `format` subcommand.
#[derive(clap::Args)]
pub struct FormatArgs {
    /// Control file to read.
    pub file: PathBuf,

    /// Write here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Drop face boundary types on periodic axes and a zero stop time.
    #[arg(long)]
    pub clean: bool,

    /// Omit values equal to their schema default.
    #[arg(long = "skip-defaults")]
    pub skip_defaults: bool,

    /// Comment placed at the top of the file.
    #[arg(long)]
    pub header: Option<String>,
}

/// Arguments for the `diff` subcommand.
#[derive(clap::Args)]
pub struct DiffArgs {
    /// First control file.
    pub a: PathBuf,

    /// Second control file.
    pub b: PathBuf,
}

/// Arguments for the `sweep` subcommand.
#[derive(clap::Args)]
pub struct SweepArgs {
    /// Path to sweep TOML definition.
    #[arg(short, long, default_value = "sweep.toml")]
    pub config: PathBuf,
}

/// Arguments for the `inspect` subcommand.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// NetCDF file, plotfile directory or directory of plotfiles.
    pub path: PathBuf,

    /// Print statistics for this variable.
    #[arg(long)]
    pub variable: Option<String>,

    /// Time index for `--variable`.
    #[arg(short, long, default_value_t = 0)]
    pub time: usize,
}
