//! # remora-sweep
//!
//! Parameter sweeps over REMORA control files.
//!
//! A sweep is a base parameter mapping plus a list of [`SweepAxis`]es.
//! [`generate_combinations`] expands the axes into their cartesian product
//! and [`generate_sweep_inputs`] writes one control file per combination.

mod axis;
mod combine;
mod error;
mod generate;

pub use axis::SweepAxis;
pub use combine::{Combination, generate_combinations};
pub use error::SweepError;
pub use generate::{INPUTS_EXTENSION, SweepConfig, generate_sweep_inputs, render_name};
