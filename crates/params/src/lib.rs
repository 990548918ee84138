//! # remora-params
//!
//! Read and write REMORA control files (`key = value` text consumed by the
//! solver), describe the parameters the solver understands, and compare two
//! configurations.
//!
//! Parsing is lenient: lines that do not fit the grammar are dropped.
//! Writing groups keys by prefix and can omit schema defaults.

mod clean;
mod diff;
mod error;
mod parse;
mod schema;
mod value;
mod write;

pub use clean::{FACE_BC_KEYS, PERIODIC_KEY, STOP_TIME_KEY, clean_params};
pub use diff::{DiffEntry, DiffKind, diff_parameters};
pub use error::ParamError;
pub use parse::{infer_token, parse_file, parse_str};
pub use schema::{ParamKind, ParameterDefinition, Schema};
pub use value::{ParamMap, Value, format_float};
pub use write::{WriterConfig, write_file, write_str};
