//! # remora-validate
//!
//! Cross-parameter validation of REMORA control files.
//!
//! [`validate`] runs the fixed rule catalogue `R001`..`R009` (see
//! [`RULES`]) and returns every finding; nothing here fails. Callers decide
//! what to do with errors, typically via [`has_errors`].
//! [`check_schema`] adds per-parameter bound, option and dependency checks
//! against a [`remora_params::Schema`].

mod engine;
mod message;
mod rules;
mod schema_check;

pub use engine::{ValidationContext, validate, validate_with};
pub use message::{Severity, ValidationMessage, has_errors};
pub use rules::{RULES, Rule};
pub use schema_check::check_schema;
