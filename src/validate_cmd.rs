//! Validate command: run the rule catalogue over a control file.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use remora_params::{Schema, parse_file};
use remora_validate::{ValidationContext, check_schema, has_errors, validate_with};

use crate::cli::ValidateArgs;

/// Print every finding and return exit status 1 if any is an error.
pub fn run(args: ValidateArgs) -> Result<i32> {
    let _cmd = info_span!("validate").entered();

    let params = parse_file(&args.file)
        .with_context(|| format!("failed to read control file: {}", args.file.display()))?;
    info!(path = %args.file.display(), n_params = params.len(), "control file loaded");

    let context = ValidationContext::default().with_num_procs(args.procs);
    let mut messages = validate_with(&params, &context);
    if args.schema {
        messages.extend(check_schema(&params, &Schema::remora()));
    }

    for message in &messages {
        println!("{message}");
    }

    if messages.is_empty() {
        println!("{}: no issues found", args.file.display());
    }

    Ok(if has_errors(&messages) { 1 } else { 0 })
}
