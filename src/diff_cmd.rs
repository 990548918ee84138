//! Diff command: key-by-key comparison of two control files.

use anyhow::{Context, Result};

use remora_params::{DiffEntry, DiffKind, Value, diff_parameters, parse_file};

use crate::cli::DiffArgs;

pub fn run(args: DiffArgs) -> Result<()> {
    let a = parse_file(&args.a)
        .with_context(|| format!("failed to read control file: {}", args.a.display()))?;
    let b = parse_file(&args.b)
        .with_context(|| format!("failed to read control file: {}", args.b.display()))?;

    for entry in diff_parameters(&a, &b) {
        println!("{}", render(&entry));
    }
    Ok(())
}

/// One line per difference: `+` added, `-` removed, `~` changed.
fn render(entry: &DiffEntry) -> String {
    match entry.kind {
        DiffKind::Added => format!("+ {} = {}", entry.key, show(&entry.value_b)),
        DiffKind::Removed => format!("- {} = {}", entry.key, show(&entry.value_a)),
        DiffKind::Changed => format!(
            "~ {}: {} -> {}",
            entry.key,
            show(&entry.value_a),
            show(&entry.value_b)
        ),
    }
}

fn show(value: &Option<Value>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}
