//! Emitting one control file per sweep combination.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use remora_params::{ParamMap, WriterConfig, clean_params, write_file};
use tracing::{debug, info};

use crate::axis::SweepAxis;
use crate::combine::{Combination, generate_combinations};
use crate::error::SweepError;

/// File extension of generated control files.
pub const INPUTS_EXTENSION: &str = "inputs";

/// Configuration for [`generate_sweep_inputs`].
///
/// Without a name template, files are named `sweep_000`, `sweep_001`, ...
/// in generation order.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Parameters every combination starts from.
    base: ParamMap,
    axes: Vec<SweepAxis>,
    /// Name with `{key}` placeholders for swept keys.
    name_template: Option<String>,
    output_dir: PathBuf,
    header_comment: Option<String>,
    /// Apply [`clean_params`] to each generated mapping.
    clean: bool,
}

impl SweepConfig {
    pub fn new(base: ParamMap, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base,
            axes: Vec::new(),
            name_template: None,
            output_dir: output_dir.into(),
            header_comment: None,
            clean: false,
        }
    }

    /// Append an axis. Axes vary in the order they were added, the first
    /// slowest.
    pub fn with_axis(mut self, axis: SweepAxis) -> Self {
        self.axes.push(axis);
        self
    }

    pub fn with_axes(mut self, axes: impl IntoIterator<Item = SweepAxis>) -> Self {
        self.axes.extend(axes);
        self
    }

    pub fn with_name_template(mut self, template: impl Into<String>) -> Self {
        self.name_template = Some(template.into());
        self
    }

    pub fn with_header_comment(mut self, comment: impl Into<String>) -> Self {
        self.header_comment = Some(comment.into());
        self
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn axes(&self) -> &[SweepAxis] {
        &self.axes
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Replace every `{key}` whose key is in `combo` with its value. Other
/// placeholders and unmatched braces are kept verbatim.
pub fn render_name(template: &str, combo: &Combination) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match combo.get(key) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => out.push_str(&rest[open..open + close + 2]),
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Write one control file per combination and return `(name, path)` pairs
/// in generation order.
///
/// Each file holds the base parameters with the combination's values
/// overlaid. The output directory is created if needed.
///
/// # Errors
///
/// Returns [`SweepError::DuplicateName`] if two combinations render to the
/// same name, or propagates axis, directory and write failures. Files
/// written before a failure are left in place.
pub fn generate_sweep_inputs(config: &SweepConfig) -> Result<Vec<(String, PathBuf)>, SweepError> {
    let combos = generate_combinations(&config.axes)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|e| SweepError::CreateDir {
        path: config.output_dir.clone(),
        reason: e.to_string(),
    })?;

    let mut writer = WriterConfig::default();
    if let Some(comment) = &config.header_comment {
        writer = writer.with_header_comment(comment.clone());
    }

    let mut seen = HashSet::new();
    let mut results = Vec::with_capacity(combos.len());

    for (index, combo) in combos.iter().enumerate() {
        let name = match &config.name_template {
            Some(template) => render_name(template, combo),
            None => format!("sweep_{index:03}"),
        };
        if !seen.insert(name.clone()) {
            return Err(SweepError::DuplicateName { name });
        }

        let mut params = config.base.clone();
        for (key, value) in combo {
            params.insert(key.clone(), value.clone());
        }
        if config.clean {
            params = clean_params(&params);
        }

        let path = config
            .output_dir
            .join(format!("{name}.{INPUTS_EXTENSION}"));
        write_file(&params, &path, &writer)?;
        debug!(name, path = %path.display(), "wrote sweep input");
        results.push((name, path));
    }

    info!(
        n_files = results.len(),
        output_dir = %config.output_dir.display(),
        "generated sweep inputs"
    );
    Ok(results)
}
