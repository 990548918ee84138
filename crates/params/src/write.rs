//! Control-file writer configuration and serialization.

use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::ParamError;
use crate::schema::Schema;
use crate::value::ParamMap;

/// Configuration for serializing a [`ParamMap`] to control-file text.
///
/// The [`Default`] writes every non-empty value with no header comment.
/// Supplying a schema with `include_defaults == false` drops values equal to
/// their schema default.
#[derive(Debug, Clone, Default)]
pub struct WriterConfig<'a> {
    /// Schema used to look up default values.
    schema: Option<&'a Schema>,
    /// Whether values equal to their default are still written.
    include_defaults: bool,
    /// Multi-line comment emitted before the first group.
    header_comment: Option<String>,
}

impl<'a> WriterConfig<'a> {
    /// Set the schema consulted for default omission.
    pub fn with_schema(mut self, schema: &'a Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Write values even when they equal the schema default.
    pub fn with_include_defaults(mut self, include: bool) -> Self {
        self.include_defaults = include;
        self
    }

    /// Set the header comment. Each line becomes `# <line>`.
    pub fn with_header_comment(mut self, comment: impl Into<String>) -> Self {
        self.header_comment = Some(comment.into());
        self
    }

    fn skips_default(&self, key: &str, value: &crate::Value) -> bool {
        if self.include_defaults {
            return false;
        }
        self.schema
            .and_then(|s| s.default_for(key))
            .is_some_and(|default| value.loosely_eq(default))
    }
}

/// Serialize parameters to control-file text.
///
/// Keys are grouped by the text before their first `.`, groups appear in
/// first-seen order, each under a `# <prefix>` line and separated by a blank
/// line. Empty strings and empty lists are never written. A group whose
/// every key was dropped is omitted along with its header.
pub fn write_str(params: &ParamMap, config: &WriterConfig<'_>) -> String {
    let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for key in params.keys() {
        let prefix = key.split('.').next().unwrap_or(key);
        groups.entry(prefix).or_default().push(key);
    }

    let mut lines: Vec<String> = Vec::new();

    if let Some(comment) = &config.header_comment {
        for line in comment.lines() {
            if line.is_empty() {
                lines.push("#".to_string());
            } else {
                lines.push(format!("# {line}"));
            }
        }
        lines.push(String::new());
    }

    let mut first_group = true;
    for (prefix, keys) in &groups {
        let section: Vec<String> = keys
            .iter()
            .filter_map(|&key| {
                let value = &params[key];
                if value.is_empty_value() || config.skips_default(key, value) {
                    return None;
                }
                Some(format!("{key} = {value}"))
            })
            .collect();

        if section.is_empty() {
            continue;
        }

        if !first_group {
            lines.push(String::new());
        }
        lines.push(format!("# {prefix}"));
        lines.extend(section);
        first_group = false;
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Serialize parameters and write them to `path`.
///
/// # Errors
///
/// Returns [`ParamError::Io`] if the file cannot be written.
pub fn write_file(
    params: &ParamMap,
    path: &Path,
    config: &WriterConfig<'_>,
) -> Result<(), ParamError> {
    let text = write_str(params, config);
    std::fs::write(path, text).map_err(|e| ParamError::io(path, &e))?;
    debug!(path = %path.display(), n_params = params.len(), "wrote control file");
    Ok(())
}
