use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use remora_params::parse_file;
use remora_sweep::{SweepAxis, SweepConfig};

/// Sweep definition read from TOML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepToml {
    /// Control file every combination starts from.
    pub base: PathBuf,

    /// Directory receiving the generated files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub name_template: Option<String>,

    #[serde(default)]
    pub header_comment: Option<String>,

    /// Apply the cleanup transform to every generated mapping.
    #[serde(default)]
    pub clean: bool,

    #[serde(rename = "axis", default)]
    pub axes: Vec<SweepAxis>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("sweep")
}

impl SweepToml {
    /// Read and parse a sweep definition.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read sweep config: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse sweep TOML")
    }

    /// Build the generator configuration. Relative `base` and `output_dir`
    /// paths are taken relative to `config_dir`.
    pub fn into_sweep_config(self, config_dir: &Path) -> Result<SweepConfig> {
        let base_path = config_dir.join(&self.base);
        let base = parse_file(&base_path)
            .with_context(|| format!("failed to read base control file: {}", base_path.display()))?;

        let mut config = SweepConfig::new(base, config_dir.join(&self.output_dir))
            .with_axes(self.axes)
            .with_clean(self.clean);
        if let Some(template) = self.name_template {
            config = config.with_name_template(template);
        }
        if let Some(comment) = self.header_comment {
            config = config.with_header_comment(comment);
        }
        Ok(config)
    }
}
