//! Format detection and the backend-agnostic [`Output`] handle.

use std::collections::BTreeMap;
use std::path::Path;

use ndarray::{Array1, ArrayD};
use tracing::debug;

use crate::error::OutputError;
use crate::netcdf_read::NetCdfReader;
use crate::plotfile::PlotfileReader;
use crate::reader::{OutputReader, VariableInfo};
use crate::series::{PlotfileSeries, snapshot_dirs};

/// File extensions opened with the NetCDF backend.
pub const NETCDF_EXTENSIONS: [&str; 3] = ["nc", "nc4", "cdf"];

/// An opened output dataset of whichever format was detected.
#[derive(Debug)]
pub enum Output {
    NetCdf(NetCdfReader),
    Plotfile(PlotfileReader),
    Series(PlotfileSeries),
}

impl Output {
    /// Short name of the detected format.
    pub fn format_name(&self) -> &'static str {
        match self {
            Output::NetCdf(_) => "netcdf",
            Output::Plotfile(_) => "plotfile",
            Output::Series(_) => "plotfile series",
        }
    }

    fn reader(&self) -> &dyn OutputReader {
        match self {
            Output::NetCdf(r) => r,
            Output::Plotfile(r) => r,
            Output::Series(r) => r,
        }
    }

    fn reader_mut(&mut self) -> &mut dyn OutputReader {
        match self {
            Output::NetCdf(r) => r,
            Output::Plotfile(r) => r,
            Output::Series(r) => r,
        }
    }
}

impl OutputReader for Output {
    fn variables(&self) -> Result<Vec<String>, OutputError> {
        self.reader().variables()
    }

    fn dimensions(&self) -> Result<BTreeMap<String, usize>, OutputError> {
        self.reader().dimensions()
    }

    fn time_steps(&self) -> Result<Vec<f64>, OutputError> {
        self.reader().time_steps()
    }

    fn coordinates(&self) -> Result<BTreeMap<String, Array1<f64>>, OutputError> {
        self.reader().coordinates()
    }

    fn field(&self, variable: &str, time_index: usize) -> Result<ArrayD<f64>, OutputError> {
        self.reader().field(variable, time_index)
    }

    fn variable_info(&self, variable: &str) -> Result<VariableInfo, OutputError> {
        self.reader().variable_info(variable)
    }

    fn close(&mut self) -> Result<(), OutputError> {
        self.reader_mut().close()
    }
}

fn has_netcdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| NETCDF_EXTENSIONS.contains(&e))
}

/// Open `path`, choosing the backend from what is on disk.
///
/// 1. A file with a NetCDF extension opens as [`Output::NetCdf`].
/// 2. A directory with a `Header` file opens as [`Output::Plotfile`].
/// 3. A directory with snapshot subdirectories opens as [`Output::Series`].
///
/// # Errors
///
/// Returns [`OutputError::FileNotFound`] if `path` does not exist, or
/// [`OutputError::UnrecognizedFormat`] if no check matches.
pub fn open_output(path: &Path) -> Result<Output, OutputError> {
    if !path.exists() {
        return Err(OutputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    if path.is_file() && has_netcdf_extension(path) {
        debug!(path = %path.display(), "detected netcdf output");
        return Ok(Output::NetCdf(NetCdfReader::open(path)?));
    }

    if path.is_dir() {
        if path.join("Header").is_file() {
            debug!(path = %path.display(), "detected plotfile");
            return Ok(Output::Plotfile(PlotfileReader::open(path)?));
        }
        if !snapshot_dirs(path)?.is_empty() {
            debug!(path = %path.display(), "detected plotfile series");
            return Ok(Output::Series(PlotfileSeries::open(path)?));
        }
    }

    Err(OutputError::UnrecognizedFormat {
        path: path.to_path_buf(),
        checks: vec![
            format!("file with extension {}", NETCDF_EXTENSIONS.join("/")),
            "directory with a Header file".to_string(),
            "directory with pltNNNNN snapshot subdirectories".to_string(),
        ],
    })
}
