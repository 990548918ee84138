//! AMReX plotfile backend: one snapshot directory.

mod fab;
mod header;

use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ndarray::{Array1, Array4, ArrayD, Axis};
use tracing::{debug, info};

use crate::error::OutputError;
use crate::reader::{OutputReader, VariableInfo};

pub use header::PlotfileHeader;

const HEADER_FILE: &str = "Header";
const LEVEL_0_DIR: &str = "Level_0";
const PAYLOAD_PREFIX: &str = "Cell_D_";

/// Reader over a single plotfile directory.
///
/// The header is parsed at open time. The level-0 payload is decoded on the
/// first data request and kept for the lifetime of the reader.
#[derive(Debug)]
pub struct PlotfileReader {
    path: PathBuf,
    header: PlotfileHeader,
    data: OnceCell<Array4<f64>>,
}

impl PlotfileReader {
    /// Open the plotfile directory at `path` and parse its `Header`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::FileNotFound`] if the header is missing, or
    /// [`OutputError::MalformedHeader`] if it cannot be parsed.
    pub fn open(path: &Path) -> Result<Self, OutputError> {
        let header_path = path.join(HEADER_FILE);
        if !header_path.is_file() {
            return Err(OutputError::FileNotFound { path: header_path });
        }
        let header = PlotfileHeader::read(&header_path)?;
        info!(
            path = %path.display(),
            n_vars = header.variables.len(),
            time = header.time,
            "opened plotfile"
        );
        Ok(Self {
            path: path.to_path_buf(),
            header,
            data: OnceCell::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &PlotfileHeader {
        &self.header
    }

    /// Simulation time of this snapshot.
    pub fn time(&self) -> f64 {
        self.header.time
    }

    fn component(&self, variable: &str) -> Result<usize, OutputError> {
        self.header
            .component(variable)
            .ok_or_else(|| OutputError::UnknownVariable {
                name: variable.to_string(),
                path: self.path.clone(),
            })
    }

    /// First `Cell_D_*` file in `Level_0`, by name.
    fn payload_path(&self) -> Result<PathBuf, OutputError> {
        let dir = self.path.join(LEVEL_0_DIR);
        let entries = std::fs::read_dir(&dir).map_err(|e| OutputError::io(&dir, &e))?;

        let mut payloads: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| {
                p.is_file()
                    && p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with(PAYLOAD_PREFIX))
            })
            .collect();
        payloads.sort();
        payloads
            .into_iter()
            .next()
            .ok_or(OutputError::MissingPayload { dir })
    }

    /// Decoded `(component, z, y, x)` data, decoding on first use.
    fn data(&self) -> Result<&Array4<f64>, OutputError> {
        if let Some(data) = self.data.get() {
            return Ok(data);
        }
        if self.header.finest_level > 0 {
            return Err(OutputError::NotImplemented {
                reason: format!(
                    "reading multi-level plotfiles ({} levels) is not supported; \
                     use NetCDF output for full data access",
                    self.header.finest_level + 1
                ),
            });
        }

        let payload = self.payload_path()?;
        let bytes = std::fs::read(&payload).map_err(|e| OutputError::io(&payload, &e))?;
        let (fab, array) = fab::decode(&bytes, &payload)?;

        if fab.n_cell() != self.header.n_cell() {
            return Err(OutputError::NotImplemented {
                reason: format!(
                    "payload box {:?} does not cover the domain {:?}; multi-box plotfiles \
                     are not supported",
                    fab.n_cell(),
                    self.header.n_cell()
                ),
            });
        }
        if fab.ncomp < self.header.variables.len() {
            return Err(OutputError::MalformedPayload {
                path: payload,
                reason: format!(
                    "{} components for {} variables",
                    fab.ncomp,
                    self.header.variables.len()
                ),
            });
        }

        debug!(path = %payload.display(), shape = ?array.shape(), "decoded plotfile payload");
        Ok(self.data.get_or_init(|| array))
    }
}

impl OutputReader for PlotfileReader {
    fn variables(&self) -> Result<Vec<String>, OutputError> {
        Ok(self.header.variables.clone())
    }

    fn dimensions(&self) -> Result<BTreeMap<String, usize>, OutputError> {
        let [nx, ny, nz] = self.header.n_cell();
        Ok(BTreeMap::from([
            ("x".to_string(), nx),
            ("y".to_string(), ny),
            ("z".to_string(), nz),
            ("time".to_string(), 1),
        ]))
    }

    fn time_steps(&self) -> Result<Vec<f64>, OutputError> {
        Ok(vec![self.header.time])
    }

    /// Cell-centre positions from `lo + dx/2` to `hi - dx/2`.
    fn coordinates(&self) -> Result<BTreeMap<String, Array1<f64>>, OutputError> {
        let h = &self.header;
        let n = h.n_cell();
        Ok(["x", "y", "z"]
            .into_iter()
            .enumerate()
            .take(h.ndim)
            .map(|(axis, name)| {
                let half = h.cell_size[axis] / 2.0;
                let coord = Array1::linspace(h.prob_lo[axis] + half, h.prob_hi[axis] - half, n[axis]);
                (name.to_string(), coord)
            })
            .collect())
    }

    fn field(&self, variable: &str, time_index: usize) -> Result<ArrayD<f64>, OutputError> {
        let comp = self.component(variable)?;
        if time_index != 0 {
            return Err(OutputError::TimeIndexOutOfRange {
                index: time_index,
                len: 1,
            });
        }
        let data = self.data()?;
        Ok(data.index_axis(Axis(0), comp).to_owned().into_dyn())
    }

    fn variable_info(&self, variable: &str) -> Result<VariableInfo, OutputError> {
        self.component(variable)?;
        Ok(VariableInfo {
            units: String::new(),
            long_name: variable.to_string(),
            shape: self.header.field_shape().to_vec(),
            dims: vec!["z".into(), "y".into(), "x".into()],
        })
    }

    fn close(&mut self) -> Result<(), OutputError> {
        self.data.take();
        Ok(())
    }
}
