//! Time series over a directory of plotfile snapshots.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ndarray::{Array1, ArrayD};
use tracing::{info, warn};

use crate::error::OutputError;
use crate::plotfile::PlotfileReader;
use crate::reader::{OutputReader, VariableInfo};

const SNAPSHOT_PREFIX: &str = "plt";

/// Returns `true` for snapshot directory names such as `plt00100`.
///
/// Backups (`plt00100.old.1234`, `plt_backup`) never match.
pub fn is_snapshot_name(name: &str) -> bool {
    if name.ends_with(".old") || name.contains(".old.") || name.contains("backup") {
        return false;
    }
    name.strip_prefix(SNAPSHOT_PREFIX)
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Subdirectories of `root` with a snapshot name and a `Header` file,
/// sorted by name.
pub fn snapshot_dirs(root: &Path) -> Result<Vec<PathBuf>, OutputError> {
    let entries = std::fs::read_dir(root).map_err(|e| OutputError::io(root, &e))?;
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| {
            p.is_dir()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(is_snapshot_name)
                && p.join("Header").is_file()
        })
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Reader over every snapshot under one run directory.
///
/// Time index `i` selects the `i`-th snapshot in name order. Variable
/// names, coordinates and metadata come from the first snapshot.
#[derive(Debug)]
pub struct PlotfileSeries {
    path: PathBuf,
    snapshots: Vec<PlotfileReader>,
}

impl PlotfileSeries {
    /// Discover and open every snapshot under `path`.
    ///
    /// Snapshots whose header cannot be parsed are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::NoSnapshots`] if no snapshot could be opened.
    pub fn open(path: &Path) -> Result<Self, OutputError> {
        let mut snapshots = Vec::new();
        for dir in snapshot_dirs(path)? {
            match PlotfileReader::open(&dir) {
                Ok(reader) => snapshots.push(reader),
                Err(e) => warn!(path = %dir.display(), error = %e, "skipping snapshot"),
            }
        }
        if snapshots.is_empty() {
            return Err(OutputError::NoSnapshots {
                path: path.to_path_buf(),
            });
        }

        info!(path = %path.display(), n_snapshots = snapshots.len(), "opened plotfile series");
        Ok(Self {
            path: path.to_path_buf(),
            snapshots,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    fn first(&self) -> &PlotfileReader {
        // `open` guarantees at least one snapshot.
        &self.snapshots[0]
    }

    fn snapshot(&self, time_index: usize) -> Result<&PlotfileReader, OutputError> {
        self.snapshots
            .get(time_index)
            .ok_or(OutputError::TimeIndexOutOfRange {
                index: time_index,
                len: self.snapshots.len(),
            })
    }
}

impl OutputReader for PlotfileSeries {
    fn variables(&self) -> Result<Vec<String>, OutputError> {
        self.first().variables()
    }

    fn dimensions(&self) -> Result<BTreeMap<String, usize>, OutputError> {
        let mut dims = self.first().dimensions()?;
        dims.insert("time".to_string(), self.snapshots.len());
        Ok(dims)
    }

    fn time_steps(&self) -> Result<Vec<f64>, OutputError> {
        Ok(self.snapshots.iter().map(PlotfileReader::time).collect())
    }

    fn coordinates(&self) -> Result<BTreeMap<String, Array1<f64>>, OutputError> {
        self.first().coordinates()
    }

    fn field(&self, variable: &str, time_index: usize) -> Result<ArrayD<f64>, OutputError> {
        self.snapshot(time_index)?.field(variable, 0)
    }

    fn variable_info(&self, variable: &str) -> Result<VariableInfo, OutputError> {
        self.first().variable_info(variable)
    }

    fn close(&mut self) -> Result<(), OutputError> {
        for snapshot in &mut self.snapshots {
            snapshot.close()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_names() {
        assert!(is_snapshot_name("plt00000"));
        assert!(is_snapshot_name("plt12345678"));
        assert!(!is_snapshot_name("plt"));
        assert!(!is_snapshot_name("plt00100.old"));
        assert!(!is_snapshot_name("plt00100.old.5467"));
        assert!(!is_snapshot_name("plt_backup"));
        assert!(!is_snapshot_name("chk00100"));
        assert!(!is_snapshot_name("plt001a"));
    }
}
