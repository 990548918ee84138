//! NetCDF output backend.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ndarray::{Array1, ArrayD, IxDyn};
use netcdf::{AttributeValue, Extent};
use tracing::{debug, info};

use crate::error::OutputError;
use crate::reader::{OutputReader, VariableInfo};

const TIME_DIM: &str = "time";
const SPATIAL_COORDS: [&str; 3] = ["x", "y", "z"];

/// Reader over a single NetCDF output file.
///
/// Only metadata is read at open time. Each field request reads the
/// hyperslab for one time step.
pub struct NetCdfReader {
    path: PathBuf,
    file: Option<netcdf::File>,
}

impl std::fmt::Debug for NetCdfReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetCdfReader")
            .field("path", &self.path)
            .field("open", &self.file.is_some())
            .finish()
    }
}

impl NetCdfReader {
    /// Open the NetCDF file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::FileNotFound`] if the path does not exist, or
    /// [`OutputError::Netcdf`] if the library cannot open it.
    pub fn open(path: &Path) -> Result<Self, OutputError> {
        if !path.exists() {
            return Err(OutputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = netcdf::open(path)?;
        info!(path = %path.display(), "opened netcdf output");
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&self) -> Result<&netcdf::File, OutputError> {
        self.file.as_ref().ok_or_else(|| OutputError::Closed {
            path: self.path.clone(),
        })
    }

    fn data_variable(&self, name: &str) -> Result<netcdf::Variable<'_>, OutputError> {
        self.file()?
            .variable(name)
            .filter(|v| !is_coordinate(v))
            .ok_or_else(|| OutputError::UnknownVariable {
                name: name.to_string(),
                path: self.path.clone(),
            })
    }
}

/// A coordinate variable shares its name with one of its dimensions.
fn is_coordinate(var: &netcdf::Variable<'_>) -> bool {
    let name = var.name();
    var.dimensions().iter().any(|d| d.name() == name)
}

fn string_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

fn fill_value(var: &netcdf::Variable<'_>) -> Option<f64> {
    match var.attribute_value("_FillValue")?.ok()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(f64::from(v)),
        _ => None,
    }
}

impl OutputReader for NetCdfReader {
    fn variables(&self) -> Result<Vec<String>, OutputError> {
        Ok(self
            .file()?
            .variables()
            .filter(|v| !is_coordinate(v))
            .map(|v| v.name())
            .collect())
    }

    fn dimensions(&self) -> Result<BTreeMap<String, usize>, OutputError> {
        Ok(self
            .file()?
            .dimensions()
            .map(|d| (d.name(), d.len()))
            .collect())
    }

    fn time_steps(&self) -> Result<Vec<f64>, OutputError> {
        match self.file()?.variable(TIME_DIM) {
            Some(var) => Ok(var.get_values::<f64, _>(..)?),
            None => Ok(Vec::new()),
        }
    }

    fn coordinates(&self) -> Result<BTreeMap<String, Array1<f64>>, OutputError> {
        let file = self.file()?;
        let mut coords = BTreeMap::new();
        for name in SPATIAL_COORDS {
            if let Some(var) = file.variable(name)
                && var.dimensions().len() == 1
            {
                let values = var.get_values::<f64, _>(..)?;
                coords.insert(name.to_string(), Array1::from(values));
            }
        }
        Ok(coords)
    }

    fn field(&self, variable: &str, time_index: usize) -> Result<ArrayD<f64>, OutputError> {
        let var = self.data_variable(variable)?;
        let dims = var.dimensions();
        let time_pos = dims.iter().position(|d| d.name() == TIME_DIM);

        let n_times = time_pos.map_or(1, |p| dims[p].len());
        if time_index >= n_times {
            return Err(OutputError::TimeIndexOutOfRange {
                index: time_index,
                len: n_times,
            });
        }

        let mut extents: Vec<Extent> = Vec::with_capacity(dims.len());
        let mut shape: Vec<usize> = Vec::with_capacity(dims.len());
        for (i, dim) in dims.iter().enumerate() {
            if Some(i) == time_pos {
                extents.push(Extent::from(time_index));
            } else {
                extents.push(Extent::from(0..dim.len()));
                shape.push(dim.len());
            }
        }

        let mut data = var.get_values::<f64, _>(extents)?;
        if let Some(fv) = fill_value(&var) {
            for v in data.iter_mut().filter(|v| **v == fv) {
                *v = f64::NAN;
            }
        }
        debug!(variable, time_index, ?shape, "read netcdf field");

        ArrayD::from_shape_vec(IxDyn(&shape), data).map_err(|e| OutputError::Netcdf {
            reason: format!("variable '{variable}' has inconsistent shape: {e}"),
        })
    }

    fn variable_info(&self, variable: &str) -> Result<VariableInfo, OutputError> {
        let var = self.data_variable(variable)?;
        let dims = var.dimensions();
        Ok(VariableInfo {
            units: string_attribute(&var, "units").unwrap_or_default(),
            long_name: string_attribute(&var, "long_name")
                .unwrap_or_else(|| variable.to_string()),
            shape: dims.iter().map(|d| d.len()).collect(),
            dims: dims.iter().map(|d| d.name()).collect(),
        })
    }

    fn close(&mut self) -> Result<(), OutputError> {
        if let Some(file) = self.file.take() {
            file.close()?;
            debug!(path = %self.path.display(), "closed netcdf output");
        }
        Ok(())
    }
}
