//! The reader interface shared by every output backend.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, ArrayD, Axis};

use crate::error::OutputError;

// ---------------------------------------------------------------------------
// SpatialAxis
// ---------------------------------------------------------------------------

/// A spatial axis of a field laid out as `(z, y, x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialAxis {
    X,
    Y,
    Z,
}

impl SpatialAxis {
    /// Array axis of this spatial axis in a field with `ndim` dimensions,
    /// counted from the end: `x` is last, `y` second-to-last, `z`
    /// third-to-last.
    pub fn array_axis(self, ndim: usize) -> Option<usize> {
        let from_end = match self {
            SpatialAxis::X => 1,
            SpatialAxis::Y => 2,
            SpatialAxis::Z => 3,
        };
        ndim.checked_sub(from_end)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpatialAxis::X => "x",
            SpatialAxis::Y => "y",
            SpatialAxis::Z => "z",
        }
    }
}

impl fmt::Display for SpatialAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpatialAxis {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(SpatialAxis::X),
            "y" => Ok(SpatialAxis::Y),
            "z" => Ok(SpatialAxis::Z),
            other => Err(OutputError::InvalidAxis {
                axis: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Metadata and statistics
// ---------------------------------------------------------------------------

/// Per-variable metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    /// `units` attribute, empty when unknown.
    pub units: String,
    /// Display name; the variable name when no `long_name` is recorded.
    pub long_name: String,
    /// Size of every dimension, in storage order.
    pub shape: Vec<usize>,
    /// Dimension names, in storage order.
    pub dims: Vec<String>,
}

/// Summary statistics of one field, ignoring NaN entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl FieldStatistics {
    /// Compute statistics over every non-NaN value. A field with no such
    /// value yields NaN for all three.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a f64>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;

        for &v in values {
            if v.is_nan() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }

        if count == 0 {
            return Self {
                min: f64::NAN,
                max: f64::NAN,
                mean: f64::NAN,
            };
        }
        Self {
            min,
            max,
            mean: sum / count as f64,
        }
    }
}

// ---------------------------------------------------------------------------
// OutputReader
// ---------------------------------------------------------------------------

/// Uniform read access to simulation output.
///
/// Fields are returned with their spatial axes ordered `(z, y, x)`; the
/// time axis is never part of a returned field.
pub trait OutputReader {
    /// Data variable names, excluding coordinate variables.
    fn variables(&self) -> Result<Vec<String>, OutputError>;

    /// Dimension names and sizes.
    fn dimensions(&self) -> Result<BTreeMap<String, usize>, OutputError>;

    /// Simulation time of every stored snapshot.
    fn time_steps(&self) -> Result<Vec<f64>, OutputError>;

    /// Coordinate arrays for whichever of `x`, `y`, `z` are available.
    fn coordinates(&self) -> Result<BTreeMap<String, Array1<f64>>, OutputError>;

    /// Full field of `variable` at `time_index`.
    fn field(&self, variable: &str, time_index: usize) -> Result<ArrayD<f64>, OutputError>;

    /// Metadata for `variable`.
    fn variable_info(&self, variable: &str) -> Result<VariableInfo, OutputError>;

    /// Release the underlying resources. Further queries may fail.
    fn close(&mut self) -> Result<(), OutputError>;

    /// The field of `variable` at `time_index`, cut at `index` along `axis`
    /// (`"x"`, `"y"` or `"z"`).
    fn slice(
        &self,
        variable: &str,
        time_index: usize,
        axis: &str,
        index: usize,
    ) -> Result<ArrayD<f64>, OutputError> {
        let axis: SpatialAxis = axis.parse()?;
        let field = self.field(variable, time_index)?;
        slice_field(&field, axis, index)
    }

    /// NaN-ignoring min, max and mean of a field.
    fn statistics(
        &self,
        variable: &str,
        time_index: usize,
    ) -> Result<FieldStatistics, OutputError> {
        let field = self.field(variable, time_index)?;
        Ok(FieldStatistics::from_values(field.iter()))
    }
}

/// Cut `field` at `index` along `axis`, dropping that axis.
pub fn slice_field(
    field: &ArrayD<f64>,
    axis: SpatialAxis,
    index: usize,
) -> Result<ArrayD<f64>, OutputError> {
    let ndim = field.ndim();
    let array_axis = axis.array_axis(ndim).ok_or_else(|| OutputError::MissingAxis {
        axis: axis.to_string(),
        ndim,
    })?;

    let len = field.len_of(Axis(array_axis));
    if index >= len {
        return Err(OutputError::GridIndexOutOfRange {
            axis: axis.to_string(),
            index,
            len,
        });
    }
    Ok(field.index_axis(Axis(array_axis), index).to_owned())
}
