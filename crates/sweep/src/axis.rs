//! One swept parameter and the values it takes.

use remora_params::Value;
use serde::Deserialize;

use crate::error::SweepError;

/// Relative tolerance, in units of `step`, for including the range end.
const RANGE_TOL: f64 = 1e-9;

/// Largest number of values a range may expand to.
const MAX_RANGE_VALUES: usize = 1_000_000;

/// A parameter key and either an explicit value list or a numeric range.
///
/// Explicit values take priority when both are given. Deserializes from a
/// table such as `{ key = "remora.fixed_dt", values = [100.0, 200.0] }` or
/// `{ key = "remora.Akv_bak", start = 1e-5, end = 3e-5, step = 1e-5 }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepAxis {
    pub key: String,
    #[serde(default)]
    pub values: Option<Vec<Value>>,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
}

impl SweepAxis {
    /// An axis over the given values, in order.
    pub fn explicit(key: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            key: key.into(),
            values: Some(values),
            start: None,
            end: None,
            step: None,
        }
    }

    /// An axis over `start, start + step, ...` up to and including `end`
    /// when it is reached within tolerance.
    pub fn range(key: impl Into<String>, start: f64, end: f64, step: f64) -> Self {
        Self {
            key: key.into(),
            values: None,
            start: Some(start),
            end: Some(end),
            step: Some(step),
        }
    }

    /// The values this axis takes.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::MissingValues`] if there are no explicit values
    /// and the range is incomplete, or [`SweepError::InvalidRange`] if the
    /// range cannot be expanded.
    pub fn resolve(&self) -> Result<Vec<Value>, SweepError> {
        if let Some(values) = &self.values {
            return Ok(values.clone());
        }

        let (Some(start), Some(end), Some(step)) = (self.start, self.end, self.step) else {
            return Err(SweepError::MissingValues {
                key: self.key.clone(),
            });
        };

        let invalid = |reason: &str| SweepError::InvalidRange {
            key: self.key.clone(),
            reason: reason.to_string(),
        };
        if !(start.is_finite() && end.is_finite() && step.is_finite()) {
            return Err(invalid("bounds and step must be finite"));
        }
        if step <= 0.0 {
            return Err(invalid("step must be positive"));
        }
        if end < start {
            return Err(invalid("end is below start"));
        }

        let steps = ((end - start) / step + RANGE_TOL).floor();
        if !steps.is_finite() || steps >= MAX_RANGE_VALUES as f64 {
            return Err(invalid("range expands to too many values"));
        }
        let n = steps as usize + 1;
        Ok((0..n)
            .map(|i| Value::Float(start + i as f64 * step))
            .collect())
    }
}
