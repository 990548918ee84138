//! Plotfile `Header` text.
//!
//! ```text
//! HyperCLaw-V1.1            version
//! 2                         variable count
//! temp                      one name per line
//! salt
//! 3                         spatial dimensionality
//! 600.0                     simulation time
//! 0                         finest level
//! 0 0 -150                  domain lower bound
//! 41000 80000 0             domain upper bound
//!                           refinement ratios (empty for one level)
//! ((0,0,0) (9,7,4) (0,0,0)) index box per level
//! 0                         step per level
//! 4100 10000 30             cell size of level 0
//! ```

use std::path::{Path, PathBuf};

use crate::error::OutputError;

/// Parsed plotfile header. Only level 0 is described.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotfileHeader {
    pub version: String,
    pub variables: Vec<String>,
    /// Spatial dimensionality, 2 or 3.
    pub ndim: usize,
    pub time: f64,
    /// Index of the finest refinement level; 0 for a single-level file.
    pub finest_level: usize,
    pub prob_lo: Vec<f64>,
    pub prob_hi: Vec<f64>,
    /// Level-0 index box, lower corner.
    pub box_lo: Vec<i64>,
    /// Level-0 index box, upper corner (inclusive).
    pub box_hi: Vec<i64>,
    /// Level-0 cell size per axis.
    pub cell_size: Vec<f64>,
}

impl PlotfileHeader {
    /// Cell counts `[nx, ny, nz]`; `nz` is 1 for a 2-D file.
    pub fn n_cell(&self) -> [usize; 3] {
        let mut n = [1usize; 3];
        for (axis, slot) in n.iter_mut().enumerate().take(self.ndim) {
            *slot = (self.box_hi[axis] - self.box_lo[axis] + 1).max(0) as usize;
        }
        n
    }

    /// Field shape `[nz, ny, nx]`.
    pub fn field_shape(&self) -> [usize; 3] {
        let [nx, ny, nz] = self.n_cell();
        [nz, ny, nx]
    }

    /// Position of `name` among the variables.
    pub fn component(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v == name)
    }

    /// Read and parse the header at `path`.
    pub fn read(path: &Path) -> Result<Self, OutputError> {
        let text = std::fs::read_to_string(path).map_err(|e| OutputError::io(path, &e))?;
        Self::parse(&text, path)
    }

    /// Parse header text. `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, OutputError> {
        let mut lines = Lines::new(text, path);

        let version = lines.next_line("version string")?.trim().to_string();
        let n_vars: usize = lines.next_parsed("variable count")?;
        let mut variables = Vec::with_capacity(n_vars);
        for _ in 0..n_vars {
            variables.push(lines.next_line("variable name")?.trim().to_string());
        }

        let ndim: usize = lines.next_parsed("dimensionality")?;
        if !(2..=3).contains(&ndim) {
            return Err(lines.error(format!("dimensionality {ndim} is not 2 or 3")));
        }
        let time: f64 = lines.next_parsed("simulation time")?;
        let finest_level: usize = lines.next_parsed("finest level")?;
        let prob_lo = lines.next_floats("domain lower bound", ndim)?;
        let prob_hi = lines.next_floats("domain upper bound", ndim)?;

        // The refinement-ratio line is empty for single-level files and
        // some writers leave it out entirely.
        let mut box_line = lines.next_line("index box")?;
        if !box_line.trim_start().starts_with('(') {
            box_line = lines.next_line("index box")?;
        }
        let tuples = int_tuples(box_line);
        if tuples.len() < 2 || tuples[0].len() < ndim || tuples[1].len() < ndim {
            return Err(lines.error(format!("expected an index box, got '{}'", box_line.trim())));
        }
        let box_lo = tuples[0][..ndim].to_vec();
        let box_hi = tuples[1][..ndim].to_vec();

        lines.next_line("level steps")?;
        let cell_size = match lines.next_floats("cell size", ndim) {
            Ok(sizes) => sizes,
            Err(_) => (0..ndim)
                .map(|i| (prob_hi[i] - prob_lo[i]) / (box_hi[i] - box_lo[i] + 1) as f64)
                .collect(),
        };

        Ok(Self {
            version,
            variables,
            ndim,
            time,
            finest_level,
            prob_lo,
            prob_hi,
            box_lo,
            box_hi,
            cell_size,
        })
    }
}

/// Line cursor that reports 1-based line numbers in errors.
struct Lines<'a> {
    iter: std::str::Lines<'a>,
    lineno: usize,
    path: &'a Path,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str, path: &'a Path) -> Self {
        Self {
            iter: text.lines(),
            lineno: 0,
            path,
        }
    }

    fn error(&self, reason: impl Into<String>) -> OutputError {
        OutputError::MalformedHeader {
            path: PathBuf::from(self.path),
            line: self.lineno,
            reason: reason.into(),
        }
    }

    fn next_line(&mut self, what: &str) -> Result<&'a str, OutputError> {
        self.lineno += 1;
        self.iter
            .next()
            .ok_or_else(|| self.error(format!("unexpected end of file, expected {what}")))
    }

    fn next_parsed<T: std::str::FromStr>(&mut self, what: &str) -> Result<T, OutputError> {
        let line = self.next_line(what)?;
        line.trim()
            .parse()
            .map_err(|_| self.error(format!("expected {what}, got '{}'", line.trim())))
    }

    fn next_floats(&mut self, what: &str, n: usize) -> Result<Vec<f64>, OutputError> {
        let line = self.next_line(what)?;
        let values: Option<Vec<f64>> = line
            .split_whitespace()
            .map(|t| t.parse().ok())
            .collect();
        match values {
            Some(v) if v.len() >= n => Ok(v[..n].to_vec()),
            _ => Err(self.error(format!("expected {n} values for {what}, got '{}'", line.trim()))),
        }
    }
}

/// Every innermost parenthesized group of comma- or space-separated
/// integers, in order. `((0,0,0) (9,7,4) (0,0,0))` gives three groups.
pub(crate) fn int_tuples(text: &str) -> Vec<Vec<i64>> {
    let mut groups = Vec::new();
    let mut current: Option<String> = None;

    for ch in text.chars() {
        match ch {
            '(' => current = Some(String::new()),
            ')' => {
                if let Some(inner) = current.take() {
                    let parsed: Option<Vec<i64>> = inner
                        .split(|c: char| c == ',' || c.is_whitespace())
                        .filter(|t| !t.is_empty())
                        .map(|t| t.parse().ok())
                        .collect();
                    if let Some(values) = parsed
                        && !values.is_empty()
                    {
                        groups.push(values);
                    }
                }
            }
            c => {
                if let Some(buf) = current.as_mut() {
                    buf.push(c);
                }
            }
        }
    }

    groups
}
