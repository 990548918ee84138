//! Fixture builders for output-reader tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Plotfile fixtures
// ---------------------------------------------------------------------------

/// Builder for a single-level plotfile directory.
pub struct PlotfileFixture {
    pub variables: Vec<String>,
    /// Cell counts `[nx, ny, nz]`.
    pub n_cell: [usize; 3],
    pub time: f64,
    pub prob_lo: [f64; 3],
    pub prob_hi: [f64; 3],
    pub finest_level: usize,
    /// Drop this many trailing values from the payload.
    pub truncate: usize,
}

impl PlotfileFixture {
    /// `temp` and `salt` on a 10 x 8 x 5 grid at t = 600.
    pub fn new() -> Self {
        Self {
            variables: vec!["temp".into(), "salt".into()],
            n_cell: [10, 8, 5],
            time: 600.0,
            prob_lo: [0.0, 0.0, -150.0],
            prob_hi: [41000.0, 80000.0, 0.0],
            finest_level: 0,
            truncate: 0,
        }
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    pub fn with_finest_level(mut self, level: usize) -> Self {
        self.finest_level = level;
        self
    }

    pub fn with_truncate(mut self, n: usize) -> Self {
        self.truncate = n;
        self
    }

    /// Value stored for component `c` at cell `(i, j, k)`.
    pub fn value(c: usize, i: usize, j: usize, k: usize) -> f64 {
        (1000 * c + 100 * k + 10 * j + i) as f64
    }

    fn header_text(&self) -> String {
        let [nx, ny, nz] = self.n_cell;
        let mut text = String::from("HyperCLaw-V1.1\n");
        text.push_str(&format!("{}\n", self.variables.len()));
        for v in &self.variables {
            text.push_str(&format!("{v}\n"));
        }
        text.push_str("3\n");
        text.push_str(&format!("{}\n", self.time));
        text.push_str(&format!("{}\n", self.finest_level));
        text.push_str(&format!(
            "{} {} {}\n",
            self.prob_lo[0], self.prob_lo[1], self.prob_lo[2]
        ));
        text.push_str(&format!(
            "{} {} {}\n",
            self.prob_hi[0], self.prob_hi[1], self.prob_hi[2]
        ));
        text.push('\n');
        text.push_str(&format!(
            "((0,0,0) ({},{},{}) (0,0,0))\n",
            nx - 1,
            ny - 1,
            nz - 1
        ));
        text.push_str("0\n");
        let dx: Vec<String> = (0..3)
            .map(|a| ((self.prob_hi[a] - self.prob_lo[a]) / self.n_cell[a] as f64).to_string())
            .collect();
        text.push_str(&format!("{}\n", dx.join(" ")));
        text.push_str("0\n0\n");
        text
    }

    fn payload_bytes(&self) -> Vec<u8> {
        let [nx, ny, nz] = self.n_cell;
        let ncomp = self.variables.len();
        let mut bytes = format!(
            "FAB ((8, (64 11 52 0 1 12 0 1023)),(8, (8 7 6 5 4 3 2 1)))((0,0,0) ({},{},{}) (0,0,0)) {ncomp}\n",
            nx - 1,
            ny - 1,
            nz - 1
        )
        .into_bytes();

        let mut values = Vec::with_capacity(ncomp * nz * ny * nx);
        for c in 0..ncomp {
            for k in 0..nz {
                for j in 0..ny {
                    for i in 0..nx {
                        values.push(Self::value(c, i, j, k));
                    }
                }
            }
        }
        values.truncate(values.len() - self.truncate);
        for v in values {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes
    }

    /// Write the plotfile into `dir/name` and return its path.
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let root = dir.join(name);
        let level = root.join("Level_0");
        std::fs::create_dir_all(&level).unwrap();
        std::fs::write(root.join("Header"), self.header_text()).unwrap();
        std::fs::write(level.join("Cell_H"), "unused\n").unwrap();
        std::fs::write(level.join("Cell_D_00000"), self.payload_bytes()).unwrap();
        root
    }
}

// ---------------------------------------------------------------------------
// NetCDF fixtures
// ---------------------------------------------------------------------------

pub const NT: usize = 3;
pub const NZ: usize = 2;
pub const NY: usize = 3;
pub const NX: usize = 4;

/// Value stored in `temp` at `(t, k, j, i)`.
pub fn temp_value(t: usize, k: usize, j: usize, i: usize) -> f64 {
    (1000 * t + 100 * k + 10 * j + i) as f64
}

/// Write `dir/out.nc` with coordinates `time`, `z`, `y`, `x`, a 4-D `temp`
/// with attributes, a 3-D `zeta` containing one fill value, and a
/// time-independent `h`.
pub fn write_netcdf(dir: &Path) -> PathBuf {
    let path = dir.join("out.nc");
    let mut file = netcdf::create(&path).expect("failed to create NetCDF file");

    file.add_dimension("time", NT).expect("add dim time");
    file.add_dimension("z", NZ).expect("add dim z");
    file.add_dimension("y", NY).expect("add dim y");
    file.add_dimension("x", NX).expect("add dim x");

    {
        let times: Vec<f64> = (0..NT).map(|t| 300.0 * t as f64).collect();
        let mut var = file
            .add_variable::<f64>("time", &["time"])
            .expect("add var time");
        var.put_values(&times, ..).expect("put time values");
        var.put_attribute("units", "s").expect("add time units");
    }
    for (name, n, dx) in [("x", NX, 1000.0), ("y", NY, 2000.0), ("z", NZ, -50.0)] {
        let values: Vec<f64> = (0..n).map(|i| dx * i as f64).collect();
        let mut var = file.add_variable::<f64>(name, &[name]).expect("add coord");
        var.put_values(&values, ..).expect("put coord values");
    }

    {
        let mut data = Vec::with_capacity(NT * NZ * NY * NX);
        for t in 0..NT {
            for k in 0..NZ {
                for j in 0..NY {
                    for i in 0..NX {
                        data.push(temp_value(t, k, j, i));
                    }
                }
            }
        }
        let mut var = file
            .add_variable::<f64>("temp", &["time", "z", "y", "x"])
            .expect("add var temp");
        var.put_attribute("units", "degC").expect("add temp units");
        var.put_attribute("long_name", "potential temperature")
            .expect("add temp long_name");
        var.put_values(&data, ..).expect("put temp values");
    }

    {
        let mut data: Vec<f64> = (0..NT * NY * NX).map(|v| v as f64 * 0.01).collect();
        data[0] = -9999.0;
        let mut var = file
            .add_variable::<f64>("zeta", &["time", "y", "x"])
            .expect("add var zeta");
        var.put_attribute("_FillValue", -9999.0)
            .expect("add zeta _FillValue");
        var.put_values(&data, ..).expect("put zeta values");
    }

    {
        let data = vec![150.0; NY * NX];
        let mut var = file
            .add_variable::<f64>("h", &["y", "x"])
            .expect("add var h");
        var.put_values(&data, ..).expect("put h values");
    }

    path
}
