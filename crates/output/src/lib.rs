//! # remora-output
//!
//! Read REMORA simulation output through one interface, whatever the
//! solver wrote:
//!
//! - a NetCDF file ([`NetCdfReader`]),
//! - a single AMReX plotfile directory ([`PlotfileReader`]),
//! - a run directory holding many plotfiles ([`PlotfileSeries`]).
//!
//! [`open_output`] picks the backend once; afterwards callers use the
//! [`OutputReader`] trait on the returned [`Output`].

mod detect;
mod error;
mod netcdf_read;
mod plotfile;
mod reader;
mod series;

pub use detect::{NETCDF_EXTENSIONS, Output, open_output};
pub use error::{ErrorKind, OutputError};
pub use netcdf_read::NetCdfReader;
pub use plotfile::{PlotfileHeader, PlotfileReader};
pub use reader::{FieldStatistics, OutputReader, SpatialAxis, VariableInfo, slice_field};
pub use series::{PlotfileSeries, is_snapshot_name, snapshot_dirs};
