//! Integration tests for the NetCDF backend.

mod common;

use approx::assert_relative_eq;
use common::{NT, NX, NY, NZ, temp_value, write_netcdf};
use ndarray::IxDyn;
use remora_output::{ErrorKind, NetCdfReader, OutputError, OutputReader};
use tempfile::tempdir;

#[test]
fn catalog_excludes_coordinates() {
    let dir = tempdir().unwrap();
    let reader = NetCdfReader::open(&write_netcdf(dir.path())).unwrap();

    let mut vars = reader.variables().unwrap();
    vars.sort();
    assert_eq!(vars, vec!["h", "temp", "zeta"]);
}

#[test]
fn dimensions_and_times() {
    let dir = tempdir().unwrap();
    let reader = NetCdfReader::open(&write_netcdf(dir.path())).unwrap();

    let dims = reader.dimensions().unwrap();
    assert_eq!(dims["time"], NT);
    assert_eq!(dims["z"], NZ);
    assert_eq!(dims["y"], NY);
    assert_eq!(dims["x"], NX);

    assert_eq!(reader.time_steps().unwrap(), vec![0.0, 300.0, 600.0]);

    let coords = reader.coordinates().unwrap();
    assert_eq!(coords["x"].len(), NX);
    assert_relative_eq!(coords["y"][2], 4000.0);
    assert_relative_eq!(coords["z"][1], -50.0);
}

#[test]
fn field_selects_one_time_step() {
    let dir = tempdir().unwrap();
    let reader = NetCdfReader::open(&write_netcdf(dir.path())).unwrap();

    let field = reader.field("temp", 2).unwrap();
    assert_eq!(field.shape(), &[NZ, NY, NX]);
    assert_eq!(field[IxDyn(&[1, 2, 3])], temp_value(2, 1, 2, 3));
    assert_eq!(field[IxDyn(&[0, 0, 0])], temp_value(2, 0, 0, 0));
}

#[test]
fn time_independent_variable_accepts_index_zero_only() {
    let dir = tempdir().unwrap();
    let reader = NetCdfReader::open(&write_netcdf(dir.path())).unwrap();

    let h = reader.field("h", 0).unwrap();
    assert_eq!(h.shape(), &[NY, NX]);

    let err = reader.field("h", 1).unwrap_err();
    assert!(matches!(err, OutputError::TimeIndexOutOfRange { index: 1, len: 1 }));
}

#[test]
fn out_of_range_time_and_unknown_variable() {
    let dir = tempdir().unwrap();
    let reader = NetCdfReader::open(&write_netcdf(dir.path())).unwrap();

    let err = reader.field("temp", NT).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);

    let err = reader.field("rho", 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lookup);

    // Coordinate variables are not data variables.
    let err = reader.field("x", 0).unwrap_err();
    assert!(matches!(err, OutputError::UnknownVariable { .. }));
}

#[test]
fn variable_info_reads_attributes() {
    let dir = tempdir().unwrap();
    let reader = NetCdfReader::open(&write_netcdf(dir.path())).unwrap();

    let info = reader.variable_info("temp").unwrap();
    assert_eq!(info.units, "degC");
    assert_eq!(info.long_name, "potential temperature");
    assert_eq!(info.shape, vec![NT, NZ, NY, NX]);
    assert_eq!(info.dims, vec!["time", "z", "y", "x"]);

    let info = reader.variable_info("h").unwrap();
    assert_eq!(info.units, "");
    assert_eq!(info.long_name, "h");
}

#[test]
fn slice_and_statistics() {
    let dir = tempdir().unwrap();
    let reader = NetCdfReader::open(&write_netcdf(dir.path())).unwrap();

    let s = reader.slice("temp", 1, "y", 1).unwrap();
    assert_eq!(s.shape(), &[NZ, NX]);
    assert_eq!(s[IxDyn(&[1, 3])], temp_value(1, 1, 1, 3));

    let stats = reader.statistics("temp", 0).unwrap();
    assert_relative_eq!(stats.min, 0.0);
    assert_relative_eq!(stats.max, temp_value(0, NZ - 1, NY - 1, NX - 1));
}

#[test]
fn fill_values_become_nan() {
    let dir = tempdir().unwrap();
    let reader = NetCdfReader::open(&write_netcdf(dir.path())).unwrap();

    let zeta = reader.field("zeta", 0).unwrap();
    assert!(zeta[IxDyn(&[0, 0])].is_nan());

    let stats = reader.statistics("zeta", 0).unwrap();
    assert_relative_eq!(stats.min, 0.01);
}

#[test]
fn closed_reader_rejects_queries() {
    let dir = tempdir().unwrap();
    let mut reader = NetCdfReader::open(&write_netcdf(dir.path())).unwrap();

    reader.close().unwrap();
    reader.close().unwrap();

    let err = reader.variables().unwrap_err();
    assert!(matches!(err, OutputError::Closed { .. }));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let err = NetCdfReader::open(&dir.path().join("absent.nc")).unwrap_err();
    assert!(matches!(err, OutputError::FileNotFound { .. }));
}
