//! Integration tests for format detection.

mod common;

use common::{PlotfileFixture, write_netcdf};
use remora_output::{ErrorKind, Output, OutputError, OutputReader, open_output};
use tempfile::tempdir;

#[test]
fn netcdf_file_by_extension() {
    let dir = tempdir().unwrap();
    let output = open_output(&write_netcdf(dir.path())).unwrap();
    assert!(matches!(output, Output::NetCdf(_)));
    assert_eq!(output.format_name(), "netcdf");
}

#[test]
fn plotfile_directory() {
    let dir = tempdir().unwrap();
    let path = PlotfileFixture::new().write(dir.path(), "plt00000");
    let output = open_output(&path).unwrap();
    assert!(matches!(output, Output::Plotfile(_)));

    assert_eq!(output.variables().unwrap(), vec!["temp", "salt"]);
    assert_eq!(output.time_steps().unwrap(), vec![600.0]);
    assert_eq!(output.field("salt", 0).unwrap().shape(), &[5, 8, 10]);
}

#[test]
fn run_directory_opens_as_series() {
    let dir = tempdir().unwrap();
    PlotfileFixture::new().with_time(0.0).write(dir.path(), "plt00000");
    PlotfileFixture::new().with_time(60.0).write(dir.path(), "plt00010");

    let mut output = open_output(dir.path()).unwrap();
    assert!(matches!(output, Output::Series(_)));
    assert_eq!(output.time_steps().unwrap(), vec![0.0, 60.0]);
    output.close().unwrap();
}

#[test]
fn empty_directory_names_path_and_checks() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("notes")).unwrap();

    let err = open_output(dir.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    match &err {
        OutputError::UnrecognizedFormat { path, checks } => {
            assert_eq!(path, dir.path());
            assert_eq!(checks.len(), 3);
        }
        other => panic!("expected UnrecognizedFormat, got {other:?}"),
    }
    assert!(err.to_string().contains(&dir.path().display().to_string()));
}

#[test]
fn unknown_file_extension_is_unrecognized() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    std::fs::write(&path, "hello").unwrap();
    let err = open_output(&path).unwrap_err();
    assert!(matches!(err, OutputError::UnrecognizedFormat { .. }));
}

#[test]
fn missing_path_is_file_not_found() {
    let dir = tempdir().unwrap();
    let err = open_output(&dir.path().join("nowhere")).unwrap_err();
    assert!(matches!(err, OutputError::FileNotFound { .. }));
}
