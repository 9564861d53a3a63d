//! Fixture helpers shared by unit tests, integration tests and benchmarks.
//!
//! They write benchmark output files the way the Modbus benchmark firmware
//! prints them, including the diagnostics interleaved by the network stack.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{tempdir, TempDir};
use unindent::unindent;

use crate::data::BenchmarkType;

/// Writes `<variant>_<run>.txt` into `dir`.
///
/// # Panics
/// Panics if the file cannot be written.
pub fn write_run(dir: &Path, variant: &str, run: usize, content: &str) -> PathBuf {
    let path = dir.join(format!("{variant}_{run}.txt"));
    fs::write(&path, content).expect("Failed to write benchmark output");
    path
}

/// Renders a phase-tagged benchmark log with padded separators.
///
/// Every row is `(function, time_diff)`; a `NetworkInterface` diagnostic is
/// placed after the first row.
pub fn phase_log(benchmark_type: BenchmarkType, rows: &[(&str, f64)]) -> String {
    let mut log = unindent(
        "
        FreeRTOS_IPInit
        IP Address: 10.0.2.15
        benchmark_type, modbus_function_name, time_diff
        ",
    );
    for (i, (function, time_diff)) in rows.iter().enumerate() {
        log.push_str(&format!("{benchmark_type}, {function}, {time_diff}\n"));
        if i == 0 {
            log.push_str("NetworkInterface: link status changed\n");
        }
    }
    log
}

/// Creates a temporary directory holding one run per variant, each with the
/// given rows.
///
/// # Panics
/// Panics if the directory or a file cannot be created.
pub fn suite_dir(benchmark_type: BenchmarkType, runs: &[(&str, Vec<(&str, f64)>)]) -> TempDir {
    let dir = tempdir().expect("Failed to create temporary directory");
    for (variant, rows) in runs {
        write_run(dir.path(), variant, 0, &phase_log(benchmark_type, rows));
    }
    dir
}
