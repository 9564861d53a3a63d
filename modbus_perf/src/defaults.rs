//! Centralized constants for the benchmark reduction pipeline.
//!
//! The thresholds below are fixed properties of the analysis and are not
//! exposed as configuration.

// ============================================================================
// Outlier Filter
// ============================================================================

/// Multiple of the interquartile range beyond Q1/Q3 at which a sample is
/// considered an outlier (boxplot convention).
pub const IQR_FENCE_FACTOR: f64 = 1.5;

/// Fraction of removed samples at which a group is rejected as too noisy.
///
/// Removing exactly this fraction already fails.
pub const MAX_OUTLIER_FRACTION: f64 = 0.5;

/// Fraction of removed samples above which a warning is logged.
pub const WARN_OUTLIER_FRACTION: f64 = 0.2;

// ============================================================================
// Record Parser
// ============================================================================

/// Line prefixes that mark header or data lines in a benchmark log.
///
/// Every other line is diagnostic output of the device under test.
pub const RECORD_LINE_MARKERS: &[&str] = &[
    "REQUEST_PROCESSING_MICROBENCHMARK",
    "SPARE_PROCESSING_MICROBENCHMARK",
    "MAX_PROCESSING_MACROBENCHMARK",
    "benchmark_type",
    "MODBUS_FC",
    "modbus_function_name",
];

/// Column holding the phase tag.
pub const BENCHMARK_TYPE_COLUMN: &str = "benchmark_type";

/// Column holding the Modbus function identifier.
pub const FUNCTION_NAME_COLUMN: &str = "modbus_function_name";

/// Column holding the measured duration.
pub const TIME_DIFF_COLUMN: &str = "time_diff";

// ============================================================================
// Report Emitter
// ============================================================================

/// Marker printed for a comparison group in which a variant has no data.
pub const NO_DATA_MARKER: &str = "No data";

/// Number of requests issued by the client per macrobenchmark run.
pub const MACROBENCHMARK_REQUESTS_PER_RUN: f64 = 16.0;
