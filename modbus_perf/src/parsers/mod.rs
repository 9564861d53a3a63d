//! Parsers for raw benchmark output
//!
//! The benchmark firmware prints comma-separated statistics interleaved with
//! unrelated diagnostics. The parsers here turn such logs into
//! `MeasurementRecord`s.

pub mod benchmark_log;

pub use benchmark_log::BenchmarkLogParser;
