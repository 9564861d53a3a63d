pub mod cli;
pub mod config;
pub mod data;
pub mod defaults;
pub mod functions;
pub mod measurement_retrieval;
pub mod overhead;
pub mod parsers;
pub mod reporting;
pub mod stats;

// Log fixtures for unit tests and benches.
#[doc(hidden)]
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
