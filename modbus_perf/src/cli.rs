use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Result};
use env_logger::Env;
use log::info;

use crate::config::BenchmarkSuite;
use crate::measurement_retrieval::collect_variants;
use crate::reporting::report;
use modbus_perf_cli_types::Cli;

/// Entry point shared by the post-processing binaries.
pub fn handle_calls(suite: &BenchmarkSuite) -> Result<()> {
    let cli = Cli::parse_named(suite.name);
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(suite, &cli.input_dir, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Load every variant of `suite` from `input_dir` and write the reports.
pub fn run<W: Write>(suite: &BenchmarkSuite, input_dir: &Path, out: &mut W) -> Result<()> {
    if !input_dir.is_dir() {
        bail!("Input directory {} does not exist", input_dir.display());
    }

    let variants = suite.variants();
    info!(
        "Loading {} variants of {} from {}",
        variants.len(),
        suite.name,
        input_dir.display()
    );
    let datasets = collect_variants(input_dir, variants)?;

    report(out, suite, &datasets)
}
