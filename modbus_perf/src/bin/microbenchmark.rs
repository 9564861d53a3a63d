use anyhow::Result;
use modbus_perf::{cli, config::BenchmarkSuite};

fn main() -> Result<()> {
    cli::handle_calls(&BenchmarkSuite::microbenchmark())
}
