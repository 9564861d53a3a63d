use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// Function name that stands for "all operations" in the benchmark output.
pub const FUNCTION_ALL: &str = "MODBUS_FC_ALL";

/// Timing phase that produced a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BenchmarkType {
    RequestProcessingMicrobenchmark,
    SpareProcessingMicrobenchmark,
    MaxProcessingMacrobenchmark,
}

impl BenchmarkType {
    pub const ALL: [BenchmarkType; 3] = [
        BenchmarkType::RequestProcessingMicrobenchmark,
        BenchmarkType::SpareProcessingMicrobenchmark,
        BenchmarkType::MaxProcessingMacrobenchmark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BenchmarkType::RequestProcessingMicrobenchmark => "REQUEST_PROCESSING_MICROBENCHMARK",
            BenchmarkType::SpareProcessingMicrobenchmark => "SPARE_PROCESSING_MICROBENCHMARK",
            BenchmarkType::MaxProcessingMacrobenchmark => "MAX_PROCESSING_MACROBENCHMARK",
        }
    }
}

impl Display for BenchmarkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown benchmark type: '{0}'")]
pub struct UnknownBenchmarkType(pub String);

impl FromStr for BenchmarkType {
    type Err = UnknownBenchmarkType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BenchmarkType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownBenchmarkType(s.to_string()))
    }
}

/// One timed event reconstructed from a benchmark log.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    /// `None` when the originating table had no `benchmark_type` column.
    pub benchmark_type: Option<BenchmarkType>,
    pub function_name: String,
    /// Always finite and non-negative.
    pub time_diff: f64,
    pub source_file: String,
}

/// All records of one benchmark variant, in load order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariantDataset {
    pub name: String,
    pub records: Vec<MeasurementRecord>,
}

impl VariantDataset {
    pub fn new(name: &str) -> Self {
        VariantDataset {
            name: name.to_string(),
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether any record carries a phase tag, i.e. the dataset has a
    /// `benchmark_type` column and needs the phase filter.
    pub fn has_phase_column(&self) -> bool {
        self.records.iter().any(|r| r.benchmark_type.is_some())
    }

    /// Records belonging to the requested phase.
    ///
    /// Datasets without a phase column are returned unfiltered. Otherwise only
    /// rows whose tag equals `benchmark_type` are kept.
    pub fn select_phase(
        &self,
        benchmark_type: BenchmarkType,
    ) -> impl Iterator<Item = &MeasurementRecord> {
        let filter_by_phase = self.has_phase_column();
        self.records
            .iter()
            .filter(move |r| !filter_by_phase || r.benchmark_type == Some(benchmark_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        benchmark_type: Option<BenchmarkType>,
        function: &str,
        time_diff: f64,
    ) -> MeasurementRecord {
        MeasurementRecord {
            benchmark_type,
            function_name: function.to_string(),
            time_diff,
            source_file: "variant_0.txt".to_string(),
        }
    }

    #[test]
    fn benchmark_type_round_trips_through_tag() {
        for t in BenchmarkType::ALL {
            assert_eq!(t.as_str().parse::<BenchmarkType>(), Ok(t));
            assert_eq!(t.to_string(), t.as_str());
        }
        assert_eq!(
            "benchmark_type".parse::<BenchmarkType>(),
            Err(UnknownBenchmarkType("benchmark_type".to_string()))
        );
    }

    #[test]
    fn select_phase_filters_mixed_dataset() {
        let dataset = VariantDataset {
            name: "variant".to_string(),
            records: vec![
                record(Some(BenchmarkType::RequestProcessingMicrobenchmark), FUNCTION_ALL, 1.0),
                record(Some(BenchmarkType::SpareProcessingMicrobenchmark), FUNCTION_ALL, 2.0),
                record(Some(BenchmarkType::RequestProcessingMicrobenchmark), FUNCTION_ALL, 3.0),
            ],
        };

        let selected: Vec<f64> = dataset
            .select_phase(BenchmarkType::RequestProcessingMicrobenchmark)
            .map(|r| r.time_diff)
            .collect();
        assert_eq!(selected, vec![1.0, 3.0]);
    }

    #[test]
    fn select_phase_keeps_everything_without_phase_column() {
        let dataset = VariantDataset {
            name: "variant".to_string(),
            records: vec![record(None, FUNCTION_ALL, 1.0), record(None, FUNCTION_ALL, 2.0)],
        };

        assert!(!dataset.has_phase_column());
        assert_eq!(
            dataset
                .select_phase(BenchmarkType::MaxProcessingMacrobenchmark)
                .count(),
            2
        );
    }
}
