use csv::StringRecord;
use itertools::Itertools;
use log::{debug, warn};
use thiserror::Error;

use crate::data::{BenchmarkType, MeasurementRecord, UnknownBenchmarkType};
use crate::defaults::{
    BENCHMARK_TYPE_COLUMN, FUNCTION_NAME_COLUMN, RECORD_LINE_MARKERS, TIME_DIFF_COLUMN,
};

/// Parser for the comma-separated statistics printed by the Modbus benchmark
/// applications.
///
/// Only lines starting with one of [`RECORD_LINE_MARKERS`] are considered. The
/// first such line is the header of the table; all following ones are rows.
/// Rows that do not fit the header are dropped without failing the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct BenchmarkLogParser;

impl BenchmarkLogParser {
    pub fn parse(&self, input: &str, source_file: &str) -> Vec<MeasurementRecord> {
        let table = input
            .lines()
            .filter(|line| is_record_line(line))
            .map(normalize_separators)
            .join("\n");

        if table.is_empty() {
            debug!("No benchmark lines in {}", source_file);
            return Vec::new();
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(table.as_bytes());

        let columns = match reader
            .headers()
            .map_err(HeaderError::from)
            .and_then(Columns::from_header)
        {
            Ok(columns) => columns,
            Err(e) => {
                warn!("Ignoring {}: {}", source_file, e);
                return Vec::new();
            }
        };

        reader
            .into_records()
            .filter_map(|record| {
                let record = match record {
                    Ok(record) => record,
                    Err(e) => {
                        debug!("Dropping unreadable row of {}: {}", source_file, e);
                        return None;
                    }
                };
                match columns.parse_row(&record, source_file) {
                    Ok(measurement) => Some(measurement),
                    Err(e) => {
                        debug!(
                            "Dropping row '{}' of {}: {}",
                            record.iter().join(","),
                            source_file,
                            e
                        );
                        None
                    }
                }
            })
            .collect()
    }
}

fn is_record_line(line: &str) -> bool {
    RECORD_LINE_MARKERS
        .iter()
        .any(|marker| line.starts_with(marker))
}

/// Remove the optional padding after separators.
fn normalize_separators(line: &str) -> String {
    line.replace(", ", ",")
}

#[derive(Debug, Error)]
enum HeaderError {
    #[error("header '{header}' has no '{column}' column")]
    MissingColumn {
        header: String,
        column: &'static str,
    },

    #[error("unreadable header: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error, PartialEq)]
enum RowError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("empty '{0}' field")]
    EmptyField(String),

    #[error("invalid time_diff '{0}'")]
    InvalidTimeDiff(String),

    #[error(transparent)]
    UnknownBenchmarkType(#[from] UnknownBenchmarkType),
}

/// Positions of the relevant columns within a header.
#[derive(Debug, PartialEq)]
struct Columns {
    names: Vec<String>,
    function_name: usize,
    time_diff: usize,
    benchmark_type: Option<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Result<Self, HeaderError> {
        let names: Vec<String> = header.iter().map(str::to_string).collect();
        let position = |column: &'static str| names.iter().position(|n| n == column);
        let require = |column: &'static str| {
            position(column).ok_or_else(|| HeaderError::MissingColumn {
                header: names.join(","),
                column,
            })
        };

        let function_name = require(FUNCTION_NAME_COLUMN)?;
        let time_diff = require(TIME_DIFF_COLUMN)?;
        let benchmark_type = position(BENCHMARK_TYPE_COLUMN);

        Ok(Columns {
            names,
            function_name,
            time_diff,
            benchmark_type,
        })
    }

    fn parse_row(
        &self,
        record: &StringRecord,
        source_file: &str,
    ) -> Result<MeasurementRecord, RowError> {
        if record.len() != self.names.len() {
            return Err(RowError::FieldCount {
                expected: self.names.len(),
                found: record.len(),
            });
        }
        if let Some((name, _)) = self.names.iter().zip(record).find(|(_, f)| f.is_empty()) {
            return Err(RowError::EmptyField(name.clone()));
        }

        let raw_time_diff = &record[self.time_diff];
        let time_diff = raw_time_diff
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite() && *t >= 0.0)
            .ok_or_else(|| RowError::InvalidTimeDiff(raw_time_diff.to_string()))?;

        let benchmark_type = self
            .benchmark_type
            .map(|i| record[i].parse::<BenchmarkType>())
            .transpose()?;

        Ok(MeasurementRecord {
            benchmark_type,
            function_name: record[self.function_name].to_string(),
            time_diff,
            source_file: source_file.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unindent::unindent;

    const SOURCE: &str = "modbus_purecap_microbenchmark_20_1.txt";

    #[test]
    fn test_single_row() {
        let input = "modbus_function_name,time_diff\nMODBUS_FC_ALL,12.0\n";

        let records = BenchmarkLogParser.parse(input, SOURCE);

        assert_eq!(
            records,
            vec![MeasurementRecord {
                benchmark_type: None,
                function_name: "MODBUS_FC_ALL".to_string(),
                time_diff: 12.0,
                source_file: SOURCE.to_string(),
            }]
        );
    }

    #[test]
    fn test_phase_tagged_rows_with_padding() {
        let input = unindent(
            "
            FreeRTOS_IPInit
            benchmark_type, modbus_function_name, time_diff
            REQUEST_PROCESSING_MICROBENCHMARK, MODBUS_FC_READ_SINGLE_COIL, 1520
            SPARE_PROCESSING_MICROBENCHMARK, MODBUS_FC_READ_SINGLE_COIL, 18480
            ",
        );

        let records = BenchmarkLogParser.parse(&input, SOURCE);

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].benchmark_type,
            Some(BenchmarkType::RequestProcessingMicrobenchmark)
        );
        assert_eq!(records[0].function_name, "MODBUS_FC_READ_SINGLE_COIL");
        assert_eq!(records[0].time_diff, 1520.0);
        assert_eq!(
            records[1].benchmark_type,
            Some(BenchmarkType::SpareProcessingMicrobenchmark)
        );
        assert_eq!(records[1].time_diff, 18480.0);
    }

    #[test]
    fn test_interleaved_diagnostics_are_dropped() {
        let input = unindent(
            "
            modbus_function_name,time_diff
            MODBUS_FC_WRITE_STRING,40.0
            NetworkInterface: link up
            MODBUS_FC_WRITE_STRING,42.0
            ",
        );

        let records = BenchmarkLogParser.parse(&input, SOURCE);

        assert_eq!(records.len(), 2);
        assert!(records
            .iter()
            .all(|r| !r.function_name.contains("NetworkInterface")));
    }

    #[test]
    fn test_no_matching_lines() {
        let input = "IP Address: 10.0.2.15\nidentifier 3\n";
        assert!(BenchmarkLogParser.parse(input, SOURCE).is_empty());
        assert!(BenchmarkLogParser.parse("", SOURCE).is_empty());
    }

    #[test]
    fn test_header_without_time_diff() {
        let input = "modbus_function_name,elapsed\nMODBUS_FC_ALL,12.0\n";
        assert!(BenchmarkLogParser.parse(input, SOURCE).is_empty());
    }

    #[test]
    fn test_malformed_rows_are_dropped() {
        let input = unindent(
            "
            benchmark_type,modbus_function_name,time_diff
            MAX_PROCESSING_MACROBENCHMARK,MODBUS_FC_ALL,100
            MAX_PROCESSING_MACROBENCHMARK,MODBUS_FC_ALL
            MAX_PROCESSING_MACROBENCHMARK,MODBUS_FC_ALL,
            MAX_PROCESSING_MACROBENCHMARK,MODBUS_FC_ALL,abc
            MAX_PROCESSING_MACROBENCHMARK,MODBUS_FC_ALL,-3
            MAX_PROCESSING_MACROBENCHMARK,MODBUS_FC_ALL,nan
            MAX_PROCESSING_MACROBENCHMARK,MODBUS_FC_ALL,1,2
            MAX_PROCESSING_MACROBENCHMARK_V2,MODBUS_FC_ALL,5
            MAX_PROCESSING_MACROBENCHMARK,,5
            MAX_PROCESSING_MACROBENCHMARK,MODBUS_FC_ALL,101.5
            ",
        );

        let records = BenchmarkLogParser.parse(&input, SOURCE);

        let times: Vec<f64> = records.iter().map(|r| r.time_diff).collect();
        assert_eq!(times, vec![100.0, 101.5]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "modbus_function_name,time_diff\r\nMODBUS_FC_ALL,7\r\n";
        let records = BenchmarkLogParser.parse(input, SOURCE);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].time_diff, 7.0);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = unindent(
            "
            benchmark_type, modbus_function_name, time_diff
            REQUEST_PROCESSING_MICROBENCHMARK, MODBUS_FC_READ_STRING, 10
            NetworkInterface
            REQUEST_PROCESSING_MICROBENCHMARK, MODBUS_FC_WRITE_STRING, 11
            ",
        );

        let parser = BenchmarkLogParser;
        assert_eq!(parser.parse(&input, SOURCE), parser.parse(&input, SOURCE));
    }

    #[test]
    fn test_columns_from_header() {
        let header =
            StringRecord::from(vec!["benchmark_type", "modbus_function_name", "time_diff"]);
        let columns = Columns::from_header(&header).unwrap();
        assert_eq!(columns.function_name, 1);
        assert_eq!(columns.time_diff, 2);
        assert_eq!(columns.benchmark_type, Some(0));

        let header = StringRecord::from(vec!["benchmark_type", "time_diff"]);
        assert!(matches!(
            Columns::from_header(&header),
            Err(HeaderError::MissingColumn {
                column: FUNCTION_NAME_COLUMN,
                ..
            })
        ));
    }

    #[test]
    fn test_quoted_fields() {
        let input = unindent(
            r#"
            benchmark_type,modbus_function_name,time_diff
            REQUEST_PROCESSING_MICROBENCHMARK,"MODBUS_FC_ALL",12
            REQUEST_PROCESSING_MICROBENCHMARK,MODBUS_FC_ALL,"13"
            "#,
        );

        let records = BenchmarkLogParser.parse(&input, SOURCE);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.function_name == "MODBUS_FC_ALL"));
        assert_eq!(records[0].time_diff, 12.0);
        assert_eq!(records[1].time_diff, 13.0);
    }
}
