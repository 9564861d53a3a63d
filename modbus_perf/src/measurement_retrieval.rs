use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;

use crate::data::VariantDataset;
use crate::parsers::BenchmarkLogParser;

/// Output files of one variant: `<variant>_*.txt` directly inside `input_dir`,
/// in lexicographic order.
///
/// Only file names are matched against the pattern, so `input_dir` itself may
/// be any path.
pub fn variant_files(input_dir: &Path, variant: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}_*.txt", glob::Pattern::escape(variant));
    let matcher = glob::Pattern::new(&pattern)
        .with_context(|| format!("Invalid file pattern '{}'", pattern))?;

    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("Failed to list {}", input_dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to list {}", input_dir.display()))?;
        let is_match = entry
            .file_name()
            .to_str()
            .is_some_and(|name| matcher.matches(name));
        if is_match && entry.path().is_file() {
            files.push(entry.path());
        }
    }

    Ok(files.into_iter().sorted().collect())
}

/// Parse every output file of `variant` and concatenate the records.
///
/// A variant without any files yields an empty dataset.
pub fn collect_variant(input_dir: &Path, variant: &str) -> Result<VariantDataset> {
    let parser = BenchmarkLogParser;
    let mut dataset = VariantDataset::new(variant);

    for file in variant_files(input_dir, variant)? {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("{}", file_name);

        let content = fs::read(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let records = parser.parse(&String::from_utf8_lossy(&content), &file_name);
        if records.is_empty() {
            info!("No records in {}", file_name);
        }
        dataset.records.extend(records);
    }

    Ok(dataset)
}

/// Collect the datasets of all `variants` up front.
pub fn collect_variants<'a>(
    input_dir: &Path,
    variants: impl IntoIterator<Item = &'a str>,
) -> Result<HashMap<String, VariantDataset>> {
    variants
        .into_iter()
        .map(|variant| Ok((variant.to_string(), collect_variant(input_dir, variant)?)))
        .collect()
}
