use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;
use log::{debug, log_enabled, Level};

use crate::config::{BenchmarkSuite, ComparisonGroup};
use crate::data::VariantDataset;
use crate::defaults::NO_DATA_MARKER;
use crate::functions::function_label;
use crate::overhead::{compare, Comparison, VariantSummary};

/// Formats a table value; a missing value renders as `n/a`.
fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.3}", v),
        _ => "n/a".to_string(),
    }
}

/// Two-column table of `(label, value)` rows under a title line.
fn render_table<'a>(title: &str, rows: impl Iterator<Item = (&'a str, Option<f64>)>) -> String {
    let rows: Vec<(&str, String)> = rows.map(|(label, v)| (label, format_value(v))).collect();
    let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);

    let mut table = format!("{}\n", title);
    for (label, value) in rows {
        table.push_str(&format!(
            "{:<label_width$}    {:>value_width$}\n",
            label, value
        ));
    }
    table
}

/// Headline tables of a comparison: the cross-function geometric mean of
/// every variant divided by `normalization`, and its mean overhead.
pub fn render_comparison(comparison: &Comparison, normalization: f64) -> String {
    match comparison {
        Comparison::NoData { .. } => format!("\n{}\n", NO_DATA_MARKER),
        Comparison::Summary(summaries) => {
            let geometric_means = render_table(
                "Geometric mean",
                summaries
                    .iter()
                    .map(|s| (s.name.as_str(), Some(s.mean_geometric_mean / normalization))),
            );
            let overheads = render_table(
                "Overhead (%)",
                summaries.iter().map(|s| (s.name.as_str(), s.mean_overhead)),
            );
            format!("\n{}\n{}", geometric_means, overheads)
        }
    }
}

/// Per-function geometric means and overheads of one variant, labelled with
/// readable function names.
pub fn render_breakdown(summary: &VariantSummary) -> String {
    let geometric_means = render_table(
        &format!("{} geometric mean", summary.name),
        summary
            .geometric_means
            .iter()
            .map(|(f, gm)| (function_label(f), Some(*gm))),
    );
    let overheads = render_table(
        &format!("{} overhead (%)", summary.name),
        summary
            .geometric_means
            .keys()
            .map(|f| (function_label(f), summary.overheads.get(f).copied())),
    );
    format!("{}\n{}", geometric_means, overheads)
}

/// Summarize one comparison group and write its tables.
pub fn report_group<W: Write>(
    out: &mut W,
    suite: &BenchmarkSuite,
    group: &ComparisonGroup,
    datasets: &HashMap<String, VariantDataset>,
) -> Result<()> {
    writeln!(out)?;
    for line in &group.heading {
        writeln!(out, "{}", line)?;
    }

    let comparison = compare(datasets, group.variants.as_slice(), suite.benchmark_type)?;
    if let Comparison::NoData { variant } = &comparison {
        debug!("Skipping group of {}: no data for {}", group.variants.join(", "), variant);
    }
    writeln!(out, "{}", render_comparison(&comparison, suite.normalization))?;

    if log_enabled!(Level::Debug) {
        if let Comparison::Summary(summaries) = &comparison {
            for summary in summaries {
                debug!("\n{}", render_breakdown(summary));
            }
        }
    }

    Ok(())
}

/// Write the tables of every comparison group of `suite`, in declaration
/// order.
pub fn report<W: Write>(
    out: &mut W,
    suite: &BenchmarkSuite,
    datasets: &HashMap<String, VariantDataset>,
) -> Result<()> {
    for group in &suite.groups {
        report_group(out, suite, group, datasets)?;
    }
    Ok(())
}
