use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::data::{BenchmarkType, VariantDataset};
use crate::stats::{
    self, aggregate_measurements, geometric_mean, remove_outliers, OutlierPolicy, StatsError,
};

/// Geometric means and overheads of one variant within a comparison group.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSummary {
    pub name: String,
    /// Outlier-trimmed geometric mean per function.
    pub geometric_means: BTreeMap<String, f64>,
    /// Percentage deviation from the baseline per function. Functions the
    /// baseline never measured have no entry.
    pub overheads: BTreeMap<String, f64>,
    /// Arithmetic mean of `geometric_means`.
    pub mean_geometric_mean: f64,
    /// Arithmetic mean of `overheads`, `None` if there are none.
    pub mean_overhead: Option<f64>,
}

/// Outcome of summarizing a comparison group.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// A variant of the group has no records for the selected phase.
    NoData { variant: String },
    /// One summary per variant, baseline first.
    Summary(Vec<VariantSummary>),
}

/// Signed percentage by which `value` exceeds `baseline`.
pub fn overhead_percent(value: f64, baseline: f64) -> f64 {
    (value - baseline) / baseline * 100.0
}

/// Warning for a sample group that lost an unusually large share of its
/// values to the outlier filter.
fn outlier_warning(
    policy: &OutlierPolicy,
    variant: &str,
    function: &str,
    removed: usize,
    total: usize,
) -> Option<String> {
    policy.is_heavy_removal(removed, total).then(|| {
        format!(
            "Removed {} of {} samples of {} in {} as outliers",
            removed, total, function, variant
        )
    })
}

/// Outlier-trimmed geometric mean of every function measured in `dataset`
/// for the given phase.
pub fn function_geometric_means(
    dataset: &VariantDataset,
    benchmark_type: BenchmarkType,
) -> Result<BTreeMap<String, f64>> {
    let mut samples: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in dataset.select_phase(benchmark_type) {
        samples
            .entry(record.function_name.as_str())
            .or_default()
            .push(record.time_diff);
    }

    let policy = OutlierPolicy::default();
    samples
        .into_iter()
        .map(|(function, sample)| {
            let filtered = remove_outliers(&sample)
                .with_context(|| format!("Too noisy: {} in {}", function, dataset.name))?;
            if let Some(message) =
                outlier_warning(&policy, &dataset.name, function, filtered.removed, sample.len())
            {
                warn!("{}", message);
            }
            let gm = geometric_mean(&filtered.retained)
                .with_context(|| format!("Cannot summarize {} in {}", function, dataset.name))?;
            debug!(
                "{}/{}: gm {:.3} removed {} ({})",
                dataset.name,
                function,
                gm,
                filtered.removed,
                aggregate_measurements(filtered.retained.iter().copied())
            );
            Ok((function.to_string(), gm))
        })
        .collect()
}

/// Summarize `variants` against the first of them.
///
/// Returns [`Comparison::NoData`] as soon as a variant lacks records of the
/// selected phase. Data-quality errors of any sample group abort the whole
/// comparison.
pub fn compare<S: AsRef<str>>(
    datasets: &HashMap<String, VariantDataset>,
    variants: &[S],
    benchmark_type: BenchmarkType,
) -> Result<Comparison> {
    let mut summaries: Vec<VariantSummary> = Vec::with_capacity(variants.len());

    for variant in variants {
        let variant: &str = variant.as_ref();
        let has_data = datasets
            .get(variant)
            .is_some_and(|d| d.select_phase(benchmark_type).next().is_some());
        let Some(dataset) = datasets.get(variant).filter(|_| has_data) else {
            debug!("No {} records for {}", benchmark_type, variant);
            return Ok(Comparison::NoData {
                variant: variant.to_string(),
            });
        };

        let geometric_means = function_geometric_means(dataset, benchmark_type)?;

        let overheads: BTreeMap<String, f64> = match summaries.first() {
            None => geometric_means.keys().map(|f| (f.clone(), 0.0)).collect(),
            Some(baseline) => geometric_means
                .iter()
                .filter_map(|(function, gm)| match baseline.geometric_means.get(function) {
                    Some(base) => Some((function.clone(), overhead_percent(*gm, *base))),
                    None => {
                        warn!(
                            "{} of {} not measured by baseline {}",
                            function, variant, baseline.name
                        );
                        None
                    }
                })
                .collect(),
        };

        let mean_geometric_mean =
            stats::mean(geometric_means.values().copied()).ok_or(StatsError::EmptySample)?;
        let mean_overhead = stats::mean(overheads.values().copied());

        summaries.push(VariantSummary {
            name: variant.to_string(),
            geometric_means,
            overheads,
            mean_geometric_mean,
            mean_overhead,
        });
    }

    Ok(Comparison::Summary(summaries))
}
