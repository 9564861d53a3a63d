use std::fmt::Display;

use average::{self, concatenate, Estimate, Max, Mean, Min};
use itertools::Itertools;
use thiserror::Error;

use readable::num::*;

use crate::defaults::{IQR_FENCE_FACTOR, MAX_OUTLIER_FRACTION, WARN_OUTLIER_FRACTION};

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("Cannot summarize an empty sample")]
    EmptySample,

    #[error("Geometric mean is undefined for non-positive value {value}")]
    NonPositiveSample { value: f64 },

    #[error("Removed {removed} of {total} samples as outliers")]
    TooManyOutliers { removed: usize, total: usize },
}

concatenate!(AggStats, [Mean, mean], [Min, min], [Max, max]);

pub fn aggregate_measurements(measurements: impl Iterator<Item = f64>) -> Stats {
    let s: AggStats = measurements.collect();
    Stats {
        mean: s.mean(),
        min: s.min(),
        max: s.max(),
        len: s.mean.len() as usize,
    }
}

#[derive(Debug)]
pub struct Stats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub len: usize,
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "μ: {} min: {} max: {} n: {}",
            Float::from(self.mean),
            Float::from(self.min),
            Float::from(self.max),
            Unsigned::from(self.len),
        )
    }
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let m: Mean = values.collect();
    if m.is_empty() {
        None
    } else {
        Some(m.mean())
    }
}

/// Quantile `q` of an ascending sample, linearly interpolated between the
/// closest ranks at position `(n - 1) * q`.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = last as f64 * q.clamp(0.0, 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let fraction = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Inclusive bounds outside of which a sample is an outlier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fences {
    pub lower: f64,
    pub upper: f64,
}

impl Fences {
    /// Fences `[Q1 - k IQR, Q3 + k IQR]` of `sample` for fence factor `k`.
    pub fn from_sample(sample: &[f64], fence_factor: f64) -> Option<Fences> {
        let sorted = sample.iter().copied().sorted_by(f64::total_cmp).collect_vec();
        let q1 = quantile(&sorted, 0.25)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;
        Some(Fences {
            lower: q1 - fence_factor * iqr,
            upper: q3 + fence_factor * iqr,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Thresholds of the outlier filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierPolicy {
    pub fence_factor: f64,
    /// Removing this fraction of the sample or more is an error.
    pub max_fraction: f64,
    /// Removing more than this fraction is logged as a warning.
    pub warn_fraction: f64,
}

impl OutlierPolicy {
    /// Whether removing `removed` of `total` samples deserves a warning.
    pub fn is_heavy_removal(&self, removed: usize, total: usize) -> bool {
        removed as f64 > self.warn_fraction * total as f64
    }
}

impl Default for OutlierPolicy {
    fn default() -> Self {
        OutlierPolicy {
            fence_factor: IQR_FENCE_FACTOR,
            max_fraction: MAX_OUTLIER_FRACTION,
            warn_fraction: WARN_OUTLIER_FRACTION,
        }
    }
}

/// Result of the outlier filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSample {
    /// Retained values in their original order.
    pub retained: Vec<f64>,
    pub removed: usize,
    /// `None` for an empty input.
    pub fences: Option<Fences>,
}

/// Remove both tails of `sample` using the boxplot rule with the default
/// [`OutlierPolicy`].
pub fn remove_outliers(sample: &[f64]) -> Result<FilteredSample, StatsError> {
    remove_outliers_with(sample, &OutlierPolicy::default())
}

/// Remove both tails of `sample` using the IQR rule.
///
/// The fences are computed once from the unfiltered sample.
pub fn remove_outliers_with(
    sample: &[f64],
    policy: &OutlierPolicy,
) -> Result<FilteredSample, StatsError> {
    let Some(fences) = Fences::from_sample(sample, policy.fence_factor) else {
        return Ok(FilteredSample {
            retained: Vec::new(),
            removed: 0,
            fences: None,
        });
    };

    let retained = sample
        .iter()
        .copied()
        .filter(|v| fences.contains(*v))
        .collect_vec();
    let total = sample.len();
    let removed = total - retained.len();

    if removed as f64 >= policy.max_fraction * total as f64 {
        return Err(StatsError::TooManyOutliers { removed, total });
    }

    Ok(FilteredSample {
        retained,
        removed,
        fences: Some(fences),
    })
}

/// Geometric mean computed as `exp(mean(ln x))`.
///
/// Zero, negative and non-finite values are rejected instead of producing a
/// degenerate or non-finite mean.
pub fn geometric_mean(sample: &[f64]) -> Result<f64, StatsError> {
    if let Some(&value) = sample.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
        return Err(StatsError::NonPositiveSample { value });
    }
    mean(sample.iter().map(|v| v.ln()))
        .map(f64::exp)
        .ok_or(StatsError::EmptySample)
}
