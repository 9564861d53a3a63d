use itertools::Itertools;

use crate::data::BenchmarkType;
use crate::defaults::MACROBENCHMARK_REQUESTS_PER_RUN;

/// Build configurations without network capabilities: baseline, CHERI
/// purecap and purecap with object capabilities.
const BASE_CONFIGURATIONS: [&str; 3] = ["nocheri", "purecap", "purecap_object_caps"];

/// The same three configurations with network capabilities enabled.
const NETWORK_CAPS_CONFIGURATIONS: [&str; 3] = [
    "nocheri_network_caps",
    "purecap_network_caps",
    "purecap_object_network_caps",
];

const BASE_LEGEND: &str = "base | base + CHERI | base + CHERI + obj";
const NETWORK_CAPS_LEGEND: &str = "base + net | base + CHERI + net | base + CHERI + obj + net";

/// A set of variants summarized side by side. The first variant is the
/// baseline of the group.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonGroup {
    pub heading: Vec<String>,
    pub variants: Vec<String>,
}

/// Everything a post-processor needs to know about one benchmark campaign.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSuite {
    pub name: &'static str,
    /// Phase whose rows are summarized.
    pub benchmark_type: BenchmarkType,
    /// Divisor applied to the reported cross-function geometric mean.
    pub normalization: f64,
    pub groups: Vec<ComparisonGroup>,
}

impl BenchmarkSuite {
    /// Request processing time of the microbenchmark applications, run with a
    /// 20 ms and a 100 ms execution period.
    pub fn microbenchmark() -> Self {
        let groups = [
            (BASE_CONFIGURATIONS, BASE_LEGEND),
            (NETWORK_CAPS_CONFIGURATIONS, NETWORK_CAPS_LEGEND),
        ]
        .into_iter()
        .cartesian_product([20, 100])
        .map(|((configurations, legend), period)| ComparisonGroup {
            heading: vec![
                format!("Processing: {legend}"),
                format!("{period}ms execution period"),
            ],
            variants: variant_names(&configurations, "microbenchmark", period),
        })
        .collect();

        BenchmarkSuite {
            name: "modbus-microbenchmark",
            benchmark_type: BenchmarkType::RequestProcessingMicrobenchmark,
            normalization: 1.0,
            groups,
        }
    }

    /// Throughput of the macrobenchmark applications under 0 ms and 10 ms of
    /// added network latency. Geometric means are reported per request.
    pub fn macrobenchmark() -> Self {
        let groups = [
            (BASE_CONFIGURATIONS, BASE_LEGEND),
            (NETWORK_CAPS_CONFIGURATIONS, NETWORK_CAPS_LEGEND),
        ]
        .into_iter()
        .cartesian_product([0, 10])
        .map(|((configurations, legend), latency)| ComparisonGroup {
            heading: vec![
                format!("Comparing:\t{legend}"),
                format!("Variant:\t{latency}ms network latency"),
            ],
            variants: variant_names(&configurations, "macrobenchmark", latency),
        })
        .collect();

        BenchmarkSuite {
            name: "modbus-macrobenchmark",
            benchmark_type: BenchmarkType::MaxProcessingMacrobenchmark,
            normalization: MACROBENCHMARK_REQUESTS_PER_RUN,
            groups,
        }
    }

    /// All variants referenced by any group, in order of first appearance.
    pub fn variants(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.variants.iter().map(String::as_str))
            .unique()
            .collect()
    }
}

fn variant_names(configurations: &[&str], kind: &str, condition: u32) -> Vec<String> {
    configurations
        .iter()
        .map(|configuration| format!("modbus_{configuration}_{kind}_{condition}"))
        .collect()
}
