use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

pub const OVERALL: &str = "OVERALL";

pub const RUNTIME: &str = "RunTime(ms)";
pub const THROUGHPUT: &str = "Throughput(ops/sec)";

pub const AVERAGE_LATENCY: &str = "AverageLatency(us)";
pub const MIN_LATENCY: &str = "MinLatency(us)";
pub const MAX_LATENCY: &str = "MaxLatency(us)";
pub const P50_LATENCY: &str = "50thPercentileLatency(us)";
pub const P95_LATENCY: &str = "95thPercentileLatency(us)";
pub const P99_LATENCY: &str = "99thPercentileLatency(us)";

/// Numeric measurements of a single metric group, e.g. `OVERALL` or `READ`
///
/// YCSB occasionally reports textual values inside a group, these are dropped on
/// deserialization so every value held here is a plain number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, serde_json::Value>")]
pub struct MetricValues(BTreeMap<String, f64>);

impl MetricValues {
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.0.get(metric).copied()
    }

    pub fn insert(&mut self, metric: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(metric.into(), value)
    }
}

impl From<BTreeMap<String, serde_json::Value>> for MetricValues {
    fn from(raw: BTreeMap<String, serde_json::Value>) -> Self {
        Self(
            raw.into_iter()
                .filter_map(|(name, value)| match value.as_f64() {
                    Some(number) => Some((name, number)),
                    None => {
                        trace!(metric = %name, value = %value, "Dropped non-numeric metric");
                        None
                    }
                })
                .collect(),
        )
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MetricValues {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }
}
