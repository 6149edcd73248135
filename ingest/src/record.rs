pub mod metrics;


use metrics::{MetricValues, OVERALL, RUNTIME, THROUGHPUT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// map of metric group -> measurements, e.g. `OVERALL`, `READ`, `UPDATE`
pub type MetricGroups = BTreeMap<String, MetricValues>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Record has an empty workload")]
    EmptyWorkload,
    #[error("Record is missing the {0} metric group")]
    MissingGroup(String),
    #[error("Metric {group}.{metric} is missing")]
    MissingMetric { group: String, metric: String },
    #[error("Metric {group}.{metric} must be a finite, non-negative number (found {value})")]
    InvalidMetric {
        group: String,
        metric: String,
        value: f64,
    },
}

/// Wire shape of a single entry in the results document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRecord {
    workload: String,
    project: String,
    protocol: String,
    #[serde(default)]
    consistency: Option<String>,
    #[serde(default)]
    persistency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    result: MetricGroups,
}

/// One validated benchmark run
///
/// Construction goes through [`BenchmarkRecord::new`] or deserialization, both of which
/// check that the workload is set and that `OVERALL` carries a usable runtime and
/// throughput. Serializing a record yields the same shape it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord", into = "RawRecord")]
pub struct BenchmarkRecord {
    pub workload: String,
    pub project: String,
    pub protocol: String,
    pub consistency: String,
    pub persistency: String,
    pub language: Option<String>,
    result: MetricGroups,
    throughput: f64,
    runtime: f64,
}

impl BenchmarkRecord {
    pub fn new(
        workload: impl Into<String>,
        project: impl Into<String>,
        protocol: impl Into<String>,
        result: MetricGroups,
    ) -> Result<Self, RecordError> {
        let workload = workload.into();

        if workload.is_empty() {
            return Err(RecordError::EmptyWorkload);
        }

        let overall = result
            .get(OVERALL)
            .ok_or_else(|| RecordError::MissingGroup(OVERALL.to_owned()))?;
        let throughput = required_metric(overall, THROUGHPUT)?;
        let runtime = required_metric(overall, RUNTIME)?;

        Ok(Self {
            workload,
            project: project.into(),
            protocol: protocol.into(),
            consistency: String::new(),
            persistency: String::new(),
            language: None,
            result,
            throughput,
            runtime,
        })
    }

    pub fn with_consistency(mut self, consistency: impl Into<String>) -> Self {
        self.consistency = consistency.into();
        self
    }

    pub fn with_persistency(mut self, persistency: impl Into<String>) -> Self {
        self.persistency = persistency.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// `OVERALL` throughput in ops/sec
    pub fn throughput(&self) -> f64 {
        self.throughput
    }

    /// `OVERALL` runtime in ms
    pub fn runtime(&self) -> f64 {
        self.runtime
    }

    pub fn group(&self, name: &str) -> Option<&MetricValues> {
        self.result.get(name)
    }

    /// names of all metric groups in this record
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.result.keys().map(String::as_str)
    }

    /// replace path-like separators in the project name, see [`normalize_project`]
    pub fn normalize(&mut self) {
        self.project = normalize_project(&self.project);
    }
}

/// Project identifiers are stored as `owner.repository`, displayed as `owner/repository`
pub fn normalize_project(project: &str) -> String {
    project.replace('.', "/")
}

fn required_metric(values: &MetricValues, metric: &str) -> Result<f64, RecordError> {
    match values.get(metric) {
        Some(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Some(value) => Err(RecordError::InvalidMetric {
            group: OVERALL.to_owned(),
            metric: metric.to_owned(),
            value,
        }),
        None => Err(RecordError::MissingMetric {
            group: OVERALL.to_owned(),
            metric: metric.to_owned(),
        }),
    }
}

impl TryFrom<RawRecord> for BenchmarkRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let mut record = Self::new(raw.workload, raw.project, raw.protocol, raw.result)?;
        record.consistency = raw.consistency.unwrap_or_default();
        record.persistency = raw.persistency.unwrap_or_default();
        record.language = raw.language;

        Ok(record)
    }
}

impl From<BenchmarkRecord> for RawRecord {
    fn from(record: BenchmarkRecord) -> Self {
        Self {
            workload: record.workload,
            project: record.project,
            protocol: record.protocol,
            consistency: Some(record.consistency),
            persistency: Some(record.persistency),
            language: record.language,
            result: record.result,
        }
    }
}
