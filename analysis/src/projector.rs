pub mod chart;
pub mod series;
pub mod table;


use cpbench_ingest::metrics::OVERALL;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Metric {0} has no projection, use OVERALL, READ, UPDATE, INSERT or DELETE")]
    UnsupportedMetric(String),
    #[error("{label} has no {group} metric group")]
    MissingGroup { label: String, group: String },
    #[error("{label} has no {group}.{metric} value")]
    MissingMetric {
        label: String,
        group: String,
        metric: String,
    },
    #[error(
        "Unknown column {0}, use project, protocol, language, runtime, throughput, consistency \
         or persistency"
    )]
    UnknownColumn(String),
}

/// Per-operation metric groups that carry latency measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Update,
    Insert,
    Delete,
}

impl Operation {
    pub fn group(self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Insert => "INSERT",
            Self::Delete => "DELETE",
        }
    }
}

/// The selected metric group, decides which series a view is made of
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    /// throughput and runtime of the whole run
    #[default]
    Overall,
    /// latency distribution of a single operation type
    Operation(Operation),
}

impl Metric {
    pub fn group(self) -> &'static str {
        match self {
            Self::Overall => OVERALL,
            Self::Operation(operation) => operation.group(),
        }
    }
}

impl FromStr for Metric {
    type Err = ProjectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            OVERALL => Ok(Self::Overall),
            "READ" => Ok(Self::Operation(Operation::Read)),
            "UPDATE" => Ok(Self::Operation(Operation::Update)),
            "INSERT" => Ok(Self::Operation(Operation::Insert)),
            "DELETE" => Ok(Self::Operation(Operation::Delete)),
            unsupported => Err(ProjectionError::UnsupportedMetric(unsupported.to_owned())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group())
    }
}
