use cpbench_ingest::BenchmarkRecord;
use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};

/// sentinel that disables a filter
pub const ALL: &str = "All";

/// A single filter value, either disabled (`All`) or an exact match
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(selected) => selected,
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<Option<&str>> for Selection {
    fn from(value: Option<&str>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => ALL.to_owned(),
            Selection::Only(value) => value,
        }
    }
}

impl FromStr for Selection {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(value))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record labels that can be filtered on besides the workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Protocol,
    Consistency,
    Persistency,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Protocol, Field::Consistency, Field::Persistency];

    pub fn value(self, record: &BenchmarkRecord) -> &str {
        match self {
            Self::Protocol => &record.protocol,
            Self::Consistency => &record.consistency,
            Self::Persistency => &record.persistency,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Protocol => "protocol",
            Self::Consistency => "consistency",
            Self::Persistency => "persistency",
        }
    }
}

/// Conjunction of equality filters, the workload is always applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    pub workload: String,
    #[serde(default)]
    pub protocol: Selection,
    #[serde(default)]
    pub consistency: Selection,
    #[serde(default)]
    pub persistency: Selection,
}

impl Criteria {
    pub fn workload(workload: impl Into<String>) -> Self {
        Self {
            workload: workload.into(),
            ..Self::default()
        }
    }

    pub fn with_protocol(mut self, protocol: impl Into<Selection>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn with_consistency(mut self, consistency: impl Into<Selection>) -> Self {
        self.consistency = consistency.into();
        self
    }

    pub fn with_persistency(mut self, persistency: impl Into<Selection>) -> Self {
        self.persistency = persistency.into();
        self
    }

    pub fn selection(&self, field: Field) -> &Selection {
        match field {
            Field::Protocol => &self.protocol,
            Field::Consistency => &self.consistency,
            Field::Persistency => &self.persistency,
        }
    }

    pub fn matches(&self, record: &BenchmarkRecord) -> bool {
        record.workload == self.workload
            && Field::ALL
                .iter()
                .all(|field| self.selection(*field).matches(field.value(record)))
    }
}
