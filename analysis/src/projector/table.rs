use crate::{projector::ProjectionError, query::rank::RankedEntry};
use cpbench_ingest::BenchmarkRecord;
use serde::Serialize;
use std::{cmp::Ordering, fmt, str::FromStr};

/// shown in place of missing labels
pub const PLACEHOLDER: &str = "-";

/// One row of the results table, every cell already formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub project: String,
    pub protocol: String,
    pub language: String,
    pub runtime: String,
    pub throughput: String,
    pub consistency: String,
    pub persistency: String,
}

impl TableRow {
    pub const HEADERS: [&'static str; 7] = [
        "Project",
        "Protocol",
        "Language",
        "RunTime (ms)",
        "Throughput (ops/sec)",
        "Consistency",
        "Persistency",
    ];

    pub fn cell(&self, column: Column) -> &str {
        match column {
            Column::Project => &self.project,
            Column::Protocol => &self.protocol,
            Column::Language => &self.language,
            Column::Runtime => &self.runtime,
            Column::Throughput => &self.throughput,
            Column::Consistency => &self.consistency,
            Column::Persistency => &self.persistency,
        }
    }

    pub fn cells(&self) -> [&str; 7] {
        [
            self.project.as_str(),
            self.protocol.as_str(),
            self.language.as_str(),
            self.runtime.as_str(),
            self.throughput.as_str(),
            self.consistency.as_str(),
            self.persistency.as_str(),
        ]
    }
}

/// A column of the results table, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Project,
    Protocol,
    Language,
    Runtime,
    Throughput,
    Consistency,
    Persistency,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Self::Project,
        Self::Protocol,
        Self::Language,
        Self::Runtime,
        Self::Throughput,
        Self::Consistency,
        Self::Persistency,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Protocol => "protocol",
            Self::Language => "language",
            Self::Runtime => "runtime",
            Self::Throughput => "throughput",
            Self::Consistency => "consistency",
            Self::Persistency => "persistency",
        }
    }
}

impl FromStr for Column {
    type Err = ProjectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|column| column.name() == lowered)
            .ok_or_else(|| ProjectionError::UnknownColumn(value.to_owned()))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numbers compare by value, everything else as lowercase text
fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(a), Ok(b)) => a.total_cmp(&b),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Stable sort of `rows` by the cells of `column`, equal cells keep their order
pub fn sort_rows(rows: &mut [TableRow], column: Column, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = compare_cells(a.cell(column), b.cell(column));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_owned()
    } else {
        value.to_owned()
    }
}

pub fn table_rows<'a, I>(records: I, placeholder: &str) -> Vec<TableRow>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    records
        .into_iter()
        .map(|record| TableRow {
            project: record.project.clone(),
            protocol: record.protocol.clone(),
            language: or_placeholder(record.language.as_deref().unwrap_or_default(), placeholder),
            runtime: record.runtime().to_string(),
            throughput: format!("{:.3}", record.throughput()),
            consistency: or_placeholder(&record.consistency, placeholder),
            persistency: or_placeholder(&record.persistency, placeholder),
        })
        .collect()
}

/// One line of an overview leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewRow {
    pub rank: usize,
    /// `<protocol> - <project>`
    pub name: String,
    pub runtime: String,
    pub throughput: String,
    /// percent of the leader's throughput
    pub bar_width: u32,
}

pub fn overview_rows(entries: &[RankedEntry]) -> Vec<OverviewRow> {
    entries
        .iter()
        .map(|entry| OverviewRow {
            rank: entry.rank,
            name: format!("{} - {}", entry.record.protocol, entry.record.project),
            runtime: entry.record.runtime().to_string(),
            throughput: entry.record.throughput().to_string(),
            bar_width: entry.bar_width,
        })
        .collect()
}
