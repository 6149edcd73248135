use super::{filter, Criteria};
use cpbench_ingest::BenchmarkRecord;
use itertools::Itertools;
use serde::Serialize;
use std::{cmp::Ordering, fmt};

/// number of entries per category on the overview
pub const DEFAULT_TOP: usize = 5;

/// Consistency categories of the overview, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConsistencyCategory {
    Linearizability,
    PrimaryIntegrity,
    Sequential,
    Causal,
    Pram,
    Eventual,
}

impl ConsistencyCategory {
    pub const ALL: [ConsistencyCategory; 6] = [
        Self::Linearizability,
        Self::PrimaryIntegrity,
        Self::Sequential,
        Self::Causal,
        Self::Pram,
        Self::Eventual,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Linearizability => "Linearizability",
            Self::PrimaryIntegrity => "Primary Integrity",
            Self::Sequential => "Sequential",
            Self::Causal => "Causal",
            Self::Pram => "Pram",
            Self::Eventual => "Eventual",
        }
    }

    /// the primary integrity family comes with qualifiers, e.g. `Primary Integrity (Backup)`
    pub fn matches(self, consistency: &str) -> bool {
        match self {
            Self::PrimaryIntegrity => consistency.contains(self.label()),
            _ => consistency == self.label(),
        }
    }
}

impl fmt::Display for ConsistencyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Order by throughput, highest first. Equal throughput falls back to project and then
/// protocol so rankings are reproducible.
pub fn by_throughput(a: &BenchmarkRecord, b: &BenchmarkRecord) -> Ordering {
    b.throughput()
        .total_cmp(&a.throughput())
        .then_with(|| a.project.cmp(&b.project))
        .then_with(|| a.protocol.cmp(&b.protocol))
}

/// The `n` records with the highest throughput, best first
pub fn top_n<'a, I>(records: I, n: usize) -> Vec<&'a BenchmarkRecord>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    records
        .into_iter()
        .sorted_by(|a, b| by_throughput(a, b))
        .take(n)
        .collect_vec()
}

/// Display width in percent of `throughput` relative to the leader's `max`
///
/// A leader without throughput yields 0 instead of NaN.
pub fn bar_width(throughput: f64, max: f64) -> u32 {
    if !max.is_finite() || max <= 0.0 {
        return 0;
    }

    let width = (throughput / max * 100.0).round();

    if width.is_finite() && width > 0.0 {
        width as u32
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry<'a> {
    /// 1-based
    pub rank: usize,
    pub record: &'a BenchmarkRecord,
    pub bar_width: u32,
}

/// Attach ranks and bar widths to an already ranked sequence
pub fn rank<'a>(ranked: &[&'a BenchmarkRecord]) -> Vec<RankedEntry<'a>> {
    let max = ranked.first().map_or(0.0, |leader| leader.throughput());

    ranked
        .iter()
        .copied()
        .enumerate()
        .map(|(index, record)| RankedEntry {
            rank: index + 1,
            record,
            bar_width: bar_width(record.throughput(), max),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard<'a> {
    pub category: ConsistencyCategory,
    pub entries: Vec<RankedEntry<'a>>,
}

impl Leaderboard<'_> {
    /// consistency value to pre-select when drilling down into this category
    pub fn consistency(&self) -> &str {
        self.entries
            .first()
            .map_or(self.category.label(), |entry| entry.record.consistency.as_str())
    }
}

/// Top `n` records of `workload` for every consistency category
pub fn overview<'a>(
    records: &'a [BenchmarkRecord],
    workload: &str,
    n: usize,
) -> Vec<Leaderboard<'a>> {
    let in_workload = filter(records, &Criteria::workload(workload));

    ConsistencyCategory::ALL
        .iter()
        .map(|category| {
            let ranked = top_n(
                in_workload
                    .iter()
                    .copied()
                    .filter(|record| category.matches(&record.consistency)),
                n,
            );

            Leaderboard {
                category: *category,
                entries: rank(&ranked),
            }
        })
        .collect()
}
