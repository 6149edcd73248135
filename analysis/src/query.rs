pub mod criteria;
pub mod rank;


use cpbench_ingest::BenchmarkRecord;
use criteria::{Criteria, Field, Selection};
use itertools::Itertools;
use tracing::trace;

/// All records matching `criteria`, in input order
pub fn filter<'a, I>(records: I, criteria: &Criteria) -> Vec<&'a BenchmarkRecord>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    let filtered = records
        .into_iter()
        .filter(|record| criteria.matches(record))
        .collect_vec();

    trace!(criteria = ?criteria, matches = filtered.len(), "Filtered records");

    filtered
}

/// distinct workloads in order of first appearance, the first one is the default
pub fn workloads(records: &[BenchmarkRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|record| record.workload.as_str())
        .unique()
        .collect_vec()
}

/// Selectable values of `field`, unlabelled records are skipped and `All` comes last
pub fn filter_options(records: &[BenchmarkRecord], field: Field) -> Vec<Selection> {
    records
        .iter()
        .map(|record| field.value(record))
        .filter(|value| !value.is_empty())
        .unique()
        .map(Selection::from)
        .chain(std::iter::once(Selection::All))
        .collect_vec()
}

/// Metric groups offered for `workload`, taken from its first record
pub fn metric_groups<'a>(records: &'a [BenchmarkRecord], workload: &str) -> Vec<&'a str> {
    records
        .iter()
        .find(|record| record.workload == workload)
        .map(|record| record.groups().collect_vec())
        .unwrap_or_default()
}
