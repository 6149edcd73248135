use super::{Operation, ProjectionError};
use cpbench_ingest::{
    metrics::{AVERAGE_LATENCY, MAX_LATENCY, MIN_LATENCY, P50_LATENCY, P95_LATENCY, P99_LATENCY},
    BenchmarkRecord,
};
use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentilePoint {
    pub label: String,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyPoint {
    pub label: String,
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

/// `<project> (<protocol>)`
pub fn label(record: &BenchmarkRecord) -> String {
    format!("{} ({})", record.project, record.protocol)
}

/// OVERALL throughput, highest first
pub fn throughput_series<'a, I>(records: I) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    records
        .into_iter()
        .map(|record| SeriesPoint {
            label: label(record),
            value: record.throughput(),
        })
        .sorted_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.label.cmp(&b.label)))
        .collect_vec()
}

/// OVERALL runtime, fastest first
pub fn runtime_series<'a, I>(records: I) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    records
        .into_iter()
        .map(|record| SeriesPoint {
            label: label(record),
            value: record.runtime(),
        })
        .sorted_by(|a, b| a.value.total_cmp(&b.value).then_with(|| a.label.cmp(&b.label)))
        .collect_vec()
}

/// 50th, 95th and 99th percentile latency of `operation`, ordered by label
pub fn latency_percentile_series<'a, I>(
    records: I,
    operation: Operation,
) -> Result<Vec<PercentilePoint>, ProjectionError>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    let points = records
        .into_iter()
        .map(|record| {
            let [p50, p95, p99] =
                operation_metrics(record, operation, [P50_LATENCY, P95_LATENCY, P99_LATENCY])?;

            Ok(PercentilePoint {
                label: label(record),
                p50,
                p95,
                p99,
            })
        })
        .collect::<Result<Vec<_>, ProjectionError>>()?;

    Ok(points
        .into_iter()
        .sorted_by(|a, b| a.label.cmp(&b.label))
        .collect_vec())
}

/// minimum, average and maximum latency of `operation`, ordered by label
pub fn latency_series<'a, I>(
    records: I,
    operation: Operation,
) -> Result<Vec<LatencyPoint>, ProjectionError>
where
    I: IntoIterator<Item = &'a BenchmarkRecord>,
{
    let points = records
        .into_iter()
        .map(|record| {
            let [min, avg, max] =
                operation_metrics(record, operation, [MIN_LATENCY, AVERAGE_LATENCY, MAX_LATENCY])?;

            Ok(LatencyPoint {
                label: label(record),
                min,
                avg,
                max,
            })
        })
        .collect::<Result<Vec<_>, ProjectionError>>()?;

    Ok(points
        .into_iter()
        .sorted_by(|a, b| a.label.cmp(&b.label))
        .collect_vec())
}

fn operation_metrics<const N: usize>(
    record: &BenchmarkRecord,
    operation: Operation,
    metrics: [&str; N],
) -> Result<[f64; N], ProjectionError> {
    let group = operation.group();
    let values = record
        .group(group)
        .ok_or_else(|| ProjectionError::MissingGroup {
            label: label(record),
            group: group.to_owned(),
        })?;

    let mut found = [0.0; N];
    for (slot, metric) in found.iter_mut().zip(metrics) {
        *slot = values
            .get(metric)
            .ok_or_else(|| ProjectionError::MissingMetric {
                label: label(record),
                group: group.to_owned(),
                metric: metric.to_owned(),
            })?;
    }

    Ok(found)
}
