//! Chart payloads for an external charting library
//!
//! Every chart is a `{labels, datasets}` pair as most charting libraries expect it. Bar
//! charts carry a single dataset, line charts one dataset per compared implementation.

use super::{
    series::{
        latency_percentile_series, latency_series, runtime_series, throughput_series,
        LatencyPoint, PercentilePoint, SeriesPoint,
    },
    Metric, ProjectionError,
};
use cpbench_ingest::BenchmarkRecord;
use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Color(pub &'static str);

pub const ROSE_600: Color = Color("#ec003f");
pub const PINK_600: Color = Color("#e60076");
pub const INDIGO_600: Color = Color("#4f39f6");
pub const LIME_600: Color = Color("#00a63e");
pub const YELLOW_600: Color = Color("#d08700");
pub const ORANGE_600: Color = Color("#f54900");
pub const RED_600: Color = Color("#e7000b");
pub const GRAY_100: Color = Color("#f3f4f6");
pub const GRAY_700: Color = Color("#364153");

/// series colours, assigned round robin
pub const PALETTE: [Color; 9] = [
    ROSE_600, PINK_600, INDIGO_600, LIME_600, YELLOW_600, ORANGE_600, RED_600, GRAY_100,
    GRAY_700,
];

pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// horizontal bars, one per label
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub color: Color,
    pub fill: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub id: &'static str,
    pub kind: ChartKind,
    pub title: &'static str,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

fn bar_chart(
    id: &'static str,
    title: &'static str,
    color: Color,
    series: &[SeriesPoint],
) -> ChartData {
    ChartData {
        id,
        kind: ChartKind::Bar,
        title,
        labels: series.iter().map(|point| point.label.clone()).collect_vec(),
        datasets: vec![Dataset {
            label: title.to_owned(),
            data: series.iter().map(|point| point.value).collect_vec(),
            color,
            fill: true,
        }],
    }
}

pub fn throughput_chart(series: &[SeriesPoint]) -> ChartData {
    bar_chart("throughput", "Throughput (ops/sec)", ROSE_600, series)
}

pub fn runtime_chart(series: &[SeriesPoint]) -> ChartData {
    bar_chart("runtime", "RunTime (ms)", PINK_600, series)
}

pub fn latency_percentile_chart(points: &[PercentilePoint]) -> ChartData {
    ChartData {
        id: "latency-percentile",
        kind: ChartKind::Line,
        title: "Latency Percentile (μs)",
        labels: ["50th Percentile", "95th Percentile", "99th Percentile"]
            .map(String::from)
            .to_vec(),
        datasets: points
            .iter()
            .enumerate()
            .map(|(index, point)| Dataset {
                label: point.label.clone(),
                data: vec![point.p50, point.p95, point.p99],
                color: palette_color(index),
                fill: false,
            })
            .collect_vec(),
    }
}

pub fn latency_chart(points: &[LatencyPoint]) -> ChartData {
    ChartData {
        id: "latency",
        kind: ChartKind::Line,
        title: "Latency (μs)",
        labels: ["Minimum", "Average", "Maximum"].map(String::from).to_vec(),
        datasets: points
            .iter()
            .enumerate()
            .map(|(index, point)| Dataset {
                label: point.label.clone(),
                data: vec![point.min, point.avg, point.max],
                color: palette_color(index),
                fill: true,
            })
            .collect_vec(),
    }
}

/// Both charts shown for `metric`: throughput and runtime for OVERALL, latency
/// percentiles and min/avg/max for an operation
pub fn charts(
    records: &[&BenchmarkRecord],
    metric: Metric,
) -> Result<Vec<ChartData>, ProjectionError> {
    let records = records.iter().copied();

    match metric {
        Metric::Overall => Ok(vec![
            throughput_chart(&throughput_series(records.clone())),
            runtime_chart(&runtime_series(records)),
        ]),
        Metric::Operation(operation) => Ok(vec![
            latency_percentile_chart(&latency_percentile_series(records.clone(), operation)?),
            latency_chart(&latency_series(records, operation)?),
        ]),
    }
}
