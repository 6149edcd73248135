use super::{
    bar, render_json, render_options, render_overview, render_results, ChartSection, TableBuilder,
};
use crate::link::{parse_base, result_link};
use cpbench_analysis::{
    project,
    query::{filter_options, rank::overview, workloads},
    Column, Field, Metric, Operation, ViewState,
};
use cpbench_ingest::{parse_document, BenchmarkRecord};

const FIXTURE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ingest/tests/fixtures/data.json"
));

fn fixture() -> Vec<BenchmarkRecord> {
    parse_document(FIXTURE).unwrap()
}

fn rendered(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

#[test]
pub fn bars_scale_to_columns() {
    assert_eq!(bar(100, 40).chars().count(), 40);
    assert_eq!(bar(25, 40).chars().count(), 10);
    assert_eq!(bar(0, 40), "");
    assert_eq!(bar(250, 10).chars().count(), 10);
}

#[test]
pub fn table_rows_line_up() {
    let mut table = TableBuilder::new(["Name", "Bar"]).with_color(false);
    table.add_row(["raft - etcd-io/etcd", "██████"]);
    table.add_row(["zab", "█"]);
    table.add_row(["overflow", "x", "dropped"]);

    let mut output = Vec::new();
    table.render(&mut output).unwrap();
    let output = rendered(output);

    let widths = output
        .lines()
        .map(|line| line.chars().count())
        .collect::<Vec<_>>();
    assert_eq!(widths.len(), 7);
    assert!(widths.iter().all(|width| *width == widths[0]));
    assert!(!output.contains("dropped"));
}

#[test]
pub fn colored_headers_only_when_enabled() {
    let mut output = Vec::new();
    TableBuilder::new(["Name"])
        .with_color(true)
        .render(&mut output)
        .unwrap();
    assert!(rendered(output).contains("\x1b[1;36mName"));

    let mut output = Vec::new();
    TableBuilder::new(["Name"])
        .with_color(false)
        .render(&mut output)
        .unwrap();
    assert!(!rendered(output).contains('\x1b'));
}

#[test]
pub fn overview_lists_every_category_with_link() {
    let records = fixture();
    let base = parse_base("http://localhost:8000/").unwrap();
    let boards = overview(&records, "workloada", 5)
        .into_iter()
        .map(|board| {
            let link = result_link(&base, "workloada", board.consistency()).unwrap();
            (board, link)
        })
        .collect::<Vec<_>>();

    let mut output = Vec::new();
    render_overview(&mut output, "workloada", &boards, 20, false).unwrap();
    let output = rendered(output);

    assert!(output.starts_with("Overview of workloada"));
    assert!(output.contains("paxos - ailidani/paxi"));
    assert!(output.contains("consistency=Linearizability"));
    assert!(output.contains(&"█".repeat(20)));
    // no Pram record in the fixture
    assert!(output.contains(
        "Pram  http://localhost:8000/result.html?workload=workloada&consistency=Pram\n  no results"
    ));
}

#[test]
pub fn results_table_and_empty_message() {
    let records = fixture();
    let state = ViewState::new("workloada").with_consistency("Causal");
    let view = project(&records, &state, "-").unwrap();

    let mut output = Vec::new();
    render_results(&mut output, &state, &view, false).unwrap();
    let output = rendered(output);
    assert!(output.contains("Consistency Causal"));
    assert!(output.contains("fadhilkurnia/xdn"));
    assert!(output.contains("1020.410"));

    let state = state.with_protocol("raft");
    let view = project(&records, &state, "-").unwrap();
    let mut output = Vec::new();
    render_results(&mut output, &state, &view, false).unwrap();
    assert!(rendered(output).ends_with("No results match the selection\n"));
}

#[test]
pub fn sorted_results_name_the_sort() {
    let records = fixture();
    let state = ViewState::new("workloada").toggle_sort(Column::Project);
    let view = project(&records, &state, "-").unwrap();

    let mut output = Vec::new();
    render_results(&mut output, &state, &view, false).unwrap();
    let output = rendered(output);

    assert!(output
        .lines()
        .next()
        .unwrap()
        .ends_with("| Metric OVERALL | Sort project asc"));
}

#[test]
pub fn json_carries_rows_and_charts() {
    let records = fixture();
    let state = ViewState::new("workloadb").with_metric(Metric::Operation(Operation::Update));
    let view = project(&records, &state, "-").unwrap();

    let mut output = Vec::new();
    render_json(&mut output, &state, &view).unwrap();
    let document: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(document["metric"], "UPDATE");
    assert_eq!(document["protocol"], "All");
    assert_eq!(document["rows"].as_array().unwrap().len(), 3);
    assert_eq!(document["charts"][0]["kind"], "line");
}

#[test]
pub fn chart_section_disposes_previous_charts() {
    let records = fixture();
    let overall = ViewState::new("workloada");
    let update = overall
        .clone()
        .with_metric(Metric::Operation(Operation::Update));
    let mut section = ChartSection::new(false);

    let first = project(&records, &overall, "-").unwrap().charts;
    assert!(section.replace(first.clone()).is_empty());
    assert_eq!(section.charts(), first.as_slice());

    let second = project(&records, &update, "-").unwrap().charts;
    let disposed = section.replace(second);
    assert_eq!(disposed, first);
    assert_eq!(section.charts().len(), 2);
    assert!(section.charts().iter().all(|chart| chart.id.starts_with("latency")));

    let mut output = Vec::new();
    section.render(&mut output, 10).unwrap();
    let output = rendered(output);
    assert!(output.contains("50th Percentile"));
    assert!(!output.contains("Throughput (ops/sec)"));
}

#[test]
pub fn options_listing() {
    let records = fixture();
    let fields = Field::ALL
        .iter()
        .map(|field| (*field, filter_options(&records, *field)))
        .collect::<Vec<_>>();

    let mut output = Vec::new();
    render_options(
        &mut output,
        &workloads(&records),
        &fields,
        &["OVERALL", "READ", "UPDATE"],
    )
    .unwrap();
    let output = rendered(output);

    assert!(output.starts_with("workload: workloada, workloadb\n"));
    assert!(output.contains("persistency: Synchronous, Asynchronous, All\n"));
    assert!(output.ends_with("metric: OVERALL, READ, UPDATE\n"));
}
