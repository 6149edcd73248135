use super::{
    clear_session, import, interactive, options, overview, results, Context, Format, ResultsArgs,
};
use crate::{config::DashboardConfig, Cli, CliError, Commands};
use clap::Parser;
use cpbench_analysis::{Column, Metric, Operation, ProjectionError};
use cpbench_ingest::{LoadError, SessionStore, Source, DATA_KEY};
use std::{fs, io::Cursor, path::Path};

const FIXTURE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ingest/tests/fixtures/data.json"
));

fn context<'a>(data: &Path, store: &'a SessionStore) -> Context<'a> {
    let mut config = DashboardConfig::default();
    config.source = Source::File {
        path: data.to_path_buf(),
    };

    Context {
        config,
        store,
        use_color: false,
    }
}

fn with_fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("data.json"), FIXTURE).unwrap();
    dir
}

fn output(result: Result<(), CliError>, bytes: Vec<u8>) -> String {
    result.unwrap();
    String::from_utf8(bytes).unwrap()
}

#[test]
pub fn overview_defaults_to_first_workload() {
    let dir = with_fixture();
    let store = SessionStore::in_memory();
    let context = context(&dir.path().join("data.json"), &store);

    let mut bytes = Vec::new();
    let result = overview(&context, None, Some(1), &mut bytes);
    let text = output(result, bytes);

    assert!(text.starts_with("Overview of workloada"));
    assert!(text.contains("paxos - ailidani/paxi"));
    // top 1 leaves only the leader of the category
    assert!(!text.contains("raft - tikv/tikv"));
    assert!(text.contains(
        "consistency=Primary+Integrity+%28Primary-Backup%29"
    ));
}

#[test]
pub fn results_from_link_with_flag_override() {
    let dir = with_fixture();
    let store = SessionStore::in_memory();
    let context = context(&dir.path().join("data.json"), &store);

    let args = ResultsArgs {
        workload: Some("workloadb".to_owned()),
        link: Some("/result.html?workload=workloada&consistency=Linearizability".to_owned()),
        ..ResultsArgs::default()
    };

    let mut bytes = Vec::new();
    let result = results(&context, args, &mut bytes);
    let text = output(result, bytes);

    assert!(text.starts_with("Workload workloadb | Protocol All | Consistency Linearizability"));
    assert!(text.contains("holipaxos-artifect/holipaxos"));
    assert!(text.contains("Throughput (ops/sec)"));
}

#[test]
pub fn results_as_json() {
    let dir = with_fixture();
    let store = SessionStore::in_memory();
    let context = context(&dir.path().join("data.json"), &store);

    let args = ResultsArgs {
        workload: Some("workloada".to_owned()),
        protocol: Some("raft".to_owned()),
        metric: Metric::Operation(Operation::Read),
        format: Format::Json,
        ..ResultsArgs::default()
    };

    let mut bytes = Vec::new();
    results(&context, args, &mut bytes).unwrap();
    let document: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(document["rows"].as_array().unwrap().len(), 2);
    assert_eq!(document["charts"][1]["id"], "latency");
    assert_eq!(
        document["charts"][1]["datasets"][0]["label"],
        "etcd-io/etcd (raft)"
    );
}

#[test]
pub fn results_sorted_by_flag() {
    let cli = Cli::try_parse_from([
        "cpbench",
        "results",
        "--workload",
        "workloada",
        "--sort",
        "Throughput",
        "--desc",
        "--format",
        "json",
    ])
    .unwrap();
    let Commands::Results(args) = cli.command else {
        panic!("expected the results command");
    };
    assert_eq!(args.sort, Some(Column::Throughput));
    assert!(args.desc);

    let dir = with_fixture();
    let store = SessionStore::in_memory();
    let context = context(&dir.path().join("data.json"), &store);

    let mut bytes = Vec::new();
    results(&context, args, &mut bytes).unwrap();
    let document: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(document["sort"], "throughput desc");
    let projects = document["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["project"].as_str().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(
        &projects[..3],
        &["ailidani/paxi", "fadhilkurnia/xdn", "ailidani/paxi"]
    );
    assert_eq!(document["rows"][0]["protocol"], "chain");
}

#[test]
pub fn desc_needs_a_sort_column() {
    assert!(Cli::try_parse_from(["cpbench", "results", "--desc"]).is_err());
    assert!(Cli::try_parse_from(["cpbench", "results", "--sort", "latency"]).is_err());
}

#[test]
pub fn results_fail_on_missing_metric_group() {
    let dir = with_fixture();
    let store = SessionStore::in_memory();
    let context = context(&dir.path().join("data.json"), &store);

    let args = ResultsArgs {
        metric: Metric::Operation(Operation::Delete),
        ..ResultsArgs::default()
    };

    assert!(matches!(
        results(&context, args, &mut Vec::new()),
        Err(CliError::Projection(ProjectionError::MissingGroup { .. }))
    ));
}

#[test]
pub fn missing_source_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::in_memory();
    let context = context(&dir.path().join("data.json"), &store);

    assert!(matches!(
        options(&context, None, &mut Vec::new()),
        Err(CliError::Load(LoadError::Fetch(_)))
    ));
}

#[test]
pub fn options_for_workload() {
    let dir = with_fixture();
    let store = SessionStore::in_memory();
    let context = context(&dir.path().join("data.json"), &store);

    let mut bytes = Vec::new();
    let result = options(&context, Some("workloadb"), &mut bytes);
    let text = output(result, bytes);

    assert!(text.contains("protocol: raft, zab, epaxos, paxos, causal, chain, holipaxos, All\n"));
    assert!(text.contains("metric: OVERALL, READ, UPDATE\n"));
}

#[test]
pub fn import_then_browse_without_source() {
    let dir = with_fixture();
    let store = SessionStore::in_memory();
    let context = context(&dir.path().join("missing.json"), &store);

    let mut bytes = Vec::new();
    let result = import(&context, &dir.path().join("data.json"), &mut bytes);
    assert_eq!(
        output(result, bytes),
        "Imported 10 results covering workloada, workloadb\n"
    );

    let mut bytes = Vec::new();
    let result = interactive(
        &context,
        Some("workloadb"),
        Cursor::new("protocol holipaxos\nquit\n"),
        &mut bytes,
    );
    let text = output(result, bytes);
    assert!(text.contains("Workload workloadb | Protocol holipaxos"));
}

#[test]
pub fn malformed_import_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{\"workload\": \"workloada\"}").unwrap();
    let store = SessionStore::in_memory();
    let context = context(&dir.path().join("data.json"), &store);

    assert!(matches!(
        import(&context, &broken, &mut Vec::new()),
        Err(CliError::Load(LoadError::Parse(_)))
    ));
    assert!(!store.contains(DATA_KEY));
}

#[test]
pub fn clearing_a_persisted_session() {
    let dir = with_fixture();
    let session = tempfile::tempdir().unwrap();
    let store = SessionStore::persistent(session.path());
    let context = context(&dir.path().join("data.json"), &store);

    options(&context, None, &mut Vec::new()).unwrap();
    let entry = store.entry_path(DATA_KEY).unwrap();
    assert!(entry.is_file());

    let mut bytes = Vec::new();
    let result = clear_session(&context, &mut bytes);
    assert!(output(result, bytes).starts_with("Session in "));
    assert!(!store.contains(DATA_KEY));
    assert!(!entry.exists());
    assert!(dir.path().join("data.json").is_file());
}
