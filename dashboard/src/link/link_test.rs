use super::{parse_base, result_link, Preselection};

#[test]
pub fn relative_link_is_resolved_against_base() {
    let base = parse_base("http://localhost:8000/").unwrap();

    let selection = Preselection::from_link(
        &base,
        "/result.html?workload=workloadb&consistency=Linearizability",
    )
    .unwrap();

    assert_eq!(selection.workload.as_deref(), Some("workloadb"));
    assert_eq!(selection.consistency.as_deref(), Some("Linearizability"));
}

#[test]
pub fn absolute_link_decodes_parameters() {
    let base = parse_base("http://localhost:8000/").unwrap();

    let selection = Preselection::from_link(
        &base,
        "https://bench.example.org/result.html?consistency=Primary+Integrity+%28Primary-Backup%29&page=2",
    )
    .unwrap();

    assert_eq!(selection.workload, None);
    assert_eq!(
        selection.consistency.as_deref(),
        Some("Primary Integrity (Primary-Backup)")
    );
}

#[test]
pub fn link_without_query_selects_nothing() {
    let base = parse_base("http://localhost:8000/").unwrap();

    assert_eq!(
        Preselection::from_link(&base, "result.html").unwrap(),
        Preselection::default()
    );
}

#[test]
pub fn flags_take_precedence() {
    let flags = Preselection {
        workload: Some("workloada".to_owned()),
        consistency: None,
    };
    let link = Preselection {
        workload: Some("workloadb".to_owned()),
        consistency: Some("Causal".to_owned()),
    };

    let merged = flags.or(link);
    assert_eq!(merged.workload.as_deref(), Some("workloada"));
    assert_eq!(merged.consistency.as_deref(), Some("Causal"));
}

#[test]
pub fn result_link_round_trips_through_from_link() {
    let base = parse_base("http://localhost:8000/dashboard/").unwrap();

    let link = result_link(&base, "workloada", "Primary Integrity (Primary-Backup)").unwrap();
    assert_eq!(link.path(), "/dashboard/result.html");

    let selection = Preselection::from_link(&base, link.as_str()).unwrap();
    assert_eq!(selection.workload.as_deref(), Some("workloada"));
    assert_eq!(
        selection.consistency.as_deref(),
        Some("Primary Integrity (Primary-Backup)")
    );
}

#[test]
pub fn invalid_base_is_reported() {
    let error = parse_base("localhost").unwrap_err();

    assert_eq!(error.link, "localhost");
}
