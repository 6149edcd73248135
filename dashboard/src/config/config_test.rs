use super::{ConfigErrors, DashboardConfig};
use cpbench_ingest::Source;
use std::{io::Write, path::PathBuf};

#[test]
pub fn empty_config_uses_defaults() {
    let config: DashboardConfig = serde_yaml::from_str("{}").unwrap();

    assert_eq!(config, DashboardConfig::default());
    assert_eq!(config.display.top, 5);
    assert_eq!(config.display.placeholder, "-");
    assert_eq!(
        config.source,
        Source::File {
            path: PathBuf::from("data.json")
        }
    );
}

#[test]
pub fn remote_source_from_yaml() {
    let config: DashboardConfig = serde_yaml::from_str(
        r#"
source:
  remote:
    url: "https://bench.example.org/data.json"
session:
  path: /tmp/cpbench
display:
  top: 3
"#,
    )
    .unwrap();

    let Source::Remote { url } = &config.source else {
        panic!("expected a remote source, got {:?}", config.source);
    };
    assert_eq!(url.host(), Some("bench.example.org"));
    assert_eq!(config.session.path, Some(PathBuf::from("/tmp/cpbench")));
    assert_eq!(config.display.top, 3);
    assert_eq!(config.display.bar_columns, 40);
}

#[test]
pub fn unknown_fields_are_rejected() {
    let result = serde_yaml::from_str::<DashboardConfig>("display:\n  colour: red\n");

    assert!(result.is_err());
}

#[test]
pub fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "source:\n  file:\n    path: results.json").unwrap();

    let config = DashboardConfig::load(file.path()).unwrap();
    assert_eq!(
        config.source,
        Source::File {
            path: PathBuf::from("results.json")
        }
    );
}

#[test]
pub fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        DashboardConfig::load(&dir.path().join("missing.yaml")),
        Err(ConfigErrors::Read { .. })
    ));
}

#[test]
pub fn flags_override_file() {
    let config = DashboardConfig::default()
        .with_overrides(
            Some("http://localhost:9000/data.json"),
            Some(PathBuf::from("session")),
        )
        .unwrap();

    assert!(matches!(config.source, Source::Remote { .. }));
    assert_eq!(config.session.path, Some(PathBuf::from("session")));

    let untouched = config.clone().with_overrides(None, None).unwrap();
    assert_eq!(untouched, config);
}

#[test]
pub fn preflight_accepts_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = DashboardConfig::default();
    config.source = Source::File {
        path: dir.path().join("data.json"),
    };

    // a missing data file is only a warning
    assert!(!config.preflight_checks());
}

#[test]
pub fn preflight_collects_errors_and_repairs_placeholder() {
    let mut config = DashboardConfig::default();
    config.display.top = 0;
    config.display.placeholder = String::new();
    config.display.link_base = "not a url".to_owned();

    assert!(config.preflight_checks());
    assert_eq!(config.display.placeholder, "-");
}

#[test]
pub fn preflight_rejects_session_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut config = DashboardConfig::default();
    config.session.path = Some(file.path().to_path_buf());

    assert!(config.preflight_checks());
}

#[test]
pub fn preflight_rejects_relative_remote() {
    let mut config: DashboardConfig =
        serde_yaml::from_str("source:\n  remote:\n    url: /data.json\n").unwrap();

    assert!(config.preflight_checks());
}
