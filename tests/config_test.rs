// tests/config_test.rs
use pr_changelog::config::{load_config, Config, LOCAL_CONFIG_FILE};
use pr_changelog::ChangelogError;
use serial_test::serial;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[tags]
pattern = "^v\\d+$"

[repository]
url = "https://github.com/org/repo"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.tags.pattern, r"^v\d+$");
    assert_eq!(
        config.repository.url.as_deref(),
        Some("https://github.com/org/repo")
    );
    assert_eq!(config.repository.branch, None);
    assert_eq!(config.output.heading, "Changelog");
}

#[test]
#[serial]
fn test_load_fixture() {
    let config = load_config(Some(Path::new("tests/fixtures/prchangelog.toml")))
        .expect("Failed to load test config");

    assert_eq!(config.repository.branch.as_deref(), Some("trunk"));
    assert_eq!(config.output.heading, "Release history");

    let pattern = config.tags.compile().unwrap();
    assert!(pattern.matches("release-1.4"));
    assert!(!pattern.matches("v1.4.0"));
}

#[test]
fn test_missing_explicit_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let result = load_config(Some(missing.as_path()));
    assert!(matches!(result, Err(ChangelogError::Config(_))));
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[tags\npattern = 3").unwrap();
    temp_file.flush().unwrap();

    let result = load_config(Some(temp_file.path()));
    assert!(matches!(result, Err(ChangelogError::Config(_))));
}

#[test]
#[serial]
fn test_discovers_file_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(LOCAL_CONFIG_FILE),
        "[repository]\nbranch = \"develop\"\n",
    )
    .unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    std::env::set_current_dir(previous).unwrap();

    let config = result.unwrap();
    assert_eq!(config.repository.branch.as_deref(), Some("develop"));
}

#[test]
fn test_default_round_trips_through_toml() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
