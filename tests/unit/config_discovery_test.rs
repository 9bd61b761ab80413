//! Unit tests for config discovery and loading
//!
//! Tests that change the working directory run serially.

use serial_test::serial;
use std::{env, fs, path::PathBuf};
use suiterun::{
    Config,
    configs::{CONFIG_FILE_NAME, expand_path, find_config_file, load_config, validate_config},
};
use tempfile::TempDir;

struct CwdGuard(PathBuf);

impl CwdGuard {
    fn enter(dir: &std::path::Path) -> Self {
        let previous = env::current_dir().unwrap();
        env::set_current_dir(dir).unwrap();
        Self(previous)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.0);
    }
}

#[test]
#[serial]
fn test_no_config_found() {
    let temp = TempDir::new().unwrap();
    let _guard = CwdGuard::enter(temp.path());

    assert!(find_config_file(None).unwrap().is_none());
}

#[test]
#[serial]
fn test_local_config_found() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(CONFIG_FILE_NAME), "test_extension = \"dwl\"").unwrap();
    let _guard = CwdGuard::enter(temp.path());

    let path = find_config_file(None).unwrap().unwrap();
    let config = load_config(path).unwrap();

    assert_eq!(config.test_extension, "dwl");
}

#[test]
#[serial]
fn test_cli_path_takes_priority() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(CONFIG_FILE_NAME), "").unwrap();
    let explicit = temp.path().join("other.toml");
    fs::write(&explicit, "").unwrap();
    let _guard = CwdGuard::enter(temp.path());

    assert_eq!(find_config_file(Some(explicit.clone())).unwrap(), Some(explicit));
}

#[test]
fn test_load_config_reports_parse_errors() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "test_root = [").unwrap();

    let err = load_config(path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse"));
}

#[test]
fn test_full_config_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        r#"
test_root = "tests/lua"
test_extension = "lua"
bindings = ["payload", "vars"]
resource_roots = ["lib"]
test_resources = "tests/resources"

[sync]
cleanup = ["build/out"]
protected_patterns = [".*\\.bin"]

[[sync.mappings]]
source = "lib"
target = "build/out"
"#,
    )
    .unwrap();

    let config = load_config(path).unwrap();
    validate_config(&config).unwrap();

    assert_eq!(config.bindings, ["payload", "vars"]);
    assert_eq!(config.test_resources, Some(PathBuf::from("tests/resources")));
    assert_eq!(config.sync.mappings.len(), 1);
    assert_eq!(config.sync.mappings[0].target, PathBuf::from("build/out"));
    assert_ne!(config, Config::default());
}

#[test]
#[serial]
fn test_expanded_config_resolves_variables() {
    unsafe {
        env::set_var("SUITERUN_TEST_PROJECT", "/work/project");
    }

    let config = Config {
        test_root: PathBuf::from("$SUITERUN_TEST_PROJECT/tests"),
        ..Config::default()
    }
    .expanded()
    .unwrap();

    assert_eq!(config.test_root, PathBuf::from("/work/project/tests"));
    assert_eq!(
        expand_path(PathBuf::from("${SUITERUN_TEST_PROJECT}/x")).unwrap(),
        PathBuf::from("/work/project/x")
    );

    unsafe {
        env::remove_var("SUITERUN_TEST_PROJECT");
    }
}
