//! Integration tests for the command line entry point
//!
//! Runs the binary inside a throwaway project directory and checks stdout, stderr and the
//! exit code contract: 0 all green, 1 test failures, 2 infrastructure failures.

use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::{FAILING_TEST, PASSING_TEST, RAISING_TEST, TestFixture};

fn suiterun(fixture: &TestFixture) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("suiterun"));
    cmd.current_dir(fixture.root())
        .env_remove("SUITERUN_TEST_RESOURCES")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn all_passing_exits_zero() {
    let fixture = TestFixture::new();
    fixture.create_test("a.lua", PASSING_TEST);

    suiterun(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("[SUCCESS] lua"))
        .stdout(predicate::str::contains("  [SUCCESS] a"))
        .stdout(predicate::str::contains(
            "1 tests: 1 succeeded, 0 failed, 0 errors, 0 ignored",
        ))
        .stdout(predicate::str::is_match(r"Time needed: \d+ms").unwrap());
}

#[test]
fn failing_and_erroring_tests_exit_one() {
    let fixture = TestFixture::new();
    fixture.create_test("a.lua", PASSING_TEST);
    fixture.create_test("b.lua", RAISING_TEST);
    fixture.create_test("c.lua", FAILING_TEST);

    suiterun(&fixture)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[ERROR] lua"))
        .stdout(predicate::str::contains("[ERROR] b: "))
        .stdout(predicate::str::contains("transformation exploded"))
        .stdout(predicate::str::contains("[FAILURE] c: expected 1 but got 2"));
}

#[test]
fn empty_test_root_exits_zero() {
    let fixture = TestFixture::new();
    fixture.mkdir("src/test/lua");

    suiterun(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 tests"));
}

#[test]
fn missing_path_argument_exits_one() {
    let fixture = TestFixture::new();

    suiterun(&fixture)
        .arg("src/test/lua/ghost.lua")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[ERROR] ghost.lua"))
        .stdout(predicate::str::contains("Neither file nor directory"));
}

#[test]
fn several_arguments_are_grouped() {
    let fixture = TestFixture::new();
    fixture.create_test("one/a.lua", PASSING_TEST);
    fixture.create_test("two/b.lua", PASSING_TEST);

    suiterun(&fixture)
        .args(["src/test/lua/two", "src/test/lua/one"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "[SUCCESS] all tests\n  [SUCCESS] two\n    [SUCCESS] b\n  [SUCCESS] one\n",
        ));
}

#[test]
fn json_report() {
    let fixture = TestFixture::new();
    fixture.create_test("a.lua", PASSING_TEST);

    suiterun(&fixture)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "lua""#))
        .stdout(predicate::str::contains(r#""status": "SUCCESS""#));
}

#[test]
fn resources_are_synchronized_before_tests() {
    let fixture = TestFixture::new();
    fixture.create_main_resource("mapping.lua", "return {}");
    fixture.write("target/classes/stale.txt", "stale");
    fixture.create_test(
        "sees_output.lua",
        r#"
local f = io.open("target/classes/mapping.lua")
local stale = io.open("target/classes/stale.txt")
if f and not stale then
    f:close()
    return testing.success()
end
return testing.failure("resource tree not settled")
"#,
    );

    suiterun(&fixture).assert().success();

    assert!(fixture.exists("target/classes/mapping.lua"));
    assert!(!fixture.exists("target/classes/stale.txt"));
}

#[test]
fn no_sync_leaves_target_alone() {
    let fixture = TestFixture::new();
    fixture.create_main_resource("mapping.lua", "return {}");
    fixture.create_test("a.lua", PASSING_TEST);

    suiterun(&fixture).arg("--no-sync").assert().success();

    assert!(!fixture.exists("target"));
}

#[test]
fn sync_failure_exits_two() {
    let fixture = TestFixture::new();
    fixture.create_main_resource("a.txt", "a");
    fixture.create_test("a.lua", PASSING_TEST);
    fixture.write("target/classes", "not a directory");

    suiterun(&fixture)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: Failed to prepare resources"));
}

#[test]
fn missing_config_file_exits_two() {
    let fixture = TestFixture::new();

    suiterun(&fixture)
        .args(["--config", "nowhere.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Specified config file does not exist",
        ));
}

#[test]
fn invalid_config_exits_two() {
    let fixture = TestFixture::new();
    fixture.write(
        "suiterun.toml",
        r#"
[sync]
protected_patterns = ["(unclosed"]
"#,
    );

    suiterun(&fixture)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid protected pattern"));
}

#[test]
fn local_config_file_is_used() {
    let fixture = TestFixture::new();
    fixture.write(
        "suiterun.toml",
        r#"
test_root = "checks"
test_extension = "test"
bindings = ["payload"]
"#,
    );
    fixture.write(
        "checks/only_payload.test",
        r#"return testing.expect("bindings", { payload ~= nil, vars == nil }, { true, true })"#,
    );
    fixture.write("checks/ignored.lua", RAISING_TEST);

    suiterun(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("[SUCCESS] checks"))
        .stdout(predicate::str::contains("[SUCCESS] only_payload"));
}

#[test]
fn test_resources_env_override() {
    let fixture = TestFixture::new();
    fixture.create_test(
        "env.lua",
        r#"return testing.expect("root", TEST_RESOURCES, "/srv/shared/fixtures")"#,
    );

    suiterun(&fixture)
        .env("SUITERUN_TEST_RESOURCES", "/srv/shared/fixtures")
        .assert()
        .success();
}

#[test]
fn test_resources_default_root() {
    let fixture = TestFixture::new();
    let expected = fixture
        .root()
        .canonicalize()
        .unwrap()
        .join("src/test/resources");
    fixture.create_test(
        "env.lua",
        &format!(
            "return testing.expect(\"root\", TEST_RESOURCES, {:?})",
            expected.display().to_string()
        ),
    );

    suiterun(&fixture).assert().success();
}
