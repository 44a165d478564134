use assert_cmd::Command;
use jobinfo_testing::TestWorld;
use predicates::prelude::*;

#[test]
fn test_unknown_job_exits_with_error() {
    let world = TestWorld::new();

    let result = world.run(&["999999"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert_eq!(result.stderr().trim(), "Error: No such job: 999999");
    assert!(result.stdout().is_empty());
    assert_eq!(world.calls(), vec!["sinfo", "sacct"]);
}

#[test]
fn test_malformed_job_id_is_rejected_before_any_query() {
    let world = TestWorld::new();

    let result = world.run(&["47;rm"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("47;rm"));
    assert!(world.calls().is_empty());
}

#[test]
fn test_missing_job_id_is_a_usage_error() {
    let world = TestWorld::new();

    let result = world.run(&[]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("Usage"));
}

#[test]
fn test_unparseable_version_is_fatal() {
    let world = TestWorld::new().with_version_output("slurm development");

    let result = world.run(&["4711"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().starts_with("Error:"));
    assert_eq!(world.calls(), vec!["sinfo"]);
}

#[test]
fn test_accounting_failure_is_reported() {
    let world = TestWorld::new().with_program(
        "sacct",
        1,
        &[] as &[&str],
        "sacct: error: slurmdbd: Connection refused",
    );

    let result = world.run(&["4711"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("Connection refused"));
}

#[test]
fn test_malformed_config_is_reported() {
    let world = TestWorld::new();
    std::fs::write(world.config_path(), "label_width = [\n").unwrap();

    let result = world.run(&["4711"]).unwrap();

    assert_eq!(result.code(), Some(1));
    assert!(result.stderr().contains("Configuration error"));
    assert!(world.calls().is_empty());
}

#[test]
#[allow(deprecated)]
fn test_help_exits_successfully() {
    Command::cargo_bin("jobinfo")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("<JOB_ID>"));
}

#[test]
#[allow(deprecated)]
fn test_version_flag() {
    Command::cargo_bin("jobinfo")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("jobinfo "));
}
