use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("careboard").unwrap();
    cmd.env_remove("CAREBOARD_DATA");
    cmd
}

#[test]
fn json_report_parses_from_stdout() {
    let assert = cmd()
        .args(["facility", "--id", "2", "--format", "json"])
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid json output");
    assert_eq!(report["facility"]["id"], 2);
    assert_eq!(report["review_count"], 0);
}

#[test]
fn logs_stay_on_stderr() {
    cmd()
        .args(["facility", "--id", "0"])
        .assert()
        .success()
        .stdout(contains("Saint Michael's Medical Center"))
        .stdout(contains("INFO").not())
        .stderr(contains("Careboard v"));
}

#[test]
fn missing_subcommand_is_rejected() {
    cmd()
        .assert()
        .code(1)
        .stdout(predicates::str::is_empty())
        .stderr(contains("No report requested"));
}

#[test]
fn unknown_facility_exits_with_code_2() {
    cmd()
        .args(["facility", "--id", "9999"])
        .assert()
        .code(2)
        .stdout(predicates::str::is_empty())
        .stderr(contains("Facility not found"));
}
