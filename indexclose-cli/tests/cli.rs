//! Runs the `indexclose` binary end to end against a mock chart endpoint.

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;

const FIXTURE: &str = include_str!("../../indexclose-core/tests/fixtures/gspc_chart_1988.json");

fn mock_chart(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).query_param("interval", "1d");
        then.status(200)
            .header("content-type", "application/json")
            .body(FIXTURE);
    });
}

#[test]
fn saves_default_file_in_working_directory() {
    let server = MockServer::start();
    mock_chart(&server);
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("indexclose")
        .unwrap()
        .current_dir(dir.path())
        .args(["--base-url", &server.base_url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1988-01-04"))
        .stdout(predicate::str::contains("Data saved to sp500_data.csv"));

    let content = fs::read_to_string(dir.path().join("sp500_data.csv")).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("Date,Close"));
    assert_eq!(lines.next(), Some("1988-01-04,255.94000244140625"));
    assert_eq!(content.lines().count(), 11);
}

#[test]
fn preview_shows_only_head() {
    let server = MockServer::start();
    mock_chart(&server);
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("gspc.csv");

    Command::cargo_bin("indexclose")
        .unwrap()
        .args(["--base-url", &server.base_url()])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1988-01-08"))
        .stdout(predicate::str::contains("1988-01-11").not());

    assert!(output.exists());
}

#[test]
fn unreachable_provider_exits_nonzero_without_output() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sp500_data.csv");

    Command::cargo_bin("indexclose")
        .unwrap()
        .args(["--base-url", &format!("http://{addr}")])
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("network unreachable"));

    assert!(!output.exists());
}

#[test]
fn provider_error_keeps_prior_output() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(500);
    });

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sp500_data.csv");
    fs::write(&output, "Date,Close\n1988-01-04,255.94\n").unwrap();

    Command::cargo_bin("indexclose")
        .unwrap()
        .args(["--base-url", &server.base_url()])
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 500"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Date,Close\n1988-01-04,255.94\n"
    );
}

#[test]
fn help_does_not_advertise_date_flags() {
    Command::cargo_bin("indexclose")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--start").not());
}
