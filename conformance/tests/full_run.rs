//! Runs the whole catalog against the mock server, the way the CLI does.

mod common;

use common::base_url;
use rstest::rstest;
use todo_conformance::{execute, select, run, Group, OutputFormat, Session, SuiteConfig};
use todo_core::TodoClient;

#[rstest]
fn every_case_passes_against_mock(base_url: String) {
    let report = execute(&SuiteConfig::for_base_url(base_url)).unwrap();

    let failures: Vec<_> = report
        .failures()
        .map(|o| format!("{}: {}", o.name, o.error.as_deref().unwrap_or_default()))
        .collect();
    assert!(failures.is_empty(), "failing cases:\n{}", failures.join("\n"));
    assert_eq!(report.total, 98);
}

#[rstest]
fn group_selection_limits_the_run(base_url: String) {
    let config = SuiteConfig {
        groups: vec![Group::Patch, Group::Delete],
        format: OutputFormat::Json,
        ..SuiteConfig::for_base_url(base_url)
    };

    let report = execute(&config).unwrap();

    assert!(report.is_success());
    assert_eq!(report.total, 15);
    assert!(report
        .outcomes
        .iter()
        .all(|o| matches!(o.group, Group::Patch | Group::Delete)));
    let json: serde_json::Value =
        serde_json::from_str(&report.render(config.format).unwrap()).unwrap();
    assert_eq!(json["passed"], 15);
}

#[rstest]
fn wrong_collection_fails_cases_not_the_run(base_url: String) {
    let client = TodoClient::new(&base_url.replace("/todos", "/posts"));
    let cases = select(&client, &[Group::Get, Group::List]).unwrap();

    let report = run(&Session::new(None), &cases);

    assert_eq!(report.total, 14);
    // Unknown routes answer 404 without a JSON body, which not even the
    // not-found cases accept.
    assert_eq!(report.failed, 14);
}

#[test]
fn unreachable_service_fails_every_case() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = TodoClient::new(&format!("http://{addr}/todos"));
    let cases = select(&client, &[Group::Create]).unwrap();
    let report = run(&Session::new(None), &cases);

    assert_eq!(report.failed, 1);
    let error = report.outcomes[0].error.as_deref().unwrap();
    assert!(error.starts_with(&format!("POST http://{addr}/todos")), "{error}");
}

#[test]
fn invalid_base_url_aborts_before_sending() {
    let err = execute(&SuiteConfig::for_base_url("localhost/todos")).unwrap_err();
    assert!(err.to_string().starts_with("invalid base url"));
}
