//! Tests for run summaries

use std::time::Duration;

use piped::output::{RunSummary, SessionOutcome, SessionStatus};

fn failed(name: &str, code: i32) -> SessionOutcome {
    SessionOutcome::failed(name, code, "boom".to_string(), Duration::ZERO)
}

#[test]
fn test_empty_run_succeeds() {
    let summary = RunSummary::default();
    assert!(summary.success());
    assert_eq!(summary.exit_code(), 0);
}

#[test]
fn test_all_successful() {
    let summary = RunSummary {
        sessions: vec![
            SessionOutcome::success("flake8", Duration::from_millis(1200)),
            SessionOutcome::success("test", Duration::ZERO),
        ],
    };

    assert!(summary.success());
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(summary.names(), vec!["flake8", "test"]);
    assert_eq!(summary.sessions[0].duration_ms, 1200);
}

#[test]
fn test_first_failure_decides_exit_code() {
    let summary = RunSummary {
        sessions: vec![
            SessionOutcome::success("flake8", Duration::ZERO),
            failed("test", 3),
            failed("type-check", 5),
        ],
    };

    assert!(!summary.success());
    assert_eq!(summary.sessions[1].status, SessionStatus::Failed);
    assert_eq!(summary.exit_code(), 3);
}

#[test]
fn test_out_of_range_codes_clamp_to_one() {
    for code in [-1, 0, 256, 1000] {
        let summary = RunSummary {
            sessions: vec![failed("test", code)],
        };
        assert_eq!(summary.exit_code(), 1, "code {code}");
    }

    let summary = RunSummary {
        sessions: vec![failed("test", 255)],
    };
    assert_eq!(summary.exit_code(), 255);
}

#[test]
fn test_json_shape() {
    let summary = RunSummary {
        sessions: vec![SessionOutcome::success("test", Duration::ZERO), failed("lint", 2)],
    };

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["sessions"][0]["status"], "success");
    assert!(json["sessions"][0].get("exit_code").is_none());
    assert_eq!(json["sessions"][1]["status"], "failed");
    assert_eq!(json["sessions"][1]["exit_code"], 2);
    assert_eq!(json["sessions"][1]["error"], "boom");
}
