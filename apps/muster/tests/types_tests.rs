//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use muster::api::{AssignRequest, AssignResponse, HealthResponse, RosterEntry, StatusResponse};
use muster_core::{
    Assigner, CadetId, CadetRecord, Census, Roster, RunMode, RunSummary, WriteStatus,
};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

// =============================================================================
// ASSIGN REQUEST TESTS
// =============================================================================

#[test]
fn test_assign_request_empty_body_defaults_to_apply() {
    let request = AssignRequest::from_body(b"");
    assert!(!request.simulate);
    assert_eq!(request.mode(), RunMode::Apply);

    let request = AssignRequest::from_body(b"  \n");
    assert_eq!(request.mode(), RunMode::Apply);
}

#[test]
fn test_assign_request_missing_field_defaults_to_apply() {
    let request = AssignRequest::from_body(b"{}");
    assert_eq!(request.mode(), RunMode::Apply);
}

#[test]
fn test_assign_request_simulate() {
    let request = AssignRequest::from_body(br#"{"simulate": true}"#);
    assert_eq!(request.mode(), RunMode::Simulate);
}

#[test]
fn test_assign_request_non_boolean_simulate_defaults_to_apply() {
    for body in [
        br#"{"simulate": "yes"}"#.as_slice(),
        br#"{"simulate": null}"#.as_slice(),
        br#"{"simulate": 1}"#.as_slice(),
        br#"{"simulate": "true"}"#.as_slice(),
    ] {
        let request = AssignRequest::from_body(body);
        assert!(!request.simulate);
        assert_eq!(request.mode(), RunMode::Apply);
    }
}

#[test]
fn test_assign_request_unreadable_body_defaults_to_apply() {
    let request = AssignRequest::from_body(b"{not json");
    assert_eq!(request.mode(), RunMode::Apply);

    let request = AssignRequest::from_body(b"\"simulate\"");
    assert_eq!(request.mode(), RunMode::Apply);
}

#[test]
fn test_assign_request_simulate_with_extra_fields() {
    let request = AssignRequest::from_body(br#"{"simulate": true, "force": 3}"#);
    assert_eq!(request.mode(), RunMode::Simulate);
}

// =============================================================================
// ASSIGN RESPONSE TESTS
// =============================================================================

#[test]
fn test_assign_response_from_simulated_run() {
    let mut roster = Roster::from_records([
        CadetRecord::approved(CadetId(1), "Ana", "Reyes").with_gender("f"),
        CadetRecord::approved(CadetId(2), "Bo", "Tan").with_gender("m"),
    ])
    .unwrap();
    let run = Assigner::new().run(&mut roster, RunMode::Simulate).unwrap();

    let response = AssignResponse::from_run(run, Some("abc".to_string()));

    assert!(response.success);
    assert_eq!(response.report.len(), 2);
    assert_eq!(
        response.summary_line,
        "Simulated assignment for 2 cadets (1 in 1st Battalion, 1 in 2nd Battalion, 0 undetermined)"
    );
    assert_eq!(response.outcomes[0].status, WriteStatus::Simulated);
}

#[test]
fn test_assign_response_serialization() {
    let response = AssignResponse {
        success: true,
        summary: Some(RunSummary {
            mode: RunMode::Apply,
            processed: 3,
            applied: 2,
            failed: 1,
            ..RunSummary::default()
        }),
        summary_line: "Updated 2 of 3 cadets (1 failed, 0 skipped)".to_string(),
        digest: None,
        outcomes: vec![],
        report: vec![],
        error: None,
    };

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"success\":true"));
    assert!(json.contains("\"mode\":\"apply\""));
    assert!(json.contains("\"failed\":1"));
    assert!(!json.contains("\"report\""));
    assert!(!json.contains("\"error\""));
}

#[test]
fn test_assign_response_error() {
    let response = AssignResponse::error("roster unavailable");
    let json = serde_json::to_string(&response).unwrap();

    assert!(json.contains("\"success\":false"));
    assert!(json.contains("roster unavailable"));
    assert!(!json.contains("\"summary\""));
}

#[test]
fn test_failed_status_serialization() {
    let json = serde_json::to_string(&WriteStatus::Failed("disk full".to_string())).unwrap();
    assert_eq!(json, r#"{"failed":"disk full"}"#);
    assert_eq!(
        serde_json::to_string(&WriteStatus::Applied).unwrap(),
        r#""applied""#
    );
}

// =============================================================================
// STATUS / ROSTER TESTS
// =============================================================================

#[test]
fn test_status_response_from_census() {
    let records = vec![
        CadetRecord::approved(CadetId(1), "Ana", "Reyes").with_battalion("2nd Battalion"),
        CadetRecord::approved(CadetId(2), "Bo", "Tan"),
    ];
    let status = StatusResponse::from(Census::from_records(&records));

    assert_eq!(status.total_records, 2);
    assert_eq!(status.unassigned, 2);
    assert_eq!(status.by_battalion.get("2nd Battalion"), Some(&1));
}

#[test]
fn test_roster_entry_from_record() {
    let record = CadetRecord::approved(CadetId(9), "Di", "Go").with_gender("F");
    let entry = RosterEntry::from(&record);

    assert_eq!(entry.id, 9);
    assert_eq!(entry.last_name, "Go");
    assert_eq!(entry.gender.as_deref(), Some("F"));
    assert_eq!(entry.platoon, None);
}
