//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        AssignRequest, AssignResponse, HealthResponse, RosterEntry, RosterResponse, StatusResponse,
    },
};
use crate::logging;
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use muster_core::{Assigner, Census, plan_digest, roster::eligible_records};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get stored assignment counts.
pub async fn status_handler(State(state): State<AppState>) -> Response {
    let store = state.store.read().await;
    match Census::from_store(&**store) {
        Ok(census) => (StatusCode::OK, Json(StatusResponse::from(census))).into_response(),
        Err(e) => internal_error(format!("Status failed: {}", e)),
    }
}

// =============================================================================
// ROSTER HANDLER
// =============================================================================

/// Get the eligible roster in assignment order.
pub async fn roster_handler(State(state): State<AppState>) -> Response {
    let store = state.store.read().await;
    let records = match store.records() {
        Ok(records) => records,
        Err(e) => return internal_error(format!("Roster failed: {}", e)),
    };

    let cadets: Vec<RosterEntry> = eligible_records(&records)
        .into_iter()
        .map(RosterEntry::from)
        .collect();
    let response = RosterResponse {
        count: cadets.len(),
        cadets,
    };

    (StatusCode::OK, Json(response)).into_response()
}

// =============================================================================
// ASSIGN HANDLER
// =============================================================================

/// Run the assignment engine.
///
/// The body is optional: missing, empty, `{}` or unreadable all mean an
/// applied run. Per-cadet write failures are part of a `200` response; only
/// reading the roster or planning produce an error status.
pub async fn assign_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request = AssignRequest::from_body(&body);

    let mut store = state.store.write().await;
    let run = match Assigner::with_policy(state.policy).run(&mut **store, request.mode()) {
        Ok(run) => run,
        Err(e) => {
            tracing::error!(event = "assignment_run_failed", error = %e, "Assignment run failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AssignResponse::error(format!("Assignment failed: {}", e))),
            )
                .into_response();
        }
    };
    drop(store);

    logging::log_run(&run);
    let digest = plan_digest(&run.plan).ok();

    (StatusCode::OK, Json(AssignResponse::from_run(run, digest))).into_response()
}

fn internal_error(message: String) -> Response {
    tracing::error!("{}", message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}
