//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use muster_core::{AssignmentRun, CadetRecord, Census, RecordOutcome, RunMode, RunSummary};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Stored assignment counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    pub total_records: usize,
    pub eligible: usize,
    pub assigned: usize,
    pub unassigned: usize,
    pub by_battalion: BTreeMap<String, usize>,
    pub by_company: BTreeMap<String, usize>,
    pub by_platoon: BTreeMap<String, usize>,
}

impl From<Census> for StatusResponse {
    fn from(census: Census) -> Self {
        Self {
            unassigned: census.unassigned(),
            total_records: census.total,
            eligible: census.eligible,
            assigned: census.assigned,
            by_battalion: census.by_battalion,
            by_company: census.by_company,
            by_platoon: census.by_platoon,
        }
    }
}

// =============================================================================
// ROSTER RESPONSE
// =============================================================================

/// One cadet as listed by `GET /roster`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub battalion: Option<String>,
    pub company: Option<String>,
    pub platoon: Option<String>,
}

impl From<&CadetRecord> for RosterEntry {
    fn from(record: &CadetRecord) -> Self {
        Self {
            id: record.id.0,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            gender: record.gender.clone(),
            battalion: record.battalion.clone(),
            company: record.company.clone(),
            platoon: record.platoon.clone(),
        }
    }
}

/// The eligible roster in assignment order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterResponse {
    pub count: usize,
    pub cadets: Vec<RosterEntry>,
}

// =============================================================================
// ASSIGN REQUEST/RESPONSE
// =============================================================================

/// Assignment run request. An empty body means an applied run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AssignRequest {
    /// Only a JSON `true` selects a simulated run.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub simulate: bool,
}

/// Read any JSON value as a flag: `true` is set, everything else is unset.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value == serde_json::Value::Bool(true))
}

impl AssignRequest {
    /// Parse a request body.
    ///
    /// An empty body is the default request. A body that is not a JSON
    /// object also falls back to the default, with a warning.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }
        match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(
                    event = "assign_request_ignored",
                    error = %e,
                    "Unreadable assign request, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Run mode selected by this request.
    #[must_use]
    pub fn mode(&self) -> RunMode {
        RunMode::from_simulate(self.simulate)
    }
}

/// Assignment run response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default)]
    pub outcomes: Vec<RecordOutcome>,
    /// One line per cadet; filled only for simulated runs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub report: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssignResponse {
    /// Build a response from a finished run.
    #[must_use]
    pub fn from_run(run: AssignmentRun, digest: Option<String>) -> Self {
        let report = if run.summary.mode == RunMode::Simulate {
            run.plan.report_lines()
        } else {
            Vec::new()
        };
        Self {
            success: true,
            summary_line: run.summary.summary_line(),
            summary: Some(run.summary),
            digest,
            outcomes: run.outcomes,
            report,
            error: None,
        }
    }

    /// Create an error response.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            summary: None,
            summary_line: String::new(),
            digest: None,
            outcomes: Vec::new(),
            report: Vec::new(),
            error: Some(message.into()),
        }
    }
}
