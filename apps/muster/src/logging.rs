//! # Structured Logging
//!
//! Tracing setup for the binary and the structured events emitted per run.
//!
//! `MUSTER_LOG_FORMAT=json` enables machine-parseable output; the filter is
//! read from `RUST_LOG`.

use muster_core::{AssignmentRun, WriteStatus};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the log format ("json" or "text").
pub const LOG_FORMAT_ENV: &str = "MUSTER_LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "muster=info,muster_core=info,tower_http=debug";

/// Install the global tracing subscriber.
///
/// Does nothing if a subscriber is already installed.
pub fn init_tracing() {
    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let installed = match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("Global tracing subscriber already initialized");
    }
}

/// Emit one event per failed write and one summary event for the run.
pub fn log_run(run: &AssignmentRun) {
    for outcome in &run.outcomes {
        if let WriteStatus::Failed(reason) = &outcome.status {
            tracing::warn!(
                event = "assignment_write_failed",
                cadet = %outcome.cadet,
                reason = %reason,
                "Failed to store assignment"
            );
        }
    }

    let summary = &run.summary;
    tracing::info!(
        event = "assignment_run_complete",
        mode = ?summary.mode,
        processed = summary.processed,
        applied = summary.applied,
        failed = summary.failed,
        skipped = summary.skipped,
        battalion_a = summary.battalion_a,
        battalion_b = summary.battalion_b,
        undetermined = summary.undetermined,
        "{}",
        summary.summary_line()
    );
}
