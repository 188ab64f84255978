//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::{api, logging};
use muster_core::{
    Assigner, CadetRecord, Census, ErrorPolicy, MusterError, RedbRoster, RosterStore, RunMode,
    plan_digest, primitives::MAX_IMPORT_RECORDS, roster::eligible_records,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for enrollment (50 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_ENROLL_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), MusterError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| MusterError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(MusterError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize an input path and ensure it names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, MusterError> {
    let canonical = path.canonicalize().map_err(|e| {
        MusterError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(MusterError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Initialize a new roster database.
pub fn cmd_init(db_path: &Path, force: bool) -> Result<(), MusterError> {
    if db_path.exists() {
        if !force {
            return Err(MusterError::IoError(
                "Database already exists. Use --force to overwrite.".to_string(),
            ));
        }
        std::fs::remove_file(db_path)
            .map_err(|e| MusterError::IoError(format!("Cannot remove old database: {}", e)))?;
    }

    let _store = RedbRoster::open(db_path)?;
    println!("Initialized new roster database at {:?}", db_path);
    Ok(())
}

// =============================================================================
// ENROLL COMMAND
// =============================================================================

/// Parse an enrollment file body.
///
/// The body is a JSON array of cadet records. `role` defaults to `member`
/// and `status` to `pending`; labels are optional. An id appearing twice
/// rejects the whole file.
pub fn parse_enrollment(contents: &[u8]) -> Result<Vec<CadetRecord>, MusterError> {
    let records: Vec<CadetRecord> = serde_json::from_slice(contents).map_err(|e| {
        MusterError::DeserializationError(format!("Invalid enrollment file: {}", e))
    })?;

    if records.len() > MAX_IMPORT_RECORDS {
        return Err(MusterError::SerializationError(format!(
            "Record count {} exceeds maximum allowed {}",
            records.len(),
            MAX_IMPORT_RECORDS
        )));
    }

    let mut seen = BTreeSet::new();
    for record in &records {
        if !seen.insert(record.id) {
            return Err(MusterError::DuplicateCadet(record.id));
        }
    }

    Ok(records)
}

/// Import cadet records from a JSON file. Existing ids are replaced.
pub fn cmd_enroll(db_path: &Path, json_mode: bool, file: &Path) -> Result<(), MusterError> {
    tracing::info!("Enrolling from {:?}", file);

    let validated_path = validate_file_path(file)?;
    validate_file_size(&validated_path, MAX_ENROLL_FILE_SIZE)?;

    let contents = std::fs::read(&validated_path)
        .map_err(|e| MusterError::IoError(format!("Read file: {}", e)))?;
    let records = parse_enrollment(&contents)?;

    let mut store = RedbRoster::open_existing(db_path)?;
    let written = store.enroll_batch(&records)?;
    let total = store.record_count()?;

    if json_mode {
        print_json(&serde_json::json!({
            "enrolled": written,
            "total_records": total,
        }));
    } else {
        println!("Enrolled {} records", written);
        println!("Roster now holds {} records", total);
    }

    Ok(())
}

// =============================================================================
// ROSTER COMMAND
// =============================================================================

/// List the eligible roster in assignment order, or every record with `all`.
pub fn cmd_roster(db_path: &Path, json_mode: bool, all: bool) -> Result<(), MusterError> {
    let store = RedbRoster::open_existing(db_path)?;
    let records = store.records()?;
    let listed: Vec<&CadetRecord> = if all {
        records.iter().collect()
    } else {
        eligible_records(&records)
    };

    if json_mode {
        print_json(&serde_json::json!({
            "count": listed.len(),
            "cadets": listed,
        }));
        return Ok(());
    }

    for record in &listed {
        println!(
            "{:>8}  {}, {}  [{}]  {} | {} | {}",
            record.id,
            record.last_name,
            record.first_name,
            record.gender.as_deref().unwrap_or("-"),
            record.platoon.as_deref().unwrap_or("-"),
            record.company.as_deref().unwrap_or("-"),
            record.battalion.as_deref().unwrap_or("-"),
        );
    }
    println!("{} cadets", listed.len());

    Ok(())
}

// =============================================================================
// ASSIGN COMMAND
// =============================================================================

/// Run the assignment engine against the database.
///
/// Per-cadet write failures are reported and logged but do not fail the
/// command; only reading the roster or planning can.
pub fn cmd_assign(
    db_path: &Path,
    json_mode: bool,
    verbose: bool,
    simulate: bool,
    policy: ErrorPolicy,
) -> Result<(), MusterError> {
    let mut store = RedbRoster::open_existing(db_path)?;
    let mode = RunMode::from_simulate(simulate);

    let run = Assigner::with_policy(policy).run(&mut store, mode)?;
    logging::log_run(&run);
    let digest = plan_digest(&run.plan)?;

    if json_mode {
        let report = if simulate {
            run.plan.report_lines()
        } else {
            Vec::new()
        };
        print_json(&serde_json::json!({
            "summary": run.summary,
            "summary_line": run.summary.summary_line(),
            "digest": digest,
            "outcomes": run.outcomes,
            "report": report,
        }));
        return Ok(());
    }

    if simulate || verbose {
        for line in run.plan.report_lines() {
            println!("{}", line);
        }
        println!();
    }

    for outcome in &run.outcomes {
        if let muster_core::WriteStatus::Failed(reason) = &outcome.status {
            println!("FAILED cadet {}: {}", outcome.cadet, reason);
        }
    }

    println!("{}", run.summary.summary_line());
    println!("Plan digest: {}", digest);

    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show stored assignment counts.
pub fn cmd_status(db_path: &Path, json_mode: bool) -> Result<(), MusterError> {
    let store = RedbRoster::open_existing(db_path)?;
    let census = Census::from_store(&store)?;

    if json_mode {
        print_json(&serde_json::json!({
            "database": db_path.to_string_lossy(),
            "total_records": census.total,
            "eligible": census.eligible,
            "assigned": census.assigned,
            "unassigned": census.unassigned(),
            "by_battalion": census.by_battalion,
            "by_company": census.by_company,
            "by_platoon": census.by_platoon,
        }));
        return Ok(());
    }

    println!("Muster Roster Status");
    println!("====================");
    println!("Database:   {:?}", db_path);
    println!();
    println!("Records:    {}", census.total);
    println!("Eligible:   {}", census.eligible);
    println!("Assigned:   {}", census.assigned);
    println!("Unassigned: {}", census.unassigned());

    for (title, counts) in [
        ("Battalions", &census.by_battalion),
        ("Companies", &census.by_company),
        ("Platoons", &census.by_platoon),
    ] {
        if counts.is_empty() {
            continue;
        }
        println!();
        println!("{}:", title);
        for (label, count) in counts {
            println!("  {:<16} {}", label, count);
        }
    }

    Ok(())
}

// =============================================================================
// COMPACT COMMAND
// =============================================================================

/// Compact the roster database file.
pub fn cmd_compact(db_path: &Path, json_mode: bool) -> Result<(), MusterError> {
    let mut store = RedbRoster::open_existing(db_path)?;
    store.compact()?;
    let total = store.record_count()?;

    if json_mode {
        print_json(&serde_json::json!({
            "compacted": true,
            "total_records": total,
        }));
    } else {
        println!(
            "Compacted roster database at {:?} ({} records)",
            db_path, total
        );
    }

    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(
    db_path: &Path,
    host: &str,
    port: u16,
    policy: ErrorPolicy,
) -> Result<(), MusterError> {
    let store = RedbRoster::open_existing(db_path)?;

    println!("Muster Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Database: {:?}", db_path);
    println!("  On error: {:?}", policy);
    println!();
    println!("Endpoints:");
    println!("  GET  /health - Health check");
    println!("  GET  /status - Assignment counts");
    println!("  GET  /roster - Eligible roster in order");
    println!("  POST /assign - Run assignment (body: {{\"simulate\": bool}})");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, store, policy).await
}

// =============================================================================
// TESTS
// =============================================================================
