//! # Roster Stores
//!
//! The collaborator interfaces the engine reads from and writes to.
//!
//! - [`RosterSource`]: the eligible roster, already ordered
//! - [`AssignmentSink`]: one write per cadet, success or failure reported
//! - [`RosterStore`]: enrollment and inspection on top of both
//!
//! Two stores implement all three: the in-memory [`Roster`] and the
//! disk-backed [`crate::RedbRoster`].

mod memory;

pub use memory::Roster;

use crate::labels::{Battalion, Company, Platoon};
use crate::primitives::{MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
use crate::{Cadet, CadetId, CadetRecord, MusterError};
use serde::{Deserialize, Serialize};

// =============================================================================
// COLLABORATOR TRAITS
// =============================================================================

/// Supplies the eligible roster.
pub trait RosterSource {
    /// Every approved member, ordered by [`roster_key`].
    fn eligible_roster(&self) -> Result<Vec<Cadet>, MusterError>;
}

/// Accepts computed assignments.
pub trait AssignmentSink {
    /// Persist one cadet's assignment.
    ///
    /// Platoon and company are always written. Battalion is written only
    /// when present; `None` leaves the stored value untouched.
    fn store_assignment(&mut self, write: &AssignmentWrite) -> Result<(), MusterError>;
}

/// Full store interface used by the operator surfaces.
pub trait RosterStore: RosterSource + AssignmentSink {
    /// Insert or replace a record after validating it.
    fn enroll(&mut self, record: CadetRecord) -> Result<(), MusterError>;

    /// Fetch one record.
    fn lookup(&self, id: CadetId) -> Result<Option<CadetRecord>, MusterError>;

    /// Every record, in id order.
    fn records(&self) -> Result<Vec<CadetRecord>, MusterError>;

    /// Number of stored records.
    fn record_count(&self) -> Result<usize, MusterError>;
}

// =============================================================================
// ASSIGNMENT WRITE
// =============================================================================

/// One persistence instruction produced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentWrite {
    pub cadet: CadetId,
    pub platoon: Platoon,
    pub company: Company,
    pub battalion: Option<Battalion>,
}

impl AssignmentWrite {
    /// Apply this write to a record in place.
    pub fn apply_to(&self, record: &mut CadetRecord) {
        record.platoon = Some(self.platoon.label().to_string());
        record.company = Some(self.company.label().to_string());
        if let Some(battalion) = self.battalion {
            record.battalion = Some(battalion.label().to_string());
        }
    }
}

// =============================================================================
// ORDERING
// =============================================================================

/// Sort key for the roster: trimmed, lower-cased last name, then first name,
/// then id so that equal names still order deterministically.
#[must_use]
pub fn roster_key(record: &CadetRecord) -> (String, String, CadetId) {
    (
        record.last_name.trim().to_lowercase(),
        record.first_name.trim().to_lowercase(),
        record.id,
    )
}

/// Filter `records` to the eligible population, in roster order.
#[must_use]
pub fn eligible_records<'a>(
    records: impl IntoIterator<Item = &'a CadetRecord>,
) -> Vec<&'a CadetRecord> {
    let mut eligible: Vec<&CadetRecord> = records.into_iter().filter(|r| r.is_eligible()).collect();
    eligible.sort_by_cached_key(|r| roster_key(r));
    eligible
}

/// The planning view of [`eligible_records`].
#[must_use]
pub fn eligible_in_order<'a>(records: impl IntoIterator<Item = &'a CadetRecord>) -> Vec<Cadet> {
    eligible_records(records)
        .into_iter()
        .map(CadetRecord::to_cadet)
        .collect()
}

// =============================================================================
// ENROLLMENT VALIDATION
// =============================================================================

/// Validate a record before it is stored.
///
/// A record is valid if:
/// - First and last name are non-blank and within `MAX_NAME_LENGTH`
/// - Gender and battalion text, when present, are within `MAX_LABEL_LENGTH`
///
/// Gender content is never checked; unknown values classify as undetermined.
pub fn validate_record(record: &CadetRecord) -> Result<(), MusterError> {
    for (field, value) in [
        ("first_name", &record.first_name),
        ("last_name", &record.last_name),
    ] {
        if value.trim().is_empty() {
            return Err(MusterError::InvalidCadet(format!(
                "cadet {}: {} is empty",
                record.id, field
            )));
        }
        if value.len() > MAX_NAME_LENGTH {
            return Err(MusterError::InvalidCadet(format!(
                "cadet {}: {} exceeds {} bytes",
                record.id, field, MAX_NAME_LENGTH
            )));
        }
    }

    for (field, value) in [("gender", &record.gender), ("battalion", &record.battalion)] {
        if value.as_ref().is_some_and(|v| v.len() > MAX_LABEL_LENGTH) {
            return Err(MusterError::InvalidCadet(format!(
                "cadet {}: {} exceeds {} bytes",
                record.id, field, MAX_LABEL_LENGTH
            )));
        }
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
