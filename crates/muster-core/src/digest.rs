//! # Plan Digest
//!
//! A BLAKE3 fingerprint of a computed plan.
//!
//! Only the assignment itself is hashed: cadet id, cohort, platoon, company
//! and battalion, in plan order. Names and existing free-form text are left
//! out, so two runs over the same ordered roster always hash the same.

use crate::MusterError;
use crate::assigner::Plan;

/// Canonical row: (cadet id, cohort index, platoon index, company index, battalion index).
type DigestRow = (u64, u8, u8, u8, Option<u8>);

fn canonical_rows(plan: &Plan) -> Vec<DigestRow> {
    plan.results()
        .map(|r| {
            (
                r.cadet.0,
                r.cohort as u8,
                r.platoon.index() as u8,
                r.company.index() as u8,
                r.battalion.map(|b| b as u8),
            )
        })
        .collect()
}

/// Hex-encoded BLAKE3 hash of the plan's canonical encoding.
pub fn plan_digest(plan: &Plan) -> Result<String, MusterError> {
    let bytes = postcard::to_allocvec(&canonical_rows(plan))
        .map_err(|e| MusterError::SerializationError(e.to_string()))?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}
