//! # Positional Cycling
//!
//! Maps a cohort-relative position to its platoon and company.
//!
//! ```text
//! block    = position / BLOCK_SIZE
//! platoon  = PLATOON_LABELS[block % ROTATION_SIZE]
//! company  = COMPANY_LABELS[(block / ROTATION_SIZE) % 26]
//! ```
//!
//! There is no running counter: the same position always yields the same
//! labels, whichever cohort it belongs to.

use crate::labels::{Company, Platoon};
use crate::primitives::{BLOCK_SIZE, ROTATION_SIZE};

/// Platoon and company for one cohort position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub platoon: Platoon,
    pub company: Company,
}

/// Block (run of `BLOCK_SIZE` positions) containing `position`.
#[must_use]
pub const fn block_of(position: usize) -> usize {
    position / BLOCK_SIZE
}

/// Labels for a zero-based cohort position.
#[must_use]
pub const fn slot_for(position: usize) -> Slot {
    let block = block_of(position);
    Slot {
        platoon: Platoon::from_cycle(block % ROTATION_SIZE),
        company: Company::from_cycle(block / ROTATION_SIZE),
    }
}

// =============================================================================
// TESTS
// =============================================================================
