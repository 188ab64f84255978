//! # muster-core
//!
//! The deterministic assignment engine for Muster.
//!
//! Given the ordered roster of approved cadets, the engine places every cadet
//! in a battalion cohort and derives platoon and company labels from the
//! cadet's position inside that cohort. The result is either written back
//! through an [`AssignmentSink`] or returned as a preview.
//!
//! ## Pipeline
//!
//! ```text
//! RosterSource ──► classify/partition ──► cycle (position → labels) ──► Plan
//!                                                                        │
//!                                          simulate: report lines ◄──────┤
//!                                          apply:    AssignmentSink ◄────┘
//! ```
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no logging dependency
//! - No floating point, no randomness; `BTreeMap`/`BTreeSet` only
//! - Labels are a pure function of cohort position; there are no counters

// =============================================================================
// MODULES
// =============================================================================

pub mod assigner;
pub mod census;
pub mod classify;
pub mod cycle;
#[cfg(feature = "plan-digest")]
pub mod digest;
pub mod labels;
pub mod primitives;
pub mod roster;
pub mod storage;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Cadet, CadetId, CadetRecord, EnrollmentStatus, MusterError, Role};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use assigner::{
    Assigner, AssignmentResult, AssignmentRun, ErrorPolicy, Plan, PlanEntry, RecordOutcome,
    RunMode, RunSummary, WriteStatus,
};
pub use census::Census;
pub use classify::{Cohort, Cohorts, classify, normalize_gender, partition};
pub use cycle::{Slot, slot_for};
pub use labels::{Battalion, Company, Platoon};

// =============================================================================
// RE-EXPORTS: Stores
// =============================================================================

pub use roster::{AssignmentSink, AssignmentWrite, Roster, RosterSource, RosterStore};
pub use storage::RedbRoster;

#[cfg(feature = "plan-digest")]
pub use digest::plan_digest;
