//! # Assigner
//!
//! Turns an ordered roster into a [`Plan`] and applies or simulates it.
//!
//! - Planning is pure: roster in, plan out, no store access
//! - Cohorts are processed in [`Cohort::PROCESSING_ORDER`], each from position 0
//! - Execution records one [`RecordOutcome`] per cadet; a failed write does not
//!   stop the run unless [`ErrorPolicy::Abort`] is selected
//!
//! ## Counting
//!
//! `processed` counts every cadet in the plan. `applied` counts only writes the
//! sink accepted. Simulation therefore reports `applied == 0`.

use crate::classify::{Cohort, partition};
use crate::cycle::slot_for;
use crate::labels::{Battalion, Company, Platoon};
use crate::roster::{AssignmentSink, AssignmentWrite, RosterSource};
use crate::{Cadet, CadetId, MusterError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// ASSIGNMENT RESULT
// =============================================================================

/// The computed labels for one cadet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub cadet: CadetId,
    pub cohort: Cohort,
    /// Zero-based position within the cohort.
    pub position: usize,
    pub platoon: Platoon,
    pub company: Company,
    /// `None` means the stored battalion is left as is.
    pub battalion: Option<Battalion>,
}

impl AssignmentResult {
    /// Labels for the cadet at `position` of `cohort`.
    #[must_use]
    pub fn at(cadet: CadetId, cohort: Cohort, position: usize) -> Self {
        let slot = slot_for(position);
        Self {
            cadet,
            cohort,
            position,
            platoon: slot.platoon,
            company: slot.company,
            battalion: cohort.battalion(),
        }
    }

    /// The persistence instruction for this result.
    #[must_use]
    pub fn to_write(&self) -> AssignmentWrite {
        AssignmentWrite {
            cadet: self.cadet,
            platoon: self.platoon,
            company: self.company,
            battalion: self.battalion,
        }
    }
}

// =============================================================================
// PLAN
// =============================================================================

/// A cadet together with the labels computed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub cadet: Cadet,
    pub result: AssignmentResult,
}

impl PlanEntry {
    /// Battalion text the cadet ends up with after this entry is applied.
    #[must_use]
    pub fn resulting_battalion(&self) -> Option<&str> {
        match self.result.battalion {
            Some(battalion) => Some(battalion.label()),
            None => self.cadet.battalion.as_deref(),
        }
    }

    /// Report line: `lastName, firstName -> platoon | company | battalion`.
    #[must_use]
    pub fn report_line(&self) -> String {
        format!(
            "{}, {} -> {} | {} | {}",
            self.cadet.last_name,
            self.cadet.first_name,
            self.result.platoon,
            self.result.company,
            self.resulting_battalion().unwrap_or("(none)")
        )
    }
}

/// Every assignment for one run, in cohort processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    entries: Vec<PlanEntry>,
}

impl Plan {
    /// Compute the plan for an ordered roster.
    ///
    /// The roster order is taken as given. Returns
    /// `MusterError::DuplicateCadet` if an id appears twice.
    pub fn build(roster: &[Cadet]) -> Result<Self, MusterError> {
        let mut seen = BTreeSet::new();
        for cadet in roster {
            if !seen.insert(cadet.id) {
                return Err(MusterError::DuplicateCadet(cadet.id));
            }
        }

        let cohorts = partition(roster);
        let mut entries = Vec::with_capacity(roster.len());
        for cohort in Cohort::PROCESSING_ORDER {
            for (position, cadet) in cohorts.members(cohort).iter().enumerate() {
                entries.push(PlanEntry {
                    cadet: (*cadet).clone(),
                    result: AssignmentResult::at(cadet.id, cohort, position),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Entries in cohort processing order.
    #[must_use]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Just the computed results.
    pub fn results(&self) -> impl Iterator<Item = &AssignmentResult> {
        self.entries.iter().map(|e| &e.result)
    }

    /// Number of cadets in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cadets placed in `cohort`.
    #[must_use]
    pub fn cohort_size(&self, cohort: Cohort) -> usize {
        self.entries
            .iter()
            .filter(|e| e.result.cohort == cohort)
            .count()
    }

    /// One report line per cadet.
    #[must_use]
    pub fn report_lines(&self) -> Vec<String> {
        self.entries.iter().map(PlanEntry::report_line).collect()
    }
}

// =============================================================================
// RUN MODE & POLICY
// =============================================================================

/// Whether a run writes to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Simulate,
    #[default]
    Apply,
}

impl RunMode {
    /// Map the operator `simulate` flag to a mode.
    #[must_use]
    pub const fn from_simulate(simulate: bool) -> Self {
        if simulate {
            RunMode::Simulate
        } else {
            RunMode::Apply
        }
    }
}

/// What to do after a write fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Record the failure and keep writing.
    #[default]
    Continue,
    /// Stop at the first failure; remaining cadets are skipped.
    Abort,
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// What happened to one cadet's write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteStatus {
    Simulated,
    Applied,
    Failed(String),
    Skipped,
}

/// Per-cadet outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub cadet: CadetId,
    pub status: WriteStatus,
}

/// Totals for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: RunMode,
    /// Cadets in the plan (every attempt, simulated or not).
    pub processed: usize,
    /// Writes the sink accepted.
    pub applied: usize,
    pub failed: usize,
    /// Cadets not attempted after an abort.
    pub skipped: usize,
    pub battalion_a: usize,
    pub battalion_b: usize,
    pub undetermined: usize,
}

impl RunSummary {
    /// Whether every planned write landed (always true when simulating).
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }

    /// One-line human summary.
    #[must_use]
    pub fn summary_line(&self) -> String {
        match self.mode {
            RunMode::Simulate => format!(
                "Simulated assignment for {} cadets ({} in 1st Battalion, {} in 2nd Battalion, {} undetermined)",
                self.processed, self.battalion_a, self.battalion_b, self.undetermined
            ),
            RunMode::Apply => format!(
                "Updated {} of {} cadets ({} failed, {} skipped)",
                self.applied, self.processed, self.failed, self.skipped
            ),
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRun {
    pub plan: Plan,
    pub outcomes: Vec<RecordOutcome>,
    pub summary: RunSummary,
}

// =============================================================================
// ASSIGNER
// =============================================================================

/// Runs plans against a sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assigner {
    policy: ErrorPolicy,
}

impl Assigner {
    /// Assigner with the default continue-on-error policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigner with an explicit failure policy.
    #[must_use]
    pub fn with_policy(policy: ErrorPolicy) -> Self {
        Self { policy }
    }

    /// The configured failure policy.
    #[must_use]
    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Read the eligible roster from `store`, plan it, and execute the plan
    /// against the same store.
    ///
    /// Only reading the roster and building the plan can fail; per-cadet
    /// write failures end up in [`AssignmentRun::outcomes`].
    pub fn run<S>(&self, store: &mut S, mode: RunMode) -> Result<AssignmentRun, MusterError>
    where
        S: RosterSource + AssignmentSink + ?Sized,
    {
        let roster = store.eligible_roster()?;
        let plan = Plan::build(&roster)?;
        Ok(self.execute(plan, store, mode))
    }

    /// Execute an already-built plan. In simulate mode `sink` is never touched.
    pub fn execute<K: AssignmentSink + ?Sized>(
        &self,
        plan: Plan,
        sink: &mut K,
        mode: RunMode,
    ) -> AssignmentRun {
        let mut summary = RunSummary {
            mode,
            processed: plan.len(),
            battalion_a: plan.cohort_size(Cohort::BattalionA),
            battalion_b: plan.cohort_size(Cohort::BattalionB),
            undetermined: plan.cohort_size(Cohort::Undetermined),
            ..RunSummary::default()
        };

        let mut outcomes = Vec::with_capacity(plan.len());
        let mut halted = false;

        for result in plan.results() {
            let status = match mode {
                RunMode::Simulate => WriteStatus::Simulated,
                RunMode::Apply if halted => {
                    summary.skipped += 1;
                    WriteStatus::Skipped
                }
                RunMode::Apply => match sink.store_assignment(&result.to_write()) {
                    Ok(()) => {
                        summary.applied += 1;
                        WriteStatus::Applied
                    }
                    Err(e) => {
                        summary.failed += 1;
                        halted = self.policy == ErrorPolicy::Abort;
                        WriteStatus::Failed(e.to_string())
                    }
                },
            };
            outcomes.push(RecordOutcome {
                cadet: result.cadet,
                status,
            });
        }

        AssignmentRun {
            plan,
            outcomes,
            summary,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
