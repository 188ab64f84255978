//! # Cohort Classification
//!
//! Splits a roster into the three disjoint battalion cohorts.
//!
//! - Classification looks only at gender text and existing battalion text
//! - Battalion-A is checked first, so no cadet can land in two cohorts
//! - Partitioning is stable: each cohort keeps the input order

use crate::Cadet;
use crate::labels::Battalion;
use crate::primitives::{FEMALE_MARKERS, MALE_MARKERS};
use serde::{Deserialize, Serialize};

/// The group a cadet is placed in before positional cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cohort {
    BattalionA,
    BattalionB,
    Undetermined,
}

impl Cohort {
    /// Order in which cohorts are processed and reported.
    pub const PROCESSING_ORDER: [Cohort; 3] =
        [Cohort::BattalionA, Cohort::BattalionB, Cohort::Undetermined];

    /// The battalion forced onto members of this cohort, if any.
    #[must_use]
    pub const fn battalion(self) -> Option<Battalion> {
        match self {
            Cohort::BattalionA => Some(Battalion::First),
            Cohort::BattalionB => Some(Battalion::Second),
            Cohort::Undetermined => None,
        }
    }

    /// Short name for reports and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Cohort::BattalionA => "battalion-a",
            Cohort::BattalionB => "battalion-b",
            Cohort::Undetermined => "undetermined",
        }
    }
}

impl std::fmt::Display for Cohort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower-case and trim gender text. Absent text normalizes to `""`.
#[must_use]
pub fn normalize_gender(gender: Option<&str>) -> String {
    gender.map(|g| g.trim().to_lowercase()).unwrap_or_default()
}

/// Classify one cadet.
#[must_use]
pub fn classify(cadet: &Cadet) -> Cohort {
    let gender = normalize_gender(cadet.gender.as_deref());
    let battalion = cadet.battalion.as_deref().and_then(Battalion::from_label);

    if MALE_MARKERS.contains(&gender.as_str()) || battalion == Some(Battalion::First) {
        Cohort::BattalionA
    } else if FEMALE_MARKERS.contains(&gender.as_str()) || battalion == Some(Battalion::Second) {
        Cohort::BattalionB
    } else {
        Cohort::Undetermined
    }
}

/// A roster split into cohorts, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cohorts<'a> {
    pub battalion_a: Vec<&'a Cadet>,
    pub battalion_b: Vec<&'a Cadet>,
    pub undetermined: Vec<&'a Cadet>,
}

impl<'a> Cohorts<'a> {
    /// Members of one cohort, in input order.
    #[must_use]
    pub fn members(&self, cohort: Cohort) -> &[&'a Cadet] {
        match cohort {
            Cohort::BattalionA => &self.battalion_a,
            Cohort::BattalionB => &self.battalion_b,
            Cohort::Undetermined => &self.undetermined,
        }
    }

    /// Total cadets across all cohorts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.battalion_a.len() + self.battalion_b.len() + self.undetermined.len()
    }

    /// Whether every cohort is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stable partition of `roster` into cohorts. Each cadet is classified once.
#[must_use]
pub fn partition(roster: &[Cadet]) -> Cohorts<'_> {
    let mut cohorts = Cohorts::default();
    for cadet in roster {
        match classify(cadet) {
            Cohort::BattalionA => cohorts.battalion_a.push(cadet),
            Cohort::BattalionB => cohorts.battalion_b.push(cadet),
            Cohort::Undetermined => cohorts.undetermined.push(cadet),
        }
    }
    cohorts
}

// =============================================================================
// TESTS
// =============================================================================
