//! # Roster Census
//!
//! Counts over stored records, used by the `status` surfaces.
//!
//! The census reads labels as stored text; it does not re-run the engine.

use crate::roster::RosterStore;
use crate::{CadetRecord, MusterError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key used for records with no stored label.
pub const UNASSIGNED: &str = "(none)";

/// Counts of stored records and their labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    /// Every stored record.
    pub total: usize,
    /// Records in the assignable population.
    pub eligible: usize,
    /// Eligible records carrying both a platoon and a company label.
    pub assigned: usize,
    /// Eligible records per battalion text.
    pub by_battalion: BTreeMap<String, usize>,
    /// Eligible records per company text.
    pub by_company: BTreeMap<String, usize>,
    /// Eligible records per platoon text.
    pub by_platoon: BTreeMap<String, usize>,
}

impl Census {
    /// Tally a set of records.
    #[must_use]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a CadetRecord>) -> Self {
        let mut census = Self::default();

        for record in records {
            census.total += 1;
            if !record.is_eligible() {
                continue;
            }
            census.eligible += 1;
            if record.platoon.is_some() && record.company.is_some() {
                census.assigned += 1;
            }
            bump(&mut census.by_battalion, record.battalion.as_deref());
            bump(&mut census.by_company, record.company.as_deref());
            bump(&mut census.by_platoon, record.platoon.as_deref());
        }

        census
    }

    /// Tally every record held by a store.
    pub fn from_store<S: RosterStore + ?Sized>(store: &S) -> Result<Self, MusterError> {
        Ok(Self::from_records(&store.records()?))
    }

    /// Eligible records still missing a platoon or company.
    #[must_use]
    pub fn unassigned(&self) -> usize {
        self.eligible - self.assigned
    }
}

fn bump(counts: &mut BTreeMap<String, usize>, label: Option<&str>) {
    *counts
        .entry(label.unwrap_or(UNASSIGNED).to_string())
        .or_insert(0) += 1;
}
