//! In-memory roster store.

use super::{
    AssignmentSink, AssignmentWrite, RosterSource, RosterStore, eligible_in_order, validate_record,
};
use crate::{Cadet, CadetId, CadetRecord, MusterError};
use std::collections::BTreeMap;

/// Roster held in a `BTreeMap` keyed by cadet id.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: BTreeMap<CadetId, CadetRecord>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from records, validating each one.
    pub fn from_records(
        records: impl IntoIterator<Item = CadetRecord>,
    ) -> Result<Self, MusterError> {
        let mut roster = Self::new();
        for record in records {
            roster.enroll(record)?;
        }
        Ok(roster)
    }
}

impl RosterSource for Roster {
    fn eligible_roster(&self) -> Result<Vec<Cadet>, MusterError> {
        Ok(eligible_in_order(self.records.values()))
    }
}

impl AssignmentSink for Roster {
    fn store_assignment(&mut self, write: &AssignmentWrite) -> Result<(), MusterError> {
        let record = self
            .records
            .get_mut(&write.cadet)
            .ok_or(MusterError::CadetNotFound(write.cadet))?;
        write.apply_to(record);
        Ok(())
    }
}

impl RosterStore for Roster {
    fn enroll(&mut self, record: CadetRecord) -> Result<(), MusterError> {
        validate_record(&record)?;
        self.records.insert(record.id, record);
        Ok(())
    }

    fn lookup(&self, id: CadetId) -> Result<Option<CadetRecord>, MusterError> {
        Ok(self.records.get(&id).cloned())
    }

    fn records(&self) -> Result<Vec<CadetRecord>, MusterError> {
        Ok(self.records.values().cloned().collect())
    }

    fn record_count(&self) -> Result<usize, MusterError> {
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{Battalion, Company, Platoon};

    #[test]
    fn store_assignment_unknown_cadet_fails() {
        let mut roster = Roster::new();
        let write = AssignmentWrite {
            cadet: CadetId(99),
            platoon: Platoon::First,
            company: Company::ALPHA,
            battalion: Some(Battalion::First),
        };
        assert!(matches!(
            roster.store_assignment(&write),
            Err(MusterError::CadetNotFound(CadetId(99)))
        ));
    }

    #[test]
    fn enroll_replaces_existing_record() {
        let mut roster = Roster::new();
        roster
            .enroll(CadetRecord::approved(CadetId(1), "Ana", "Reyes"))
            .expect("enroll");
        roster
            .enroll(CadetRecord::approved(CadetId(1), "Ana", "Reyes-Cruz"))
            .expect("enroll");

        assert_eq!(roster.record_count().expect("count"), 1);
        let stored = roster.lookup(CadetId(1)).expect("lookup").expect("present");
        assert_eq!(stored.last_name, "Reyes-Cruz");
    }

    #[test]
    fn from_records_rejects_invalid_row() {
        let result = Roster::from_records(vec![
            CadetRecord::approved(CadetId(1), "Ana", "Reyes"),
            CadetRecord::approved(CadetId(2), "", "Cruz"),
        ]);
        assert!(result.is_err());
    }
}
