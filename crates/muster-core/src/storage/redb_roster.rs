//! # redb-backed Roster Storage
//!
//! A disk-backed roster store using the redb embedded database.
//!
//! - One row per cadet, keyed by id, value is a postcard-encoded `CadetRecord`
//! - Every assignment write is its own ACID transaction, so a failed write
//!   never leaves a half-updated record and never rolls back earlier cadets
//! - Batch enrollment groups all rows into a single transaction

use crate::primitives::STORE_FORMAT_VERSION;
use crate::roster::{
    AssignmentSink, AssignmentWrite, RosterSource, RosterStore, eligible_in_order, validate_record,
};
use crate::{Cadet, CadetId, CadetRecord, MusterError};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;

/// Table for cadets: CadetId(u64) -> serialized CadetRecord bytes
const CADETS: TableDefinition<u64, &[u8]> = TableDefinition::new("cadets");

/// Table for metadata: key string -> value u64
const METADATA: TableDefinition<&str, u64> = TableDefinition::new("metadata");

/// Map any storage-layer error into `MusterError::IoError`.
fn io_err(e: impl std::fmt::Display) -> MusterError {
    MusterError::IoError(e.to_string())
}

fn encode(record: &CadetRecord) -> Result<Vec<u8>, MusterError> {
    postcard::to_allocvec(record).map_err(|e| MusterError::SerializationError(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<CadetRecord, MusterError> {
    postcard::from_bytes(bytes).map_err(|e| MusterError::DeserializationError(e.to_string()))
}

/// A disk-backed roster store using redb.
pub struct RedbRoster {
    db: Database,
}

impl std::fmt::Debug for RedbRoster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbRoster").finish_non_exhaustive()
    }
}

impl RedbRoster {
    /// Open or create a roster database at the given path.
    ///
    /// A new database is stamped with `STORE_FORMAT_VERSION`; an existing one
    /// with a different version is refused.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MusterError> {
        let db = Database::create(path.as_ref()).map_err(io_err)?;

        let write_txn = db.begin_write().map_err(io_err)?;
        {
            let _ = write_txn.open_table(CADETS).map_err(io_err)?;
            let mut meta = write_txn.open_table(METADATA).map_err(io_err)?;
            let stored = meta
                .get("format_version")
                .map_err(io_err)?
                .map(|v| v.value());
            match stored {
                None => {
                    meta.insert("format_version", STORE_FORMAT_VERSION)
                        .map_err(io_err)?;
                }
                Some(version) if version != STORE_FORMAT_VERSION => {
                    return Err(MusterError::IoError(format!(
                        "Unsupported roster format version {} (expected {})",
                        version, STORE_FORMAT_VERSION
                    )));
                }
                Some(_) => {}
            }
        }
        write_txn.commit().map_err(io_err)?;

        Ok(Self { db })
    }

    /// Open a roster database that must already exist.
    ///
    /// Unlike [`RedbRoster::open`], a missing file is an error rather than a
    /// fresh empty roster.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self, MusterError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(MusterError::IoError(format!(
                "Roster database not found at {}",
                path.display()
            )));
        }
        Self::open(path)
    }

    /// Compact the database file.
    pub fn compact(&mut self) -> Result<(), MusterError> {
        self.db.compact().map_err(io_err)?;
        Ok(())
    }

    /// Enroll many records in a single ACID transaction.
    ///
    /// Every record is validated before the transaction opens; one invalid
    /// record rejects the whole batch. Returns the number of rows written.
    pub fn enroll_batch(&mut self, records: &[CadetRecord]) -> Result<usize, MusterError> {
        if records.is_empty() {
            return Ok(0);
        }
        for record in records {
            validate_record(record)?;
        }

        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = write_txn.open_table(CADETS).map_err(io_err)?;
            for record in records {
                let bytes = encode(record)?;
                table
                    .insert(record.id.0, bytes.as_slice())
                    .map_err(io_err)?;
            }
        }
        write_txn.commit().map_err(io_err)?;

        Ok(records.len())
    }
}

// =============================================================================
// STORE TRAIT IMPLEMENTATIONS
// =============================================================================

impl RosterSource for RedbRoster {
    fn eligible_roster(&self) -> Result<Vec<Cadet>, MusterError> {
        let records = self.records()?;
        Ok(eligible_in_order(&records))
    }
}

impl AssignmentSink for RedbRoster {
    fn store_assignment(&mut self, write: &AssignmentWrite) -> Result<(), MusterError> {
        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut table = write_txn.open_table(CADETS).map_err(io_err)?;
            let existing = table
                .get(write.cadet.0)
                .map_err(io_err)?
                .map(|data| data.value().to_vec())
                .ok_or(MusterError::CadetNotFound(write.cadet))?;

            let mut record = decode(&existing)?;
            write.apply_to(&mut record);
            let bytes = encode(&record)?;
            table
                .insert(write.cadet.0, bytes.as_slice())
                .map_err(io_err)?;
        }
        write_txn.commit().map_err(io_err)?;
        Ok(())
    }
}

impl RosterStore for RedbRoster {
    fn enroll(&mut self, record: CadetRecord) -> Result<(), MusterError> {
        self.enroll_batch(std::slice::from_ref(&record)).map(|_| ())
    }

    fn lookup(&self, id: CadetId) -> Result<Option<CadetRecord>, MusterError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(CADETS).map_err(io_err)?;
        match table.get(id.0).map_err(io_err)? {
            Some(data) => decode(data.value()).map(Some),
            None => Ok(None),
        }
    }

    fn records(&self) -> Result<Vec<CadetRecord>, MusterError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(CADETS).map_err(io_err)?;

        let mut records = Vec::new();
        for entry in table.iter().map_err(io_err)? {
            let (_, value) = entry.map_err(io_err)?;
            records.push(decode(value.value())?);
        }
        Ok(records)
    }

    fn record_count(&self) -> Result<usize, MusterError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let table = read_txn.open_table(CADETS).map_err(io_err)?;
        Ok(table.len().map_err(io_err)? as usize)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::labels::{Battalion, Company, Platoon};
    use crate::{EnrollmentStatus, Role};
    use tempfile::tempdir;

    fn sample() -> Vec<CadetRecord> {
        vec![
            CadetRecord::approved(CadetId(1), "Ana", "Reyes").with_gender("F"),
            CadetRecord::approved(CadetId(2), "Bo", "Tan").with_gender("male"),
            CadetRecord::approved(CadetId(3), "Cy", "Abad")
                .with_standing(Role::Member, EnrollmentStatus::Pending),
        ]
    }

    #[test]
    fn enroll_and_lookup() {
        let temp = tempdir().expect("temp dir");
        let mut roster = RedbRoster::open(temp.path().join("test.redb")).expect("open db");

        assert_eq!(roster.enroll_batch(&sample()).expect("enroll"), 3);
        assert_eq!(roster.record_count().expect("count"), 3);

        let ana = roster.lookup(CadetId(1)).expect("lookup").unwrap();
        assert_eq!(ana.last_name, "Reyes");
        assert!(roster.lookup(CadetId(42)).expect("lookup").is_none());
    }

    #[test]
    fn eligible_roster_is_filtered_and_sorted() {
        let temp = tempdir().expect("temp dir");
        let mut roster = RedbRoster::open(temp.path().join("test.redb")).expect("open db");
        roster.enroll_batch(&sample()).expect("enroll");

        let ids: Vec<u64> = roster
            .eligible_roster()
            .expect("roster")
            .iter()
            .map(|c| c.id.0)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn batch_with_invalid_record_writes_nothing() {
        let temp = tempdir().expect("temp dir");
        let mut roster = RedbRoster::open(temp.path().join("test.redb")).expect("open db");

        let mut records = sample();
        records.push(CadetRecord::approved(CadetId(4), "", "Blank"));

        assert!(roster.enroll_batch(&records).is_err());
        assert_eq!(roster.record_count().expect("count"), 0);
    }

    #[test]
    fn store_assignment_updates_only_labels() {
        let temp = tempdir().expect("temp dir");
        let mut roster = RedbRoster::open(temp.path().join("test.redb")).expect("open db");
        roster
            .enroll(CadetRecord::approved(CadetId(7), "Di", "Go").with_battalion("Reserve"))
            .expect("enroll");

        roster
            .store_assignment(&AssignmentWrite {
                cadet: CadetId(7),
                platoon: Platoon::Second,
                company: Company::from_cycle(2),
                battalion: None,
            })
            .expect("write");

        let stored = roster.lookup(CadetId(7)).expect("lookup").unwrap();
        assert_eq!(stored.platoon.as_deref(), Some("2nd Platoon"));
        assert_eq!(stored.company.as_deref(), Some("Charlie"));
        assert_eq!(stored.battalion.as_deref(), Some("Reserve"));
        assert_eq!(stored.first_name, "Di");
    }

    #[test]
    fn open_existing_refuses_missing_file() {
        let temp = tempdir().expect("temp dir");
        let db_path = temp.path().join("typo.redb");

        assert!(matches!(
            RedbRoster::open_existing(&db_path),
            Err(MusterError::IoError(_))
        ));
        assert!(!db_path.exists());

        drop(RedbRoster::open(&db_path).expect("create"));
        assert!(RedbRoster::open_existing(&db_path).is_ok());
    }

    #[test]
    fn store_assignment_missing_cadet_fails() {
        let temp = tempdir().expect("temp dir");
        let mut roster = RedbRoster::open(temp.path().join("test.redb")).expect("open db");

        let result = roster.store_assignment(&AssignmentWrite {
            cadet: CadetId(5),
            platoon: Platoon::First,
            company: Company::ALPHA,
            battalion: Some(Battalion::Second),
        });
        assert!(matches!(
            result,
            Err(MusterError::CadetNotFound(CadetId(5)))
        ));
    }

    #[test]
    fn assignments_persist_after_reopen() {
        let temp = tempdir().expect("temp dir");
        let db_path = temp.path().join("test.redb");

        {
            let mut roster = RedbRoster::open(&db_path).expect("open db");
            roster.enroll_batch(&sample()).expect("enroll");
            roster
                .store_assignment(&AssignmentWrite {
                    cadet: CadetId(2),
                    platoon: Platoon::First,
                    company: Company::ALPHA,
                    battalion: Some(Battalion::First),
                })
                .expect("write");
        }

        {
            let roster = RedbRoster::open(&db_path).expect("reopen db");
            let bo = roster.lookup(CadetId(2)).expect("lookup").unwrap();
            assert_eq!(bo.battalion.as_deref(), Some("1st Battalion"));
            assert_eq!(roster.record_count().expect("count"), 3);
        }
    }

    #[test]
    fn compact_then_reopen() {
        let temp = tempdir().expect("temp dir");
        let db_path = temp.path().join("test.redb");

        {
            let mut roster = RedbRoster::open(&db_path).expect("open db");
            roster.enroll_batch(&sample()).expect("enroll");
            roster.compact().expect("compact");
        }

        let roster = RedbRoster::open(&db_path).expect("reopen db");
        assert_eq!(roster.records().expect("records").len(), 3);
    }
}
