//! # Persistent Storage
//!
//! Disk-backed roster storage. The in-memory store lives in [`crate::roster`].

mod redb_roster;

pub use redb_roster::RedbRoster;
