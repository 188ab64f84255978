//! # Core Type Definitions
//!
//! This module contains the record types shared by the engine and the stores:
//! - Cadet identifiers (`CadetId`)
//! - The read-only planning view of a cadet (`Cadet`)
//! - The persisted roster row (`CadetRecord`, `Role`, `EnrollmentStatus`)
//! - Error types (`MusterError`)
//!
//! ## Free-form Text
//!
//! Gender and battalion arrive as whatever the portal stored. They are kept
//! as `Option<String>` here and only interpreted by the classifier; nothing
//! in this module rejects an unrecognized value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier for a cadet, as assigned by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CadetId(pub u64);

impl std::fmt::Display for CadetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ROLE & STATUS
// =============================================================================

/// Portal role of a roster row. Only members are ever assigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Staff,
    Admin,
}

/// Approval state of a roster row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

// =============================================================================
// CADET (planning view)
// =============================================================================

/// The identity and classification inputs of one cadet.
///
/// This is what the engine reads. It is never mutated by planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadet {
    pub id: CadetId,
    pub first_name: String,
    pub last_name: String,
    /// Free-form gender text; may be absent or malformed.
    pub gender: Option<String>,
    /// Battalion label already on file, if any.
    pub battalion: Option<String>,
}

impl Cadet {
    /// Create a cadet with no gender and no battalion on file.
    #[must_use]
    pub fn new(id: CadetId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender: None,
            battalion: None,
        }
    }

    /// Set the gender text.
    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Set the existing battalion text.
    #[must_use]
    pub fn with_battalion(mut self, battalion: impl Into<String>) -> Self {
        self.battalion = Some(battalion.into());
        self
    }
}

// =============================================================================
// CADET RECORD (persisted row)
// =============================================================================

/// A full roster row as held by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadetRecord {
    pub id: CadetId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub battalion: Option<String>,
    #[serde(default)]
    pub platoon: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub status: EnrollmentStatus,
}

impl CadetRecord {
    /// Create an approved member row with nothing assigned yet.
    #[must_use]
    pub fn approved(
        id: CadetId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender: None,
            battalion: None,
            platoon: None,
            company: None,
            role: Role::Member,
            status: EnrollmentStatus::Approved,
        }
    }

    /// Set the gender text.
    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Set the battalion text.
    #[must_use]
    pub fn with_battalion(mut self, battalion: impl Into<String>) -> Self {
        self.battalion = Some(battalion.into());
        self
    }

    /// Set role and status.
    #[must_use]
    pub fn with_standing(mut self, role: Role, status: EnrollmentStatus) -> Self {
        self.role = role;
        self.status = status;
        self
    }

    /// Whether this row belongs to the assignable population.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.role == Role::Member && self.status == EnrollmentStatus::Approved
    }

    /// The planning view of this row.
    #[must_use]
    pub fn to_cadet(&self) -> Cadet {
        Cadet {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            gender: self.gender.clone(),
            battalion: self.battalion.clone(),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Muster system.
///
/// - No silent failures
/// - Use `Result<T, MusterError>` for fallible operations
/// - The engine never panics; all errors are recoverable
#[derive(Debug, Error)]
pub enum MusterError {
    /// A roster row failed enrollment validation.
    #[error("Invalid cadet record: {0}")]
    InvalidCadet(String),

    /// The same cadet appears twice in one roster.
    #[error("Duplicate cadet in roster: {0}")]
    DuplicateCadet(CadetId),

    /// The requested cadet was not found in the store.
    #[error("Cadet not found: {0}")]
    CadetNotFound(CadetId),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O or storage error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================
