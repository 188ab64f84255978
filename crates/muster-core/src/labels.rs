//! # Organizational Labels
//!
//! Typed wrappers over the fixed label tables in [`crate::primitives`].
//! Each type displays as the exact text stored on a cadet record.

use crate::primitives::{BATTALION_A_LABEL, BATTALION_B_LABEL, COMPANY_LABELS, PLATOON_LABELS};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// PLATOON
// =============================================================================

/// One of the three platoons, in rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platoon {
    First,
    Second,
    Third,
}

impl Platoon {
    /// Rotation order.
    pub const ALL: [Platoon; 3] = [Platoon::First, Platoon::Second, Platoon::Third];

    /// Platoon at the given rotation step. Wraps every three steps.
    #[must_use]
    pub const fn from_cycle(step: usize) -> Self {
        Self::ALL[step % Self::ALL.len()]
    }

    /// Zero-based rotation index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Platoon::First => 0,
            Platoon::Second => 1,
            Platoon::Third => 2,
        }
    }

    /// Stored label text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        PLATOON_LABELS[self.index()]
    }
}

impl fmt::Display for Platoon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// COMPANY
// =============================================================================

/// One of the 26 phonetic-alphabet companies.
///
/// The wrapped index is always `< 26`; construct through [`Company::from_cycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Company(u8);

impl TryFrom<u8> for Company {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if (index as usize) < COMPANY_LABELS.len() {
            Ok(Self(index))
        } else {
            Err(format!("company index {} out of range", index))
        }
    }
}

impl Company {
    /// The first company.
    pub const ALPHA: Company = Company(0);

    /// Company at the given rotation count. Wraps after Zulu.
    #[must_use]
    pub const fn from_cycle(rotation: usize) -> Self {
        Self((rotation % COMPANY_LABELS.len()) as u8)
    }

    /// Zero-based position in the company table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Stored label text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        COMPANY_LABELS[self.0 as usize]
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// BATTALION
// =============================================================================

/// One of the two battalions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Battalion {
    First,
    Second,
}

impl Battalion {
    /// Match a stored battalion text exactly against the fixed labels.
    ///
    /// No case folding or trimming: a record only counts as already placed
    /// when it carries the label this engine writes.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            BATTALION_A_LABEL => Some(Battalion::First),
            BATTALION_B_LABEL => Some(Battalion::Second),
            _ => None,
        }
    }

    /// Stored label text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Battalion::First => BATTALION_A_LABEL,
            Battalion::Second => BATTALION_B_LABEL,
        }
    }
}

impl fmt::Display for Battalion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// TESTS
// =============================================================================
