//! # Fixed Reference Data
//!
//! Hardcoded constants for the Muster engine.
//!
//! These tables are compiled into the binary and are immutable at runtime.
//! Stored assignments are plain text, so changing any label here changes
//! what existing records compare equal to.
//!
//! ## Cycling
//!
//! 1. **Block**: `BLOCK_SIZE` consecutive cohort positions share one platoon.
//! 2. **Rotation**: `ROTATION_SIZE` blocks, after which the company advances.

/// Number of consecutive cohort positions that share one platoon label.
pub const BLOCK_SIZE: usize = 37;

/// Number of blocks in one full platoon rotation.
pub const ROTATION_SIZE: usize = 3;

/// Cohort positions covered by one company (`BLOCK_SIZE * ROTATION_SIZE`).
pub const COMPANY_SPAN: usize = BLOCK_SIZE * ROTATION_SIZE;

/// Platoon labels in rotation order.
pub const PLATOON_LABELS: [&str; 3] = ["1st Platoon", "2nd Platoon", "3rd Platoon"];

/// Company labels in assignment order. Wraps from Zulu back to Alpha.
pub const COMPANY_LABELS: [&str; 26] = [
    "Alpha", "Beta", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India", "Juliet",
    "Kilo", "Lima", "Mike", "November", "Oscar", "Papa", "Quebec", "Romeo", "Sierra", "Tango",
    "Uniform", "Victor", "Whiskey", "X-ray", "Yankee", "Zulu",
];

/// Battalion label forced onto the Battalion-A cohort.
pub const BATTALION_A_LABEL: &str = "1st Battalion";

/// Battalion label forced onto the Battalion-B cohort.
pub const BATTALION_B_LABEL: &str = "2nd Battalion";

/// Normalized gender values that place a cadet in Battalion-A.
pub const MALE_MARKERS: [&str; 2] = ["male", "m"];

/// Normalized gender values that place a cadet in Battalion-B.
pub const FEMALE_MARKERS: [&str; 2] = ["female", "f"];

/// On-disk record format version for the redb store.
///
/// Increment this when making breaking changes to `CadetRecord` encoding.
pub const STORE_FORMAT_VERSION: u64 = 1;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length in bytes for first and last names.
pub const MAX_NAME_LENGTH: usize = 128;

/// Maximum length in bytes for gender and battalion text.
pub const MAX_LABEL_LENGTH: usize = 64;

/// Maximum number of records accepted by a single enrollment import.
pub const MAX_IMPORT_RECORDS: usize = 100_000;
