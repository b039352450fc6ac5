//! Persisted wellness domain model.
//!
//! # Responsibility
//! - Define the canonical record types written to on-device storage.
//! - Enforce construction-time validation of bounded scale fields.
//!
//! # Invariants
//! - Every record is identified by a stable `EntryId` assigned at creation
//!   and never reassigned.
//! - Scale fields (intensity, energy, stress, sleep, mood) stay within
//!   0..=`MAX_SCALE` on every construction and update path.
//! - Out-of-range values are rejected, except where a field explicitly
//!   clamps (breathing completion, achievement progress).

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod achievement;
pub mod breathing;
pub mod emergency;
pub mod gratitude;
pub mod intention;
pub mod mood;
pub mod preferences;
pub mod thought;

/// Stable identifier for every persisted wellness record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntryId = Uuid;

/// Upper bound (inclusive) for all 0-to-10 scale fields.
pub const MAX_SCALE: u8 = 10;

/// Validation failure raised at record construction or staging time.
///
/// Invalid records are rejected before they reach the persistence context,
/// so storage never holds an out-of-range scale or an empty required field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Record identifier is the nil UUID.
    NilId,
    /// A 0..=10 scale field holds a value above the bound.
    ScaleOutOfRange { field: &'static str, value: u8 },
    /// A required free-text field is empty or whitespace-only.
    EmptyField { field: &'static str },
    /// A reminder time does not match the `HH:MM` 24-hour syntax.
    InvalidReminderTime { value: String },
    /// Achievement requirement must be at least one progress step.
    ZeroRequiredProgress,
    /// Achievement progress exceeds its requirement.
    ProgressExceedsRequired { progress: u32, required: u32 },
    /// Achievement unlock flag disagrees with its progress counters.
    UnlockFlagMismatch { progress: u32, required: u32 },
    /// Achievement is unlocked but carries no earned date.
    UnlockedWithoutDate,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "record id must not be the nil uuid"),
            Self::ScaleOutOfRange { field, value } => {
                write!(f, "{field} must be within 0..={MAX_SCALE}, got {value}")
            }
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::InvalidReminderTime { value } => {
                write!(f, "reminder time `{value}` must match 24-hour HH:MM")
            }
            Self::ZeroRequiredProgress => {
                write!(f, "required_progress must be at least 1")
            }
            Self::ProgressExceedsRequired { progress, required } => write!(
                f,
                "progress {progress} exceeds required_progress {required}"
            ),
            Self::UnlockFlagMismatch { progress, required } => write!(
                f,
                "is_unlocked disagrees with progress {progress}/{required}"
            ),
            Self::UnlockedWithoutDate => {
                write!(f, "unlocked achievement must carry date_earned")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn check_scale(field: &'static str, value: u8) -> Result<(), ValidationError> {
    if value > MAX_SCALE {
        return Err(ValidationError::ScaleOutOfRange { field, value });
    }
    Ok(())
}

pub(crate) fn check_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

pub(crate) fn check_id(id: EntryId) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::NilId);
    }
    Ok(())
}
