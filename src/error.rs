//! Error types for DID wallet state records
//!
//! Decoding and validation are separate passes, so they have separate
//! error types. [`StateError`] wraps both for callers that load a record
//! in one step.

use std::error::Error as StdError;
use std::fmt;

use crate::types::Bytes32;

/// Malformed byte input
///
/// Every variant names the field the decoder was working on when it
/// stopped, so a corrupted record can be located without a hex dump.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended before the field was complete
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// Presence tag was neither 0x00 (absent) nor 0x01 (present)
    InvalidTag { field: &'static str, tag: u8 },

    /// Bytes left over after the last field
    TrailingData { remaining: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated {
                field,
                needed,
                remaining,
            } => {
                write!(
                    f,
                    "Truncated record: field '{}' needs {} bytes, {} remaining",
                    field, needed, remaining
                )
            }
            Self::InvalidTag { field, tag } => {
                write!(
                    f,
                    "Invalid presence tag 0x{:02x} for field '{}'",
                    tag, field
                )
            }
            Self::TrailingData { remaining } => {
                write!(f, "Trailing data: {} bytes after last field", remaining)
            }
        }
    }
}

impl StdError for DecodeError {}

/// Well-formed record that breaks a cross-field invariant
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// More approvals required than there are backup authorities
    ThresholdExceedsBackupCount { threshold: u64, backup_count: usize },

    /// The same coin id appears twice in the parent history
    DuplicateParentHistoryKey(Bytes32),

    /// Only some of the pending-recovery fields are set
    ///
    /// Flags record which of coin / puzzle hash / pubkey were present.
    PartialPendingRecovery {
        coin: bool,
        puzzle_hash: bool,
        pubkey: bool,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdExceedsBackupCount {
                threshold,
                backup_count,
            } => {
                write!(
                    f,
                    "Recovery threshold {} exceeds backup id count {}",
                    threshold, backup_count
                )
            }
            Self::DuplicateParentHistoryKey(coin_id) => {
                write!(f, "Duplicate parent history key: {}", coin_id)
            }
            Self::PartialPendingRecovery {
                coin,
                puzzle_hash,
                pubkey,
            } => {
                write!(
                    f,
                    "Partial pending recovery: coin={}, puzzle_hash={}, pubkey={}",
                    presence(*coin),
                    presence(*puzzle_hash),
                    presence(*pubkey)
                )
            }
        }
    }
}

impl StdError for ValidationError {}

fn presence(present: bool) -> &'static str {
    if present {
        "present"
    } else {
        "absent"
    }
}

/// Failure to load a record: either it did not decode, or it decoded
/// into something invalid
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateError {
    Decode(DecodeError),
    Validation(ValidationError),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "Decode error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl StdError for StateError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Validation(e) => Some(e),
        }
    }
}

impl From<DecodeError> for StateError {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}

impl From<ValidationError> for StateError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

/// Hex input that is not a valid 32-byte value
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseBytesError {
    InvalidHex(String),
    InvalidLength { expected: usize, actual: usize },
}

impl fmt::Display for ParseBytesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHex(msg) => write!(f, "Invalid hex: {}", msg),
            Self::InvalidLength { expected, actual } => {
                write!(f, "Invalid length: expected {} bytes, got {}", expected, actual)
            }
        }
    }
}

impl StdError for ParseBytesError {}
