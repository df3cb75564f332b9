//! DID-State: canonical records for distributed-identity wallets
//!
//! This crate owns the durable form of one identity wallet's recoverable
//! state: the record type, a deterministic binary codec, and the checks
//! that a decoded record must pass before anything trusts it.
//!
//! # Architecture
//!
//! - **State**: [`IdentityWalletState`], a passive value owned by the wallet manager
//! - **Codec**: [`encode`] / [`decode`], presence-tagged and length-prefixed
//! - **Validator**: [`validate`], cross-field invariants in a fixed order
//!
//! Nothing here touches disk or holds state between calls; every function
//! is safe to call from any thread.
//!
//! # Example
//!
//! ```rust
//! use did_state::{decode, encode, validate, Bytes, IdentityWalletState};
//!
//! let state = IdentityWalletState::new(vec![Bytes::from(vec![0x01; 32])], 1);
//!
//! let bytes = encode(&state);
//! let decoded = decode(&bytes)?;
//! validate(&decoded)?;
//! assert_eq!(decoded, state);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Public modules
pub mod codec;
pub mod error;
pub mod state;
pub mod store;
pub mod types;
pub mod validate;

// Re-exports for convenience
pub use codec::{decode, encode, TAG_ABSENT, TAG_PRESENT};
pub use error::{DecodeError, ParseBytesError, StateError, ValidationError};
pub use state::{IdentityWalletState, ParentHistoryEntry, PendingRecovery};
pub use store::{content_hash, load};
pub use types::{Bytes, Bytes32, Coin, LineageProof, Program};
pub use validate::validate;

// Common result type
pub type Result<T> = std::result::Result<T, StateError>;
