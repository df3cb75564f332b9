//! One-step helpers over the codec and the validator

use crate::codec::{decode, encode};
use crate::state::IdentityWalletState;
use crate::types::Bytes32;
use crate::validate::validate;

/// Decode and validate a stored record
///
/// Returns either a record that satisfies every invariant or the first
/// error encountered; never a partially checked value.
///
/// # Example
///
/// ```rust
/// use did_state::{encode, load, IdentityWalletState};
///
/// let state = IdentityWalletState::default();
/// let loaded = load(&encode(&state)).unwrap();
/// assert_eq!(loaded, state);
/// ```
pub fn load(bytes: &[u8]) -> crate::Result<IdentityWalletState> {
    let state = decode(bytes)?;
    validate(&state)?;
    Ok(state)
}

/// SHA-256 of the canonical encoding
///
/// Equal states hash equally, so callers can key storage by content or
/// skip writes when nothing changed.
pub fn content_hash(state: &IdentityWalletState) -> Bytes32 {
    Bytes32::sha256(&encode(state))
}
