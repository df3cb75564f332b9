//! On-disk envelope for DID state records
//!
//! # File layout
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//!   0       4   Magic bytes: b"DIDW"
//!   4       1   Version: 0x01
//!   5     var   Canonical state encoding
//! ```
//!
//! Magic and version are checked before the payload reaches the decoder.
//! Invariants are not checked here; the caller validates.

use did_state::{decode, encode, IdentityWalletState};

use crate::error::StorageError;

/// Magic bytes identifying a DID state file
pub const RECORD_MAGIC: [u8; 4] = *b"DIDW";

/// Current envelope version
pub const RECORD_VERSION: u8 = 1;

const HEADER_SIZE: usize = RECORD_MAGIC.len() + 1;

/// Wrap the canonical encoding of `state` in the file envelope
pub fn seal_record(state: &IdentityWalletState) -> Vec<u8> {
    let payload = encode(state);
    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(&RECORD_MAGIC);
    out.push(RECORD_VERSION);
    out.extend_from_slice(&payload);
    out
}

/// Check the envelope and decode its payload
pub fn open_record(bytes: &[u8]) -> Result<IdentityWalletState, StorageError> {
    if bytes.len() < HEADER_SIZE || bytes[..4] != RECORD_MAGIC {
        let shown = &bytes[..bytes.len().min(4)];
        return Err(StorageError::BadMagic(hex::encode(shown)));
    }

    let version = bytes[4];
    if version != RECORD_VERSION {
        return Err(StorageError::UnsupportedVersion(version));
    }

    Ok(decode(&bytes[HEADER_SIZE..])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use did_state::{Bytes, DecodeError};

    #[test]
    fn test_seal_then_open() {
        let state = IdentityWalletState::new(vec![Bytes::from(vec![7; 32])], 1);
        let sealed = seal_record(&state);

        assert_eq!(&sealed[..4], b"DIDW");
        assert_eq!(sealed[4], RECORD_VERSION);
        assert_eq!(&sealed[5..], encode(&state).as_slice());
        assert_eq!(open_record(&sealed).unwrap(), state);
    }

    #[test]
    fn test_bad_magic() {
        let mut sealed = seal_record(&IdentityWalletState::default());
        sealed[0] = b'X';
        assert!(matches!(open_record(&sealed), Err(StorageError::BadMagic(_))));
        assert!(matches!(open_record(b"DI"), Err(StorageError::BadMagic(_))));
    }

    #[test]
    fn test_unsupported_version() {
        let mut sealed = seal_record(&IdentityWalletState::default());
        sealed[4] = 9;
        assert!(matches!(
            open_record(&sealed),
            Err(StorageError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_corrupt_payload() {
        let mut sealed = seal_record(&IdentityWalletState::default());
        sealed.pop();
        assert!(matches!(
            open_record(&sealed),
            Err(StorageError::Decode(DecodeError::Truncated { .. }))
        ));
    }
}
