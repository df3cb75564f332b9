//! Value types carried by a DID wallet state record
//!
//! - [`Bytes32`]: hashes, coin ids, puzzle hashes
//! - [`Bytes`]: variable-length opaque byte strings (backup ids, pubkeys)
//! - [`Coin`]: an unspent-output record, identified by [`Coin::name`]
//! - [`LineageProof`]: metadata about the parent of a coin
//! - [`Program`]: serialized spend policy, treated as opaque bytes
//!
//! Byte values render as lowercase hex, both through `Display` and serde.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::ParseBytesError;

/// Fixed 32-byte value
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bytes32([u8; 32]);

impl Bytes32 {
    pub const LEN: usize = 32;

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// SHA-256 of `data`
    pub fn sha256(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Bytes32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes32({})", self)
    }
}

impl FromStr for Bytes32 {
    type Err = ParseBytesError;

    /// Parse 64 hex characters, with or without a `0x` prefix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(strip_hex_prefix(s))
            .map_err(|e| ParseBytesError::InvalidHex(e.to_string()))?;
        let bytes: [u8; 32] = raw
            .as_slice()
            .try_into()
            .map_err(|_| ParseBytesError::InvalidLength {
                expected: Self::LEN,
                actual: raw.len(),
            })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Bytes32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Variable-length opaque byte string
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(Vec<u8>);

impl Bytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// Parse hex, with or without a `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self, ParseBytesError> {
        hex::decode(strip_hex_prefix(s))
            .map(Self)
            .map_err(|e| ParseBytesError::InvalidHex(e.to_string()))
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes({})", self)
    }
}

impl Serialize for Bytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// Unspent-output record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub parent_coin_info: Bytes32,
    pub puzzle_hash: Bytes32,
    pub amount: u64,
}

impl Coin {
    pub fn new(parent_coin_info: Bytes32, puzzle_hash: Bytes32, amount: u64) -> Self {
        Self {
            parent_coin_info,
            puzzle_hash,
            amount,
        }
    }

    /// Coin identifier
    ///
    /// SHA-256 over the parent id, the puzzle hash and the amount in its
    /// minimal signed big-endian form. For the origin coin of a DID wallet
    /// this is the identity itself.
    pub fn name(&self) -> Bytes32 {
        let mut preimage = Vec::with_capacity(32 + 32 + 9);
        preimage.extend_from_slice(self.parent_coin_info.as_bytes());
        preimage.extend_from_slice(self.puzzle_hash.as_bytes());
        preimage.extend_from_slice(&amount_to_bytes(self.amount));
        Bytes32::sha256(&preimage)
    }
}

/// Minimal signed big-endian encoding of an unsigned amount
///
/// Zero encodes as no bytes. A leading 0x00 is kept when the next byte
/// has its top bit set, so the value never reads back as negative.
fn amount_to_bytes(amount: u64) -> Vec<u8> {
    let be = amount.to_be_bytes();
    let first = be.iter().position(|b| *b != 0).unwrap_or(be.len());
    let mut out = Vec::with_capacity(9);
    if first < be.len() && be[first] & 0x80 != 0 {
        out.push(0);
    }
    out.extend_from_slice(&be[first..]);
    out
}

/// Parent-lineage record for one coin in the spend history
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineageProof {
    pub parent_name: Bytes32,
    pub inner_puzzle_hash: Bytes32,
    pub amount: u64,
}

/// Serialized spend policy
///
/// Never interpreted here; only carried and hashed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program(Bytes);

impl Program {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Bytes::new(bytes.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn hash(&self) -> Bytes32 {
        Bytes32::sha256(self.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_minimal_encoding() {
        assert!(amount_to_bytes(0).is_empty());
        assert_eq!(amount_to_bytes(0x7f), vec![0x7f]);
        assert_eq!(amount_to_bytes(0x80), vec![0x00, 0x80]);
        assert_eq!(amount_to_bytes(0x0100), vec![0x01, 0x00]);
        assert_eq!(
            amount_to_bytes(u64::MAX),
            vec![0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn test_coin_name_hashes_minimal_amount() {
        let coin = Coin::new(Bytes32::new([1; 32]), Bytes32::new([2; 32]), 0x80);

        let mut preimage = vec![1u8; 32];
        preimage.extend_from_slice(&[2u8; 32]);
        preimage.extend_from_slice(&[0x00, 0x80]);

        assert_eq!(coin.name(), Bytes32::sha256(&preimage));
    }

    #[test]
    fn test_zero_amount_coin_name_omits_amount() {
        let coin = Coin::new(Bytes32::new([3; 32]), Bytes32::new([4; 32]), 0);

        let mut preimage = vec![3u8; 32];
        preimage.extend_from_slice(&[4u8; 32]);

        assert_eq!(coin.name(), Bytes32::sha256(&preimage));
    }

    #[test]
    fn test_bytes32_hex_parsing() {
        let value = Bytes32::new([0xab; 32]);
        let text = value.to_string();
        assert_eq!(text.len(), 64);
        assert_eq!(text.parse::<Bytes32>().unwrap(), value);
        assert_eq!(format!("0x{}", text).parse::<Bytes32>().unwrap(), value);

        assert!(matches!(
            "abcd".parse::<Bytes32>(),
            Err(ParseBytesError::InvalidLength {
                expected: 32,
                actual: 2
            })
        ));
        assert!(matches!(
            "zz".parse::<Bytes32>(),
            Err(ParseBytesError::InvalidHex(_))
        ));
    }
}
