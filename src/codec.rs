//! Canonical binary encoding of [`IdentityWalletState`]
//!
//! # Layout
//!
//! All integers are big-endian. Fields appear in declaration order.
//!
//! ```text
//! Field                         Layout
//! ----------------------------  ----------------------------------------------
//! origin_coin                   tag, coin
//! backup_ids                    count:u32, { len:u32, bytes }*
//! recovery_threshold            u64
//! parent_history                count:u32, { coin_id:32, tag, lineage }*
//! current_inner_program         tag, len:u32, bytes
//! pending_recovery_coin         tag, coin
//! pending_recovery_puzzle_hash  tag, 32 bytes
//! pending_recovery_pubkey       tag, len:u32, bytes
//!
//! coin     = parent_coin_info:32, puzzle_hash:32, amount:u64
//! lineage  = parent_name:32, inner_puzzle_hash:32, amount:u64
//! tag      = 0x00 absent | 0x01 present (value follows only when present)
//! ```
//!
//! The encoding has no timestamps or padding, so equal states always
//! produce equal bytes.

use crate::error::DecodeError;
use crate::state::IdentityWalletState;
use crate::types::{Bytes, Bytes32, Coin, LineageProof, Program};

/// Presence tag for an absent optional field
pub const TAG_ABSENT: u8 = 0x00;

/// Presence tag for a present optional field
pub const TAG_PRESENT: u8 = 0x01;

/// Encoded size of a [`Coin`] or [`LineageProof`]
const COIN_SIZE: usize = 32 + 32 + 8;

/// Encode a state record
///
/// # Panics
///
/// If a sequence or byte string holds more than `u32::MAX` elements,
/// which the length prefix cannot express.
pub fn encode(state: &IdentityWalletState) -> Vec<u8> {
    let mut w = Writer::default();

    w.option(&state.origin_coin, Writer::coin);
    w.list(&state.backup_ids, |w, id| w.blob(id));
    w.u64(state.recovery_threshold);
    w.list(&state.parent_history, |w, (coin_id, lineage)| {
        w.bytes32(coin_id);
        w.option(lineage, Writer::lineage);
    });
    w.option(&state.current_inner_program, |w, program| {
        w.blob(program.as_bytes())
    });
    w.option(&state.pending_recovery_coin, Writer::coin);
    w.option(&state.pending_recovery_puzzle_hash, Writer::bytes32);
    w.option(&state.pending_recovery_pubkey, |w, pubkey| w.blob(pubkey));

    log::trace!("Encoded DID wallet state: {} bytes", w.buf.len());
    w.buf
}

/// Decode a state record
///
/// Structural invariants are not checked here; see [`crate::validate`].
pub fn decode(bytes: &[u8]) -> Result<IdentityWalletState, DecodeError> {
    let mut r = Reader::new(bytes);

    let origin_coin = r.option("origin_coin", |r| r.coin("origin_coin"))?;
    let backup_ids = r.list("backup_ids", |r| r.blob("backup_ids").map(Bytes::from))?;
    let recovery_threshold = r.u64("recovery_threshold")?;
    let parent_history = r.list("parent_history", |r| {
        let coin_id = r.bytes32("parent_history")?;
        let lineage = r.option("parent_history", |r| r.lineage("parent_history"))?;
        Ok((coin_id, lineage))
    })?;
    let current_inner_program = r.option("current_inner_program", |r| {
        r.blob("current_inner_program").map(Program::from_bytes)
    })?;
    let pending_recovery_coin =
        r.option("pending_recovery_coin", |r| r.coin("pending_recovery_coin"))?;
    let pending_recovery_puzzle_hash = r.option("pending_recovery_puzzle_hash", |r| {
        r.bytes32("pending_recovery_puzzle_hash")
    })?;
    let pending_recovery_pubkey = r.option("pending_recovery_pubkey", |r| {
        r.blob("pending_recovery_pubkey").map(Bytes::from)
    })?;

    r.finish()?;

    log::trace!(
        "Decoded DID wallet state: {} bytes, {} backup ids, {} parents",
        bytes.len(),
        backup_ids.len(),
        parent_history.len()
    );

    Ok(IdentityWalletState {
        origin_coin,
        backup_ids,
        recovery_threshold,
        parent_history,
        current_inner_program,
        pending_recovery_coin,
        pending_recovery_puzzle_hash,
        pending_recovery_pubkey,
    })
}

#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    fn u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn len_prefix(&mut self, len: usize) {
        let len = u32::try_from(len)
            .unwrap_or_else(|_| panic!("length {} does not fit a u32 prefix", len));
        self.u32(len);
    }

    fn bytes32(&mut self, value: &Bytes32) {
        self.buf.extend_from_slice(value.as_bytes());
    }

    fn blob(&mut self, bytes: &[u8]) {
        self.len_prefix(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    fn coin(&mut self, coin: &Coin) {
        self.bytes32(&coin.parent_coin_info);
        self.bytes32(&coin.puzzle_hash);
        self.u64(coin.amount);
    }

    fn lineage(&mut self, lineage: &LineageProof) {
        self.bytes32(&lineage.parent_name);
        self.bytes32(&lineage.inner_puzzle_hash);
        self.u64(lineage.amount);
    }

    fn option<T>(&mut self, value: &Option<T>, write: impl FnOnce(&mut Self, &T)) {
        match value {
            Some(inner) => {
                self.u8(TAG_PRESENT);
                write(self, inner);
            }
            None => self.u8(TAG_ABSENT),
        }
    }

    fn list<T>(&mut self, items: &[T], mut write: impl FnMut(&mut Self, &T)) {
        self.len_prefix(items.len());
        for item in items {
            write(self, item);
        }
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, field: &'static str, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::Truncated {
                field,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(field, N)?);
        Ok(out)
    }

    fn u8(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        Ok(self.array::<1>(field)?[0])
    }

    fn u32(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.array(field)?))
    }

    fn u64(&mut self, field: &'static str) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.array(field)?))
    }

    fn bytes32(&mut self, field: &'static str) -> Result<Bytes32, DecodeError> {
        Ok(Bytes32::new(self.array(field)?))
    }

    fn blob(&mut self, field: &'static str) -> Result<Vec<u8>, DecodeError> {
        let len = self.u32(field)? as usize;
        Ok(self.take(field, len)?.to_vec())
    }

    fn coin(&mut self, field: &'static str) -> Result<Coin, DecodeError> {
        if self.remaining() < COIN_SIZE {
            return Err(DecodeError::Truncated {
                field,
                needed: COIN_SIZE,
                remaining: self.remaining(),
            });
        }
        Ok(Coin {
            parent_coin_info: self.bytes32(field)?,
            puzzle_hash: self.bytes32(field)?,
            amount: self.u64(field)?,
        })
    }

    fn lineage(&mut self, field: &'static str) -> Result<LineageProof, DecodeError> {
        if self.remaining() < COIN_SIZE {
            return Err(DecodeError::Truncated {
                field,
                needed: COIN_SIZE,
                remaining: self.remaining(),
            });
        }
        Ok(LineageProof {
            parent_name: self.bytes32(field)?,
            inner_puzzle_hash: self.bytes32(field)?,
            amount: self.u64(field)?,
        })
    }

    fn option<T>(
        &mut self,
        field: &'static str,
        read: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Option<T>, DecodeError> {
        match self.u8(field)? {
            TAG_ABSENT => Ok(None),
            TAG_PRESENT => read(self).map(Some),
            tag => Err(DecodeError::InvalidTag { field, tag }),
        }
    }

    fn list<T>(
        &mut self,
        field: &'static str,
        mut read: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        let count = self.u32(field)? as usize;
        // Every element takes at least one byte, so a count larger than
        // the input is bounded by the bytes actually present.
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(read(self)?);
        }
        Ok(items)
    }

    fn finish(self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(DecodeError::TrailingData { remaining }),
        }
    }
}
