//! The DID wallet state record
//!
//! A passive value: the wallet manager that owns it decides how it
//! changes. This module only provides read-only views over it.

use serde::{Deserialize, Serialize};

use crate::types::{Bytes, Bytes32, Coin, LineageProof, Program};

/// One entry of the spend lineage: coin id and, when known, its parent
pub type ParentHistoryEntry = (Bytes32, Option<LineageProof>);

/// Recoverable state of one distributed-identity wallet
///
/// Field order is the order of the canonical encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityWalletState {
    /// Coin whose id is the identity; `None` until established on-chain
    pub origin_coin: Option<Coin>,

    /// Recovery authorities, in recovery precedence order
    pub backup_ids: Vec<Bytes>,

    /// Number of backup approvals required to recover
    pub recovery_threshold: u64,

    /// Spends that produced the current identity coin, oldest first
    pub parent_history: Vec<ParentHistoryEntry>,

    /// Current inner spend policy
    pub current_inner_program: Option<Program>,

    /// Coin created by an in-progress recovery
    pub pending_recovery_coin: Option<Coin>,

    /// Puzzle hash being recovered to
    pub pending_recovery_puzzle_hash: Option<Bytes32>,

    /// Public key for the in-progress recovery
    pub pending_recovery_pubkey: Option<Bytes>,
}

/// Borrowed view of a complete pending-recovery triple
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRecovery<'a> {
    pub coin: &'a Coin,
    pub puzzle_hash: &'a Bytes32,
    pub pubkey: &'a Bytes,
}

impl IdentityWalletState {
    /// Fresh state for a newly provisioned wallet
    pub fn new(backup_ids: Vec<Bytes>, recovery_threshold: u64) -> Self {
        Self {
            backup_ids,
            recovery_threshold,
            ..Self::default()
        }
    }

    /// The identity, once the origin coin is known
    pub fn did_id(&self) -> Option<Bytes32> {
        self.origin_coin.as_ref().map(Coin::name)
    }

    /// Lineage recorded for `coin_id`
    ///
    /// Outer `None`: the coin is not in the history. Inner `None`: it is,
    /// but without a lineage proof.
    pub fn lineage_of(&self, coin_id: &Bytes32) -> Option<Option<&LineageProof>> {
        self.parent_history
            .iter()
            .find(|(id, _)| id == coin_id)
            .map(|(_, lineage)| lineage.as_ref())
    }

    pub fn contains_parent(&self, coin_id: &Bytes32) -> bool {
        self.lineage_of(coin_id).is_some()
    }

    /// True if any of the pending-recovery fields is set
    pub fn has_pending_recovery(&self) -> bool {
        self.pending_recovery_coin.is_some()
            || self.pending_recovery_puzzle_hash.is_some()
            || self.pending_recovery_pubkey.is_some()
    }

    /// The pending-recovery triple, only when all three parts are present
    pub fn pending_recovery(&self) -> Option<PendingRecovery<'_>> {
        match (
            &self.pending_recovery_coin,
            &self.pending_recovery_puzzle_hash,
            &self.pending_recovery_pubkey,
        ) {
            (Some(coin), Some(puzzle_hash), Some(pubkey)) => Some(PendingRecovery {
                coin,
                puzzle_hash,
                pubkey,
            }),
            _ => None,
        }
    }
}
