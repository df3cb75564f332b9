//! Recovery operations
//!
//! Handles the backup list and the pending-recovery triple. The triple is
//! always set and cleared as a unit.

use did_state::{Bytes, Bytes32, Coin, IdentityWalletState, ValidationError};

use super::types::RecoveryInfo;
use crate::error::WalletError;

/// Replace the recovery authorities and the approval threshold
pub fn update_recovery_list(
    state: &mut IdentityWalletState,
    backup_ids: Vec<Bytes>,
    recovery_threshold: u64,
) -> Result<(), WalletError> {
    if !backup_ids.is_empty() && recovery_threshold > backup_ids.len() as u64 {
        return Err(ValidationError::ThresholdExceedsBackupCount {
            threshold: recovery_threshold,
            backup_count: backup_ids.len(),
        }
        .into());
    }

    log::info!(
        "Recovery list updated: {} backup ids, threshold {}",
        backup_ids.len(),
        recovery_threshold
    );
    state.backup_ids = backup_ids;
    state.recovery_threshold = recovery_threshold;
    Ok(())
}

/// Record the coin, puzzle hash and pubkey of a recovery in progress
pub fn begin_recovery(
    state: &mut IdentityWalletState,
    wallet_name: &str,
    coin: Coin,
    puzzle_hash: Bytes32,
    pubkey: Bytes,
) -> Result<(), WalletError> {
    if state.has_pending_recovery() {
        return Err(WalletError::RecoveryAlreadyPending(wallet_name.to_string()));
    }

    log::info!(
        "Recovery started for '{}': coin {}, recovering to {}",
        wallet_name,
        coin.name(),
        puzzle_hash
    );
    state.pending_recovery_coin = Some(coin);
    state.pending_recovery_puzzle_hash = Some(puzzle_hash);
    state.pending_recovery_pubkey = Some(pubkey);
    Ok(())
}

/// Clear the pending-recovery triple, returning what it held
pub fn finish_recovery(
    state: &mut IdentityWalletState,
    wallet_name: &str,
) -> Result<RecoveryInfo, WalletError> {
    if !state.has_pending_recovery() {
        return Err(WalletError::NoPendingRecovery(wallet_name.to_string()));
    }

    let coin = state.pending_recovery_coin.take();
    let puzzle_hash = state.pending_recovery_puzzle_hash.take();
    let pubkey = state.pending_recovery_pubkey.take();

    match (coin, puzzle_hash, pubkey) {
        (Some(coin), Some(puzzle_hash), Some(pubkey)) => {
            log::info!("Recovery finished for '{}'", wallet_name);
            Ok(RecoveryInfo {
                coin,
                puzzle_hash,
                pubkey,
            })
        }
        (coin, puzzle_hash, pubkey) => Err(ValidationError::PartialPendingRecovery {
            coin: coin.is_some(),
            puzzle_hash: puzzle_hash.is_some(),
            pubkey: pubkey.is_some(),
        }
        .into()),
    }
}
