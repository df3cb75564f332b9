//! Cross-field invariants of a decoded state record
//!
//! Checks run in a fixed order and stop at the first violation:
//!
//! 1. recovery threshold fits the backup list
//! 2. parent history keys are unique
//! 3. the pending-recovery triple is all-or-nothing

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::state::IdentityWalletState;

/// Check every invariant, returning the first one violated
pub fn validate(state: &IdentityWalletState) -> Result<(), ValidationError> {
    check_threshold(state)?;
    check_parent_history(state)?;
    check_pending_recovery(state)?;
    Ok(())
}

/// The threshold only binds once at least one backup id exists
fn check_threshold(state: &IdentityWalletState) -> Result<(), ValidationError> {
    let backup_count = state.backup_ids.len();
    if backup_count > 0 && state.recovery_threshold > backup_count as u64 {
        log::debug!(
            "Threshold {} exceeds {} backup ids",
            state.recovery_threshold,
            backup_count
        );
        return Err(ValidationError::ThresholdExceedsBackupCount {
            threshold: state.recovery_threshold,
            backup_count,
        });
    }
    Ok(())
}

fn check_parent_history(state: &IdentityWalletState) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(state.parent_history.len());
    for (coin_id, _) in &state.parent_history {
        if !seen.insert(coin_id) {
            log::debug!("Duplicate parent history key {}", coin_id);
            return Err(ValidationError::DuplicateParentHistoryKey(*coin_id));
        }
    }
    Ok(())
}

fn check_pending_recovery(state: &IdentityWalletState) -> Result<(), ValidationError> {
    let coin = state.pending_recovery_coin.is_some();
    let puzzle_hash = state.pending_recovery_puzzle_hash.is_some();
    let pubkey = state.pending_recovery_pubkey.is_some();

    if coin == puzzle_hash && puzzle_hash == pubkey {
        return Ok(());
    }

    log::debug!(
        "Partial pending recovery: coin={}, puzzle_hash={}, pubkey={}",
        coin,
        puzzle_hash,
        pubkey
    );
    Err(ValidationError::PartialPendingRecovery {
        coin,
        puzzle_hash,
        pubkey,
    })
}
