//! Wallet lifecycle operations
//!
//! Handles wallet creation, loading, listing, verification and deletion.

use chrono::Utc;
use did_state::{content_hash, encode, validate, Bytes, IdentityWalletState};

use super::types::{VerifyReport, WalletInfo, WalletSummary};
use crate::config::Network;
use crate::error::WalletError;
use crate::storage::{is_valid_wallet_name, Metadata, Storage};

/// Create a new DID wallet with an empty lineage
///
/// The fresh state is validated before anything is written, so an
/// impossible recovery threshold never reaches disk. A failed write
/// leaves no wallet behind.
pub fn create_wallet(
    storage: &Storage,
    network: Network,
    name: &str,
    backup_ids: Vec<Bytes>,
    recovery_threshold: u64,
) -> Result<WalletInfo, WalletError> {
    check_name(name)?;
    if storage.wallet_exists(name) {
        return Err(WalletError::WalletExists(name.to_string()));
    }

    let state = IdentityWalletState::new(backup_ids, recovery_threshold);
    validate(&state)?;

    let metadata = Metadata {
        name: name.to_string(),
        created_at: Utc::now(),
        network: network.as_str().to_string(),
    };
    storage.create_wallet(name, &metadata, &state)?;

    log::info!(
        "Created DID wallet '{}' ({} backup ids, threshold {})",
        name,
        state.backup_ids.len(),
        state.recovery_threshold
    );

    Ok(wallet_info_from(metadata, state))
}

/// Load a wallet's state, rejecting records that break an invariant
pub fn load_state(storage: &Storage, name: &str) -> Result<IdentityWalletState, WalletError> {
    check_name(name)?;
    if !storage.wallet_exists(name) {
        return Err(WalletError::WalletNotFound(name.to_string()));
    }
    let state = storage.load_state(name)?;
    validate(&state)?;
    Ok(state)
}

/// Metadata and full state of one wallet
pub fn wallet_info(storage: &Storage, name: &str) -> Result<WalletInfo, WalletError> {
    let state = load_state(storage, name)?;
    let metadata = storage.load_metadata(name)?;
    Ok(wallet_info_from(metadata, state))
}

/// List all wallets
///
/// Directories without readable metadata and state are skipped.
pub fn list_wallets(storage: &Storage) -> Result<Vec<WalletSummary>, WalletError> {
    let wallet_names = storage.list_wallets()?;
    let mut wallets = Vec::new();

    for name in wallet_names {
        let metadata = match storage.load_metadata(&name) {
            Ok(metadata) => metadata,
            Err(e) => {
                log::debug!("Skipping '{}': {}", name, e);
                continue;
            }
        };
        let state = match load_state(storage, &name) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Skipping '{}': {}", name, e);
                continue;
            }
        };

        wallets.push(WalletSummary {
            name: metadata.name,
            created_at: metadata.created_at.to_rfc3339(),
            did_id: state.did_id(),
            parent_count: state.parent_history.len(),
            recovery_pending: state.has_pending_recovery(),
        });
    }

    Ok(wallets)
}

/// Decode and validate the stored record and report its content hash
pub fn verify(storage: &Storage, name: &str) -> Result<VerifyReport, WalletError> {
    let state = load_state(storage, name)?;
    Ok(VerifyReport {
        name: name.to_string(),
        content_hash: content_hash(&state),
        size_bytes: encode(&state).len(),
        backup_count: state.backup_ids.len(),
        parent_count: state.parent_history.len(),
    })
}

/// Delete a wallet and all its data
pub fn delete_wallet(storage: &Storage, name: &str) -> Result<(), WalletError> {
    check_name(name)?;
    if !storage.wallet_exists(name) {
        return Err(WalletError::WalletNotFound(name.to_string()));
    }

    log::warn!("Deleting wallet: {}", name);
    storage.delete_wallet(name)?;

    Ok(())
}

/// Wallet names become directory names
fn check_name(name: &str) -> Result<(), WalletError> {
    if is_valid_wallet_name(name) {
        Ok(())
    } else {
        Err(WalletError::InvalidArgument(format!(
            "invalid wallet name '{}'",
            name
        )))
    }
}

fn wallet_info_from(metadata: Metadata, state: IdentityWalletState) -> WalletInfo {
    WalletInfo {
        name: metadata.name,
        created_at: metadata.created_at.to_rfc3339(),
        network: metadata.network,
        did_id: state.did_id(),
        content_hash: content_hash(&state),
        state,
    }
}
