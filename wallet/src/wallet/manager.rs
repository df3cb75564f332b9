use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use did_state::{
    content_hash, validate, Bytes, Bytes32, Coin, IdentityWalletState, LineageProof, Program,
};

use super::types::{RecoveryInfo, VerifyReport, WalletInfo, WalletSummary};
use super::{lineage_ops, recovery_ops, wallet_ops};
use crate::config::{Network, WalletConfig};
use crate::error::WalletError;
use crate::storage::Storage;

/// Owner of every DID wallet under one storage root
///
/// Each mutation is a load -> mutate -> validate -> persist cycle run under
/// a per-wallet lock, so concurrent writers to the same wallet never lose
/// each other's updates. Different wallets do not contend.
pub struct DidWalletManager {
    pub storage: Storage,
    network: Network,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DidWalletManager {
    pub fn new(config: &WalletConfig) -> Self {
        Self::new_with_storage(
            Storage::new_with_base_dir(config.root_path.clone()),
            config.network,
        )
    }

    pub fn new_with_storage(storage: Storage, network: Network) -> Self {
        Self {
            storage,
            network,
            locks: Mutex::new(HashMap::new()),
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn create_wallet(
        &self,
        name: &str,
        backup_ids: Vec<Bytes>,
        recovery_threshold: u64,
    ) -> Result<WalletInfo, WalletError> {
        let lock = self.wallet_lock(name)?;
        let _guard = lock.lock().map_err(|_| poisoned(name))?;
        wallet_ops::create_wallet(
            &self.storage,
            self.network,
            name,
            backup_ids,
            recovery_threshold,
        )
    }

    pub fn list_wallets(&self) -> Result<Vec<WalletSummary>, WalletError> {
        wallet_ops::list_wallets(&self.storage)
    }

    pub fn wallet_info(&self, name: &str) -> Result<WalletInfo, WalletError> {
        wallet_ops::wallet_info(&self.storage, name)
    }

    pub fn load_state(&self, name: &str) -> Result<IdentityWalletState, WalletError> {
        wallet_ops::load_state(&self.storage, name)
    }

    pub fn verify(&self, name: &str) -> Result<VerifyReport, WalletError> {
        wallet_ops::verify(&self.storage, name)
    }

    /// Delete a wallet
    ///
    /// Its lock entry stays in the map, so a writer still waiting on it
    /// is serialized with anyone who recreates the wallet.
    pub fn delete_wallet(&self, name: &str) -> Result<(), WalletError> {
        let lock = self.wallet_lock(name)?;
        let _guard = lock.lock().map_err(|_| poisoned(name))?;
        wallet_ops::delete_wallet(&self.storage, name)
    }

    // ------------------------------------------------------------------
    // Lineage
    // ------------------------------------------------------------------

    /// Anchor the identity to its origin coin and return the DID
    pub fn establish_origin(&self, name: &str, coin: Coin) -> Result<Bytes32, WalletError> {
        self.update(name, |state| {
            lineage_ops::establish_origin(state, coin)?;
            Ok(coin.name())
        })
    }

    pub fn add_parent(
        &self,
        name: &str,
        coin_id: Bytes32,
        lineage: Option<LineageProof>,
    ) -> Result<(), WalletError> {
        self.update(name, |state| lineage_ops::add_parent(state, coin_id, lineage))
    }

    pub fn set_inner_program(&self, name: &str, program: Program) -> Result<(), WalletError> {
        self.update(name, |state| {
            lineage_ops::set_inner_program(state, program);
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Recovery
    // ------------------------------------------------------------------

    pub fn update_recovery_list(
        &self,
        name: &str,
        backup_ids: Vec<Bytes>,
        recovery_threshold: u64,
    ) -> Result<(), WalletError> {
        self.update(name, |state| {
            recovery_ops::update_recovery_list(state, backup_ids, recovery_threshold)
        })
    }

    pub fn begin_recovery(
        &self,
        name: &str,
        coin: Coin,
        puzzle_hash: Bytes32,
        pubkey: Bytes,
    ) -> Result<(), WalletError> {
        self.update(name, |state| {
            recovery_ops::begin_recovery(state, name, coin, puzzle_hash, pubkey)
        })
    }

    pub fn finish_recovery(&self, name: &str) -> Result<RecoveryInfo, WalletError> {
        self.update(name, |state| recovery_ops::finish_recovery(state, name))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Run one read-modify-write cycle on a wallet's state
    ///
    /// Nothing is written if `mutate` fails, if the result breaks an
    /// invariant, or if the encoded state did not change.
    fn update<T>(
        &self,
        name: &str,
        mutate: impl FnOnce(&mut IdentityWalletState) -> Result<T, WalletError>,
    ) -> Result<T, WalletError> {
        let lock = self.wallet_lock(name)?;
        let _guard = lock.lock().map_err(|_| poisoned(name))?;

        let mut state = wallet_ops::load_state(&self.storage, name)?;
        let before = content_hash(&state);

        let result = mutate(&mut state)?;
        validate(&state)?;

        let after = content_hash(&state);
        if after != before {
            self.storage.save_state(name, &state)?;
            log::debug!("Wallet '{}' state {} -> {}", name, before, after);
        } else {
            log::trace!("Wallet '{}' unchanged", name);
        }

        Ok(result)
    }

    fn wallet_lock(&self, name: &str) -> Result<Arc<Mutex<()>>, WalletError> {
        let mut locks = self.locks.lock().map_err(|_| poisoned(name))?;
        Ok(locks.entry(name.to_string()).or_default().clone())
    }
}

fn poisoned(name: &str) -> WalletError {
    WalletError::Internal(format!("lock poisoned for wallet '{}'", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lock_survives_delete_and_recreate() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new_with_base_dir(temp_dir.path().to_path_buf());
        let manager = DidWalletManager::new_with_storage(storage, Network::Testnet);

        manager.create_wallet("w", Vec::new(), 0).unwrap();
        let held = manager.wallet_lock("w").unwrap();

        manager.delete_wallet("w").unwrap();
        manager.create_wallet("w", Vec::new(), 0).unwrap();

        // A writer that fetched the lock before the delete must still
        // contend with writers arriving after the recreate
        let current = manager.wallet_lock("w").unwrap();
        assert!(Arc::ptr_eq(&held, &current));

        let _guard = held.lock().unwrap();
        assert!(current.try_lock().is_err());
    }
}
