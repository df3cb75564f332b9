//! Common test utilities for DID wallet integration tests
//!
//! This module provides shared test infrastructure including:
//! - Test environment setup and cleanup
//! - Deterministic coins, lineage proofs and backup ids

#![allow(dead_code)]

use did_state::{Bytes, Bytes32, Coin, LineageProof};
use did_wallet::config::Network;
use did_wallet::storage::Storage;
use did_wallet::DidWalletManager;
use tempfile::TempDir;

/// Test environment with automatic cleanup
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub manager: DidWalletManager,
    pub wallet_name: String,
}

impl TestEnvironment {
    pub fn new(test_name: &str) -> anyhow::Result<Self> {
        let _ = env_logger::builder().is_test(true).try_init();

        // Create temp directory
        let temp_dir = TempDir::new()?;
        log::info!("📁 Test directory: {:?}", temp_dir.path());

        // Create storage with temp path
        let storage = Storage::new_with_base_dir(temp_dir.path().to_path_buf());
        let manager = DidWalletManager::new_with_storage(storage, Network::Testnet);

        Ok(Self {
            temp_dir,
            manager,
            wallet_name: format!("test-{}", test_name),
        })
    }

    /// Second manager over the same directory, as another process would see it
    pub fn reopen(&self) -> DidWalletManager {
        let storage = Storage::new_with_base_dir(self.temp_dir.path().to_path_buf());
        DidWalletManager::new_with_storage(storage, Network::Testnet)
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if self.manager.storage.wallet_exists(&self.wallet_name) {
            if let Err(e) = self.manager.delete_wallet(&self.wallet_name) {
                log::warn!("Failed to delete wallet: {}", e);
            }
        }
        log::info!("✓ Cleanup complete (temp dir will auto-remove)");
    }
}

pub fn hash(seed: u8) -> Bytes32 {
    Bytes32::new([seed; 32])
}

pub fn test_coin(seed: u8) -> Coin {
    Coin::new(hash(seed), hash(seed.wrapping_add(1)), 1)
}

pub fn test_lineage(seed: u8) -> LineageProof {
    LineageProof {
        parent_name: hash(seed),
        inner_puzzle_hash: hash(seed.wrapping_add(0x40)),
        amount: 1,
    }
}

pub fn backup_ids(count: usize) -> Vec<Bytes> {
    (0..count)
        .map(|i| Bytes::from(vec![0xb0 + i as u8; 32]))
        .collect()
}
