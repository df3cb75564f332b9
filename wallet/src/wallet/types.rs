use did_state::{Bytes, Bytes32, Coin, IdentityWalletState};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct WalletInfo {
    pub name: String,
    pub created_at: String,
    pub network: String,
    pub did_id: Option<Bytes32>,
    pub content_hash: Bytes32,
    pub state: IdentityWalletState,
}

#[derive(Debug, Serialize)]
pub struct WalletSummary {
    pub name: String,
    pub created_at: String,
    pub did_id: Option<Bytes32>,
    pub parent_count: usize,
    pub recovery_pending: bool,
}

/// Pending-recovery triple taken out of a wallet when recovery finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryInfo {
    pub coin: Coin,
    pub puzzle_hash: Bytes32,
    pub pubkey: Bytes,
}

#[derive(Debug, Serialize)]
pub struct VerifyReport {
    pub name: String,
    pub content_hash: Bytes32,
    pub size_bytes: usize,
    pub backup_count: usize,
    pub parent_count: usize,
}
