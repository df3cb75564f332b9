//! DID wallet operations
//!
//! This module is organized by separation of concerns:
//!
//! - `manager.rs` - Orchestrator: per-wallet locking and read-modify-write
//! - `wallet_ops.rs` - Wallet lifecycle operations
//! - `lineage_ops.rs` - Origin coin, parent history, inner program
//! - `recovery_ops.rs` - Backup list and pending recovery
//! - `types.rs` - Results returned to callers

// Operation modules
pub mod lineage_ops;
pub mod recovery_ops;
pub mod wallet_ops;

pub mod types;

// Main manager (orchestrator)
pub mod manager;

// Re-export the manager as the main entry point
pub use manager::DidWalletManager;
