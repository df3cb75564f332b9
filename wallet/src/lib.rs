//! DID wallet manager
//!
//! Owns one [`did_state::IdentityWalletState`] per named wallet on disk and
//! drives its load -> mutate -> validate -> persist cycles.
//!
//! - `config` - Environment configuration
//! - `storage` - Wallet directories, metadata and the state file envelope
//! - `wallet` - Lifecycle, lineage and recovery operations
//! - `cli` - Command-line surface

pub mod cli;
pub mod config;
pub mod error;
pub mod storage;
pub mod wallet;

pub use config::{Network, WalletConfig};
pub use error::{StorageError, WalletError};
pub use wallet::DidWalletManager;
