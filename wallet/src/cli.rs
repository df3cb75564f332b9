//! Command-line surface of the DID wallet manager
//!
//! Parsing and dispatch only; every command maps onto one
//! [`DidWalletManager`] call and prints its result as JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use did_state::{Bytes, Bytes32, Coin, LineageProof, Program};
use serde::Serialize;

use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::storage::Storage;
use crate::wallet::DidWalletManager;

#[derive(Parser, Debug)]
#[command(
    name = "did-wallet",
    version,
    about = "Manage distributed-identity wallet state",
    long_about = None
)]
pub struct Cli {
    /// Wallet storage root (overrides DID_WALLET_ROOT)
    #[arg(long, global = true, value_name = "DIR")]
    pub root_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show did-wallet version
    Version,

    /// Create the wallet storage root
    Init,

    /// Create a new DID wallet
    Create {
        name: String,
        /// Recovery authority, hex encoded (repeatable, in precedence order)
        #[arg(long = "backup-id", value_name = "HEX")]
        backup_ids: Vec<String>,
        /// Backup approvals required to recover
        #[arg(long, default_value_t = 0)]
        threshold: u64,
    },

    /// List all DID wallets
    List,

    /// Show one wallet's metadata and state
    Show { name: String },

    /// Delete a wallet and all its data
    Delete { name: String },

    /// Anchor the identity to its origin coin
    SetOrigin {
        name: String,
        #[arg(long, value_name = "HEX32")]
        parent: Bytes32,
        #[arg(long, value_name = "HEX32")]
        puzzle_hash: Bytes32,
        #[arg(long)]
        amount: u64,
    },

    /// Append a coin to the spend history
    AddParent {
        name: String,
        #[arg(long, value_name = "HEX32")]
        coin_id: Bytes32,
        /// Lineage: parent coin name (requires --inner-puzzle-hash and --amount)
        #[arg(long, value_name = "HEX32")]
        parent_name: Option<Bytes32>,
        #[arg(long, value_name = "HEX32")]
        inner_puzzle_hash: Option<Bytes32>,
        #[arg(long)]
        amount: Option<u64>,
    },

    /// Replace the current inner program
    SetInner {
        name: String,
        /// Serialized program, hex encoded
        #[arg(long, value_name = "HEX")]
        program: String,
    },

    /// Replace the recovery list and threshold
    SetBackups {
        name: String,
        #[arg(long = "backup-id", value_name = "HEX")]
        backup_ids: Vec<String>,
        #[arg(long)]
        threshold: u64,
    },

    /// Record an in-progress recovery
    BeginRecovery {
        name: String,
        #[arg(long, value_name = "HEX32")]
        coin_parent: Bytes32,
        #[arg(long, value_name = "HEX32")]
        coin_puzzle_hash: Bytes32,
        #[arg(long)]
        coin_amount: u64,
        /// Puzzle hash being recovered to
        #[arg(long, value_name = "HEX32")]
        puzzle_hash: Bytes32,
        #[arg(long, value_name = "HEX")]
        pubkey: String,
    },

    /// Clear the in-progress recovery
    FinishRecovery { name: String },

    /// Decode and validate a stored record
    Verify { name: String },
}

/// Execute one command against the configured storage root
pub fn run(command: Commands, config: &WalletConfig) -> anyhow::Result<()> {
    let manager = DidWalletManager::new(config);

    match command {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Init => {
            Storage::new_with_base_dir(config.root_path.clone())
                .init()
                .with_context(|| format!("creating {}", config.root_path.display()))?;
            log::info!("Wallet root ready at {}", config.root_path.display());
        }
        Commands::Create {
            name,
            backup_ids,
            threshold,
        } => {
            let backup_ids = parse_blobs(&backup_ids)?;
            print_json(&manager.create_wallet(&name, backup_ids, threshold)?)?;
        }
        Commands::List => {
            print_json(&manager.list_wallets()?)?;
        }
        Commands::Show { name } => {
            print_json(&manager.wallet_info(&name)?)?;
        }
        Commands::Delete { name } => {
            manager.delete_wallet(&name)?;
        }
        Commands::SetOrigin {
            name,
            parent,
            puzzle_hash,
            amount,
        } => {
            let did_id = manager.establish_origin(&name, Coin::new(parent, puzzle_hash, amount))?;
            println!("{}", did_id);
        }
        Commands::AddParent {
            name,
            coin_id,
            parent_name,
            inner_puzzle_hash,
            amount,
        } => {
            let lineage = lineage_from_args(parent_name, inner_puzzle_hash, amount)?;
            manager.add_parent(&name, coin_id, lineage)?;
        }
        Commands::SetInner { name, program } => {
            let program = Program::from_bytes(parse_blob(&program)?.into_inner());
            manager.set_inner_program(&name, program)?;
        }
        Commands::SetBackups {
            name,
            backup_ids,
            threshold,
        } => {
            let backup_ids = parse_blobs(&backup_ids)?;
            manager.update_recovery_list(&name, backup_ids, threshold)?;
        }
        Commands::BeginRecovery {
            name,
            coin_parent,
            coin_puzzle_hash,
            coin_amount,
            puzzle_hash,
            pubkey,
        } => {
            let coin = Coin::new(coin_parent, coin_puzzle_hash, coin_amount);
            let pubkey = parse_blob(&pubkey)?;
            manager.begin_recovery(&name, coin, puzzle_hash, pubkey)?;
        }
        Commands::FinishRecovery { name } => {
            print_json(&manager.finish_recovery(&name)?)?;
        }
        Commands::Verify { name } => {
            print_json(&manager.verify(&name)?)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_blob(hex: &str) -> Result<Bytes, WalletError> {
    Bytes::from_hex(hex).map_err(|e| WalletError::InvalidArgument(e.to_string()))
}

fn parse_blobs(values: &[String]) -> Result<Vec<Bytes>, WalletError> {
    values.iter().map(|v| parse_blob(v)).collect()
}

/// A lineage proof needs all three parts or none
fn lineage_from_args(
    parent_name: Option<Bytes32>,
    inner_puzzle_hash: Option<Bytes32>,
    amount: Option<u64>,
) -> Result<Option<LineageProof>, WalletError> {
    match (parent_name, inner_puzzle_hash, amount) {
        (Some(parent_name), Some(inner_puzzle_hash), Some(amount)) => Ok(Some(LineageProof {
            parent_name,
            inner_puzzle_hash,
            amount,
        })),
        (None, None, None) => Ok(None),
        _ => Err(WalletError::InvalidArgument(
            "--parent-name, --inner-puzzle-hash and --amount go together".to_string(),
        )),
    }
}
