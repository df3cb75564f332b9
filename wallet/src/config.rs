//! Wallet configuration from environment variables
//!
//! Controls where DID wallets are stored and which network label they
//! carry. Defaults to mainnet under `./did_wallets`.

use std::env;
use std::path::PathBuf;

/// Default root directory for wallet storage
pub const DEFAULT_ROOT: &str = "./did_wallets";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }

    /// Parse a network name, falling back to mainnet for unknown values
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "mainnet" | "" => Network::Mainnet,
            "testnet" => Network::Testnet,
            other => {
                log::warn!("⚠️  Unknown network '{}', defaulting to mainnet", other);
                Network::Mainnet
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct WalletConfig {
    /// Directory holding one subdirectory per wallet
    pub root_path: PathBuf,
    /// Network label recorded in wallet metadata
    pub network: Network,
}

impl WalletConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is read first, if present.
    ///
    /// Environment variables:
    /// - `DID_WALLET_ROOT`: storage root (default `./did_wallets`)
    /// - `DID_WALLET_NETWORK`: "mainnet" (default) or "testnet"
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Keep testnet wallets apart from mainnet ones
    /// DID_WALLET_NETWORK=testnet DID_WALLET_ROOT=./testnet_wallets did-wallet list
    /// ```
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let root_path = env::var("DID_WALLET_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ROOT));
        log::debug!("📁 Wallet root: {}", root_path.display());

        let network = env::var("DID_WALLET_NETWORK")
            .map(|name| Network::from_name(&name))
            .unwrap_or(Network::Mainnet);
        log::debug!("🌐 Network: {}", network.as_str());

        Self { root_path, network }
    }

    /// Replace the storage root, e.g. from a `--root-path` flag
    pub fn with_root_path(mut self, root_path: PathBuf) -> Self {
        self.root_path = root_path;
        self
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from(DEFAULT_ROOT),
            network: Network::Mainnet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mainnet() {
        let config = WalletConfig::default();
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.root_path, PathBuf::from(DEFAULT_ROOT));
    }

    #[test]
    fn test_network_names() {
        assert_eq!(Network::from_name("testnet"), Network::Testnet);
        assert_eq!(Network::from_name(" TESTNET "), Network::Testnet);
        assert_eq!(Network::from_name("mainnet"), Network::Mainnet);
        assert_eq!(Network::from_name("regtest"), Network::Mainnet);
        assert_eq!(Network::Testnet.as_str(), "testnet");
    }

    #[test]
    fn test_root_path_override() {
        let config = WalletConfig::default().with_root_path(PathBuf::from("/tmp/dids"));
        assert_eq!(config.root_path, PathBuf::from("/tmp/dids"));
        assert_eq!(config.network, Network::Mainnet);
    }
}
