use std::fs;
use std::path::{Path, PathBuf};

use did_state::IdentityWalletState;

use super::models::Metadata;
use super::record::{open_record, seal_record};
use crate::error::StorageError;

const METADATA_FILE: &str = "metadata.json";
const STATE_FILE: &str = "did_info.bin";

/// Wallet names become directory names directly under the root
///
/// Leading dots are reserved for staging directories, which also rules
/// out `.` and `..`.
pub fn is_valid_wallet_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

#[derive(Clone, Debug)]
pub struct Storage {
    base_path: PathBuf,
}

impl Storage {
    /// Create storage with custom base directory
    pub fn new_with_base_dir(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the directory path for a specific wallet
    ///
    /// Every path this storage touches goes through here.
    fn wallet_dir(&self, name: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_wallet_name(name) {
            return Err(StorageError::InvalidWalletName(name.to_string()));
        }
        Ok(self.base_path.join(name))
    }

    fn staging_dir(&self, name: &str) -> PathBuf {
        self.base_path.join(format!(".{}.creating", name))
    }

    /// Create the base directory if it does not exist yet
    pub fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    /// Create a wallet directory holding its metadata and first state record
    ///
    /// Both files are written into a staging directory that is renamed into
    /// place last, so a failed creation never leaves a half-built wallet.
    pub fn create_wallet(
        &self,
        name: &str,
        meta: &Metadata,
        state: &IdentityWalletState,
    ) -> Result<(), StorageError> {
        let wallet_dir = self.wallet_dir(name)?;
        let staging = self.staging_dir(name);

        fs::create_dir_all(&self.base_path)?;
        if staging.exists() {
            log::warn!("Removing stale staging directory: {:?}", staging);
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir(&staging)?;

        let result = populate_wallet_dir(&staging, meta, state)
            .and_then(|()| fs::rename(&staging, &wallet_dir).map_err(StorageError::from));
        if result.is_err() {
            if let Err(e) = fs::remove_dir_all(&staging) {
                log::warn!("Failed to clean up {:?}: {}", staging, e);
            }
        }
        result
    }

    /// Check if a wallet with the given name exists
    pub fn wallet_exists(&self, name: &str) -> bool {
        self.wallet_dir(name).map(|dir| dir.exists()).unwrap_or(false)
    }

    /// Load wallet metadata from disk
    pub fn load_metadata(&self, name: &str) -> Result<Metadata, StorageError> {
        let path = self.wallet_dir(name)?.join(METADATA_FILE);
        if !path.exists() {
            return Err(StorageError::FileNotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        let meta = serde_json::from_str(&contents)?;
        Ok(meta)
    }

    /// Save the DID state record to disk
    ///
    /// Written to a temporary file first and renamed into place, so a
    /// crash leaves either the old record or the new one.
    pub fn save_state(&self, name: &str, state: &IdentityWalletState) -> Result<(), StorageError> {
        let wallet_dir = self.wallet_dir(name)?;
        if !wallet_dir.exists() {
            return Err(StorageError::DirectoryNotFound(
                wallet_dir.display().to_string(),
            ));
        }
        let path = wallet_dir.join(STATE_FILE);
        let bytes = seal_record(state);
        write_atomic(&path, &bytes)?;
        log::debug!("Saved DID state for '{}' ({} bytes)", name, bytes.len());
        Ok(())
    }

    /// Load and decode the DID state record
    ///
    /// Only the envelope and encoding are checked; invariants are left
    /// to the caller.
    pub fn load_state(&self, name: &str) -> Result<IdentityWalletState, StorageError> {
        let path = self.wallet_dir(name)?.join(STATE_FILE);
        if !path.exists() {
            return Err(StorageError::FileNotFound(path.display().to_string()));
        }
        let bytes = fs::read(path)?;
        open_record(&bytes)
    }

    /// List all wallet names in the storage directory
    pub fn list_wallets(&self) -> Result<Vec<String>, StorageError> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut wallets = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                if let Some(name) = path.file_name() {
                    match name.to_str() {
                        Some(name_str) if is_valid_wallet_name(name_str) => {
                            wallets.push(name_str.to_string());
                        }
                        _ => log::debug!("Ignoring directory {:?}", path),
                    }
                }
            }
        }
        wallets.sort();
        Ok(wallets)
    }

    /// Delete a wallet and all its associated data from disk
    pub fn delete_wallet(&self, name: &str) -> Result<(), StorageError> {
        let wallet_dir = self.wallet_dir(name)?;

        if !wallet_dir.exists() {
            return Err(StorageError::FileNotFound(
                wallet_dir.display().to_string(),
            ));
        }

        log::warn!("Deleting wallet directory: {:?}", wallet_dir);
        fs::remove_dir_all(&wallet_dir)?;
        log::info!("Wallet '{}' deleted successfully", name);

        Ok(())
    }
}

fn populate_wallet_dir(
    dir: &Path,
    meta: &Metadata,
    state: &IdentityWalletState,
) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(meta)?;
    write_atomic(&dir.join(METADATA_FILE), json.as_bytes())?;
    write_atomic(&dir.join(STATE_FILE), &seal_record(state))?;
    Ok(())
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StorageError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
