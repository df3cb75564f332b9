use did_state::{Bytes32, DecodeError, StateError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Wallet already exists: {0}")]
    WalletExists(String),

    #[error("Wallet not found: {0}")]
    WalletNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Origin coin already set to {0}")]
    OriginAlreadySet(Bytes32),

    #[error("Parent already recorded: {0}")]
    DuplicateParent(Bytes32),

    #[error("Recovery already pending for wallet: {0}")]
    RecoveryAlreadyPending(String),

    #[error("No pending recovery for wallet: {0}")]
    NoPendingRecovery(String),

    #[error("Invalid wallet state: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid wallet name: '{0}'")]
    InvalidWalletName(String),

    #[error("Wallet directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Not a DID state file: bad magic {0}")]
    BadMagic(String),

    #[error("Unsupported DID state file version: {0}")]
    UnsupportedVersion(u8),

    #[error("Corrupt DID state record: {0}")]
    Decode(#[from] DecodeError),
}

impl From<StateError> for WalletError {
    fn from(e: StateError) -> Self {
        match e {
            StateError::Decode(e) => WalletError::Storage(StorageError::Decode(e)),
            StateError::Validation(e) => WalletError::Validation(e),
        }
    }
}
