use ethers::providers::ProviderError;
use ethers::signers::WalletError;
use thiserror::Error;

/// Input rejected locally, before anything is sent to the node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("Invalid dex addresses count")]
    DexCountMismatch { dexes: usize, paths: usize },

    #[error("Invalid path")]
    InvalidPath,

    #[error("Expected {expected} hops, got {actual}")]
    HopCount { expected: usize, actual: usize },

    #[error("Invalid dex address: {0}")]
    InvalidDexAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

#[derive(Error, Debug)]
pub enum FlashLoanError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Contract(Box<dyn std::error::Error + Send + Sync>),
}

impl FlashLoanError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, FlashLoanError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, FlashLoanError>;
