use crate::error::{FlashLoanError, Result};
use crate::path::parse_address;
use ethers::types::Address;
use std::fmt;

pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone)]
pub struct Config {
    pub mnemonic: String,
    pub account_index: u32,
    pub contract_address: Address,
    pub rpc_url: String,
    pub chain_id: Option<u64>,
    pub log_level: String,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| FlashLoanError::Config(format!("{key} must be set")))
        };

        let mnemonic = required("MNEMONIC")?;

        let account_index = required("ACCOUNT_INDEX")?;
        let account_index = account_index.parse::<u32>().map_err(|e| {
            FlashLoanError::Config(format!("ACCOUNT_INDEX {account_index}: {e}"))
        })?;

        let contract_address = required("CONTRACT_ADDRESS")?;
        let contract_address = parse_address(&contract_address).ok_or_else(|| {
            FlashLoanError::Config(format!("CONTRACT_ADDRESS {contract_address} is not an address"))
        })?;

        let chain_id = match lookup("CHAIN_ID").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| FlashLoanError::Config(format!("CHAIN_ID {raw}: {e}")))?,
            ),
            None => None,
        };

        Ok(Self {
            mnemonic,
            account_index,
            contract_address,
            rpc_url: lookup("RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            chain_id,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}

// Keeps the phrase out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("mnemonic", &"<redacted>")
            .field("account_index", &self.account_index)
            .field("contract_address", &self.contract_address)
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("log_level", &self.log_level)
            .finish()
    }
}
