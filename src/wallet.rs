use crate::config::Config;
use crate::error::{FlashLoanError, Result};
use ethers::prelude::*;
use ethers::signers::coins_bip39::English;
use std::sync::Arc;
use tracing::{debug, info};

/// Provider with the derived wallet attached as transaction signer.
pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Derives the signing wallet at `m/44'/60'/0'/0/{index}`.
pub fn derive_wallet(mnemonic: &str, index: u32) -> Result<LocalWallet> {
    let wallet = MnemonicBuilder::<English>::default()
        .phrase(mnemonic)
        .index(index)?
        .build()?;

    Ok(wallet)
}

pub fn connect_provider(rpc_url: &str) -> Result<Provider<Http>> {
    Provider::<Http>::try_from(rpc_url)
        .map_err(|e| FlashLoanError::Config(format!("invalid RPC_URL {rpc_url}: {e}")))
}

/// Opens the RPC connection and binds the wallet to it.
///
/// Without a configured chain id the node is asked for one, so signatures
/// carry the right replay protection.
pub async fn connect_signer(config: &Config) -> Result<Arc<SignerClient>> {
    let provider = connect_provider(&config.rpc_url)?;
    let wallet = derive_wallet(&config.mnemonic, config.account_index)?;

    let chain_id = match config.chain_id {
        Some(chain_id) => chain_id,
        None => {
            let chain_id = provider.get_chainid().await?.as_u64();
            debug!("chain id {} reported by {}", chain_id, config.rpc_url);
            chain_id
        }
    };

    let wallet = wallet.with_chain_id(chain_id);
    info!(
        "signer {:?} (account #{}) on chain {}",
        wallet.address(),
        config.account_index,
        chain_id
    );

    Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
}
