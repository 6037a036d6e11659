use crate::error::{FlashLoanError, Result};
use async_trait::async_trait;
use ethers::prelude::*;

// Deployed flash loan executor. Both entry points take the dex list first,
// then one address path per leg, then the borrowed amount in wei.
abigen!(
    SimpleFlashLoan,
    r#"[
        function executeSimpleFlashLoan(address[] calldata dexes, address[] calldata path0, address[] calldata path1, uint256 amount) external
        function executeTriangularFlashLoan(address[] calldata dexes, address[] calldata path0, address[] calldata path1, address[] calldata path2, uint256 amount) external
    ]"#
);

/// Submits flash loan calls and hands back the transaction hash as soon as
/// the node has accepted the transaction.
#[async_trait]
pub trait FlashLoanExecutor: Send + Sync {
    async fn submit_simple(
        &self,
        dexes: Vec<Address>,
        path0: Vec<Address>,
        path1: Vec<Address>,
        amount: U256,
    ) -> Result<TxHash>;

    async fn submit_triangular(
        &self,
        dexes: Vec<Address>,
        path0: Vec<Address>,
        path1: Vec<Address>,
        path2: Vec<Address>,
        amount: U256,
    ) -> Result<TxHash>;
}

#[async_trait]
impl<M: Middleware + 'static> FlashLoanExecutor for SimpleFlashLoan<M> {
    async fn submit_simple(
        &self,
        dexes: Vec<Address>,
        path0: Vec<Address>,
        path1: Vec<Address>,
        amount: U256,
    ) -> Result<TxHash> {
        let call = self.execute_simple_flash_loan(dexes, path0, path1, amount);
        let pending = call
            .send()
            .await
            .map_err(|e| FlashLoanError::Contract(Box::new(e)))?;

        Ok(pending.tx_hash())
    }

    async fn submit_triangular(
        &self,
        dexes: Vec<Address>,
        path0: Vec<Address>,
        path1: Vec<Address>,
        path2: Vec<Address>,
        amount: U256,
    ) -> Result<TxHash> {
        let call = self.execute_triangular_flash_loan(dexes, path0, path1, path2, amount);
        let pending = call
            .send()
            .await
            .map_err(|e| FlashLoanError::Contract(Box::new(e)))?;

        Ok(pending.tx_hash())
    }
}
