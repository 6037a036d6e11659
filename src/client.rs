use crate::amount::to_base_units;
use crate::config::Config;
use crate::contract::{FlashLoanExecutor, SimpleFlashLoan};
use crate::error::{FlashLoanError, InvalidInput, Result};
use crate::route::{FlashLoanRoute, SimpleRoute, TriangularRoute};
use crate::wallet::{connect_signer, SignerClient};
use ethers::types::{TxHash, U256};
use rust_decimal::Decimal;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Handle over the signer-bound flash loan contract.
///
/// Built once and only read afterwards; share it behind an `Arc` (or use
/// [`ClientSlot`]) rather than building one per call.
pub struct FlashLoanClient<E = SimpleFlashLoan<SignerClient>> {
    executor: E,
}

impl FlashLoanClient {
    /// Connects to the node, derives the wallet and binds the contract.
    pub async fn connect(config: &Config) -> Result<Self> {
        let signer = connect_signer(config).await?;
        let contract = SimpleFlashLoan::new(config.contract_address, signer);
        info!("flash loan contract bound at {:?}", config.contract_address);

        Ok(Self::with_executor(contract))
    }
}

impl<E: FlashLoanExecutor> FlashLoanClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Starts a two-leg flash loan. `amount` is in ether, not wei.
    ///
    /// Returns the hash once the node accepts the transaction; inclusion is
    /// not awaited.
    pub async fn init_simple_flash_loan<D, P>(
        &self,
        dexes: &[D],
        paths: &[Vec<P>],
        amount: Decimal,
    ) -> Result<TxHash>
    where
        D: AsRef<str>,
        P: AsRef<str>,
    {
        let route = Self::validate(dexes, paths)?;
        let route = route.into_simple().map_err(|e| Self::rejected(e.into()))?;
        let amount = to_base_units(amount).map_err(|e| Self::rejected(e.into()))?;

        self.execute_simple(route, amount).await
    }

    /// Starts a three-leg flash loan; `paths[1]` is the intermediate hop.
    pub async fn init_triangle_flash_loan<D, P>(
        &self,
        dexes: &[D],
        paths: &[Vec<P>],
        amount: Decimal,
    ) -> Result<TxHash>
    where
        D: AsRef<str>,
        P: AsRef<str>,
    {
        let route = Self::validate(dexes, paths)?;
        let route = route
            .into_triangular()
            .map_err(|e| Self::rejected(e.into()))?;
        let amount = to_base_units(amount).map_err(|e| Self::rejected(e.into()))?;

        self.execute_triangular(route, amount).await
    }

    /// Dispatches an already built route. `amount` is in wei.
    pub async fn execute(&self, route: FlashLoanRoute, amount: U256) -> Result<TxHash> {
        if !route.is_chained() {
            return Err(Self::rejected(InvalidInput::InvalidPath.into()));
        }

        match route {
            FlashLoanRoute::Simple(route) => self.execute_simple(route, amount).await,
            FlashLoanRoute::Triangular(route) => self.execute_triangular(route, amount).await,
        }
    }

    async fn execute_simple(&self, route: SimpleRoute, amount: U256) -> Result<TxHash> {
        let SimpleRoute { dexes, paths: [path0, path1] } = route;
        info!("submitting simple flash loan of {} wei via {:?}", amount, dexes);

        let hash = self
            .executor
            .submit_simple(dexes.to_vec(), path0.into_inner(), path1.into_inner(), amount)
            .await?;

        info!("simple flash loan submitted: {:?}", hash);
        Ok(hash)
    }

    async fn execute_triangular(&self, route: TriangularRoute, amount: U256) -> Result<TxHash> {
        let TriangularRoute { dexes, paths: [path0, path1, path2] } = route;
        info!("submitting triangular flash loan of {} wei via {:?}", amount, dexes);

        let hash = self
            .executor
            .submit_triangular(
                dexes.to_vec(),
                path0.into_inner(),
                path1.into_inner(),
                path2.into_inner(),
                amount,
            )
            .await?;

        info!("triangular flash loan submitted: {:?}", hash);
        Ok(hash)
    }

    fn validate<D, P>(dexes: &[D], paths: &[Vec<P>]) -> Result<FlashLoanRoute>
    where
        D: AsRef<str>,
        P: AsRef<str>,
    {
        FlashLoanRoute::from_parts(dexes, paths).map_err(|e| Self::rejected(e.into()))
    }

    fn rejected(err: FlashLoanError) -> FlashLoanError {
        warn!("flash loan rejected: {}", err);
        err
    }
}

/// Holds at most one client, connected on first use.
///
/// Every later call returns the same `Arc`, and the connect future only runs
/// once even when callers race.
pub struct ClientSlot<E = SimpleFlashLoan<SignerClient>> {
    cell: OnceCell<Arc<FlashLoanClient<E>>>,
}

impl<E> Default for ClientSlot<E> {
    fn default() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }
}

impl<E: FlashLoanExecutor> ClientSlot<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<FlashLoanClient<E>>> {
        self.cell.get().cloned()
    }

    pub async fn get_or_connect<F, Fut>(&self, connect: F) -> Result<Arc<FlashLoanClient<E>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<FlashLoanClient<E>>>,
    {
        self.cell
            .get_or_try_init(move || async move { connect().await.map(Arc::new) })
            .await
            .cloned()
    }
}

impl ClientSlot {
    pub async fn get_or_connect_with(&self, config: &Config) -> Result<Arc<FlashLoanClient>> {
        self.get_or_connect(|| FlashLoanClient::connect(config)).await
    }
}
