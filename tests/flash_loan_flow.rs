// Drives the client end to end against a recording executor, so no node is
// needed. Checks what reaches the contract seam and what never does.

use async_trait::async_trait;
use ethers::types::{Address, TxHash, U256};
use flash_loan_client::error::Result;
use flash_loan_client::order::parse_orders;
use flash_loan_client::path::parse_address;
use flash_loan_client::route::{FlashLoanRoute, SimpleRoute};
use flash_loan_client::{
    ClientSlot, FlashLoanClient, FlashLoanError, FlashLoanExecutor, InvalidInput, SwapPath,
};
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const DEX_A: &str = "0x00000000000000000000000000000000000000d1";
const DEX_B: &str = "0x00000000000000000000000000000000000000d2";
const DEX_C: &str = "0x00000000000000000000000000000000000000d3";
const WETH: &str = "0x00000000000000000000000000000000000000a1";
const USDC: &str = "0x00000000000000000000000000000000000000a2";
const DAI: &str = "0x00000000000000000000000000000000000000a3";

#[derive(Debug, Clone, PartialEq)]
enum Submitted {
    Simple {
        dexes: Vec<Address>,
        paths: [Vec<Address>; 2],
        amount: U256,
    },
    Triangular {
        dexes: Vec<Address>,
        paths: [Vec<Address>; 3],
        amount: U256,
    },
}

#[derive(Default)]
struct RecordingExecutor {
    calls: Mutex<Vec<Submitted>>,
    revert: bool,
}

impl RecordingExecutor {
    fn reverting() -> Self {
        Self {
            revert: true,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Submitted> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Submitted) -> Result<TxHash> {
        if self.revert {
            return Err(FlashLoanError::Contract("execution reverted: no profit".into()));
        }
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        Ok(TxHash::from_low_u64_be(calls.len() as u64))
    }
}

#[async_trait]
impl FlashLoanExecutor for RecordingExecutor {
    async fn submit_simple(
        &self,
        dexes: Vec<Address>,
        path0: Vec<Address>,
        path1: Vec<Address>,
        amount: U256,
    ) -> Result<TxHash> {
        self.record(Submitted::Simple {
            dexes,
            paths: [path0, path1],
            amount,
        })
    }

    async fn submit_triangular(
        &self,
        dexes: Vec<Address>,
        path0: Vec<Address>,
        path1: Vec<Address>,
        path2: Vec<Address>,
        amount: U256,
    ) -> Result<TxHash> {
        self.record(Submitted::Triangular {
            dexes,
            paths: [path0, path1, path2],
            amount,
        })
    }
}

fn addr(raw: &str) -> Address {
    parse_address(raw).unwrap()
}

fn client() -> FlashLoanClient<RecordingExecutor> {
    FlashLoanClient::with_executor(RecordingExecutor::default())
}

#[tokio::test]
async fn simple_flash_loan_reaches_the_contract_scaled_to_wei() {
    let client = client();

    let hash = client
        .init_simple_flash_loan(
            &[DEX_A, DEX_B],
            &[vec![WETH, USDC], vec![USDC, WETH]],
            dec!(1.5),
        )
        .await
        .unwrap();

    assert_eq!(hash, TxHash::from_low_u64_be(1));
    assert_eq!(
        client.executor().calls(),
        vec![Submitted::Simple {
            dexes: vec![addr(DEX_A), addr(DEX_B)],
            paths: [vec![addr(WETH), addr(USDC)], vec![addr(USDC), addr(WETH)]],
            amount: U256::from(1_500_000_000_000_000_000u128),
        }]
    );
}

#[tokio::test]
async fn triangle_flash_loan_keeps_leg_order() {
    let client = client();

    client
        .init_triangle_flash_loan(
            &[DEX_A, DEX_B, DEX_C],
            &[vec![WETH, USDC], vec![USDC, DAI], vec![DAI, WETH]],
            dec!(2),
        )
        .await
        .unwrap();

    assert_eq!(
        client.executor().calls(),
        vec![Submitted::Triangular {
            dexes: vec![addr(DEX_A), addr(DEX_B), addr(DEX_C)],
            paths: [
                vec![addr(WETH), addr(USDC)],
                vec![addr(USDC), addr(DAI)],
                vec![addr(DAI), addr(WETH)],
            ],
            amount: U256::from(2_000_000_000_000_000_000u128),
        }]
    );
}

#[tokio::test]
async fn dex_count_mismatch_never_reaches_the_contract() {
    let client = client();

    let err = client
        .init_simple_flash_loan(
            &[DEX_A, DEX_B],
            &[vec![WETH, USDC], vec![USDC, DAI], vec![DAI, WETH]],
            dec!(1),
        )
        .await
        .unwrap_err();

    assert!(err.is_invalid_input());
    assert_eq!(err.to_string(), "Invalid dex addresses count");
    assert!(client.executor().calls().is_empty());
}

#[tokio::test]
async fn broken_path_never_reaches_the_contract() {
    let client = client();

    let err = client
        .init_simple_flash_loan(
            &[DEX_A, DEX_B],
            &[vec![WETH, USDC], vec![DAI, WETH]],
            dec!(1),
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid path");
    assert!(client.executor().calls().is_empty());
}

#[tokio::test]
async fn leg_count_must_match_the_operation() {
    let client = client();

    let err = client
        .init_simple_flash_loan(
            &[DEX_A, DEX_B, DEX_C],
            &[vec![WETH, USDC], vec![USDC, DAI], vec![DAI, WETH]],
            dec!(1),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FlashLoanError::InvalidInput(InvalidInput::HopCount { expected: 2, actual: 3 })
    ));

    let err = client
        .init_triangle_flash_loan(
            &[DEX_A, DEX_B],
            &[vec![WETH, USDC], vec![USDC, WETH]],
            dec!(1),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FlashLoanError::InvalidInput(InvalidInput::HopCount { expected: 3, actual: 2 })
    ));

    assert!(client.executor().calls().is_empty());
}

#[tokio::test]
async fn bad_amount_never_reaches_the_contract() {
    let client = client();

    let err = client
        .init_simple_flash_loan(
            &[DEX_A, DEX_B],
            &[vec![WETH, USDC], vec![USDC, WETH]],
            dec!(-0.5),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, FlashLoanError::InvalidInput(InvalidInput::InvalidAmount(_))));
    assert!(client.executor().calls().is_empty());
}

#[tokio::test]
async fn contract_errors_pass_through_untouched() {
    let client = FlashLoanClient::with_executor(RecordingExecutor::reverting());

    let err = client
        .init_simple_flash_loan(
            &[DEX_A, DEX_B],
            &[vec![WETH, USDC], vec![USDC, WETH]],
            dec!(1),
        )
        .await
        .unwrap_err();

    assert!(!err.is_invalid_input());
    assert_eq!(err.to_string(), "execution reverted: no profit");
}

#[tokio::test]
async fn prebuilt_routes_are_rechecked_before_dispatch() {
    let client = client();
    let route = FlashLoanRoute::Simple(SimpleRoute {
        dexes: [addr(DEX_A), addr(DEX_B)],
        paths: [
            SwapPath::new(vec![addr(WETH), addr(USDC)]),
            SwapPath::new(vec![addr(DAI), addr(WETH)]),
        ],
    });

    let err = client.execute(route, U256::one()).await.unwrap_err();
    assert!(matches!(err, FlashLoanError::InvalidInput(InvalidInput::InvalidPath)));

    let route = FlashLoanRoute::from_parts(&[DEX_A, DEX_B], &[vec![WETH, USDC], vec![USDC, WETH]])
        .unwrap();
    client.execute(route, U256::one()).await.unwrap();
    assert_eq!(client.executor().calls().len(), 1);
}

#[tokio::test]
async fn orders_submit_through_the_shared_client() {
    let client = client();
    let orders = parse_orders(&format!(
        r#"[
            {{"kind": "simple", "dexes": ["{DEX_A}", "{DEX_B}"],
              "paths": [["{WETH}", "{USDC}"], ["{USDC}", "{WETH}"]], "amount": "0.1"}},
            {{"kind": "triangular", "dexes": ["{DEX_A}", "{DEX_B}", "{DEX_C}"],
              "paths": [["{WETH}", "{USDC}"], ["{USDC}", "{DAI}"], ["{DAI}", "{WETH}"]], "amount": "3"}}
        ]"#
    ))
    .unwrap();

    let mut hashes = Vec::new();
    for order in &orders {
        hashes.push(order.submit(&client).await.unwrap());
    }

    assert_eq!(
        hashes,
        vec![TxHash::from_low_u64_be(1), TxHash::from_low_u64_be(2)]
    );
    assert!(matches!(
        client.executor().calls()[0],
        Submitted::Simple { amount, .. } if amount == U256::exp10(17)
    ));
}

#[tokio::test]
async fn client_slot_connects_once_and_hands_out_the_same_handle() {
    let slot = ClientSlot::<RecordingExecutor>::new();
    let counter = AtomicUsize::new(0);
    let connects = &counter;

    let connect = move || async move {
        connects.fetch_add(1, Ordering::SeqCst);
        Ok(FlashLoanClient::with_executor(RecordingExecutor::default()))
    };

    assert!(slot.get().is_none());
    let first = slot.get_or_connect(connect).await.unwrap();
    let second = slot.get_or_connect(connect).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &slot.get().unwrap()));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_connect_leaves_the_slot_empty() {
    let slot = ClientSlot::<RecordingExecutor>::new();

    let err = slot
        .get_or_connect(|| async { Err(FlashLoanError::Config("RPC_URL unreachable".into())) })
        .await;
    assert!(err.is_err());
    assert!(slot.get().is_none());

    let client = slot
        .get_or_connect(|| async { Ok(FlashLoanClient::with_executor(RecordingExecutor::default())) })
        .await
        .unwrap();
    assert!(client.executor().calls().is_empty());
}

#[tokio::test]
async fn racing_callers_share_one_connect() {
    let slot = ClientSlot::<RecordingExecutor>::new();
    let counter = AtomicUsize::new(0);
    let connects = &counter;

    let connect = move || async move {
        connects.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(FlashLoanClient::with_executor(RecordingExecutor::default()))
    };

    let (first, second) = tokio::join!(slot.get_or_connect(connect), slot.get_or_connect(connect));

    assert!(Arc::ptr_eq(&first.unwrap(), &second.unwrap()));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn joint_spelled_differently_never_reaches_the_contract() {
    let client = client();
    let checksummed = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    let lowercase = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

    let err = client
        .init_simple_flash_loan(
            &[DEX_A, DEX_B],
            &[vec![WETH, checksummed], vec![lowercase, WETH]],
            dec!(1),
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid path");
    assert!(client.executor().calls().is_empty());
}
