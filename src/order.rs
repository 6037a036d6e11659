use crate::client::FlashLoanClient;
use crate::contract::FlashLoanExecutor;
use crate::error::Result;
use anyhow::Context;
use ethers::types::TxHash;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One flash loan request as read from an order file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlashLoanOrder {
    Simple {
        dexes: Vec<String>,
        paths: Vec<Vec<String>>,
        amount: Decimal,
    },
    Triangular {
        dexes: Vec<String>,
        paths: Vec<Vec<String>>,
        amount: Decimal,
    },
}

impl FlashLoanOrder {
    pub fn kind(&self) -> &'static str {
        match self {
            FlashLoanOrder::Simple { .. } => "simple",
            FlashLoanOrder::Triangular { .. } => "triangular",
        }
    }

    pub async fn submit<E: FlashLoanExecutor>(&self, client: &FlashLoanClient<E>) -> Result<TxHash> {
        match self {
            FlashLoanOrder::Simple { dexes, paths, amount } => {
                client.init_simple_flash_loan(dexes.as_slice(), paths.as_slice(), *amount).await
            }
            FlashLoanOrder::Triangular { dexes, paths, amount } => {
                client.init_triangle_flash_loan(dexes.as_slice(), paths.as_slice(), *amount).await
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OrderFile {
    Many(Vec<FlashLoanOrder>),
    One(FlashLoanOrder),
}

/// Accepts a single order object or a list of them.
pub fn parse_orders(json: &str) -> anyhow::Result<Vec<FlashLoanOrder>> {
    let orders = match serde_json::from_str::<OrderFile>(json).context("malformed order file")? {
        OrderFile::Many(orders) => orders,
        OrderFile::One(order) => vec![order],
    };
    Ok(orders)
}

pub fn load_orders(path: impl AsRef<Path>) -> anyhow::Result<Vec<FlashLoanOrder>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read order file {}", path.display()))?;
    parse_orders(&json).with_context(|| format!("in {}", path.display()))
}
