pub mod amount;
pub mod client;
pub mod config;
pub mod contract;
pub mod error;
pub mod logging;
pub mod order;
pub mod path;
pub mod route;
pub mod wallet;

pub use client::{ClientSlot, FlashLoanClient};
pub use config::Config;
pub use contract::FlashLoanExecutor;
pub use error::{FlashLoanError, InvalidInput};
pub use path::{is_ethereum_address, is_path_correct, SwapPath};
pub use route::FlashLoanRoute;
