use anyhow::{bail, Result};
use flash_loan_client::logging::setup_logging;
use flash_loan_client::order::load_orders;
use flash_loan_client::{Config, FlashLoanClient};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    setup_logging(&config.log_level);

    let Some(order_file) = std::env::args().nth(1) else {
        bail!("usage: flash-loan <orders.json>");
    };
    let orders = load_orders(&order_file)?;
    info!("loaded {} order(s) from {}", orders.len(), order_file);

    let client = FlashLoanClient::connect(&config).await?;

    let mut failed = 0usize;
    for (i, order) in orders.iter().enumerate() {
        match order.submit(&client).await {
            Ok(hash) => {
                info!("order #{} ({}) submitted: {:?}", i, order.kind(), hash);
                println!("{:?}", hash);
            }
            Err(e) => {
                error!("order #{} ({}) failed: {}", i, order.kind(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} order(s) failed", failed, orders.len());
    }
    Ok(())
}
