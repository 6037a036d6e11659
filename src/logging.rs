use std::str::FromStr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. A bare level such as `debug` also quiets
/// the HTTP stack underneath ethers; full directive strings are used as-is.
pub fn setup_logging(log_level: &str) {
    let level = log_level.trim();
    let filter_spec = if level.contains(',') || level.contains('=') {
        level.to_string()
    } else {
        format!("{level},hyper=info,reqwest=info,ethers_providers=warn")
    };
    let filter = EnvFilter::from_str(&filter_spec).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
