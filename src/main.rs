use clap::Parser;
use std::path::PathBuf;

use ergo_wallet_bff::config::{load_config, BffConfig};
use ergo_wallet_bff::lifecycle::startup;
use ergo_wallet_bff::observability::logging;

#[derive(Parser)]
#[command(name = "ergo-wallet-bff")]
#[command(about = "Wallet backend over the Ergo explorer API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => BffConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        bind_address = %config.listener.bind_address,
        explorer = %config.explorer.base_url,
        "ergo-wallet-bff starting"
    );

    startup::run(config).await?;
    Ok(())
}
