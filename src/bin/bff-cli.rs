use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "bff-cli")]
#[command(about = "Query a running wallet backend", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the explorer behind the service is reachable
    Status,
    /// Show the chain tip
    BestBlock,
    /// Fetch one page of transaction history
    History {
        #[arg(long = "address", required = true)]
        addresses: Vec<String>,
        /// Block hash bounding the history from above
        #[arg(long)]
        until: String,
        /// Block of the last transaction already seen
        #[arg(long, requires = "after_tx")]
        after_block: Option<String>,
        /// Last transaction already seen
        #[arg(long, requires = "after_block")]
        after_tx: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        /// Omit inputs and outputs
        #[arg(long)]
        concise: bool,
    },
    /// Sum the confirmed balance of addresses
    Balance {
        #[arg(long = "address", required = true)]
        addresses: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Status => client.get(format!("{base}/api/status")),
        Commands::BestBlock => client.get(format!("{base}/api/v2/bestblock")),
        Commands::History {
            addresses,
            until,
            after_block,
            after_tx,
            limit,
            concise,
        } => {
            let mut body = json!({
                "addresses": addresses,
                "untilBlock": until,
                "concise": concise,
            });
            if let (Some(block), Some(tx)) = (after_block, after_tx) {
                body["after"] = json!({ "block": block, "tx": tx });
            }
            if let Some(limit) = limit {
                body["limit"] = json!(limit);
            }
            client.post(format!("{base}/api/v2/txs/history")).json(&body)
        }
        Commands::Balance { addresses } => client
            .post(format!("{base}/api/txs/utxoSumForAddresses"))
            .json(&json!({ "addresses": addresses })),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
