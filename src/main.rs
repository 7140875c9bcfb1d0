//! tx-toolbox
//!
//! Command line tool that turns a key/value transaction intent into a
//! signed, optionally broadcast, EVM transaction.
//!
//! # Architecture Overview
//!
//! ```text
//!   .config.toml ──▶ config ──▶ TradeConfig
//!                                  │
//!                                  ▼
//!                  ┌──────────── trade ────────────┐
//!                  │ pipeline (stages) ──▶ gate #1 │
//!                  │       │                       │
//!                  │       ▼                       │
//!                  │ submit (sign) ─────▶ gate #2  │
//!                  └───────┬───────────────────────┘
//!                          │
//!          units ◀─────────┼─────────▶ blockchain (RPC, wallet, tx)
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use tx_toolbox::blockchain::RpcConnector;
use tx_toolbox::config::{self, ConfigStore, Settings, DEFAULT_CONFIG_PATH};
use tx_toolbox::display::{color_address, diff_addresses};
use tx_toolbox::observability::logging;
use tx_toolbox::trade::{self, TerminalOperator, TradeOutcome};
use tx_toolbox::units::{self, Unit};

#[derive(Parser)]
#[command(name = "tx-toolbox")]
#[command(about = "CLI tool for sending transactions and on-chain utilities", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve, sign and send the transaction described by the config file
    Trade,
    /// Convert a quantity into every ether unit
    Convert {
        #[arg(short, long)]
        number: String,
        /// wei, kwei, mwei, gwei, szabo, finney, ether, kether, mether, gether, tether
        #[arg(short, long)]
        unit: String,
        /// Print a JSON object instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show or edit the config file (lists all keys without a subcommand)
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Add a unique colour to each character of an address
    Color {
        #[arg(short, long)]
        address: String,
    },
    /// Colour the characters where two addresses differ
    Diff {
        #[arg(short, long)]
        left: String,
        #[arg(short, long)]
        right: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print one key
    Get {
        #[arg(short, long)]
        key: String,
    },
    /// Insert or overwrite a key
    Add {
        #[arg(short, long)]
        key: String,
        #[arg(short, long)]
        value: String,
    },
    /// Overwrite an existing key
    Set {
        #[arg(short, long)]
        key: String,
        #[arg(short, long)]
        value: String,
    },
    /// Delete an existing key
    Del {
        #[arg(short, long)]
        key: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = ConfigStore::open(&cli.config)?;
    logging::init(store.get(Settings::LOG_LEVEL_KEY).unwrap_or("info"));

    match cli.command {
        Commands::Trade => {
            let loaded = config::load_config(&cli.config)?;
            tracing::info!(
                path = %cli.config.display(),
                rpc_timeout_secs = loaded.settings.rpc_timeout_secs,
                "Configuration loaded"
            );

            let connector = RpcConnector::new(Duration::from_secs(loaded.settings.rpc_timeout_secs));
            let mut operator = TerminalOperator::stdio();
            match trade::run(&connector, &loaded.trade, &mut operator).await? {
                TradeOutcome::Declined | TradeOutcome::Withheld(_) => {
                    tracing::info!("Nothing broadcast");
                }
                TradeOutcome::Sent(hash) => {
                    tracing::info!(tx_hash = %hash, "Done");
                }
            }
        }
        Commands::Convert { number, unit, json } => {
            let unit: Unit = unit.parse()?;
            let table = units::convert(&number, unit)?;
            if json {
                let object: serde_json::Map<String, serde_json::Value> = table
                    .iter()
                    .map(|(u, v)| (u.name().to_string(), serde_json::Value::String(v.to_string())))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&object)?);
            } else {
                for (u, v) in table.iter() {
                    println!("{:<7}: {}", u.name(), v);
                }
            }
        }
        Commands::Config { action } => match action {
            None => {
                for (key, value) in store.entries() {
                    let shown = if key == "privatekey" { "<redacted>" } else { value.as_str() };
                    println!("{}={}", key, shown);
                }
            }
            Some(ConfigAction::Get { key }) => {
                let value = store
                    .get(&key)
                    .ok_or_else(|| config::ConfigError::MissingKey(key.clone()))?;
                println!("K:[ {} ] V:[ {} ]", key, value);
            }
            Some(ConfigAction::Add { key, value }) => {
                store.add(&key, &value);
                store.save()?;
                println!("Key:[ {} ] Value:[ {} ]", key, value);
            }
            Some(ConfigAction::Set { key, value }) => {
                store.set(&key, &value)?;
                store.save()?;
                println!("Key:[ {} ] Value:[ {} ]", key, value);
            }
            Some(ConfigAction::Del { key }) => {
                store.remove(&key)?;
                store.save()?;
                println!("Deleted {} from {}", key, store.path().display());
            }
        },
        Commands::Color { address } => {
            println!("{}", color_address(&address)?);
        }
        Commands::Diff { left, right } => {
            let diff = diff_addresses(&left, &right)?;
            println!("Left address -> {}", diff.left);
            println!("Right address -> {}", diff.right);
            println!("Difference -> {}", diff.differs);
        }
    }

    Ok(())
}
