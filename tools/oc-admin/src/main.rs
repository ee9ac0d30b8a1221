//! OC-Admin: command-line client for the overlay controller.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use oc_admin::{display, ClientError, RegistryClient};
use oc_peer_registry::JoinRequest;

/// OC-Admin: overlay controller client
#[derive(Parser, Debug)]
#[command(name = "oc-admin", version)]
#[command(about = "Join nodes to an overlay controller and inspect its roster")]
struct Args {
    /// Controller base URL
    #[arg(short, long, env = "OC_CONTROLLER", default_value = "http://127.0.0.1:8080")]
    controller: String,

    /// Print raw JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register (or refresh) a node and print the roster it receives
    Join {
        #[arg(long)]
        node_id: String,
        /// Base64 public key, passed through as-is
        #[arg(long)]
        pubkey: String,
        /// UDP port the node listens on for tunnel traffic
        #[arg(long)]
        udp_port: u16,
    },
    /// List every registered peer
    Peers,
    /// Show controller health and address usage
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), ClientError> {
    let client = RegistryClient::new(&args.controller)?;

    match args.command {
        Command::Join {
            node_id,
            pubkey,
            udp_port,
        } => {
            let roster = client
                .join(&JoinRequest::new(node_id, pubkey, udp_port))
                .await?;
            if args.json {
                print_json(&roster)?;
            } else {
                print!("{}", display::roster_table(&roster));
            }
        }
        Command::Peers => {
            let roster = client.peers().await?;
            if args.json {
                print_json(&roster)?;
            } else {
                print!("{}", display::roster_table(&roster));
            }
        }
        Command::Health => {
            let health = client.health().await?;
            if args.json {
                print_json(&health)?;
            } else {
                print!("{}", display::health_summary(&health));
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ClientError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| ClientError::Parse(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
