//! `overlay-controller` binary.

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use controller_runtime::{init_tracing, shutdown_signal, ControllerConfig, ControllerRuntime};

/// Overlay network controller: hands out virtual addresses and peer rosters
#[derive(Parser, Debug)]
#[command(name = "overlay-controller", version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "OC_CONFIG")]
    config: Option<PathBuf>,

    /// Override the HTTP bind address
    #[arg(long)]
    host: Option<IpAddr>,

    /// Override the HTTP port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        ControllerConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging).context("failed to initialize logging")?;

    let runtime = ControllerRuntime::new(config).context("failed to build controller")?;
    let listener = runtime.bind().await.context("failed to bind HTTP listener")?;

    runtime
        .run(listener, shutdown_signal())
        .await
        .context("controller terminated with an error")?;

    Ok(())
}
