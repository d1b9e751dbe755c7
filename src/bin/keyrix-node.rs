//! KEYRIX Node Binary
//!
//! One in-memory cache node. Run several on adjacent ports and point a
//! keyrix-router at them.

use clap::Parser;
use keyrix::node::{self, Store};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// KEYRIX Node - addressable in-memory cache backend
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Bind address
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// Port number
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("keyrix=info".parse()?))
        .init();

    let args = Args::parse();

    let addr = format!("{}:{}", args.bind, args.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("KEYRIX node listening on {}", addr);

    axum::serve(listener, node::app(Store::new())).await?;

    Ok(())
}
