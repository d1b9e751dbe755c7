//! KEYRIX Router Binary
//!
//! Consistent-hashing front door for a set of cache nodes.

use anyhow::bail;
use clap::Parser;
use keyrix::router::{self, RouterConfig, RouterState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// KEYRIX Router - shards key/value traffic across cache nodes
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Bind address
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// Port number
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Virtual points generated per backend node
    #[arg(long, default_value_t = 20)]
    replicas: usize,

    /// Backend as NAME=URL; repeat per node (default: cache0-2 on localhost:3000-3002)
    #[arg(long = "backend", value_name = "NAME=URL")]
    backends: Vec<String>,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = 5)]
    dispatch_timeout: u64,
}

fn parse_backend(spec: &str) -> anyhow::Result<(String, String)> {
    match spec.split_once('=') {
        Some((node, url)) if !node.is_empty() && !url.is_empty() => {
            Ok((node.to_string(), url.to_string()))
        }
        _ => bail!("invalid backend spec {spec:?}, expected NAME=URL"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("keyrix=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = RouterConfig::default()
        .with_bind(&args.bind)
        .with_port(args.port)
        .with_replicas(args.replicas)
        .with_dispatch_timeout(args.dispatch_timeout);

    if !args.backends.is_empty() {
        let mut pairs = Vec::with_capacity(args.backends.len());
        for spec in &args.backends {
            pairs.push(parse_backend(spec)?);
        }
        config = config.with_backends(pairs);
    }

    let state = RouterState::from_config(&config);
    let addr = format!("{}:{}", config.bind, config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!(
        "KEYRIX router listening on {} with {} backends and {} replicas per node",
        addr,
        state.backends.len(),
        config.replicas
    );

    axum::serve(listener, router::app(state)).await?;

    Ok(())
}
