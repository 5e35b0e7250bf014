//! itemd entry point: parse CLI flags, initialize tracing, run the server.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use itemd::server::{run_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "itemd", version, about = "Minimal CRUD HTTP service for items")]
struct Args {
    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3030)]
    port: u16,

    /// Database file path (default: ~/.itemd/items.db)
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .init();
}

fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".itemd")
        .join("items.db")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let config = ServerConfig {
        bind: args.bind,
        port: args.port,
        db_path: args.db_path.unwrap_or_else(default_db_path),
    };

    run_server(config).await
}
