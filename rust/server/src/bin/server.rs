//! Standalone match server binary
//!
//! Usage: cargo run -p coexist_server --bin coexist-server -- --port 35754

use clap::Parser;
use coexist_server::{GameServer, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};

#[derive(Parser, Debug)]
#[command(name = "coexist-server", about = "Pairs clients and runs coexist matches")]
struct Args {
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Base seed; match n is dealt from seed + n
    #[arg(long)]
    seed: Option<u64>,
    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    coexist_server::init_logging(args.json_logs)?;

    let config = ServerConfig::new(args.host, args.port).with_seed(args.seed);
    let server = GameServer::bind(config).await?;
    let handle = server.start().await?;
    println!("coexist server listening on {}", handle.address());

    tokio::signal::ctrl_c().await?;
    let snapshot = handle.stats().snapshot();
    tracing::info!(?snapshot, "interrupt received");
    handle.shutdown().await?;
    Ok(())
}
