//! Serve command: run the pairing server in the foreground.

use super::runtime;
use crate::config;
use crate::error::CliError;
use crate::ui;
use coexist_server::GameServer;
use std::io::Write;

/// Binds, prints the listening address, and serves until Ctrl+C. A clean
/// stop still reports [`CliError::Interrupted`] so the process exits with 130.
pub fn handle_serve_command(
    host: Option<String>,
    port: Option<u16>,
    seed: Option<u64>,
    json_logs: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let config = config::load_with_sources()?
        .config
        .with_overrides(host, port, seed)?;

    if let Err(e) = coexist_server::init_logging(json_logs) {
        ui::display_warning(err, &format!("logging already initialised: {e}"))?;
    }

    let runtime = runtime()?;
    runtime.block_on(async {
        let server = GameServer::bind(config.server_config()).await?;
        let handle = server.start().await?;
        writeln!(out, "coexist server listening on {}", handle.address())?;
        if let Some(seed) = config.seed {
            writeln!(out, "match seeds start at {seed}")?;
        }
        out.flush()?;

        tokio::signal::ctrl_c().await?;

        let snapshot = handle.stats().snapshot();
        let summary = serde_json::to_string(&snapshot).map_err(std::io::Error::other)?;
        writeln!(out, "{summary}")?;
        handle.shutdown().await?;
        Err::<(), _>(CliError::Interrupted("server stopped".into()))
    })
}
