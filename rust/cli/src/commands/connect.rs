//! Connect command: join a match from the terminal.

use super::runtime;
use crate::client::{ClientOutcome, run_client};
use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;
use tokio::io::BufReader;
use tokio::net::TcpStream;

pub fn handle_connect_command(
    host: Option<String>,
    port: Option<u16>,
    no_clear: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let config = config::load_with_sources()?
        .config
        .with_overrides(host, port, None)?;

    let runtime = runtime()?;
    let result = runtime.block_on(async {
        let stream = TcpStream::connect((config.host.as_str(), config.port))
            .await
            .map_err(|e| {
                CliError::Connection(format!("{}:{}: {e}", config.host, config.port))
            })?;
        writeln!(out, "Connected to server.")?;
        out.flush()?;

        let (read, write) = stream.into_split();
        let stdin = BufReader::new(tokio::io::stdin());
        run_client(BufReader::new(read), write, stdin, out, !no_clear).await
    });
    // A blocked stdin read would otherwise hold up runtime teardown
    runtime.shutdown_background();

    match result? {
        ClientOutcome::GameOver => Ok(()),
        ClientOutcome::ServerClosed => {
            ui::display_warning(err, "server closed the connection")?;
            Ok(())
        }
    }
}
