//! Command handler modules for the coexist CLI.
//!
//! Each subcommand lives in its own module with one public handler,
//! `handle_COMMAND_command(...) -> Result<(), CliError>`, taking its output
//! streams as `&mut dyn Write` so tests can capture them.

mod cfg;
mod connect;
mod deal;
mod serve;

pub use cfg::handle_cfg_command;
pub use connect::handle_connect_command;
pub use deal::handle_deal_command;
pub use serve::handle_serve_command;

use crate::error::CliError;

/// Runtime for the networked subcommands; the handlers stay synchronous.
fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}
