//! # Coexist CLI Library
//!
//! Command-line front end for the coexist card battle: run the pairing
//! server, join a match as a player, or inspect a seeded deal.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line
//! arguments and executes the appropriate subcommand.
//!
//! ```
//! use std::io;
//! let args = vec!["coexist", "deal", "--seed", "42"];
//! let code = coexist_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `serve`: Run the pairing server until Ctrl+C
//! - `connect`: Join a match and play from the terminal
//! - `deal`: Print player 1's opening frame for a seeded match
//! - `cfg`: Display the resolved configuration and its sources

use clap::Parser;
use std::io::Write;
pub mod cli;
pub mod client;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod ui;

use cli::{CoexistCli, Commands};
use commands::{
    handle_cfg_command, handle_connect_command, handle_deal_command, handle_serve_command,
};

pub use client::{ClientOutcome, FrameReader, run_client};
pub use config::ConfigError;
pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Returns the process exit code: `0` for success, `2` for errors,
/// `130` for interruptions.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["serve", "connect", "deal", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CoexistCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write_usage(err, &e.to_string(), COMMANDS);
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Serve {
            host,
            port,
            seed,
            json_logs,
        } => handle_serve_command(host, port, seed, json_logs, out, err),
        Commands::Connect {
            host,
            port,
            no_clear,
        } => handle_connect_command(host, port, no_clear, out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn write_usage(err: &mut dyn Write, clap_error: &str, commands: &[&str]) -> std::io::Result<()> {
    writeln!(err, "{}", clap_error)?;
    writeln!(err)?;
    writeln!(err, "Coexist card battle CLI")?;
    writeln!(err, "Usage: coexist <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in commands {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: coexist --help")
}
