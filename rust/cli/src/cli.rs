//! Command-line argument types.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "coexist",
    version,
    about = "Two-player networked card battle: run a server or join a match"
)]
pub struct CoexistCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pairing server until interrupted with Ctrl+C
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Base seed; match n is dealt from seed + n
        #[arg(long)]
        seed: Option<u64>,
        /// Emit logs as JSON lines
        #[arg(long)]
        json_logs: bool,
    },
    /// Join a match as a player
    Connect {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Keep previous frames on screen instead of clearing
        #[arg(long)]
        no_clear: bool,
    },
    /// Print player 1's opening frame for a match
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_subcommand() {
        let commands = vec![
            vec!["coexist", "cfg"],
            vec!["coexist", "deal"],
            vec!["coexist", "deal", "--seed", "7"],
            vec!["coexist", "serve", "--port", "0", "--seed", "1"],
            vec!["coexist", "serve", "--json-logs"],
            vec!["coexist", "connect", "--host", "localhost", "--no-clear"],
        ];
        for args in commands {
            let result = CoexistCli::try_parse_from(&args);
            assert!(result.is_ok(), "Failed to parse: {:?}", args);
        }
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(CoexistCli::try_parse_from(["coexist", "serve", "--port", "70000"]).is_err());
        assert!(CoexistCli::try_parse_from(["coexist", "connect", "--port", "x"]).is_err());
    }

    #[test]
    fn connect_flags_land_in_variant() {
        let cli = CoexistCli::try_parse_from(["coexist", "connect", "--port", "9000"]).unwrap();
        match cli.cmd {
            Commands::Connect {
                host,
                port,
                no_clear,
            } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
                assert!(!no_clear);
            }
            other => panic!("Expected Commands::Connect, got {other:?}"),
        }
    }
}
