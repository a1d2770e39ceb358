//! Deal command: render the opening position of a match without a server.

use crate::error::CliError;
use coexist_engine::game::MatchState;
use coexist_engine::player::Player;
use std::io::Write;

/// Deals a match and prints its seed followed by player 1's opening frame.
/// The same seed always yields the same frame, and it matches what a server
/// started with that seed sends its first pair.
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let state = MatchState::new(seed);
    writeln!(out, "Seed: {}", state.seed())?;
    write!(out, "{}", state.generate_frame(Player::One))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_command_with_seed() {
        let mut out = Vec::new();
        handle_deal_command(Some(42), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Seed: 42");
        assert!(lines[1].starts_with("/---"));
        assert!(lines.last().unwrap().starts_with("\\---"));
        assert!(output.contains("NEW GAME"));
        assert!(output.contains("R1"));
    }

    #[test]
    fn test_deal_command_deterministic() {
        let mut out1 = Vec::new();
        let mut out2 = Vec::new();

        handle_deal_command(Some(12345), &mut out1).unwrap();
        handle_deal_command(Some(12345), &mut out2).unwrap();

        assert_eq!(out1, out2, "Same seed should produce identical output");
    }

    #[test]
    fn test_deal_command_without_seed_reports_drawn_seed() {
        let mut out = Vec::new();
        handle_deal_command(None, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        let seed: u64 = output
            .lines()
            .next()
            .and_then(|l| l.strip_prefix("Seed: "))
            .and_then(|s| s.parse().ok())
            .expect("seed line");

        let mut replay = Vec::new();
        handle_deal_command(Some(seed), &mut replay).unwrap();
        assert_eq!(String::from_utf8(replay).unwrap(), output);
    }
}
