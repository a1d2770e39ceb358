//! Terminal output helpers shared by the subcommands and the client.

use std::io::Write;

/// ANSI sequence that homes the cursor and clears the screen.
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

pub const MOVE_PROMPT: &str = "Enter move (e.g. AB to attack from A to B, or PS to pass): ";

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}
