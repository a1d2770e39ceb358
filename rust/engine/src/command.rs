use crate::board::Slot;
use crate::errors::GameError;

/// Literal token for passing the turn.
pub const PASS_TOKEN: &str = "PS";

/// A parsed player command.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    /// Give up the turn; two consecutive passes end the round
    Pass,
    /// Attack from a slot on the mover's board to a slot on the opponent's
    Attack { from: Slot, to: Slot },
}

impl Command {
    /// Parses a two-character command, case-insensitively.
    ///
    /// ```
    /// use coexist_engine::command::Command;
    ///
    /// assert_eq!(Command::parse("ps"), Ok(Command::Pass));
    /// assert!(matches!(Command::parse("ab"), Ok(Command::Attack { .. })));
    /// assert!(Command::parse("AG").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Command, GameError> {
        let len = text.chars().count();
        if len != 2 {
            return Err(GameError::WrongLength { len });
        }
        let upper = text.to_uppercase();
        if upper == PASS_TOKEN {
            return Ok(Command::Pass);
        }
        let mut chars = upper.chars();
        let (Some(from), Some(to)) = (chars.next(), chars.next()) else {
            return Err(GameError::WrongLength { len });
        };
        Ok(Command::Attack {
            from: Slot::from_column(from)?,
            to: Slot::from_column(to)?,
        })
    }
}
