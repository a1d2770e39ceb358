use thiserror::Error;

use crate::units::Unit;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Command must be exactly 2 characters, got {len}")]
    WrongLength { len: usize },
    #[error("Invalid column '{column}' (expected A-F)")]
    InvalidColumn { column: char },
    #[error("Slot index {index} out of range (0-5)")]
    SlotOutOfRange { index: usize },
    #[error("Attacking slot is empty")]
    EmptyAttacker,
    #[error("{attacker} cannot take {defender}")]
    IllegalAttack { attacker: Unit, defender: Unit },
    #[error("Match is already over")]
    GameOver,
}
