use crate::deck::Deck;
use crate::errors::GameError;
use crate::units::Unit;

/// Number of slots on each board.
pub const BOARD_SLOTS: usize = 6;

/// Column letters labelling slots left to right.
pub const COLUMNS: [char; BOARD_SLOTS] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// Index of a board slot, guaranteed to be in `0..BOARD_SLOTS`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Slot(usize);

impl Slot {
    pub fn new(index: usize) -> Result<Slot, GameError> {
        if index < BOARD_SLOTS {
            Ok(Slot(index))
        } else {
            Err(GameError::SlotOutOfRange { index })
        }
    }

    /// Parses an upper-case column letter `A`-`F`.
    pub fn from_column(column: char) -> Result<Slot, GameError> {
        COLUMNS
            .iter()
            .position(|&c| c == column)
            .map(Slot)
            .ok_or(GameError::InvalidColumn { column })
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn column(self) -> char {
        COLUMNS[self.0]
    }
}

/// Six unit slots owned by one player.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Board([Unit; BOARD_SLOTS]);

impl Default for Board {
    fn default() -> Self {
        Board([Unit::Empty; BOARD_SLOTS])
    }
}

impl Board {
    pub fn new(units: [Unit; BOARD_SLOTS]) -> Self {
        Board(units)
    }

    pub fn get(&self, slot: Slot) -> Unit {
        self.0[slot.index()]
    }

    pub fn clear_slot(&mut self, slot: Slot) {
        self.0[slot.index()] = Unit::Empty;
    }

    pub fn clear(&mut self) {
        self.0 = [Unit::Empty; BOARD_SLOTS];
    }

    pub fn units(&self) -> &[Unit; BOARD_SLOTS] {
        &self.0
    }

    /// Slots still holding a unit.
    pub fn occupied(&self) -> usize {
        self.0.iter().filter(|u| !u.is_empty()).count()
    }
}

/// Clears both boards and deals them alternately from a freshly shuffled deck,
/// player one's slot first.
pub(crate) fn deal_boards(deck: &mut Deck, first: &mut Board, second: &mut Board) {
    first.clear();
    second.clear();
    deck.shuffle();
    for i in 0..BOARD_SLOTS {
        first.0[i] = deck.deal_card().unwrap_or(Unit::Empty);
        second.0[i] = deck.deal_card().unwrap_or(Unit::Empty);
    }
}
