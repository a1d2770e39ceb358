use serde::{Deserialize, Serialize};
use std::fmt;

/// A card occupying one board slot.
/// `Empty` marks a slot whose unit was destroyed (or was never dealt).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    /// Beats Hammer
    Axe,
    /// Beats Sword
    Hammer,
    /// Beats Axe
    Sword,
    /// Takes and is taken by every other unit, never scores
    Arrow,
    /// Vacant slot
    Empty,
}

/// Display name plus the three glyph rows drawn inside a card border.
struct UnitArt {
    name: &'static str,
    glyph: [&'static str; 3],
}

const AXE_ART: UnitArt = UnitArt {
    name: "AXE",
    glyph: ["|<7>|", "| I |", "| L |"],
};
const HAMMER_ART: UnitArt = UnitArt {
    name: "HAMMER",
    glyph: ["|[=]|", "| | |", "| | |"],
};
const SWORD_ART: UnitArt = UnitArt {
    name: "SWORD",
    glyph: ["|  /|", "| / |", "|X  |"],
};
const ARROW_ART: UnitArt = UnitArt {
    name: "ARROW",
    glyph: ["| ^ |", "| | |", "|/^\\|"],
};
const EMPTY_ART: UnitArt = UnitArt {
    name: "EMPTY",
    glyph: ["|   |", "|   |", "|   |"],
};

impl Unit {
    /// The four dealable unit types, in deck-building order.
    pub const ALL_CARDS: [Unit; 4] = [Unit::Axe, Unit::Hammer, Unit::Sword, Unit::Arrow];

    fn art(self) -> &'static UnitArt {
        match self {
            Unit::Axe => &AXE_ART,
            Unit::Hammer => &HAMMER_ART,
            Unit::Sword => &SWORD_ART,
            Unit::Arrow => &ARROW_ART,
            Unit::Empty => &EMPTY_ART,
        }
    }

    pub fn name(self) -> &'static str {
        self.art().name
    }

    /// One of the three 5-character glyph rows (`row` in 0..3).
    pub fn glyph_row(self, row: usize) -> &'static str {
        self.art().glyph[row.min(2)]
    }

    pub fn is_empty(self) -> bool {
        self == Unit::Empty
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Copies of each dealable unit in a fresh deck.
pub const COPIES_PER_UNIT: usize = 3;

/// Builds the unshuffled 12-card deck: three of each dealable unit.
pub fn full_deck() -> Vec<Unit> {
    let mut v = Vec::with_capacity(COPIES_PER_UNIT * Unit::ALL_CARDS.len());
    for _ in 0..COPIES_PER_UNIT {
        v.extend_from_slice(&Unit::ALL_CARDS);
    }
    v
}
