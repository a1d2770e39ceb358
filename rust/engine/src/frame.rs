//! Text frames sent to each viewer after every state change, and the
//! line scanner clients use to cut a byte stream back into frames.
//!
//! A frame opens with a line starting [`FRAME_START`] and closes with a line
//! starting [`FRAME_END`]. The layout is a presentation contract: the same
//! state always renders to the same bytes.

use std::fmt::Write as _;

use crate::board::{Board, BOARD_SLOTS};
use crate::game::MatchState;
use crate::player::Player;

/// Prefix of the first line of every frame.
pub const FRAME_START: &str = "/---";
/// Prefix of the last line of every frame.
pub const FRAME_END: &str = "\\---";
/// Substring present only in frames of a finished match.
pub const GAME_OVER_MARKER: &str = "GAME OVER";

/// Inner width of the header and message boxes.
const BOX_WIDTH: usize = 40;
/// Gap between the card row and the turn indicator column.
const INDICATOR_GAP: &str = "      ";

const BOX_TOP: &str = "/----------------------------------------\\";
const BOX_BOTTOM: &str = "\\----------------------------------------/";
const COLUMN_HEADER: &str = "    A    B    C    D    E    F             |";
const COLUMN_FOOTER: &str = "  A    B    C    D    E    F";
const CARD_TOP: &str = "/---\\";
const CARD_BOTTOM: &str = "\\---/";

/// Three-row arrow drawn beside the boards.
struct Indicator {
    top: char,
    middle: char,
    bottom: char,
}

impl Indicator {
    fn for_viewer(state: &MatchState, viewer: Player) -> Self {
        if state.is_game_over() {
            Indicator {
                top: '-',
                middle: '|',
                bottom: '-',
            }
        } else if state.turn() == viewer {
            Indicator {
                top: ' ',
                middle: '|',
                bottom: 'v',
            }
        } else {
            Indicator {
                top: '^',
                middle: '|',
                bottom: ' ',
            }
        }
    }
}

impl MatchState {
    /// Renders the board as seen by `viewer`: opponent on top, own board below.
    ///
    /// ```
    /// use coexist_engine::frame::{FRAME_END, FRAME_START};
    /// use coexist_engine::game::MatchState;
    /// use coexist_engine::player::Player;
    ///
    /// let state = MatchState::new(Some(7));
    /// let frame = state.generate_frame(Player::One);
    /// assert!(frame.starts_with(FRAME_START));
    /// assert!(frame.lines().last().unwrap().starts_with(FRAME_END));
    /// assert!(frame.contains("NEW GAME"));
    /// ```
    pub fn generate_frame(&self, viewer: Player) -> String {
        let opponent = viewer.other();
        let top = self.board(opponent);
        let bottom = self.board(viewer);
        let arrow = Indicator::for_viewer(self, viewer);

        let mut out = String::with_capacity(1024);
        // writeln! into a String cannot fail
        let _ = writeln!(out, "{BOX_TOP}");
        let _ = writeln!(out, "{COLUMN_HEADER}");

        write_border(&mut out, CARD_TOP, Some(arrow.top));
        write_card_rows(&mut out, top, [arrow.middle; 3]);
        write_border(&mut out, CARD_BOTTOM, None);

        let _ = writeln!(out, "|{:BOX_WIDTH$}[{}]", "", self.score(opponent));
        let _ = writeln!(out, "<===================================={}", self.round_label());
        let _ = writeln!(out, "|{:BOX_WIDTH$}[{}]", "", self.score(viewer));

        write_border(&mut out, CARD_TOP, Some(arrow.middle));
        write_card_rows(&mut out, bottom, [arrow.middle, arrow.middle, arrow.bottom]);
        write_border(&mut out, CARD_BOTTOM, None);
        let _ = writeln!(out, "{COLUMN_FOOTER}");

        let _ = writeln!(out, "{BOX_TOP}");
        let _ = writeln!(out, "|{:<BOX_WIDTH$}|", center(&self.status_message()));
        let _ = writeln!(out, "{BOX_BOTTOM}");
        out
    }

    fn round_label(&self) -> String {
        format!("R{}", self.round())
    }
}

fn write_border(out: &mut String, piece: &str, indicator: Option<char>) {
    out.push_str("  ");
    for _ in 0..BOARD_SLOTS {
        out.push_str(piece);
    }
    if let Some(c) = indicator {
        out.push_str(INDICATOR_GAP);
        out.push(c);
    }
    out.push('\n');
}

fn write_card_rows(out: &mut String, board: &Board, indicators: [char; 3]) {
    for (row, indicator) in indicators.into_iter().enumerate() {
        out.push_str("  ");
        for unit in board.units() {
            out.push_str(unit.glyph_row(row));
        }
        out.push_str(INDICATOR_GAP);
        out.push(indicator);
        out.push('\n');
    }
}

/// Centers `message` in the message box. Messages longer than the box are
/// left as is and push the right border out.
fn center(message: &str) -> String {
    let len = message.chars().count();
    let left = BOX_WIDTH / 2 + len / 2;
    let right = (BOX_WIDTH / 2).saturating_sub(len / 2);
    format!("{message:>left$}{:right$}", "")
}

/// Whether a frame reports a finished match.
pub fn is_game_over_frame(frame: &str) -> bool {
    frame.contains(GAME_OVER_MARKER)
}

/// Reassembles frames from a stream of lines.
///
/// Lines before a start marker are skipped. Once a frame is open every line is
/// kept until one starts with [`FRAME_END`]; the message box's own top border
/// starts like a frame and is kept as content.
#[derive(Debug, Default)]
pub struct FrameScanner {
    current: Option<String>,
}

impl FrameScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line (with or without its newline). Returns the complete
    /// frame, newline-terminated, when this line closes it.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim_end_matches(['\r', '\n']);
        match self.current.as_mut() {
            None => {
                if line.starts_with(FRAME_START) {
                    self.current = Some(format!("{line}\n"));
                }
                None
            }
            Some(frame) => {
                frame.push_str(line);
                frame.push('\n');
                if line.starts_with(FRAME_END) {
                    self.current.take()
                } else {
                    None
                }
            }
        }
    }

    /// Whether a frame has started but not yet closed.
    pub fn in_frame(&self) -> bool {
        self.current.is_some()
    }

    /// Drops any partially received frame.
    pub fn reset(&mut self) {
        self.current = None;
    }
}
