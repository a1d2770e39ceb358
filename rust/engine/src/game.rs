use serde::{Deserialize, Serialize};

use crate::board::{deal_boards, Board, Slot, BOARD_SLOTS};
use crate::command::Command;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::Player;
use crate::rules::{awards_point, validate_attack};
use crate::units::Unit;

/// A player reaching this many points ends the match.
pub const WINNING_SCORE: u32 = 9;

/// Entering this round ends the match.
pub const FINAL_ROUND: u32 = 5;

/// Consecutive passes that close a round.
const PASSES_PER_ROUND: u8 = 2;

/// What the last processed command left behind for the message box.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct LastAction {
    /// Unit in the attacking slot of the last attempted move
    pub attacker: Option<Unit>,
    /// Unit in the targeted slot of the last attempted move
    pub defender: Option<Unit>,
    /// Whether the last command was a successful attack
    pub move_made: bool,
}

impl LastAction {
    fn clear(&mut self) {
        *self = LastAction::default();
    }
}

/// Result of a successful attack.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MoveOutcome {
    pub player: Player,
    pub attacker: Unit,
    pub defender: Unit,
    /// Whether the attack earned a point
    pub scored: bool,
}

/// Result of an accepted command.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CommandOutcome {
    Attacked(MoveOutcome),
    Passed {
        player: Player,
        /// The pass completed a pass cycle and a new round was dealt
        new_round: bool,
    },
}

/// How a finished match ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum MatchOutcome {
    Winner { player: Player, score: u32 },
    Draw,
    /// Round limit reached without either side scoring
    BothLost,
}

impl MatchOutcome {
    pub fn message(self) -> String {
        match self {
            MatchOutcome::Winner { player, score } => {
                format!("GAME OVER - {} WINS WITH {} POINTS!", player.label(), score)
            }
            MatchOutcome::Draw => "GAME OVER - DRAW (TIED POINTS IN ROUND 5)".to_string(),
            MatchOutcome::BothLost => "GAME OVER - BOTH PLAYERS LOST".to_string(),
        }
    }
}

/// Full state of one two-player match: boards, scores, round and turn
/// bookkeeping. Mutated only through the command API.
///
/// # Examples
///
/// ```
/// use coexist_engine::game::MatchState;
/// use coexist_engine::player::Player;
///
/// let mut state = MatchState::new(Some(42));
/// assert_eq!(state.turn(), Player::One);
///
/// // Passing always succeeds and hands the turn over
/// assert!(state.process_command("ps"));
/// assert_eq!(state.turn(), Player::Two);
///
/// // Malformed input is rejected without changing the turn
/// assert!(!state.process_command("zz"));
/// assert_eq!(state.turn(), Player::Two);
/// ```
#[derive(Debug)]
pub struct MatchState {
    seed: u64,
    deck: Deck,
    boards: [Board; 2],
    scores: [u32; 2],
    round: u32,
    turn: Player,
    pass_count: u8,
    last_action: LastAction,
}

impl MatchState {
    /// Starts a match with both boards dealt. Without a seed one is drawn at random.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut deck = Deck::new_with_seed(seed);
        let mut first = Board::default();
        let mut second = Board::default();
        deal_boards(&mut deck, &mut first, &mut second);
        Self::from_parts(seed, deck, [first, second])
    }

    /// Starts a match from explicit boards. The seed still drives later redeals.
    pub fn with_boards(
        seed: u64,
        first: [Unit; BOARD_SLOTS],
        second: [Unit; BOARD_SLOTS],
    ) -> Self {
        let deck = Deck::new_with_seed(seed);
        Self::from_parts(seed, deck, [Board::new(first), Board::new(second)])
    }

    fn from_parts(seed: u64, deck: Deck, boards: [Board; 2]) -> Self {
        Self {
            seed,
            deck,
            boards,
            scores: [0, 0],
            round: 1,
            turn: Player::One,
            pass_count: 0,
            last_action: LastAction::default(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn board(&self, player: Player) -> &Board {
        &self.boards[player.index()]
    }
    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }
    pub fn round(&self) -> u32 {
        self.round
    }
    pub fn turn(&self) -> Player {
        self.turn
    }
    pub fn pass_count(&self) -> u8 {
        self.pass_count
    }
    pub fn last_action(&self) -> LastAction {
        self.last_action
    }

    /// Attacks from `from` on the active player's board to `to` on the
    /// opponent's board. Returns `false` and leaves boards, scores and turn
    /// untouched when the indices are out of range or the attack is illegal.
    pub fn apply_move(&mut self, from: usize, to: usize) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// [`apply_move`](Self::apply_move) with the rejection reason.
    pub fn try_move(&mut self, from: usize, to: usize) -> Result<MoveOutcome, GameError> {
        let slots = Slot::new(from).and_then(|f| Slot::new(to).map(|t| (f, t)));
        match slots {
            Ok((from, to)) => self.attack(from, to),
            Err(e) => {
                self.last_action.clear();
                Err(e)
            }
        }
    }

    fn attack(&mut self, from: Slot, to: Slot) -> Result<MoveOutcome, GameError> {
        let player = self.turn;
        let opponent = player.other();
        let attacker = self.boards[player.index()].get(from);
        let defender = self.boards[opponent.index()].get(to);

        // Recorded even when the attack fails
        self.last_action = LastAction {
            attacker: Some(attacker),
            defender: Some(defender),
            move_made: false,
        };
        validate_attack(attacker, defender)?;

        self.last_action.move_made = true;
        self.boards[opponent.index()].clear_slot(to);
        let scored = awards_point(attacker, defender);
        if scored {
            self.scores[player.index()] += 1;
        }
        self.turn = opponent;
        self.pass_count = 0;
        Ok(MoveOutcome {
            player,
            attacker,
            defender,
            scored,
        })
    }

    /// Passes the turn. The second consecutive pass deals a new round unless
    /// the match is over; the pass counter then stays at 2 so the next frame
    /// still announces the new round.
    pub fn pass_turn(&mut self) {
        self.last_action.clear();
        if self.pass_count == PASSES_PER_ROUND {
            self.pass_count = 0;
        }
        self.pass_count += 1;
        self.turn = self.turn.other();

        if self.pass_count == PASSES_PER_ROUND && !self.is_game_over() {
            self.round += 1;
            let [first, second] = &mut self.boards;
            deal_boards(&mut self.deck, first, second);
        }
    }

    /// Applies one raw command line, returning the rejection reason on failure.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameOver`] - the match has already ended; nothing changes
    /// - [`GameError::WrongLength`] / [`GameError::InvalidColumn`] - malformed text
    /// - [`GameError::EmptyAttacker`] / [`GameError::IllegalAttack`] - rejected by the combat rules
    pub fn execute(&mut self, text: &str) -> Result<CommandOutcome, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        let command = match Command::parse(text) {
            Ok(command) => command,
            Err(e) => {
                self.last_action.clear();
                return Err(e);
            }
        };
        match command {
            Command::Pass => {
                let player = self.turn;
                let round = self.round;
                self.pass_turn();
                Ok(CommandOutcome::Passed {
                    player,
                    new_round: self.round != round,
                })
            }
            Command::Attack { from, to } => self.attack(from, to).map(CommandOutcome::Attacked),
        }
    }

    /// Applies one raw command line; `true` when it was accepted.
    pub fn process_command(&mut self, text: &str) -> bool {
        self.execute(text).is_ok()
    }

    pub fn is_game_over(&self) -> bool {
        self.scores.iter().any(|&s| s >= WINNING_SCORE) || self.round >= FINAL_ROUND
    }

    /// How the match ended, or `None` while it is still running.
    pub fn outcome(&self) -> Option<MatchOutcome> {
        let [s1, s2] = self.scores;
        if s1 >= WINNING_SCORE {
            return Some(MatchOutcome::Winner {
                player: Player::One,
                score: s1,
            });
        }
        if s2 >= WINNING_SCORE {
            return Some(MatchOutcome::Winner {
                player: Player::Two,
                score: s2,
            });
        }
        if self.round < FINAL_ROUND {
            return None;
        }
        // A scoreless finish is a loss for both, not a draw
        let outcome = if s1 == 0 && s2 == 0 {
            MatchOutcome::BothLost
        } else if s1 > s2 {
            MatchOutcome::Winner {
                player: Player::One,
                score: s1,
            }
        } else if s2 > s1 {
            MatchOutcome::Winner {
                player: Player::Two,
                score: s2,
            }
        } else {
            MatchOutcome::Draw
        };
        Some(outcome)
    }

    /// Text for the frame's message box.
    pub fn status_message(&self) -> String {
        if let Some(outcome) = self.outcome() {
            return outcome.message();
        }
        if self.round == 1 && !self.last_action.move_made && self.pass_count == 0 {
            return "NEW GAME".to_string();
        }
        if self.pass_count == PASSES_PER_ROUND {
            return "NEW ROUND".to_string();
        }
        if self.pass_count > 0 {
            // The turn already flipped, so the passer is the waiting player
            return format!("{} PASSED", self.turn.other().label());
        }
        match self.last_action {
            LastAction {
                attacker: Some(attacker),
                defender: Some(defender),
                move_made: true,
            } => format!(
                "{}: {} TAKES {}",
                self.turn.other().label(),
                attacker.name(),
                defender.name()
            ),
            _ => String::new(),
        }
    }
}
