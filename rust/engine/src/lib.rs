//! # coexist-engine: Card Battle Rules Core
//!
//! A deterministic rules engine for a two-player card battle. Each player owns
//! a board of six units dealt from a shared 12-card deck; players take turns
//! attacking the opponent's board or passing, and the match ends once a player
//! reaches nine points or the fifth round is entered.
//!
//! ## Core Modules
//!
//! - [`units`] - Unit types, their glyphs and the 12-card deck contents
//! - [`deck`] - Seeded deck shuffling with ChaCha20 RNG
//! - [`rules`] - Combat resolution and scoring
//! - [`board`] - Six-slot boards and column addressing
//! - [`command`] - Parsing of the two-letter wire commands
//! - [`game`] - Match state, turn/pass bookkeeping and win conditions
//! - [`frame`] - Per-viewer text frames and frame reassembly
//! - [`player`] - The two seats of a match
//! - [`errors`] - Error types for rejected commands
//!
//! ## Quick Start
//!
//! ```rust
//! use coexist_engine::game::MatchState;
//! use coexist_engine::player::Player;
//!
//! let mut state = MatchState::new(Some(42));
//!
//! // "AB": attack from my column A to the opponent's column B
//! let accepted = state.process_command("ab");
//! if accepted {
//!     assert_eq!(state.turn(), Player::Two);
//! }
//!
//! println!("{}", state.generate_frame(Player::One));
//! ```
//!
//! ## Combat
//!
//! ```rust
//! use coexist_engine::rules::can_defeat;
//! use coexist_engine::units::Unit;
//!
//! assert!(can_defeat(Unit::Hammer, Unit::Sword));
//! assert!(can_defeat(Unit::Arrow, Unit::Axe));
//! assert!(!can_defeat(Unit::Axe, Unit::Axe));
//! ```

pub mod board;
pub mod command;
pub mod deck;
pub mod errors;
pub mod frame;
pub mod game;
pub mod player;
pub mod rules;
pub mod units;
