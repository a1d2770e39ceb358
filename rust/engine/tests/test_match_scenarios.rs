use coexist_engine::errors::GameError;
use coexist_engine::game::{CommandOutcome, MatchOutcome, MatchState};
use coexist_engine::player::Player;
use coexist_engine::units::Unit::{self, Arrow, Axe, Empty, Hammer, Sword};

fn p1_axe_vs(p2_slot_b: Unit) -> MatchState {
    MatchState::with_boards(
        99,
        [Axe, Sword, Hammer, Arrow, Axe, Sword],
        [Hammer, p2_slot_b, Sword, Axe, Arrow, Hammer],
    )
}

#[test]
fn axe_takes_hammer_and_scores() {
    let mut state = p1_axe_vs(Hammer);
    assert!(state.process_command("AB"));
    assert_eq!(state.board(Player::Two).units()[1], Empty);
    assert_eq!(state.score(Player::One), 1);
    assert_eq!(state.score(Player::Two), 0);
    assert_eq!(state.turn(), Player::Two);
    assert!(state
        .generate_frame(Player::Two)
        .contains("PLAYER 1: AXE TAKES HAMMER"));
}

#[test]
fn axe_against_sword_is_rejected_without_mutation() {
    let mut state = p1_axe_vs(Sword);
    let boards = (*state.board(Player::One), *state.board(Player::Two));

    assert!(!state.process_command("AB"));
    assert_eq!((*state.board(Player::One), *state.board(Player::Two)), boards);
    assert_eq!(state.score(Player::One), 0);
    assert_eq!(state.score(Player::Two), 0);
    assert_eq!(state.turn(), Player::One);
    assert_eq!(
        state.execute("ab"),
        Err(GameError::IllegalAttack {
            attacker: Axe,
            defender: Sword
        })
    );
}

#[test]
fn two_passes_deal_a_new_round() {
    let mut state = MatchState::new(Some(2024));
    assert!(state.process_command("PS"));
    assert_eq!(state.pass_count(), 1);
    assert_eq!(state.round(), 1);

    assert_eq!(
        state.execute("ps"),
        Ok(CommandOutcome::Passed {
            player: Player::Two,
            new_round: true
        })
    );
    assert_eq!(state.round(), 2);
    assert_eq!(state.pass_count(), 2);
    assert_eq!(state.board(Player::One).occupied(), 6);
    assert_eq!(state.board(Player::Two).occupied(), 6);
    assert!(state.generate_frame(Player::One).contains("NEW ROUND"));
}

#[test]
fn redeal_replaces_destroyed_units() {
    let mut state = p1_axe_vs(Hammer);
    assert!(state.process_command("AB"));
    assert!(state.process_command("PS"));
    assert!(state.process_command("PS"));
    assert_eq!(state.round(), 2);
    assert_eq!(state.board(Player::Two).occupied(), 6);
    // Scores survive the redeal
    assert_eq!(state.score(Player::One), 1);
}

#[test]
fn move_between_passes_restarts_the_cycle() {
    let mut state = p1_axe_vs(Hammer);
    assert!(state.process_command("PS")); // P1 passes
    assert!(state.process_command("ED")); // P2 ARROW takes ARROW
    assert_eq!(state.pass_count(), 0);
    assert!(state.process_command("PS")); // P1 passes
    assert_eq!(state.pass_count(), 1);
    assert_eq!(state.round(), 1);
}

#[test]
fn turn_flips_only_on_accepted_commands() {
    let mut state = p1_axe_vs(Sword);
    let attempts = ["AB", "", "ABC", "GG", "a9", "FA", "ps", "CA"];
    let mut expected = Player::One;
    for cmd in attempts {
        let accepted = state.process_command(cmd);
        if accepted {
            expected = expected.other();
        }
        assert_eq!(state.turn(), expected, "after {cmd:?}");
    }
}

#[test]
fn scoreless_fifth_round_is_a_loss_for_both() {
    let mut state = MatchState::new(Some(5));
    for _ in 0..8 {
        assert!(state.process_command("PS"));
    }
    assert_eq!(state.round(), 5);
    assert!(state.is_game_over());
    assert_eq!(state.outcome(), Some(MatchOutcome::BothLost));

    let frame = state.generate_frame(Player::One);
    assert!(frame.contains("GAME OVER - BOTH PLAYERS LOST"));
    assert!(!frame.contains("DRAW"));

    // Round five is never played
    assert!(!state.process_command("PS"));
    assert_eq!(state.round(), 5);
}

#[test]
fn tied_fifth_round_is_a_draw() {
    let mut state = MatchState::with_boards(
        8,
        [Axe, Hammer, Sword, Sword, Sword, Sword],
        [Hammer, Sword, Axe, Sword, Sword, Sword],
    );
    assert!(state.process_command("AA")); // P1 AXE takes HAMMER
    assert!(state.process_command("CB")); // P2 AXE takes HAMMER
    for _ in 0..8 {
        state.process_command("PS");
    }
    assert!(state.is_game_over());
    assert_eq!(state.outcome(), Some(MatchOutcome::Draw));
    assert!(state
        .generate_frame(Player::Two)
        .contains("GAME OVER - DRAW (TIED POINTS IN ROUND 5)"));
}

#[test]
fn empty_attacker_cannot_move() {
    let mut state = MatchState::with_boards(
        1,
        [Empty, Empty, Empty, Empty, Empty, Arrow],
        [Axe, Axe, Axe, Axe, Axe, Axe],
    );
    assert_eq!(state.execute("AA"), Err(GameError::EmptyAttacker));
    assert!(state.process_command("FA"));
}
