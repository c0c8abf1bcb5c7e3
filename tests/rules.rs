use arena::games::connect4::{Connect4Move, Connect4State};
use arena::games::othello::{OthelloMove, OthelloState};
use arena::games::tictactoe::{TicTacToeMove, TicTacToeState};
use arena::{GameCondition, GameError, GameKind, GameState, GameWrapper, Player};
use proptest::prelude::*;

/// Plays `choices` as indices into the legal move list, checking that every
/// move undoes cleanly before it is replayed.
fn check_apply_undo_law<S: GameState + Clone + PartialEq + std::fmt::Debug>(
    mut game: S,
    choices: &[usize],
) -> Result<(), TestCaseError> {
    let start = game.clone();
    let mut applied = 0;
    for &choice in choices {
        if game.condition().is_over() {
            break;
        }
        let moves = game.valid_moves();
        prop_assert!(!moves.is_empty());
        let mv = moves[choice % moves.len()].clone();

        let before = game.clone();
        game.apply_move(&mv);
        game.undo_move().map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(&game, &before);

        game.apply_move(&mv);
        applied += 1;
        prop_assert_eq!(game.move_count(), applied);
        prop_assert_eq!(game.history_len(), applied);
    }

    for _ in 0..applied {
        game.undo_move().map_err(|e| TestCaseError::fail(e.to_string()))?;
    }
    prop_assert_eq!(&game, &start);
    prop_assert_eq!(game.undo_move(), Err(GameError::EmptyHistory));
    Ok(())
}

fn game_kind() -> impl Strategy<Value = GameKind> {
    prop_oneof![
        Just(GameKind::TicTacToe),
        Just(GameKind::Connect4),
        Just(GameKind::Othello),
    ]
}

proptest! {
    #[test]
    fn apply_then_undo_is_identity(
        kind in game_kind(),
        rows in 4usize..8,
        cols in 4usize..8,
        choices in prop::collection::vec(any::<usize>(), 0..70),
    ) {
        let game = kind.build(Some(rows), Some(cols), None).unwrap();
        check_apply_undo_law(game, &choices)?;
    }

    #[test]
    fn default_games_obey_the_law(choices in prop::collection::vec(any::<usize>(), 0..70)) {
        check_apply_undo_law(TicTacToeState::default(), &choices)?;
        check_apply_undo_law(Connect4State::default(), &choices)?;
        check_apply_undo_law(OthelloState::default(), &choices)?;
    }

    #[test]
    fn two_passes_end_othello_by_piece_count(
        size in 3usize..7,
        choices in prop::collection::vec(any::<usize>(), 0..80),
    ) {
        let mut game = OthelloState::new(size, size);
        for choice in choices {
            if game.condition().is_over() {
                break;
            }
            let moves = game.valid_moves();
            game.apply_move(&moves[choice % moves.len()]);
        }
        if game.consecutive_passes() >= 2 {
            let (one, two) = game.piece_counts();
            let expected = match one.cmp(&two) {
                std::cmp::Ordering::Greater => GameCondition::Won(Player::One),
                std::cmp::Ordering::Less => GameCondition::Won(Player::Two),
                std::cmp::Ordering::Equal => GameCondition::Draw,
            };
            prop_assert_eq!(game.condition(), expected);
        }
    }

    #[test]
    fn move_text_round_trips(r in 0usize..26, c in 0usize..40) {
        let mv = TicTacToeMove(r, c);
        prop_assert_eq!(mv.to_string().parse::<TicTacToeMove>().unwrap(), mv);
        let place = OthelloMove::Place(r, c);
        prop_assert_eq!(place.to_string().parse::<OthelloMove>().unwrap(), place);
        let drop = Connect4Move(c);
        prop_assert_eq!(drop.to_string().parse::<Connect4Move>().unwrap(), drop);
    }
}

#[test]
fn alignment_win_on_third_placement() {
    let mut game = TicTacToeState::default();
    game.apply_move(&TicTacToeMove(0, 0));
    game.apply_move(&TicTacToeMove(2, 2));
    game.apply_move(&TicTacToeMove(0, 1));
    game.apply_move(&TicTacToeMove(2, 1));
    assert_eq!(game.condition(), GameCondition::Ongoing);
    game.apply_move(&TicTacToeMove(0, 2));
    assert_eq!(game.condition(), GameCondition::Won(Player::One));
}

#[test]
fn connection_fills_bottom_up() {
    let mut game = Connect4State::default();
    for expected_row in [5, 4, 3, 2] {
        game.apply_move(&Connect4Move(0));
        assert_eq!(game.last_move(), Some((expected_row, 0)));
    }
}

#[test]
fn othello_opening_has_four_adjacent_moves() {
    let game = GameKind::Othello.build(None, None, None).unwrap();
    let moves = game.valid_moves();
    assert_eq!(moves.len(), 4);
    for mv in moves {
        let (r, c) = match mv {
            arena::MoveWrapper::Othello(OthelloMove::Place(r, c)) => (r, c),
            other => panic!("unexpected opening move {:?}", other),
        };
        let touches_center = (3..=4).any(|cr: usize| {
            (3..=4).any(|cc: usize| r.abs_diff(cr) <= 1 && c.abs_diff(cc) <= 1)
        });
        assert!(touches_center, "{} is not next to the center", mv);
    }
}

#[test]
fn terminal_games_reject_moves() {
    let mut game = GameKind::TicTacToe.build(None, None, None).unwrap();
    for text in ["a1", "b1", "a2", "b2", "a3"] {
        let mv = game.parse_move(text).unwrap();
        game.try_apply_move(&mv).unwrap();
    }
    assert!(game.condition().is_over());
    let late = game.parse_move("c3").unwrap();
    assert_eq!(game.try_apply_move(&late), Err(GameError::GameOver));
    assert_eq!(game.move_count(), 5);
}

#[test]
fn othello_tiny_board_ends_after_two_forced_passes() {
    let mut game: GameWrapper = GameKind::Othello.build(Some(2), Some(2), None).unwrap();
    let pass = game.forced_pass().unwrap();
    game.apply_move(&pass);
    assert_eq!(game.condition(), GameCondition::Ongoing);
    let pass = game.forced_pass().unwrap();
    game.apply_move(&pass);
    assert_eq!(game.condition(), GameCondition::Draw);
}
