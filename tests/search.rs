use arena::games::connect4::{Connect4Move, Connect4State};
use arena::games::tictactoe::{TicTacToeMove, TicTacToeState};
use arena::{GameKind, GameState, Minimax, MoveWrapper, Player, SearchConfig, WIN_SCORE};

fn play_text(kind: GameKind, moves: &[&str]) -> arena::GameWrapper {
    let mut game = kind.build(None, None, None).unwrap();
    for text in moves {
        let mv = game.parse_move(text).unwrap();
        game.try_apply_move(&mv).unwrap();
    }
    game
}

#[test]
fn heuristic_search_finds_connect4_win_regardless_of_seed() {
    // X has three in the bottom row at columns 1-3; column 4 wins
    let moves = ["1", "1", "2", "2", "3", "3"];
    for seed in 0..16 {
        let mut game = play_text(GameKind::Connect4, &moves);
        let before = game.clone();
        let mut engine = Minimax::with_seed(SearchConfig::heuristic(1).unwrap(), seed);
        let mv = engine.choose_move(&mut game, Player::One).unwrap();
        assert_eq!(mv, MoveWrapper::Connect4(Connect4Move(3)), "seed {}", seed);
        assert_eq!(game, before);
    }
}

#[test]
fn deeper_search_blocks_connect4_threat() {
    // O has three stacked in column 7; X must drop there
    let moves = ["1", "7", "2", "7", "1", "7"];
    let mut game = play_text(GameKind::Connect4, &moves);
    let mut engine = Minimax::with_seed(SearchConfig::heuristic(2).unwrap(), 11);
    let mv = engine.choose_move(&mut game, Player::One).unwrap();
    assert_eq!(mv, MoveWrapper::Connect4(Connect4Move(6)));
}

#[test]
fn rollout_estimate_of_an_immediate_win() {
    // 2x2 board, two in a row wins: every move for X wins at once
    let mut game = TicTacToeState::new(2, 2, 2);
    game.apply_move(&TicTacToeMove(0, 0));
    game.apply_move(&TicTacToeMove(0, 1));
    let mut engine = Minimax::with_seed(SearchConfig::rollout(0, 1, 1).unwrap(), 3);

    let one_ply = f64::from(WIN_SCORE) / 2.0 / 10.0;
    assert_eq!(engine.rollout_estimate(&mut game, Player::One, 5, 1).unwrap(), one_ply);
    assert_eq!(engine.rollout_estimate(&mut game, Player::One, 500, 50).unwrap(), one_ply);
    assert_eq!(engine.rollout_estimate(&mut game, Player::Two, 50, 50).unwrap(), -one_ply);
    assert_eq!(game.move_count(), 2);
}

#[test]
fn rollout_estimate_rises_once_the_win_is_within_reach() {
    // on an empty 2x2 board with lines of two, X always wins on its second piece
    let mut game = TicTacToeState::new(2, 2, 2);
    let mut engine = Minimax::with_seed(SearchConfig::rollout(0, 1, 1).unwrap(), 8);

    let short = engine.rollout_estimate(&mut game, Player::One, 20, 2).unwrap();
    let long = engine.rollout_estimate(&mut game, Player::One, 20, 3).unwrap();
    assert_eq!(short, 0.0);
    assert_eq!(long, f64::from(WIN_SCORE) / 4.0 / 10.0);
    assert!(long > short);
    assert_eq!(game, TicTacToeState::new(2, 2, 2));
}

#[test]
fn rollout_leaves_pick_the_winning_move() {
    let mut game = TicTacToeState::default();
    for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        game.apply_move(&TicTacToeMove(r, c));
    }
    let mut engine = Minimax::with_seed(SearchConfig::rollout(1, 8, 9).unwrap(), 21);
    assert_eq!(engine.choose_move(&mut game, Player::One).unwrap(), TicTacToeMove(0, 2));
}

#[test]
fn search_restores_every_variant() {
    for kind in GameKind::ALL {
        let mut game = kind.build(None, None, None).unwrap();
        let mut engine = Minimax::with_seed(SearchConfig::rollout(2, 3, 6).unwrap(), 5);
        for _ in 0..4 {
            if game.condition().is_over() {
                break;
            }
            let before = game.clone();
            let to_move = game.current_player();
            let mv = engine.choose_move(&mut game, to_move).unwrap();
            assert_eq!(game, before, "{} search left the state changed", kind);
            game.try_apply_move(&mv).unwrap();
        }
    }
}

#[test]
fn connect4_heuristic_is_zero_sum() {
    let mut game = Connect4State::default();
    game.apply_move(&Connect4Move(3));
    assert!(game.static_score(Player::One) > 0);
    assert_eq!(game.static_score(Player::One), -game.static_score(Player::Two));
}
