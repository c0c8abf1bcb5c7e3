//! Fixed-perspective minimax search.
//!
//! The search owns no game state: it takes the live state by `&mut`, applies
//! each candidate move in place, recurses, and undoes the move again. After
//! every apply/undo pair the history is checked against the move counter and a
//! mismatch aborts the search.
//!
//! There is no pruning. Every node at depth `d` is expanded, so keep depths small.
//!
//! Scores are from one fixed player's point of view for the whole search:
//! - a win scores `WIN_SCORE - depth`, so quicker wins score higher,
//! - a loss scores `-WIN_SCORE + depth`, so later losses score higher,
//! - a draw scores 0,
//! - a running game at the cutoff scores the heuristic or the rollout estimate.
//!
//! Nodes where the perspective player moves take the maximum of their children,
//! all others the minimum.

use crate::config::{LeafEval, SearchConfig};
use crate::error::SearchError;
use crate::{GameCondition, GameState, Player, WIN_SCORE};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, trace};

/// Minimax engine with its own random source.
///
/// The random source shuffles root moves (which also breaks ties between equal
/// scores) and drives rollouts.
#[derive(Debug, Clone)]
pub struct Minimax {
    config: SearchConfig,
    rng: Xoshiro256PlusPlus,
}

impl Minimax {
    /// Creates an engine seeded from the thread-local generator.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Creates an engine whose choices are reproducible for a given seed.
    pub fn with_seed(config: SearchConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Picks the best move for `perspective` in the current position.
    ///
    /// A single legal move is returned without searching. Otherwise the moves are
    /// shuffled, each is scored with a search of the configured depth, and the
    /// first move with the highest score wins.
    pub fn choose_move<S: GameState>(
        &mut self,
        state: &mut S,
        perspective: Player,
    ) -> Result<S::Move, SearchError> {
        if state.condition().is_over() {
            return Err(crate::GameError::GameOver.into());
        }

        let mut moves = state.valid_moves();
        if moves.len() == 1 {
            return Ok(moves.remove(0));
        }
        moves.shuffle(&mut self.rng);

        let depth = self.config.depth();
        let mut best: Option<(S::Move, f64)> = None;
        for mv in moves {
            let score = self.score_move(state, &mv, 0, depth, perspective)?;
            trace!(%mv, score, "root move scored");
            if best.as_ref().map_or(true, |(_, top)| score > *top) {
                best = Some((mv, score));
            }
        }

        let (mv, score) = best.ok_or(SearchError::NoLegalMoves)?;
        debug!(%mv, score, depth, player = perspective.number(), "minimax chose move");
        Ok(mv)
    }

    /// Scores the current position for `perspective`.
    ///
    /// `depth_used` is how many plies deep this node is; `depth_budget` is how
    /// many more plies to expand before scoring at the leaf.
    pub fn minimax<S: GameState>(
        &mut self,
        state: &mut S,
        depth_used: u32,
        depth_budget: u32,
        perspective: Player,
    ) -> Result<f64, SearchError> {
        let win = f64::from(WIN_SCORE);
        match state.condition() {
            GameCondition::Won(p) if p == perspective => return Ok(win - f64::from(depth_used)),
            GameCondition::Won(_) => return Ok(-win + f64::from(depth_used)),
            GameCondition::Draw => return Ok(0.0),
            GameCondition::Ongoing => {}
        }

        if depth_budget == 0 {
            return match self.config.leaf() {
                LeafEval::Heuristic => Ok(f64::from(state.static_score(perspective))),
                LeafEval::Rollout { samples, max_depth } => {
                    self.rollout_estimate(state, perspective, samples, max_depth)
                }
            };
        }

        let moves = state.valid_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let maximizing = state.current_player() == perspective;
        let mut best = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        for mv in &moves {
            let score = self.score_move(state, mv, depth_used + 1, depth_budget - 1, perspective)?;
            best = if maximizing { best.max(score) } else { best.min(score) };
        }
        Ok(best)
    }

    /// Averages `samples` random playouts of at most `max_depth` plies.
    ///
    /// A playout that ends in a win after `k` plies scores
    /// `WIN_SCORE / (k + 1) / 10`, a loss the negative of that, and a draw or
    /// an unfinished playout 0. The state is restored after every playout.
    pub fn rollout_estimate<S: GameState>(
        &mut self,
        state: &mut S,
        perspective: Player,
        samples: u32,
        max_depth: u32,
    ) -> Result<f64, SearchError> {
        if samples == 0 {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for _ in 0..samples {
            total += self.rollout(state, perspective, max_depth)?;
        }
        Ok(total / f64::from(samples))
    }

    fn rollout<S: GameState>(
        &mut self,
        state: &mut S,
        perspective: Player,
        max_depth: u32,
    ) -> Result<f64, SearchError> {
        let mut plies = 0;
        while !state.condition().is_over() && plies < max_depth {
            let Some(mv) = state.valid_moves().choose(&mut self.rng).cloned() else {
                break;
            };
            state.apply_move(&mv);
            plies += 1;
        }

        let outcome = state.condition();
        for _ in 0..plies {
            state.undo_move()?;
        }
        state.check_consistency()?;

        let weight = f64::from(WIN_SCORE) / f64::from(plies + 1) / 10.0;
        Ok(match outcome {
            GameCondition::Won(p) if p == perspective => weight,
            GameCondition::Won(_) => -weight,
            _ => 0.0,
        })
    }

    /// Applies `mv`, scores the child with [`Minimax::minimax`], then undoes `mv`.
    fn score_move<S: GameState>(
        &mut self,
        state: &mut S,
        mv: &S::Move,
        depth_used: u32,
        depth_budget: u32,
        perspective: Player,
    ) -> Result<f64, SearchError> {
        state.apply_move(mv);
        let score = self.minimax(state, depth_used, depth_budget, perspective);
        state.undo_move()?;
        let score = score?;
        state.check_consistency()?;
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::games::connect4::{Connect4Move, Connect4State};
    use crate::GameError;
    use crate::games::tictactoe::{TicTacToeMove, TicTacToeState};

    fn tictactoe(moves: &[(usize, usize)]) -> TicTacToeState {
        let mut game = TicTacToeState::default();
        for &(r, c) in moves {
            game.apply_move(&TicTacToeMove(r, c));
        }
        game
    }

    #[test]
    fn test_terminal_scores_depend_on_depth() {
        let mut engine = Minimax::with_seed(SearchConfig::default(), 1);
        // X wins on the top row
        let mut won = tictactoe(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert_eq!(engine.minimax(&mut won, 3, 0, Player::One).unwrap(), 9997.0);
        assert_eq!(engine.minimax(&mut won, 3, 0, Player::Two).unwrap(), -9997.0);
    }

    #[test]
    fn test_draw_scores_zero() {
        let mut engine = Minimax::with_seed(SearchConfig::default(), 1);
        let mut draw = tictactoe(&[
            (0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2),
        ]);
        assert_eq!(draw.condition(), GameCondition::Draw);
        assert_eq!(engine.minimax(&mut draw, 1, 4, Player::One).unwrap(), 0.0);
    }

    #[test]
    fn test_takes_immediate_win() {
        // X: a1 a2, O: b1 b2; X to move, a3 wins
        for seed in 0..20 {
            let mut game = tictactoe(&[(0, 0), (1, 0), (0, 1), (1, 1)]);
            let mut engine = Minimax::with_seed(SearchConfig::heuristic(1).unwrap(), seed);
            let mv = engine.choose_move(&mut game, Player::One).unwrap();
            assert_eq!(mv, TicTacToeMove(0, 2), "seed {}", seed);
        }
    }

    #[test]
    fn test_blocks_opponent_win() {
        // X: a1 c3, O: b1 b2; X to move and must block b3
        for seed in 0..10 {
            let mut game = tictactoe(&[(0, 0), (1, 0), (2, 2), (1, 1)]);
            let mut engine = Minimax::with_seed(SearchConfig::heuristic(1).unwrap(), seed);
            let mv = engine.choose_move(&mut game, Player::One).unwrap();
            assert_eq!(mv, TicTacToeMove(1, 2), "seed {}", seed);
        }
    }

    #[test]
    fn test_search_restores_state() {
        let mut game = Connect4State::default();
        for c in [3, 3, 4] {
            game.apply_move(&Connect4Move(c));
        }
        let before = game.clone();
        let mut engine = Minimax::with_seed(SearchConfig::heuristic(3).unwrap(), 7);
        engine.choose_move(&mut game, Player::Two).unwrap();
        assert_eq!(game, before);

        let mut engine = Minimax::with_seed(SearchConfig::rollout(1, 4, 10).unwrap(), 7);
        engine.choose_move(&mut game, Player::Two).unwrap();
        assert_eq!(game, before);
    }

    #[test]
    fn test_single_move_skips_search() {
        // one empty cell left
        let mut game = tictactoe(&[
            (0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0),
        ]);
        let mut engine = Minimax::with_seed(SearchConfig::heuristic(5).unwrap(), 3);
        assert_eq!(engine.choose_move(&mut game, Player::One).unwrap(), TicTacToeMove(2, 2));
    }

    #[test]
    fn test_finished_game_is_an_error() {
        let mut won = tictactoe(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        let mut engine = Minimax::with_seed(SearchConfig::default(), 1);
        assert!(matches!(
            engine.choose_move(&mut won, Player::Two),
            Err(SearchError::Game(crate::GameError::GameOver))
        ));
    }

    #[test]
    fn test_rollout_of_forced_win() {
        // 2x2 board, 2 in a row: after X a1, O a2 every X move wins
        let mut game = TicTacToeState::new(2, 2, 2);
        game.apply_move(&TicTacToeMove(0, 0));
        game.apply_move(&TicTacToeMove(0, 1));
        let before = game.clone();
        let mut engine = Minimax::with_seed(SearchConfig::rollout(0, 1, 1).unwrap(), 5);
        let score = engine.rollout_estimate(&mut game, Player::One, 50, 5).unwrap();
        assert_eq!(score, 500.0);
        let score = engine.rollout_estimate(&mut game, Player::Two, 50, 5).unwrap();
        assert_eq!(score, -500.0);
        assert_eq!(game, before);
    }

    #[test]
    fn test_rollout_depth_limit_scores_zero() {
        let mut game = Connect4State::default();
        let mut engine = Minimax::with_seed(SearchConfig::default(), 9);
        // no game of Connect 4 can end within 3 plies
        let score = engine.rollout_estimate(&mut game, Player::One, 20, 3).unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(game, Connect4State::default());
    }

    /// A two-move game whose undo forgets to drop its history record.
    #[derive(Debug, Clone)]
    struct LeakyUndo {
        board: Board,
        moves: usize,
        history: Vec<usize>,
    }

    impl GameState for LeakyUndo {
        type Move = usize;

        fn reset(&mut self) {
            self.moves = 0;
            self.history.clear();
        }

        fn board(&self) -> &Board {
            &self.board
        }

        fn valid_moves(&self) -> Vec<usize> {
            vec![0, 1]
        }

        fn is_valid(&self, mv: &usize) -> bool {
            *mv < 2
        }

        fn apply_move(&mut self, mv: &usize) {
            self.history.push(*mv);
            self.moves += 1;
        }

        fn undo_move(&mut self) -> Result<(), GameError> {
            if self.moves == 0 {
                return Err(GameError::EmptyHistory);
            }
            self.moves -= 1;
            Ok(())
        }

        fn terminal_check(&self) -> GameCondition {
            GameCondition::Ongoing
        }

        fn static_score(&self, _perspective: Player) -> i32 {
            0
        }

        fn condition(&self) -> GameCondition {
            GameCondition::Ongoing
        }

        fn current_player(&self) -> Player {
            if self.moves % 2 == 0 {
                Player::One
            } else {
                Player::Two
            }
        }

        fn move_count(&self) -> usize {
            self.moves
        }

        fn history_len(&self) -> usize {
            self.history.len()
        }

        fn last_move(&self) -> Option<(usize, usize)> {
            None
        }
    }

    #[test]
    fn test_history_mismatch_aborts_search() {
        let mut game = LeakyUndo {
            board: Board::new(1, 2),
            moves: 0,
            history: Vec::new(),
        };
        let mut engine = Minimax::with_seed(SearchConfig::heuristic(2).unwrap(), 4);
        // the innermost undo is the first to leave a stray record
        assert_eq!(
            engine.choose_move(&mut game, Player::One),
            Err(SearchError::Game(GameError::StateInconsistency {
                moves: 2,
                history: 3
            }))
        );

        // rollouts check the history too
        let mut game = LeakyUndo {
            board: Board::new(1, 2),
            moves: 0,
            history: Vec::new(),
        };
        assert!(matches!(
            engine.rollout_estimate(&mut game, Player::One, 3, 4),
            Err(SearchError::Game(GameError::StateInconsistency { .. }))
        ));
    }
}
