//! Player strategies: who (or what) picks the next move.
//!
//! An [`Agent`] is built from a [`PlayerConfig`] and dispatches on it each
//! turn. Humans are reached through the [`HumanInput`] trait so the library
//! never touches stdin itself.

use crate::config::PlayerConfig;
use crate::error::PlayerError;
use crate::minimax::Minimax;
use crate::{GameState, Player};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::debug;

/// Source of moves for a human player.
pub trait HumanInput<S: GameState> {
    /// Produces one move for the player to move, or fails.
    ///
    /// The move does not have to be legal; the agent checks it.
    fn read_move(&mut self, state: &S) -> Result<S::Move, PlayerError>;
}

#[derive(Debug, Clone)]
enum Strategy {
    Human,
    Random(Xoshiro256PlusPlus),
    Minimax(Minimax),
}

/// One seat at the table: a player identity plus the policy that moves for it.
#[derive(Debug, Clone)]
pub struct Agent {
    player: Player,
    config: PlayerConfig,
    strategy: Strategy,
}

impl Agent {
    pub fn new(player: Player, config: PlayerConfig) -> Self {
        Self::with_seed(player, config, rand::rng().random())
    }

    /// Builds an agent whose random choices are reproducible.
    pub fn with_seed(player: Player, config: PlayerConfig, seed: u64) -> Self {
        let strategy = match config {
            PlayerConfig::Human => Strategy::Human,
            PlayerConfig::Random => Strategy::Random(Xoshiro256PlusPlus::seed_from_u64(seed)),
            PlayerConfig::Minimax(search) => Strategy::Minimax(Minimax::with_seed(search, seed)),
        };
        Self {
            player,
            config,
            strategy,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn is_human(&self) -> bool {
        self.config.is_human()
    }

    /// Picks this agent's move in `state`.
    ///
    /// A forced pass is returned straight away for every strategy. The state is
    /// handed back unchanged; the search only mutates it temporarily.
    pub fn get_move<S: GameState>(
        &mut self,
        state: &mut S,
        input: &mut dyn HumanInput<S>,
    ) -> Result<S::Move, PlayerError> {
        if let Some(pass) = state.forced_pass() {
            debug!(player = self.player.number(), "no placement available, passing");
            return Ok(pass);
        }

        let mv = match &mut self.strategy {
            Strategy::Human => {
                let mv = input.read_move(state)?;
                if !state.is_valid(&mv) {
                    return Err(PlayerError::InvalidInput(format!("{} is not a legal move", mv)));
                }
                mv
            }
            Strategy::Random(rng) => state
                .valid_moves()
                .choose(rng)
                .cloned()
                .ok_or(crate::SearchError::NoLegalMoves)?,
            Strategy::Minimax(engine) => engine.choose_move(state, self.player)?,
        };
        debug!(%mv, player = self.player.number(), strategy = %self.config, "agent moved");
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::games::othello::{OthelloMove, OthelloState};
    use crate::games::tictactoe::{TicTacToeMove, TicTacToeState};

    /// Replays a fixed list of moves and fails once it runs out.
    struct Scripted(Vec<TicTacToeMove>);

    impl HumanInput<TicTacToeState> for Scripted {
        fn read_move(&mut self, _state: &TicTacToeState) -> Result<TicTacToeMove, PlayerError> {
            if self.0.is_empty() {
                return Err(PlayerError::InputClosed);
            }
            Ok(self.0.remove(0))
        }
    }

    struct NoInput;

    impl<S: GameState> HumanInput<S> for NoInput {
        fn read_move(&mut self, _state: &S) -> Result<S::Move, PlayerError> {
            Err(PlayerError::InputClosed)
        }
    }

    #[test]
    fn test_human_moves_are_checked() {
        let mut game = TicTacToeState::default();
        game.apply_move(&TicTacToeMove(1, 1));
        let mut agent = Agent::new(Player::Two, PlayerConfig::Human);
        let mut input = Scripted(vec![TicTacToeMove(1, 1), TicTacToeMove(0, 0)]);

        assert!(matches!(
            agent.get_move(&mut game, &mut input),
            Err(PlayerError::InvalidInput(_))
        ));
        assert_eq!(agent.get_move(&mut game, &mut input).unwrap(), TicTacToeMove(0, 0));
        assert_eq!(
            agent.get_move(&mut game, &mut input),
            Err(PlayerError::InputClosed)
        );
    }

    #[test]
    fn test_random_picks_legal_moves() {
        let mut agent = Agent::with_seed(Player::One, PlayerConfig::Random, 42);
        let mut game = TicTacToeState::default();
        while !game.condition().is_over() {
            let mv = agent.get_move(&mut game, &mut NoInput).unwrap();
            assert!(game.is_valid(&mv));
            game.apply_move(&mv);
        }
    }

    #[test]
    fn test_minimax_plays_for_its_own_side() {
        // O to move: O holds b1 b2 and wins on b3
        let mut game = TicTacToeState::default();
        for (r, c) in [(0, 0), (1, 0), (2, 2), (1, 1), (2, 0)] {
            game.apply_move(&TicTacToeMove(r, c));
        }
        let config = PlayerConfig::Minimax(SearchConfig::heuristic(1).unwrap());
        let mut agent = Agent::with_seed(Player::Two, config, 3);
        assert_eq!(agent.get_move(&mut game, &mut NoInput).unwrap(), TicTacToeMove(1, 2));
    }

    #[test]
    fn test_forced_pass_skips_strategy() {
        // the four starting pieces fill a 2x2 board, so nobody can place
        let mut game = OthelloState::new(2, 2);
        assert_eq!(game.forced_pass(), Some(OthelloMove::Pass));

        let mut human = Agent::new(Player::One, PlayerConfig::Human);
        assert_eq!(human.get_move(&mut game, &mut NoInput).unwrap(), OthelloMove::Pass);
        let mut engine = Agent::new(Player::One, PlayerConfig::Minimax(SearchConfig::default()));
        assert_eq!(engine.get_move(&mut game, &mut NoInput).unwrap(), OthelloMove::Pass);
    }
}
