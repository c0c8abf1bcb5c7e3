//! # Game Controller Module - Match Driver
//!
//! `GameController` owns the authoritative game state. Every move goes
//! through it and is validated before it is applied, so a bad move from a
//! human never reaches the rules layer. Agents search on a clone of the state.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                    GameController                     │
//! │  • authoritative GameWrapper                          │
//! │  • move validation (GameOver / InvalidMove)           │
//! │  • move history                                       │
//! └───────────────────────────────────────────────────────┘
//!            ▲                              │
//!            │ try_make_move                │ get_state_for_search
//!            │                              ▼
//!   ┌─────────────────┐            ┌─────────────────┐
//!   │  play_game      │◄───────────│  Agent          │
//!   │  play_many_games│    move    │  (cloned state) │
//!   └─────────────────┘            └─────────────────┘
//! ```
//!
//! [`play_game`] runs one match and [`play_many_games`] a series of them,
//! resetting the board in between and tallying the results.

use crate::error::{GameError, PlayerError};
use crate::game_wrapper::{GameWrapper, MoveWrapper};
use crate::player::{Agent, HumanInput};
use crate::{GameCondition, GameState, Player};
use colored::Colorize;
use std::fmt;
use tracing::{debug, info};

/// A single entry in the move history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistoryEntry {
    /// Player who made the move
    pub player: Player,
    /// The move that was made
    pub move_made: MoveWrapper,
    /// Move number (1-indexed)
    pub move_number: usize,
}

/// Current game status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is still in progress
    InProgress,
    /// Game ended with a winner
    Win(Player),
    /// Game ended in a draw
    Draw,
}

impl GameStatus {
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl From<GameCondition> for GameStatus {
    fn from(condition: GameCondition) -> Self {
        match condition {
            GameCondition::Ongoing => GameStatus::InProgress,
            GameCondition::Draw => GameStatus::Draw,
            GameCondition::Won(p) => GameStatus::Win(p),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "Game in progress"),
            GameStatus::Win(p) => write!(f, "{} is the winner!", p),
            GameStatus::Draw => write!(f, "Game is a draw."),
        }
    }
}

/// The central game controller that owns the authoritative game state
#[derive(Debug, Clone)]
pub struct GameController {
    game_state: GameWrapper,
    move_history: Vec<MoveHistoryEntry>,
    status: GameStatus,
}

impl GameController {
    pub fn new(initial_state: GameWrapper) -> Self {
        let status = initial_state.condition().into();
        Self {
            game_state: initial_state,
            move_history: Vec::new(),
            status,
        }
    }

    /// Validate a move without applying it
    pub fn validate_move(&self, mv: &MoveWrapper) -> Result<(), GameError> {
        if self.status.is_game_over() {
            return Err(GameError::GameOver);
        }
        if !self.game_state.is_valid(mv) {
            return Err(GameError::InvalidMove(mv.to_string()));
        }
        Ok(())
    }

    /// Validates the move and applies it if valid, returning the new status.
    pub fn try_make_move(&mut self, mv: MoveWrapper) -> Result<GameStatus, GameError> {
        self.validate_move(&mv)?;

        let player = self.game_state.current_player();
        self.game_state.apply_move(&mv);
        self.game_state.check_consistency()?;
        self.move_history.push(MoveHistoryEntry {
            player,
            move_made: mv,
            move_number: self.move_history.len() + 1,
        });
        self.status = self.game_state.condition().into();
        debug!(%mv, player = player.number(), status = ?self.status, "move applied");
        Ok(self.status)
    }

    /// Get a clone of the game state for an agent to search
    pub fn get_state_for_search(&self) -> GameWrapper {
        self.game_state.clone()
    }

    pub fn state(&self) -> &GameWrapper {
        &self.game_state
    }

    pub fn current_player(&self) -> Player {
        self.game_state.current_player()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    pub fn move_history(&self) -> &[MoveHistoryEntry] {
        &self.move_history
    }

    /// Get legal moves for the current player
    pub fn legal_moves(&self) -> Vec<MoveWrapper> {
        if self.status.is_game_over() {
            Vec::new()
        } else {
            self.game_state.valid_moves()
        }
    }

    /// Resets the game to its starting position and clears the history.
    pub fn reset(&mut self) {
        self.game_state.reset();
        self.move_history.clear();
        self.status = self.game_state.condition().into();
    }

    /// Formats the move list and result as plain text.
    pub fn format_history(&self) -> String {
        let mut output = format!("=== {} Game History ===\n\n", self.game_state.kind());
        if self.move_history.is_empty() {
            output.push_str("No moves made yet.\n");
        }
        for entry in &self.move_history {
            output.push_str(&format!(
                "{}. {} - {}\n",
                entry.move_number, entry.player, entry.move_made
            ));
        }
        match self.status {
            GameStatus::InProgress => output.push_str(&format!(
                "\n(Game in progress - {} to move)\n",
                self.current_player()
            )),
            status => output.push_str(&format!("\nResult: {}\n", status)),
        }
        output
    }
}

/// Renders the board with colored pieces, X in red and O in blue.
pub fn render_board(game: &GameWrapper) -> String {
    game.to_string()
        .chars()
        .map(|ch| match ch {
            'X' => "X".red().bold().to_string(),
            'O' => "O".blue().bold().to_string(),
            other => other.to_string(),
        })
        .collect()
}

/// Results of a series of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub player_one_wins: usize,
    pub player_two_wins: usize,
    pub draws: usize,
}

impl MatchStats {
    pub fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Win(Player::One) => self.player_one_wins += 1,
            GameStatus::Win(Player::Two) => self.player_two_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => {}
        }
    }

    pub fn games(&self) -> usize {
        self.player_one_wins + self.player_two_wins + self.draws
    }
}

impl fmt::Display for MatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "In {} games:", self.games())?;
        writeln!(f, "\tPlayer 1: {} wins", self.player_one_wins)?;
        writeln!(f, "\tPlayer 2: {} wins", self.player_two_wins)?;
        write!(f, "\t{} draws", self.draws)
    }
}

/// The line echoed after a computer move, e.g. `Player 2: a3`.
pub fn announce_move(player: Player, mv: &MoveWrapper) -> String {
    format!("{}: {}", player, mv)
}

fn seat(player: Player) -> usize {
    match player {
        Player::One => 0,
        Player::Two => 1,
    }
}

/// Plays one match from the controller's current position to the end.
///
/// `agents[0]` moves for Player One and `agents[1]` for Player Two. A human
/// whose input is unreadable or illegal is asked again; any other error ends
/// the match. With `render` set the board is printed before every move and
/// the result at the end.
pub fn play_game(
    controller: &mut GameController,
    agents: &mut [Agent; 2],
    input: &mut dyn HumanInput<GameWrapper>,
    render: bool,
) -> Result<GameStatus, PlayerError> {
    while !controller.is_game_over() {
        if render {
            println!("{}", render_board(controller.state()));
        }

        let player = controller.current_player();
        let agent = &mut agents[seat(player)];
        loop {
            let mut state = controller.get_state_for_search();
            let attempt = agent.get_move(&mut state, input).and_then(|mv| {
                controller
                    .try_make_move(mv)
                    .map(|_| mv)
                    .map_err(PlayerError::from)
            });
            match attempt {
                Ok(mv) => {
                    if render && !agent.is_human() {
                        println!("{}", announce_move(player, &mv));
                    }
                    break;
                }
                Err(PlayerError::InvalidInput(reason)) if agent.is_human() => {
                    eprintln!("{}, try again.", reason);
                }
                Err(PlayerError::Game(GameError::InvalidMove(mv))) if agent.is_human() => {
                    eprintln!("Invalid move: {}, try again.", mv);
                }
                Err(e) => return Err(e),
            }
        }
    }

    let status = controller.status();
    info!(result = %status, moves = controller.move_history().len(), "game over");
    if render {
        println!("{}", render_board(controller.state()));
        println!("{}", status);
    }
    Ok(status)
}

/// Plays `num_games` matches from the starting position and tallies the results.
///
/// Without `render` a progress line is printed after each match.
pub fn play_many_games(
    controller: &mut GameController,
    agents: &mut [Agent; 2],
    input: &mut dyn HumanInput<GameWrapper>,
    num_games: usize,
    render: bool,
) -> Result<MatchStats, PlayerError> {
    let mut stats = MatchStats::default();
    for game in 1..=num_games {
        controller.reset();
        let status = play_game(controller, agents, input, render)?;
        stats.record(status);
        if !render {
            println!(
                "Played {} / {} games. Stats: {}/{}/{}",
                game, num_games, stats.player_one_wins, stats.player_two_wins, stats.draws
            );
        }
    }
    Ok(stats)
}
