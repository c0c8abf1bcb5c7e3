//! Error types shared across the rules, search and player layers.

use thiserror::Error;

/// Errors raised by the game rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move failed `is_valid` against the live board. Recoverable: ask again.
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// A move was offered after the game had already ended.
    #[error("Game is already over")]
    GameOver,

    /// `undo_move` was called with nothing to undo.
    #[error("Cannot undo: move history is empty")]
    EmptyHistory,

    /// The undo history no longer matches the move counter.
    #[error("State inconsistency: {moves} moves applied but {history} undo records held")]
    StateInconsistency { moves: usize, history: usize },
}

/// Errors raised while validating configuration, before any search runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Search depth {depth} exceeds the maximum of {max}")]
    InvalidDepth { depth: u32, max: u32 },

    #[error("Rollout sample count must be positive")]
    InvalidSamples,

    #[error("Rollout depth {depth} must be between 1 and {max}")]
    InvalidRolloutDepth { depth: u32, max: u32 },

    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Cannot parse '{0}'")]
    Parse(String),
}

/// Errors that abort a search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("No legal moves available")]
    NoLegalMoves,
}

/// Errors raised while asking a player for a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// The human collaborator produced something that is not a move.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The input source has nothing more to give (e.g. end of stdin).
    #[error("Input closed")]
    InputClosed,

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    /// The rules rejected the chosen move.
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Error produced when a move token cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot parse move '{input}': {reason}")]
pub struct MoveParseError {
    pub input: String,
    pub reason: String,
}

impl MoveParseError {
    pub(crate) fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
