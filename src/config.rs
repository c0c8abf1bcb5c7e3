//! Player and search configuration.
//!
//! Everything here is validated when it is built, so a bad depth or sample
//! count is reported before any search starts.
//!
//! Player specs use the same short tokens as the command line:
//!
//! | token            | player                                             |
//! |------------------|----------------------------------------------------|
//! | `h`              | human                                              |
//! | `r`              | uniform random                                     |
//! | `m 2 b`          | minimax, depth 2, heuristic leaves                 |
//! | `m 2 r 10 8`     | minimax, depth 2, 10 rollouts of up to 8 plies     |
//!
//! Tokens may be separated by spaces or `:` (`m:2:r:10:8`).

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Deepest minimax search accepted from configuration.
pub const MAX_SEARCH_DEPTH: u32 = 12;
/// Longest random playout accepted from configuration.
pub const MAX_ROLLOUT_DEPTH: u32 = 1000;

/// How positions are scored once the search reaches its depth cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafEval {
    /// The game's static heuristic.
    Heuristic,
    /// Mean outcome of `samples` random playouts of at most `max_depth` plies.
    Rollout { samples: u32, max_depth: u32 },
}

/// Validated minimax settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    depth: u32,
    leaf: LeafEval,
}

impl SearchConfig {
    pub fn new(depth: u32, leaf: LeafEval) -> Result<Self, ConfigError> {
        if depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::InvalidDepth {
                depth,
                max: MAX_SEARCH_DEPTH,
            });
        }
        if let LeafEval::Rollout { samples, max_depth } = leaf {
            if samples == 0 {
                return Err(ConfigError::InvalidSamples);
            }
            if max_depth == 0 || max_depth > MAX_ROLLOUT_DEPTH {
                return Err(ConfigError::InvalidRolloutDepth {
                    depth: max_depth,
                    max: MAX_ROLLOUT_DEPTH,
                });
            }
        }
        Ok(Self { depth, leaf })
    }

    pub fn heuristic(depth: u32) -> Result<Self, ConfigError> {
        Self::new(depth, LeafEval::Heuristic)
    }

    pub fn rollout(depth: u32, samples: u32, max_depth: u32) -> Result<Self, ConfigError> {
        Self::new(depth, LeafEval::Rollout { samples, max_depth })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn leaf(&self) -> LeafEval {
        self.leaf
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            leaf: LeafEval::Heuristic,
        }
    }
}

/// Which policy produces a player's moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerConfig {
    Human,
    Random,
    Minimax(SearchConfig),
}

impl PlayerConfig {
    pub fn is_human(&self) -> bool {
        matches!(self, PlayerConfig::Human)
    }
}

impl fmt::Display for PlayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerConfig::Human => write!(f, "h"),
            PlayerConfig::Random => write!(f, "r"),
            PlayerConfig::Minimax(cfg) => match cfg.leaf {
                LeafEval::Heuristic => write!(f, "m {} b", cfg.depth),
                LeafEval::Rollout { samples, max_depth } => {
                    write!(f, "m {} r {} {}", cfg.depth, samples, max_depth)
                }
            },
        }
    }
}

fn parse_number(token: Option<&str>, what: &str) -> Result<u32, ConfigError> {
    let token = token.ok_or_else(|| ConfigError::Parse(format!("missing {}", what)))?;
    token
        .parse::<u32>()
        .map_err(|_| ConfigError::Parse(format!("{} '{}' is not a non-negative integer", what, token)))
}

impl FromStr for PlayerConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let mut tokens = lowered
            .split(|c: char| c.is_whitespace() || c == ':')
            .filter(|t| !t.is_empty());

        let config = match tokens.next() {
            Some("h") | Some("human") => PlayerConfig::Human,
            Some("r") | Some("random") => PlayerConfig::Random,
            Some("m") | Some("minimax") => {
                let depth = parse_number(tokens.next(), "depth")?;
                let leaf = match tokens.next() {
                    Some("b") => LeafEval::Heuristic,
                    Some("r") => LeafEval::Rollout {
                        samples: parse_number(tokens.next(), "sample count")?,
                        max_depth: parse_number(tokens.next(), "rollout depth")?,
                    },
                    other => {
                        return Err(ConfigError::Parse(format!(
                            "expected leaf scoring 'b' or 'r', got {:?}",
                            other.unwrap_or("nothing")
                        )))
                    }
                };
                PlayerConfig::Minimax(SearchConfig::new(depth, leaf)?)
            }
            _ => return Err(ConfigError::Parse(s.trim().to_string())),
        };

        match tokens.next() {
            Some(extra) => Err(ConfigError::Parse(format!("unexpected '{}' in '{}'", extra, s.trim()))),
            None => Ok(config),
        }
    }
}
