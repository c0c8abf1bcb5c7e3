//! # Minimax Arena
//!
//! Command-line front end: pick a game and two players, then play one match
//! or a whole series of them in the terminal.
//!
//! ## Usage
//! ```text
//! play --game othello --player1 h --player2 "m 3 b"
//! play --game connect4 --player1 "m 2 r 10 10" --player2 r --games 20 --hide
//! ```
//!
//! Player specs: `h` (human), `r` (random), `m <depth> b` (minimax with the
//! board heuristic) or `m <depth> r <samples> <rollout depth>` (minimax with
//! random rollouts at the leaves).

use anyhow::{bail, Context, Result};
use arena::game_controller::{play_game, play_many_games, GameController};
use arena::{Agent, GameKind, GameState, GameWrapper, HumanInput, MoveWrapper, Player, PlayerConfig, PlayerError};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game to play: tictactoe, connect4 or othello
    #[arg(short, long, default_value = "tictactoe")]
    game: GameKind,

    /// Player 1 spec, e.g. "h", "r", "m 2 b" or "m 2 r 10 10"
    #[arg(long = "player1", default_value = "h")]
    player1: PlayerConfig,

    /// Player 2 spec
    #[arg(long = "player2", default_value = "m 2 b")]
    player2: PlayerConfig,

    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 1)]
    games: usize,

    /// Board rows (game default when omitted)
    #[arg(long)]
    rows: Option<usize>,

    /// Board columns (game default when omitted)
    #[arg(long)]
    cols: Option<usize>,

    /// Pieces in a row needed to win (Tic-Tac-Toe and Connect4 only)
    #[arg(short, long)]
    line_size: Option<usize>,

    /// Seed for reproducible computer players
    #[arg(long)]
    seed: Option<u64>,

    /// Do not print the board; show one progress line per game instead
    #[arg(long, action = clap::ArgAction::SetTrue)]
    hide: bool,

    /// Log search decisions
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    verbose: bool,
}

/// Reads human moves from stdin, one token per line.
struct StdinInput {
    stdin: io::Stdin,
}

impl HumanInput<GameWrapper> for StdinInput {
    fn read_move(&mut self, state: &GameWrapper) -> Result<MoveWrapper, PlayerError> {
        let player = state.current_player();
        let moves: Vec<String> = state.valid_moves().iter().map(|m| m.to_string()).collect();
        print!("{} ({}) moves [{}]: ", player, player.symbol(), moves.join(" "));
        io::stdout()
            .flush()
            .map_err(|e| PlayerError::InvalidInput(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| PlayerError::InvalidInput(e.to_string()))?;
        if read == 0 {
            return Err(PlayerError::InputClosed);
        }
        state
            .parse_move(line.trim())
            .map_err(|e| PlayerError::InvalidInput(e.to_string()))
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.games == 0 {
        bail!("--games must be at least 1");
    }
    let hide = args.hide && !(args.player1.is_human() || args.player2.is_human());
    if args.hide && !hide {
        eprintln!("Ignoring --hide: a human is playing.");
    }

    let game = args
        .game
        .build(args.rows, args.cols, args.line_size)
        .with_context(|| format!("cannot set up {}", args.game))?;
    let mut controller = GameController::new(game);

    let make_agent = |player: Player, config: PlayerConfig| match args.seed {
        Some(seed) => Agent::with_seed(player, config, seed.wrapping_add(u64::from(player.number()))),
        None => Agent::new(player, config),
    };
    let mut agents = [
        make_agent(Player::One, args.player1),
        make_agent(Player::Two, args.player2),
    ];
    let mut input = StdinInput { stdin: io::stdin() };

    println!("{}: {} vs {}", args.game, args.player1, args.player2);
    if args.games == 1 {
        play_game(&mut controller, &mut agents, &mut input, !hide)?;
        if !hide {
            println!("\n{}", controller.format_history());
        }
    } else {
        let stats = play_many_games(&mut controller, &mut agents, &mut input, args.games, !hide)?;
        println!("{}", stats);
    }
    Ok(())
}
