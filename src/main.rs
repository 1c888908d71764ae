//! Console driver: engine self-play or human-vs-engine games.
//!
//! Run with:
//! `cargo run --release -- --white minimax --black random --depth 3`
//! `cargo run --release -- --white human --black minimax`
//! `RUST_LOG=ply_chess=debug cargo run --release` for search diagnostics.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use ply_chess::engines::engine_minimax::MinimaxEngine;
use ply_chess::engines::engine_parameters::EngineParameters;
use ply_chess::engines::engine_random::RandomEngine;
use ply_chess::engines::engine_trait::Engine;
use ply_chess::game::game::Game;
use ply_chess::game::game_listener::GameListener;
use ply_chess::game::game_status::GameStatus;
use ply_chess::game_state::board::Board;
use ply_chess::game_state::chess_types::Color;
use ply_chess::moves::move_descriptions::Move;
use ply_chess::utils::long_algebraic::{move_to_long_algebraic, parse_long_algebraic};
use ply_chess::utils::pgn::{short_algebraic, write_pgn, PgnHeaders};
use ply_chess::utils::render_game_state::{render_board, render_with_status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerKind {
    Human,
    Minimax,
    Random,
}

impl PlayerKind {
    fn parse(text: &str) -> Result<Self, String> {
        match text {
            "human" => Ok(PlayerKind::Human),
            "minimax" | "engine" => Ok(PlayerKind::Minimax),
            "random" => Ok(PlayerKind::Random),
            _ => Err(format!("unknown player '{text}' (human, minimax, random)")),
        }
    }
}

#[derive(Debug, Clone)]
struct Options {
    white: PlayerKind,
    black: PlayerKind,
    depth: Option<u8>,
    max_time: Option<Duration>,
    max_plies: usize,
    seed: Option<u64>,
    fen: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            white: PlayerKind::Minimax,
            black: PlayerKind::Minimax,
            depth: None,
            max_time: None,
            max_plies: 200,
            seed: None,
            fen: None,
        }
    }
}

impl Options {
    fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut options = Options::default();
        while let Some(flag) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("{flag} needs a value"));
            match flag.as_str() {
                "--white" => options.white = PlayerKind::parse(&value()?)?,
                "--black" => options.black = PlayerKind::parse(&value()?)?,
                "--depth" => options.depth = Some(parse_number(&value()?)?),
                "--max-time" => options.max_time = Some(Duration::from_secs(parse_number(&value()?)?)),
                "--max-plies" => options.max_plies = parse_number(&value()?)?,
                "--seed" => options.seed = Some(parse_number(&value()?)?),
                "--fen" => options.fen = Some(value()?),
                _ => return Err(format!("unknown option '{flag}'")),
            }
        }
        Ok(options)
    }

    fn engine_parameters(&self) -> EngineParameters {
        let defaults = EngineParameters::default();
        EngineParameters {
            max_depth: self.depth.unwrap_or(defaults.max_depth),
            max_depth_endgame: self
                .depth
                .map_or(defaults.max_depth_endgame, |d| d.saturating_add(2)),
            max_time: self.max_time.unwrap_or(defaults.max_time),
            ..defaults
        }
    }
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, String> {
    text.parse()
        .map_err(|_| format!("expected a number, got '{text}'"))
}

enum Player {
    Human,
    Automated(Box<dyn Engine>),
}

impl Player {
    fn new(kind: PlayerKind, options: &Options, seed_offset: u64) -> Self {
        match kind {
            PlayerKind::Human => Player::Human,
            PlayerKind::Minimax => {
                Player::Automated(Box::new(MinimaxEngine::new(options.engine_parameters())))
            }
            PlayerKind::Random => Player::Automated(Box::new(match options.seed {
                Some(seed) => RandomEngine::seeded(seed.wrapping_add(seed_offset)),
                None => RandomEngine::new(),
            })),
        }
    }

    fn label(&self) -> String {
        match self {
            Player::Human => "Human".to_owned(),
            Player::Automated(engine) => engine.name().to_owned(),
        }
    }
}

/// Prints each committed move and the resulting board.
struct ConsoleListener;

impl GameListener for ConsoleListener {
    fn on_move_executed(&mut self, mv: &Move, board: &Board) {
        println!("\n{} plays {}", mv.color(), short_algebraic(mv));
        println!("{}", render_board(board));
    }

    fn on_game_state_changed(&mut self, status: GameStatus) {
        if status.is_terminal() {
            println!("\nGame over: {status}");
        }
    }
}

enum HumanAction {
    Move(Move),
    Undo,
    Quit,
}

fn read_human_action(game: &Game) -> Result<HumanAction, String> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} move (e2e4, 'moves', 'undo', 'quit'): ", game.board().turn());
        io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next() else {
            return Ok(HumanAction::Quit);
        };
        let line = line.map_err(|e| e.to_string())?;
        match line.trim() {
            "" => continue,
            "quit" | "exit" => return Ok(HumanAction::Quit),
            "undo" => return Ok(HumanAction::Undo),
            "moves" => {
                let mut board = game.board().copy();
                let listed: Vec<String> = board
                    .legal_moves()
                    .map_err(|e| e.to_string())?
                    .iter()
                    .filter_map(|mv| move_to_long_algebraic(mv).ok())
                    .collect();
                println!("{}", listed.join(" "));
            }
            text => match parse_long_algebraic(text, game.board()) {
                Ok(mv) => return Ok(HumanAction::Move(mv)),
                Err(err) => println!("{err}"),
            },
        }
    }
}

fn main() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let options = Options::from_args(std::env::args().skip(1))?;
    let board = match &options.fen {
        Some(fen) => Board::from_fen(fen).map_err(|e| e.to_string())?,
        None => Board::standard(),
    };

    let mut white = Player::new(options.white, &options, 0);
    let mut black = Player::new(options.black, &options, 1);
    let headers = PgnHeaders {
        white: white.label(),
        black: black.label(),
        ..PgnHeaders::default()
    };

    let mut game = Game::from_board(board);
    game.add_listener(Box::new(ConsoleListener));
    game.start().map_err(|e| e.to_string())?;
    println!("{}", render_with_status(game.board()));

    let mut plies = 0;
    while game.is_running() && plies < options.max_plies {
        let player = match game.board().turn() {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        match player {
            Player::Automated(engine) => {
                game.play_turn(engine.as_mut()).map_err(|e| e.to_string())?;
                plies += 1;
            }
            Player::Human => match read_human_action(&game)? {
                HumanAction::Move(mv) => match game.execute_move(mv) {
                    Ok(()) => plies += 1,
                    Err(err) => println!("{err}"),
                },
                HumanAction::Undo => match game.undo() {
                    Ok(_) => {
                        plies = plies.saturating_sub(1);
                        println!("{}", render_with_status(game.board()));
                    }
                    Err(err) => println!("{err}"),
                },
                HumanAction::Quit => break,
            },
        }
    }

    if game.is_running() {
        println!("\nStopped after {plies} plies.");
    }
    let pgn = write_pgn(
        game.board(),
        &PgnHeaders {
            result: game.result_tag().to_owned(),
            ..headers
        },
    )
    .map_err(|e| e.to_string())?;
    println!("\n{pgn}");
    Ok(())
}
