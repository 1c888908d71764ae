//! Crate root module declarations for the ply_chess rules engine.
//!
//! This file exposes all top-level subsystems (board state, move generation,
//! search, engines, the game driver, and notation helpers) so the console
//! binary, benches, and external tooling can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod history;
    pub mod piece;
}

pub mod moves {
    pub mod move_descriptions;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliding;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod move_ordering;
    pub mod piece_square_tables;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_parameters;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod game {
    pub mod game;
    pub mod game_listener;
    pub mod game_status;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
}
