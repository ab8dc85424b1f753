//! Crate root module declarations for the chess rules engine.
//!
//! The engine owns board state, builds the attack graph, decides move
//! legality, and evaluates check, checkmate and stalemate. Callers drive it
//! through `board::Board` and read back its squares, outcome and game state as
//! a serializable snapshot.

pub mod board_location;
pub mod chess_errors;
pub mod piece_class;
pub mod piece_team;

pub mod movement_catalog;

pub mod attack_graph;
pub mod board_square;
pub mod castling;
pub mod check_relief;

pub mod game_outcome;
pub mod inspect_check;

pub mod apply_move_to_game;
pub mod board;
pub mod game_state;
pub mod presets;

pub mod session {
    pub mod session_top;
}

pub mod utils {
    pub mod render_game_state;
}
