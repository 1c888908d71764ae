//! Observer hooks for game drivers (renderers, loggers, network relays).

use crate::game::game_status::GameStatus;
use crate::game_state::board::Board;
use crate::moves::move_descriptions::Move;

/// Registered on a `Game`; both hooks default to doing nothing.
pub trait GameListener {
    /// Called after every committed move, with the board already updated.
    fn on_move_executed(&mut self, _mv: &Move, _board: &Board) {}

    /// Called whenever the game status changes.
    fn on_game_state_changed(&mut self, _status: GameStatus) {}
}
