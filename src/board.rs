//! The board aggregate.
//!
//! `Board` owns the 64 squares, the latest `Outcome` and the `GameState` as
//! one unit. It is the only writer of that state: every public operation goes
//! through `&mut self`, so a board handed to a game session is serialized by
//! the borrow checker. `Clone` is a deep copy; a cloned board shares nothing
//! with the original and can be used to preview a candidate position.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    apply_move_to_game::{self, MoveReport},
    attack_graph::unlink_outgoing,
    board_location::SquareId,
    board_square::Square,
    chess_errors::ChessErrors,
    game_outcome::Outcome,
    game_state::GameState,
    piece_class::PieceClass,
    piece_team::PieceTeam,
    presets::Preset,
};

/// A piece to put on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub square: SquareId,
    pub kind: PieceClass,
    pub colour: PieceTeam,
}

impl Placement {
    pub fn new(square: SquareId, kind: PieceClass, colour: PieceTeam) -> Self {
        Placement {
            square,
            kind,
            colour,
        }
    }
}

/// Squares, outcome and game state of one game session.
///
/// Deserialization goes through `BoardSnapshot` so a board read from the wire
/// holds exactly the 64 squares in index order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "BoardSnapshot")]
pub struct Board {
    /// Always 64 entries, indexed by `SquareId::index`.
    pub(crate) squares: Vec<Square>,
    pub(crate) outcome: Outcome,
    pub(crate) game_state: GameState,
}

/// Unchecked wire form of a `Board`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardSnapshot {
    squares: Vec<Square>,
    outcome: Outcome,
    game_state: GameState,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = ChessErrors;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        if snapshot.squares.len() != 64 {
            return Err(ChessErrors::InvalidSnapshot(format!(
                "expected 64 squares, found {}",
                snapshot.squares.len()
            )));
        }
        for (index, square) in snapshot.squares.iter().enumerate() {
            if square.id.index() != index {
                return Err(ChessErrors::InvalidSnapshot(format!(
                    "square {} stored at position {index}",
                    square.id
                )));
            }
        }
        Ok(Board {
            squares: snapshot.squares,
            outcome: snapshot.outcome,
            game_state: snapshot.game_state,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// An empty board with no game started.
    pub fn new() -> Self {
        Board {
            squares: SquareId::all().map(Square::empty).collect(),
            outcome: Outcome::default(),
            game_state: GameState::default(),
        }
    }

    /// An empty board with `preset` laid out.
    pub fn with_preset(preset: Preset) -> Self {
        let mut board = Board::new();
        board.load_preset(preset);
        board
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    #[inline]
    pub fn square(&self, id: SquareId) -> &Square {
        &self.squares[id.index()]
    }

    #[inline]
    pub(crate) fn square_mut(&mut self, id: SquareId) -> &mut Square {
        &mut self.squares[id.index()]
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Squares holding a piece of `team`, in `A1..H8` order.
    pub fn pieces_of(&self, team: PieceTeam) -> Vec<SquareId> {
        self.squares
            .iter()
            .filter(|s| s.colour == Some(team))
            .map(|s| s.id)
            .collect()
    }

    /// Square of `team`'s king, the first one found if there are several.
    pub fn king_square(&self, team: PieceTeam) -> Option<SquareId> {
        self.squares
            .iter()
            .find(|s| s.holds(PieceClass::King, team))
            .map(|s| s.id)
    }

    pub fn count_kings(&self, team: PieceTeam) -> usize {
        self.squares
            .iter()
            .filter(|s| s.holds(PieceClass::King, team))
            .count()
    }

    /// Every move `team` may play right now, as `(source, target)` pairs.
    pub fn legal_moves(&self, team: PieceTeam) -> Vec<(SquareId, SquareId)> {
        self.squares
            .iter()
            .filter(|s| s.colour == Some(team))
            .flat_map(|s| s.targeting.iter().filter(|e| e.moveable))
            .map(|e| (e.source, e.target))
            .collect()
    }

    /// Places pieces with `first_turn` set. Ignored while a game is running.
    pub fn add_piece(&mut self, placements: &[Placement]) {
        if self.game_state.in_progress {
            return;
        }
        for placement in placements {
            unlink_outgoing(self, placement.square);
            let square = self.square_mut(placement.square);
            square.clear();
            square.place(placement.kind, placement.colour, true);
        }
    }

    /// Empties a square. Ignored while a game is running.
    pub fn remove_piece(&mut self, square: SquareId) {
        if self.game_state.in_progress {
            return;
        }
        unlink_outgoing(self, square);
        self.square_mut(square).clear();
    }

    /// Back to an empty board: no pieces, captures, promotions or outcome.
    pub fn reset(&mut self) {
        *self = Board::new();
        info!("board reset");
    }

    /// Clears the board and lays out `preset`.
    pub fn load_preset(&mut self, preset: Preset) {
        self.reset();
        self.add_piece(&preset.placements());
    }

    /// Validates the setup, builds the attack graph and starts play with white to move.
    pub fn start_game(&mut self) -> Result<(), ChessErrors> {
        apply_move_to_game::start_game(self)
    }

    /// Plays `source -> target` for the side to move if it is legal.
    pub fn request_move(&mut self, source: SquareId, target: SquareId) -> MoveReport {
        apply_move_to_game::request_move(self, source, target)
    }

    /// Resolves the pending promotion into `kind`. Returns false when nothing changed.
    pub fn promote_piece(&mut self, kind: PieceClass) -> bool {
        apply_move_to_game::promote_piece(self, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(id: &str) -> SquareId {
        id.parse().unwrap()
    }

    #[test]
    fn new_board_has_64_unique_squares() {
        let board = Board::new();
        assert_eq!(board.squares().len(), 64);
        for (index, square) in board.squares().iter().enumerate() {
            assert_eq!(square.id.index(), index);
            assert!(!square.is_occupied());
        }
    }

    #[test]
    fn add_and_remove_pieces_before_start() {
        let mut board = Board::new();
        board.add_piece(&[
            Placement::new(sq("E1"), PieceClass::King, PieceTeam::White),
            Placement::new(sq("E8"), PieceClass::King, PieceTeam::Black),
            Placement::new(sq("A2"), PieceClass::Pawn, PieceTeam::White),
        ]);
        assert_eq!(board.king_square(PieceTeam::White), Some(sq("E1")));
        assert!(board.square(sq("A2")).first_turn);
        assert_eq!(board.pieces_of(PieceTeam::White), vec![sq("E1"), sq("A2")]);

        board.remove_piece(sq("A2"));
        assert!(!board.square(sq("A2")).is_occupied());
        assert_eq!(board.pieces_of(PieceTeam::White).len(), 1);
    }

    #[test]
    fn setup_is_frozen_once_the_game_runs() {
        let mut board = Board::with_preset(Preset::Standard);
        board.start_game().unwrap();
        board.remove_piece(sq("A2"));
        board.add_piece(&[Placement::new(
            sq("D4"),
            PieceClass::Queen,
            PieceTeam::White,
        )]);
        assert!(board.square(sq("A2")).is_occupied());
        assert!(!board.square(sq("D4")).is_occupied());
    }

    #[test]
    fn reset_clears_everything() {
        let mut board = Board::with_preset(Preset::Standard);
        board.start_game().unwrap();
        board.request_move(sq("E2"), sq("E4"));
        board.reset();
        assert_eq!(board, Board::new());
        assert!(!board.game_state().in_progress);
    }

    #[test]
    fn snapshot_round_trips() {
        let mut board = Board::with_preset(Preset::Standard);
        board.start_game().unwrap();
        board.request_move(sq("G1"), sq("F3"));
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn truncated_snapshot_is_rejected() {
        let mut json = serde_json::to_value(Board::new()).unwrap();
        json["squares"] = serde_json::Value::Array(Vec::new());
        let err = serde_json::from_value::<Board>(json).unwrap_err();
        assert!(err.to_string().contains("expected 64 squares, found 0"));

        let mut json = serde_json::to_value(Board::new()).unwrap();
        if let serde_json::Value::Array(squares) = &mut json["squares"] {
            squares.pop();
        }
        assert!(serde_json::from_value::<Board>(json).is_err());
    }

    #[test]
    fn permuted_snapshot_is_rejected() {
        let mut json = serde_json::to_value(Board::with_preset(Preset::Standard)).unwrap();
        if let serde_json::Value::Array(squares) = &mut json["squares"] {
            squares.swap(0, 63);
        }
        let err = serde_json::from_value::<Board>(json).unwrap_err();
        assert!(err.to_string().contains("square H8 stored at position 0"));
    }

    #[test]
    fn clone_is_independent_of_the_original() {
        let mut original = Board::with_preset(Preset::Standard);
        original.start_game().unwrap();
        let snapshot = original.clone();

        let mut preview = original.clone();
        assert!(preview.request_move(sq("D2"), sq("D4")).succeeded);
        preview.game_state.captured_pieces.white.clear();
        preview.square_mut(sq("A1")).targeted_by.white.clear();

        assert_eq!(original, snapshot);
        assert!(original.square(sq("D2")).is_occupied());
        assert_eq!(original.game_state().current_player, PieceTeam::White);
    }
}
