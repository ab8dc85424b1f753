//! Applying moves, castles and promotions to a board.
//!
//! Every operation validates against the attack graph before touching the
//! board, so a rejected request leaves the board exactly as it was. Accepted
//! requests:
//! 1. move the piece(s), clearing `first_turn`,
//! 2. credit captures and queue promotions,
//! 3. refresh the attack graph for both sides,
//! 4. hand the turn over and re-evaluate the outcome.
//!
//! While a promotion is pending no move is accepted, and the outcome is not
//! evaluated until the last pending promotion resolves.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    attack_graph::{refresh_all, refresh_square, unlink_outgoing},
    board::Board,
    board_location::SquareId,
    castling::CastleSide,
    chess_errors::ChessErrors,
    game_outcome::Outcome,
    game_state::{GameState, Promotions},
    inspect_check::evaluate_position,
    movement_catalog::{is_promotion_choice, profile},
    piece_class::PieceClass,
    piece_team::PieceTeam,
};

/// What an accepted move did, for caller-side feedback such as sounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveAction {
    MoveSelf,
    Capture,
    Castle,
}

impl MoveAction {
    /// Wire id, as serialized.
    pub const fn as_str(self) -> &'static str {
        match self {
            MoveAction::MoveSelf => "move-self",
            MoveAction::Capture => "capture",
            MoveAction::Castle => "castle",
        }
    }
}

impl fmt::Display for MoveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer to a move request. `action` is `None` when the move was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub action: Option<MoveAction>,
    pub succeeded: bool,
}

impl MoveReport {
    fn rejected() -> Self {
        MoveReport {
            action: None,
            succeeded: false,
        }
    }

    fn accepted(action: MoveAction) -> Self {
        MoveReport {
            action: Some(action),
            succeeded: true,
        }
    }
}

/// Moves the piece on `from` to `to`, replacing whatever stood there.
fn relocate(board: &mut Board, from: SquareId, to: SquareId) {
    let Some((class, team)) = board.square(from).occupant() else {
        return;
    };
    unlink_outgoing(board, from);
    unlink_outgoing(board, to);
    board.square_mut(from).clear();
    let destination = board.square_mut(to);
    destination.clear();
    destination.place(class, team, false);
}

/// Queues every promotable piece already standing on its promotion rank,
/// white first, in file order.
fn queue_standing_promotions(board: &mut Board) {
    let mut promotions = Promotions::default();
    for team in PieceTeam::ALL {
        for source in board.pieces_of(team) {
            let square = board.square(source);
            if let Some((class, _)) = square.occupant() {
                if profile(class).can_promote && square.y == team.promotion_rank() {
                    promotions.push(team, source);
                }
            }
        }
    }
    board.game_state.promotions = promotions;
}

/// Starts a game on the current setup.
///
/// Fails unless each side has exactly one king. The attack graph is built
/// black, white, black, and the opening evaluation runs unless promotions are
/// pending.
pub fn start_game(board: &mut Board) -> Result<(), ChessErrors> {
    if board.game_state.in_progress {
        return Err(ChessErrors::GameAlreadyInProgress);
    }
    let white = board.count_kings(PieceTeam::White);
    let black = board.count_kings(PieceTeam::Black);
    if white != 1 || black != 1 {
        debug!(white, black, "refusing to start without one king per side");
        return Err(ChessErrors::InvalidKingCount { white, black });
    }

    board.game_state = GameState::default();
    board.outcome = Outcome::default();
    queue_standing_promotions(board);
    refresh_all(board, PieceTeam::Black);
    board.game_state.in_progress = true;
    if !board.game_state.promotions.is_pending() {
        board.outcome = evaluate_position(board);
    }
    info!(
        pieces = board.squares().iter().filter(|s| s.is_occupied()).count(),
        pending_promotions = board.game_state.promotions.is_pending(),
        "game started"
    );
    Ok(())
}

/// Plays `source -> target` for the side to move.
///
/// Rejected without any change when no game is running, a promotion is
/// pending, the game is over, the piece is not the mover's, or the piece has
/// no moveable edge to `target`.
pub fn request_move(board: &mut Board, source: SquareId, target: SquareId) -> MoveReport {
    let state = &board.game_state;
    if !state.in_progress || state.promotions.is_pending() || board.outcome.is_terminal() {
        debug!(%source, %target, "move refused in the current game state");
        return MoveReport::rejected();
    }
    let mover = state.current_player;
    let Some((class, team)) = board.square(source).occupant() else {
        return MoveReport::rejected();
    };
    if team != mover {
        debug!(%source, %target, %team, "not this side's turn");
        return MoveReport::rejected();
    }
    let Some(edge) = board
        .square(source)
        .targeting
        .iter()
        .find(|e| e.target == target && e.moveable)
        .cloned()
    else {
        debug!(%source, %target, "no moveable edge");
        return MoveReport::rejected();
    };

    let action = if edge.castling {
        let Some((rook_from, rook_to)) = CastleSide::from_king_move(source, target)
            .and_then(|side| side.rook_squares(mover))
        else {
            return MoveReport::rejected();
        };
        relocate(board, source, target);
        relocate(board, rook_from, rook_to);
        debug!(%source, %target, %rook_from, %rook_to, "castled");
        MoveAction::Castle
    } else {
        let captured = if edge.capture {
            board.square(target).piece
        } else {
            None
        };
        relocate(board, source, target);
        if let Some(piece) = captured {
            board.game_state.record_capture(mover, piece);
        }
        if profile(class).can_promote && target.y() == mover.promotion_rank() {
            board.game_state.promotions.push(mover, target);
            debug!(square = %target, "promotion queued");
        }
        debug!(%source, %target, ?captured, "moved");
        if captured.is_some() {
            MoveAction::Capture
        } else {
            MoveAction::MoveSelf
        }
    };

    refresh_all(board, mover);
    board.outcome = Outcome::default();
    board.game_state.ply += 1;
    board.game_state.current_player = mover.opposite();
    if !board.game_state.promotions.is_pending() {
        board.outcome = evaluate_position(board);
    }
    MoveReport::accepted(action)
}

/// Turns the pending promotion into `kind`.
///
/// Returns false, changing nothing, when no promotion is pending or `kind`
/// is not a promotion choice. Once the last pending promotion resolves the
/// whole graph is refreshed and the outcome evaluated.
pub fn promote_piece(board: &mut Board, kind: PieceClass) -> bool {
    let Some(square) = board.game_state.promotions.next_promotion else {
        return false;
    };
    if !is_promotion_choice(kind) {
        debug!(%kind, "not a promotion choice");
        return false;
    }
    let Some(team) = board.square(square).colour else {
        return false;
    };

    board.square_mut(square).piece = Some(kind);
    refresh_square(board, square);
    board.game_state.promotions.pop_next();
    debug!(%square, %kind, "promoted");

    if !board.game_state.promotions.is_pending() {
        refresh_all(board, team);
        board.outcome = evaluate_position(board);
    }
    true
}
