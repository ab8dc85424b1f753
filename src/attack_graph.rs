//! Attack graph construction and maintenance.
//!
//! Every occupied square carries its outgoing `targeting` edges; every square
//! carries the reverse index `targeted_by`, the incoming edges keyed by the
//! attacker's colour. The two sides are kept in step by `link_outgoing` and
//! `unlink_outgoing`, which are the only functions that touch `targeted_by`.
//!
//! Edge geometry (path, blockers, capture) depends on the board alone.
//! Whether an edge is `moveable` also depends on the opponent's geometry, so
//! a full refresh runs three passes (`a`, `b`, `a`): after the first two both
//! geometries are current, and the last pass recomputes `a`'s legality
//! against them.
//!
//! Edges are emitted for blocked squares too (with `moveable = false`). Those
//! lines are what pin and king-safety analysis reads.

use std::collections::BTreeSet;

use tracing::trace;

use crate::{
    board::Board,
    board_location::SquareId,
    board_square::TargetingEdge,
    castling::king_castling_edges,
    check_relief::{king_check_blocks, relief},
    movement_catalog::{profile, MovementDirection},
    piece_class::PieceClass,
    piece_team::{ByTeam, PieceTeam},
};

/// Walks one direction from `source`, producing one edge per completed repetition.
///
/// Legality is not decided here; every edge comes back with `moveable = false`
/// and a flag saying whether it was blocked.
fn walk_direction(
    board: &Board,
    source: SquareId,
    team: PieceTeam,
    direction: &MovementDirection,
) -> Vec<(TargetingEdge, bool)> {
    let mut edges = Vec::new();
    let mut cursor = source;
    let mut path: Vec<SquareId> = Vec::new();
    let mut blocked_by: ByTeam<Vec<SquareId>> = ByTeam::default();
    let mut blocked = false;
    let mut reached_king = false;

    'repetitions: for _ in 0..direction.range {
        let mut capture = false;
        for (step_index, (d_file, d_rank)) in direction.steps.iter().enumerate() {
            cursor = match cursor.offset(*d_file, team.orient(*d_rank)) {
                Some(next) => next,
                None => break 'repetitions,
            };
            if !reached_king {
                path.push(cursor);
            }
            if let Some((class, occupant)) = board.square(cursor).occupant() {
                blocked_by[occupant].push(cursor);
                if class == PieceClass::King && occupant != team {
                    reached_king = true;
                }
                let final_step = step_index + 1 == direction.steps.len();
                if blocked || direction.move_only || occupant == team || !final_step {
                    blocked = true;
                } else {
                    capture = true;
                }
            }
        }
        let edge = TargetingEdge {
            source,
            target: cursor,
            moveable: false,
            capture,
            move_only: direction.move_only,
            castling: false,
            path: path.clone(),
            blocked_by: blocked_by.clone(),
        };
        edges.push((edge, blocked));
        if capture {
            // nothing beyond a captured piece is reachable
            blocked = true;
        }
    }
    edges
}

/// Derives every targeting edge of the piece on `source`, with legality filled in.
///
/// Empty squares produce no edges.
pub fn compute_moves(board: &Board, source: SquareId) -> Vec<TargetingEdge> {
    let square = board.square(source);
    let Some((class, team)) = square.occupant() else {
        return Vec::new();
    };
    let piece = profile(class);

    let allowed: Option<BTreeSet<SquareId>> = if class == PieceClass::King {
        Some(king_check_blocks(board, source, team))
    } else {
        relief(board, source)
    };

    let mut edges = Vec::new();
    for direction in piece.directions {
        if direction.first_move_only && !square.first_turn {
            continue;
        }
        for (mut edge, blocked) in walk_direction(board, source, team, direction) {
            edge.moveable = !blocked
                && (!direction.capture_only || edge.capture)
                && allowed
                    .as_ref()
                    .map_or(true, |squares| squares.contains(&edge.target));
            edges.push(edge);
        }
    }

    if class == PieceClass::King {
        edges.extend(
            king_castling_edges(board, team)
                .into_iter()
                .filter(|edge| edge.source == source),
        );
    }
    edges
}

/// Adds the outgoing edges of `source` to their targets' reverse index.
pub fn link_outgoing(board: &mut Board, source: SquareId) {
    let Some(team) = board.square(source).colour else {
        return;
    };
    let edges = board.square(source).targeting.clone();
    for edge in edges {
        board.square_mut(edge.target).targeted_by[team].push(edge);
    }
}

/// Removes every edge that starts at `source` from the reverse index.
pub fn unlink_outgoing(board: &mut Board, source: SquareId) {
    let targets: BTreeSet<SquareId> = board
        .square(source)
        .targeting
        .iter()
        .map(|e| e.target)
        .collect();
    for target in targets {
        let incoming = &mut board.square_mut(target).targeted_by;
        for team in PieceTeam::ALL {
            incoming[team].retain(|e| e.source != source);
        }
    }
    board.square_mut(source).targeting.clear();
}

/// Recomputes one square's outgoing edges and relinks them.
pub fn refresh_square(board: &mut Board, source: SquareId) {
    unlink_outgoing(board, source);
    let edges = compute_moves(board, source);
    board.square_mut(source).targeting = edges;
    link_outgoing(board, source);
}

/// Recomputes every piece of `team`.
pub fn refresh_team(board: &mut Board, team: PieceTeam) {
    for source in board.pieces_of(team) {
        refresh_square(board, source);
    }
}

/// Recomputes both sides: `first`, its opponent, then `first` again.
pub fn refresh_all(board: &mut Board, first: PieceTeam) {
    for (pass, team) in [first, first.opposite(), first].into_iter().enumerate() {
        trace!(pass, %team, "refreshing attack graph");
        refresh_team(board, team);
    }
}
