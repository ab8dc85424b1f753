//! Check relief: where a piece may land without leaving its own king attacked.
//!
//! For a non-king piece the answer is a constraint on destination squares:
//! `None` means any destination is fine, `Some(set)` means the piece must land
//! inside `set` (an empty set means it cannot move at all).
//!
//! The constraint comes from the lines that end on the piece's own king:
//! - a line with no blockers is a check; the piece must land on it (between
//!   attacker and king) or capture the attacker;
//! - a line whose only blocker is the piece itself is a pin; the piece must
//!   stay on it.
//!
//! All such lines are intersected, so a piece facing two checks, or pinned
//! while its king is in check along another line, usually ends up with
//! nowhere to go.
//!
//! Kings are handled separately by `king_check_blocks`.

use std::collections::BTreeSet;

use crate::{
    board::Board, board_location::SquareId, board_square::TargetingEdge, piece_team::PieceTeam,
};

/// Squares that interrupt `edge`, the attacker's own square included,
/// the attacked king's square excluded.
fn line_squares(edge: &TargetingEdge) -> BTreeSet<SquareId> {
    edge.path
        .iter()
        .copied()
        .filter(|s| *s != edge.target)
        .chain(std::iter::once(edge.source))
        .collect()
}

/// Destination constraint for the non-king piece on `source`.
pub fn relief(board: &Board, source: SquareId) -> Option<BTreeSet<SquareId>> {
    let team = board.square(source).colour?;
    let king = board.king_square(team)?;

    let mut constraint: Option<BTreeSet<SquareId>> = None;
    for edge in &board.square(king).targeted_by[team.opposite()] {
        if edge.move_only {
            continue;
        }
        let mut blockers = edge.blockers().filter(|b| *b != king);
        let binds = match (blockers.next(), blockers.next()) {
            // check
            (None, _) => true,
            // pin
            (Some(only), None) => only == source,
            _ => false,
        };
        if !binds {
            continue;
        }
        let line = line_squares(edge);
        constraint = Some(match constraint {
            None => line,
            Some(current) => current.intersection(&line).copied().collect(),
        });
    }
    constraint
}

/// True when `by` attacks `square`, treating the squares in `ignoring` as empty.
pub fn is_square_attacked(
    board: &Board,
    square: SquareId,
    by: PieceTeam,
    ignoring: &[SquareId],
) -> bool {
    board.square(square).targeted_by[by]
        .iter()
        .any(|edge| edge.attacks_ignoring(ignoring))
}

/// Neighbouring squares the king on `king` may step to without being attacked.
///
/// The king's own square is treated as empty, so stepping back along the line
/// of a checking slider is not allowed. Occupancy is not considered here; the
/// walk's blocking rules take care of friendly pieces.
pub fn king_check_blocks(board: &Board, king: SquareId, team: PieceTeam) -> BTreeSet<SquareId> {
    king.neighbours()
        .filter(|s| !is_square_attacked(board, *s, team.opposite(), &[king]))
        .collect()
}
