//! Castling eligibility.
//!
//! Castling is offered when the king stands unmoved on its home square (file
//! E of its home rank) and is not in check, and for each side:
//! - the corner piece is an unmoved castling-capable piece of the same colour,
//! - every square between king and corner is empty,
//! - the two squares the king crosses are not attacked.
//!
//! The result pairs a king edge (king to its destination) with a rook edge
//! (rook to the square the king passes over). Both are move-only castling
//! edges whose one-square path is that passed-over square.

use std::collections::BTreeMap;

use crate::{
    board::Board,
    board_location::SquareId,
    board_square::TargetingEdge,
    check_relief::is_square_attacked,
    movement_catalog::profile,
    piece_class::PieceClass,
    piece_team::PieceTeam,
};

const KING_FILE: i8 = 5;

/// Which rook the king castles with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::QueenSide, CastleSide::KingSide];

    const fn rook_file(self) -> i8 {
        match self {
            CastleSide::KingSide => 8,
            CastleSide::QueenSide => 1,
        }
    }

    /// File the king ends on; the rook ends on the file the king passes.
    const fn king_target_file(self) -> i8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 3,
        }
    }

    const fn towards_rook(self) -> i8 {
        match self {
            CastleSide::KingSide => 1,
            CastleSide::QueenSide => -1,
        }
    }

    /// Side castled on when the king at `king` moves to `target`.
    pub fn from_king_move(king: SquareId, target: SquareId) -> Option<CastleSide> {
        CastleSide::ALL.into_iter().find(|side| {
            king.x() as i8 == KING_FILE
                && target.y() == king.y()
                && target.x() as i8 == side.king_target_file()
        })
    }

    /// Rook origin and destination for this side on `team`'s home rank.
    pub fn rook_squares(self, team: PieceTeam) -> Option<(SquareId, SquareId)> {
        let rank = team.home_rank() as i8;
        let from = SquareId::new(self.rook_file(), rank)?;
        let to = SquareId::new(KING_FILE + self.towards_rook(), rank)?;
        Some((from, to))
    }
}

fn castling_edge(source: SquareId, target: SquareId, passed: SquareId) -> TargetingEdge {
    let mut edge = TargetingEdge::new(source, target);
    edge.moveable = true;
    edge.move_only = true;
    edge.castling = true;
    edge.path = vec![passed];
    edge
}

fn side_is_open(board: &Board, king: SquareId, team: PieceTeam, side: CastleSide) -> bool {
    let rank = team.home_rank() as i8;
    let Some(rook) = SquareId::new(side.rook_file(), rank) else {
        return false;
    };
    let corner = board.square(rook);
    let corner_ready = match corner.occupant() {
        Some((class, colour)) => {
            colour == team
                && class != PieceClass::King
                && profile(class).can_castle
                && corner.first_turn
        }
        None => false,
    };
    if !corner_ready {
        return false;
    }

    let step = side.towards_rook();
    let mut file = KING_FILE + step;
    while file != side.rook_file() {
        match SquareId::new(file, rank) {
            Some(between) if !board.square(between).is_occupied() => {}
            _ => return false,
        }
        file += step;
    }

    [1, 2].into_iter().all(|distance| {
        king.offset(step * distance, 0)
            .is_some_and(|crossed| !is_square_attacked(board, crossed, team.opposite(), &[]))
    })
}

/// Home square of `team`'s king and every side it may castle on right now.
fn open_sides(board: &Board, team: PieceTeam) -> Option<(SquareId, Vec<CastleSide>)> {
    let king = SquareId::new(KING_FILE, team.home_rank() as i8)?;
    let home = board.square(king);
    if !home.holds(PieceClass::King, team) || !home.first_turn {
        return None;
    }
    if is_square_attacked(board, king, team.opposite(), &[]) {
        return None;
    }
    let sides = CastleSide::ALL
        .into_iter()
        .filter(|side| side_is_open(board, king, team, *side))
        .collect();
    Some((king, sides))
}

/// King edges of every castle `team` may play. These are the only castling
/// edges the attack graph carries; the executor moves the rook itself.
pub fn king_castling_edges(board: &Board, team: PieceTeam) -> Vec<TargetingEdge> {
    let Some((king, sides)) = open_sides(board, team) else {
        return Vec::new();
    };
    sides
        .into_iter()
        .filter_map(|side| {
            let king_to = SquareId::new(side.king_target_file(), king.y() as i8)?;
            let (_, passed) = side.rook_squares(team)?;
            Some(castling_edge(king, king_to, passed))
        })
        .collect()
}

/// Castling edge pairs available to `team`, keyed by the square each edge
/// starts from: the king edge under the king, the rook edge under the rook.
///
/// The rook half is for callers that want to show the full castle; the attack
/// graph itself takes its edges from `king_castling_edges`.
pub fn castling_moves(board: &Board, team: PieceTeam) -> BTreeMap<SquareId, Vec<TargetingEdge>> {
    let mut moves: BTreeMap<SquareId, Vec<TargetingEdge>> = BTreeMap::new();
    let Some((king, _)) = open_sides(board, team) else {
        return moves;
    };
    for edge in king_castling_edges(board, team) {
        let Some((rook_from, rook_to)) = CastleSide::from_king_move(king, edge.target)
            .and_then(|side| side.rook_squares(team))
        else {
            continue;
        };
        moves
            .entry(rook_from)
            .or_default()
            .push(castling_edge(rook_from, rook_to, rook_to));
        moves.entry(king).or_default().push(edge);
    }
    moves
}
