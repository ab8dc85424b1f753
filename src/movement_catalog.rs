//! Static movement catalog.
//!
//! One `PieceProfile` per piece kind: point value, promotion and castling
//! eligibility, and the list of movement directions the attack-graph walk
//! follows. Every y-delta is written from white's point of view; the walk
//! mirrors it for black through `PieceTeam::orient`.

use crate::piece_class::PieceClass;

/// One direction a piece may travel in.
///
/// The walk repeats `steps` up to `range` times; each completed repetition
/// yields one targeting edge. Intermediate steps inside a repetition only
/// contribute to the path (a pawn double step passes through its single-step
/// square, and is blocked by whatever stands there).
#[derive(Debug, PartialEq, Eq)]
pub struct MovementDirection {
    pub steps: &'static [(i8, i8)],
    pub range: u8,
    /// Only tried while the piece has never moved.
    pub first_move_only: bool,
    /// Legal only when it captures (pawn diagonals).
    pub capture_only: bool,
    /// Never captures and never attacks (pawn pushes, castling).
    pub move_only: bool,
}

impl MovementDirection {
    const fn leap(steps: &'static [(i8, i8)]) -> Self {
        MovementDirection {
            steps,
            range: 1,
            first_move_only: false,
            capture_only: false,
            move_only: false,
        }
    }

    const fn slide(steps: &'static [(i8, i8)]) -> Self {
        MovementDirection {
            steps,
            range: 7,
            first_move_only: false,
            capture_only: false,
            move_only: false,
        }
    }
}

/// Catalog entry for one piece kind.
#[derive(Debug)]
pub struct PieceProfile {
    pub class: PieceClass,
    pub points: u32,
    pub can_promote: bool,
    pub can_castle: bool,
    pub directions: &'static [MovementDirection],
}

const PAWN_DIRECTIONS: [MovementDirection; 4] = [
    MovementDirection {
        steps: &[(0, 1)],
        range: 1,
        first_move_only: false,
        capture_only: false,
        move_only: true,
    },
    MovementDirection {
        steps: &[(0, 1), (0, 1)],
        range: 1,
        first_move_only: true,
        capture_only: false,
        move_only: true,
    },
    MovementDirection {
        steps: &[(1, 1)],
        range: 1,
        first_move_only: false,
        capture_only: true,
        move_only: false,
    },
    MovementDirection {
        steps: &[(-1, 1)],
        range: 1,
        first_move_only: false,
        capture_only: true,
        move_only: false,
    },
];

// counter-clockwise from east-north-east
const KNIGHT_DIRECTIONS: [MovementDirection; 8] = [
    MovementDirection::leap(&[(2, 1)]),
    MovementDirection::leap(&[(1, 2)]),
    MovementDirection::leap(&[(-1, 2)]),
    MovementDirection::leap(&[(-2, 1)]),
    MovementDirection::leap(&[(-2, -1)]),
    MovementDirection::leap(&[(-1, -2)]),
    MovementDirection::leap(&[(1, -2)]),
    MovementDirection::leap(&[(2, -1)]),
];

const BISHOP_DIRECTIONS: [MovementDirection; 4] = [
    MovementDirection::slide(&[(1, 1)]),
    MovementDirection::slide(&[(-1, 1)]),
    MovementDirection::slide(&[(-1, -1)]),
    MovementDirection::slide(&[(1, -1)]),
];

const ROOK_DIRECTIONS: [MovementDirection; 4] = [
    MovementDirection::slide(&[(1, 0)]),
    MovementDirection::slide(&[(0, 1)]),
    MovementDirection::slide(&[(-1, 0)]),
    MovementDirection::slide(&[(0, -1)]),
];

const QUEEN_DIRECTIONS: [MovementDirection; 8] = [
    MovementDirection::slide(&[(1, 0)]),
    MovementDirection::slide(&[(1, 1)]),
    MovementDirection::slide(&[(0, 1)]),
    MovementDirection::slide(&[(-1, 1)]),
    MovementDirection::slide(&[(-1, 0)]),
    MovementDirection::slide(&[(-1, -1)]),
    MovementDirection::slide(&[(0, -1)]),
    MovementDirection::slide(&[(1, -1)]),
];

const KING_DIRECTIONS: [MovementDirection; 8] = [
    MovementDirection::leap(&[(1, 0)]),
    MovementDirection::leap(&[(1, 1)]),
    MovementDirection::leap(&[(0, 1)]),
    MovementDirection::leap(&[(-1, 1)]),
    MovementDirection::leap(&[(-1, 0)]),
    MovementDirection::leap(&[(-1, -1)]),
    MovementDirection::leap(&[(0, -1)]),
    MovementDirection::leap(&[(1, -1)]),
];

static CATALOG: [PieceProfile; 6] = [
    PieceProfile {
        class: PieceClass::Pawn,
        points: 1,
        can_promote: true,
        can_castle: false,
        directions: &PAWN_DIRECTIONS,
    },
    PieceProfile {
        class: PieceClass::Knight,
        points: 3,
        can_promote: false,
        can_castle: false,
        directions: &KNIGHT_DIRECTIONS,
    },
    PieceProfile {
        class: PieceClass::Bishop,
        points: 3,
        can_promote: false,
        can_castle: false,
        directions: &BISHOP_DIRECTIONS,
    },
    PieceProfile {
        class: PieceClass::Rook,
        points: 5,
        can_promote: false,
        can_castle: true,
        directions: &ROOK_DIRECTIONS,
    },
    PieceProfile {
        class: PieceClass::Queen,
        points: 9,
        can_promote: false,
        can_castle: false,
        directions: &QUEEN_DIRECTIONS,
    },
    PieceProfile {
        class: PieceClass::King,
        points: 0,
        can_promote: false,
        can_castle: true,
        directions: &KING_DIRECTIONS,
    },
];

/// Looks up the catalog entry for a piece kind.
#[inline]
pub fn profile(class: PieceClass) -> &'static PieceProfile {
    let index = match class {
        PieceClass::Pawn => 0,
        PieceClass::Knight => 1,
        PieceClass::Bishop => 2,
        PieceClass::Rook => 3,
        PieceClass::Queen => 4,
        PieceClass::King => 5,
    };
    &CATALOG[index]
}

/// Kinds a promoting piece may turn into.
#[inline]
pub fn is_promotion_choice(class: PieceClass) -> bool {
    !matches!(class, PieceClass::Pawn | PieceClass::King)
}
