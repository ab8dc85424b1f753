//! Named starting layouts.
//!
//! A preset is pure data: a list of placements. `Board::load_preset` clears the
//! board and places them; it does not start the game.

use std::fmt;
use std::str::FromStr;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    board::Placement, board_location::SquareId, chess_errors::ChessErrors,
    piece_class::PieceClass, piece_team::PieceTeam,
};

const STANDARD_BACK_RANK: [PieceClass; 8] = [
    PieceClass::Rook,
    PieceClass::Knight,
    PieceClass::Bishop,
    PieceClass::Queen,
    PieceClass::King,
    PieceClass::Bishop,
    PieceClass::Knight,
    PieceClass::Rook,
];

/// Layouts a board can be reset to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    /// No pieces at all.
    Empty,
    /// The usual 32-piece opening position.
    Standard,
    /// A seeded random back rank: bishops on opposite colours, king between
    /// the rooks, black mirroring white.
    Shuffled { seed: u64 },
}

impl Preset {
    pub fn placements(self) -> Vec<Placement> {
        match self {
            Preset::Empty => Vec::new(),
            Preset::Standard => mirrored_layout(&STANDARD_BACK_RANK),
            Preset::Shuffled { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                mirrored_layout(&shuffled_back_rank(&mut rng))
            }
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Empty => f.write_str("empty"),
            Preset::Standard => f.write_str("standard"),
            Preset::Shuffled { seed } => write!(f, "shuffled {seed}"),
        }
    }
}

impl FromStr for Preset {
    type Err = ChessErrors;

    /// Accepts `empty`, `standard`, `shuffled` and `shuffled <seed>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();
        match name.as_str() {
            "empty" | "clear" => Ok(Preset::Empty),
            "standard" => Ok(Preset::Standard),
            "shuffled" => {
                let seed = match parts.next() {
                    Some(raw) => raw
                        .parse()
                        .map_err(|_| ChessErrors::InvalidNumber(raw.to_string()))?,
                    None => 0,
                };
                Ok(Preset::Shuffled { seed })
            }
            _ => Err(ChessErrors::UnknownPreset(s.to_string())),
        }
    }
}

/// White's back rank on rank 1, pawns on ranks 2 and 7, black mirrored on rank 8.
fn mirrored_layout(back_rank: &[PieceClass; 8]) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(32);
    for team in [PieceTeam::White, PieceTeam::Black] {
        for (file, class) in (1..=8).zip(back_rank.iter()) {
            if let Some(square) = SquareId::new(file, team.home_rank() as i8) {
                placements.push(Placement::new(square, *class, team));
            }
            if let Some(square) = SquareId::new(file, team.pawn_rank() as i8) {
                placements.push(Placement::new(square, PieceClass::Pawn, team));
            }
        }
    }
    placements
}

/// Draws a back rank with the bishops on opposite colours and the king
/// between the rooks.
pub fn shuffled_back_rank(rng: &mut impl Rng) -> [PieceClass; 8] {
    let mut rank = [None; 8];
    rank[rng.random_range(0..4) * 2] = Some(PieceClass::Bishop);
    rank[rng.random_range(0..4) * 2 + 1] = Some(PieceClass::Bishop);

    for class in [PieceClass::Queen, PieceClass::Knight, PieceClass::Knight] {
        let free: Vec<usize> = (0..8).filter(|i| rank[*i].is_none()).collect();
        rank[free[rng.random_range(0..free.len())]] = Some(class);
    }

    // the three files left take rook, king, rook in order
    let mut remaining = [PieceClass::Rook, PieceClass::King, PieceClass::Rook].into_iter();
    rank.map(|slot| slot.or_else(|| remaining.next()).unwrap_or(PieceClass::Rook))
}
