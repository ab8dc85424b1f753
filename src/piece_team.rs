use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chess_errors::ChessErrors;

/// Represents the team (colour) of a chess piece.
/// Wire ids are `"black"` and `"white"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceTeam {
    /// The black side, moving second.
    Black,
    /// The white side, moving first.
    White,
}

impl PieceTeam {
    pub const ALL: [PieceTeam; 2] = [PieceTeam::White, PieceTeam::Black];

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            PieceTeam::Black => PieceTeam::White,
            PieceTeam::White => PieceTeam::Black,
        }
    }

    /// Mirrors a y-delta so that positive always means "forward" for this team.
    #[inline]
    pub const fn orient(self, d_rank: i8) -> i8 {
        match self {
            PieceTeam::Black => -d_rank,
            PieceTeam::White => d_rank,
        }
    }

    /// Rank the king and rooks start on.
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            PieceTeam::Black => 8,
            PieceTeam::White => 1,
        }
    }

    /// Rank the pawns start on.
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            PieceTeam::Black => 7,
            PieceTeam::White => 2,
        }
    }

    /// Rank on which promotable pieces must promote.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            PieceTeam::Black => 1,
            PieceTeam::White => 8,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PieceTeam::Black => "black",
            PieceTeam::White => "white",
        }
    }
}

impl fmt::Display for PieceTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PieceTeam {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" | "b" => Ok(PieceTeam::Black),
            "white" | "w" => Ok(PieceTeam::White),
            _ => Err(ChessErrors::InvalidPieceTeam(s.to_string())),
        }
    }
}

/// A value kept once per team, indexable by `PieceTeam`.
///
/// Serializes as `{"black": .., "white": ..}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByTeam<T> {
    pub black: T,
    pub white: T,
}

impl<T> ByTeam<T> {
    pub fn new(black: T, white: T) -> Self {
        ByTeam { black, white }
    }
}

impl<T> Index<PieceTeam> for ByTeam<T> {
    type Output = T;

    fn index(&self, team: PieceTeam) -> &T {
        match team {
            PieceTeam::Black => &self.black,
            PieceTeam::White => &self.white,
        }
    }
}

impl<T> IndexMut<PieceTeam> for ByTeam<T> {
    fn index_mut(&mut self, team: PieceTeam) -> &mut T {
        match team {
            PieceTeam::Black => &mut self.black,
            PieceTeam::White => &mut self.white,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orient_mirrors_black_only() {
        assert_eq!(PieceTeam::White.orient(2), 2);
        assert_eq!(PieceTeam::Black.orient(2), -2);
        assert_eq!(PieceTeam::Black.orient(-1), 1);
    }

    #[test]
    fn parses_wire_ids() {
        assert_eq!("black".parse::<PieceTeam>().unwrap(), PieceTeam::Black);
        assert_eq!("White".parse::<PieceTeam>().unwrap(), PieceTeam::White);
        assert!("red".parse::<PieceTeam>().is_err());
    }

    #[test]
    fn by_team_indexes_each_side() {
        let mut pair = ByTeam::new(1, 2);
        pair[PieceTeam::White] += 10;
        assert_eq!(pair[PieceTeam::Black], 1);
        assert_eq!(pair[PieceTeam::White], 12);
    }
}
