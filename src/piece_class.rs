use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chess_errors::ChessErrors;

/// Represents the type (class) of a chess piece.
/// Wire ids are the lowercase names (`"pawn"` .. `"king"`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceClass {
    /// A pawn piece.
    Pawn,
    /// A knight piece.
    Knight,
    /// A bishop piece.
    Bishop,
    /// A rook piece.
    Rook,
    /// A queen piece.
    Queen,
    /// A king piece.
    King,
}

impl PieceClass {
    pub const ALL: [PieceClass; 6] = [
        PieceClass::Pawn,
        PieceClass::Knight,
        PieceClass::Bishop,
        PieceClass::Rook,
        PieceClass::Queen,
        PieceClass::King,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PieceClass::Pawn => "pawn",
            PieceClass::Knight => "knight",
            PieceClass::Bishop => "bishop",
            PieceClass::Rook => "rook",
            PieceClass::Queen => "queen",
            PieceClass::King => "king",
        }
    }
}

impl fmt::Display for PieceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PieceClass {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        PieceClass::ALL
            .into_iter()
            .find(|class| class.as_str() == lowered)
            .ok_or_else(|| ChessErrors::InvalidPieceClass(s.to_string()))
    }
}
