//! Square identities and coordinate arithmetic.
//!
//! A `SquareId` is a column letter `A`..`H` plus a row `1`..`8`. Internally it
//! holds one-based `(x, y)` coordinates, and the only way to build one is
//! through checked constructors, so every id in the engine is on the board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chess_errors::ChessErrors;

/// Identity of one of the 64 board squares.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SquareId {
    x: u8,
    y: u8,
}

impl SquareId {
    /// Builds a square from one-based coordinates, `None` when off the board.
    #[inline]
    pub const fn new(x: i8, y: i8) -> Option<SquareId> {
        if x < 1 || x > 8 || y < 1 || y > 8 {
            None
        } else {
            Some(SquareId {
                x: x as u8,
                y: y as u8,
            })
        }
    }

    /// Square at `index` in row-major order (`0 == A1`, `63 == H8`).
    #[inline]
    pub fn from_index(index: usize) -> Option<SquareId> {
        if index < 64 {
            Some(SquareId {
                x: (index % 8) as u8 + 1,
                y: (index / 8) as u8 + 1,
            })
        } else {
            None
        }
    }

    /// All 64 squares, `A1, B1, .., H8`.
    pub fn all() -> impl Iterator<Item = SquareId> {
        (1..=8u8).flat_map(|y| (1..=8u8).map(move |x| SquareId { x, y }))
    }

    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Row-major index into the board's square array.
    #[inline]
    pub const fn index(self) -> usize {
        (self.y as usize - 1) * 8 + (self.x as usize - 1)
    }

    /// Moves this square by a file and rank offset, `None` when that leaves the board.
    #[inline]
    pub const fn offset(self, d_file: i8, d_rank: i8) -> Option<SquareId> {
        SquareId::new(self.x as i8 + d_file, self.y as i8 + d_rank)
    }

    /// The up-to-eight squares adjacent to this one.
    pub fn neighbours(self) -> impl Iterator<Item = SquareId> {
        const DELTAS: [(i8, i8); 8] = [
            (1, 0),
            (1, 1),
            (0, 1),
            (-1, 1),
            (-1, 0),
            (-1, -1),
            (0, -1),
            (1, -1),
        ];
        DELTAS
            .into_iter()
            .filter_map(move |(d_file, d_rank)| self.offset(d_file, d_rank))
    }

    /// Column letter, `'A'..='H'`.
    #[inline]
    pub fn file_char(self) -> char {
        char::from(b'A' + self.x - 1)
    }
}

impl fmt::Display for SquareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.y)
    }
}

impl FromStr for SquareId {
    type Err = ChessErrors;

    /// Accepts `"E4"` and `"e4"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(ChessErrors::InvalidSquareId(s.to_string()));
        }
        let file = bytes[0].to_ascii_uppercase();
        let rank = bytes[1];
        if !(b'A'..=b'H').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ChessErrors::InvalidSquareId(s.to_string()));
        }
        Ok(SquareId {
            x: file - b'A' + 1,
            y: rank - b'0',
        })
    }
}

impl From<SquareId> for String {
    fn from(id: SquareId) -> String {
        id.to_string()
    }
}

impl TryFrom<String> for SquareId {
    type Error = ChessErrors;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_ids() {
        let e4: SquareId = "e4".parse().unwrap();
        assert_eq!((e4.x(), e4.y()), (5, 4));
        assert_eq!(e4.to_string(), "E4");
        assert_eq!("H8".parse::<SquareId>().unwrap().index(), 63);
        assert!("I1".parse::<SquareId>().is_err());
        assert!("A9".parse::<SquareId>().is_err());
        assert!("A10".parse::<SquareId>().is_err());
    }

    #[test]
    fn offsets_stay_on_board() {
        let a1: SquareId = "A1".parse().unwrap();
        assert!(a1.offset(-1, 0).is_none());
        assert_eq!(a1.offset(7, 7).unwrap().to_string(), "H8");
        assert_eq!(a1.neighbours().count(), 3);
        let d4: SquareId = "D4".parse().unwrap();
        assert_eq!(d4.neighbours().count(), 8);
    }

    #[test]
    fn all_covers_every_square_once() {
        let ids: Vec<SquareId> = SquareId::all().collect();
        assert_eq!(ids.len(), 64);
        for (index, id) in ids.iter().enumerate() {
            assert_eq!(id.index(), index);
            assert_eq!(SquareId::from_index(index), Some(*id));
        }
        assert!(SquareId::from_index(64).is_none());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id: SquareId = "C7".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"C7\"");
        let back: SquareId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<SquareId>("\"Z0\"").is_err());
    }
}
