//! Turn, promotion and capture bookkeeping.
//!
//! `GameState` is the part of the board snapshot that is not tied to a
//! square: whether a game is running, whose turn it is, which pawns are
//! waiting to be promoted, and what each side has captured so far.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{
    board_location::SquareId,
    movement_catalog::profile,
    piece_class::PieceClass,
    piece_team::{ByTeam, PieceTeam},
};

/// Pending promotions, one FIFO queue per colour plus the square to resolve next.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotions {
    pub black: VecDeque<SquareId>,
    pub white: VecDeque<SquareId>,
    /// Derived: front of the white queue, else front of the black queue.
    pub next_promotion: Option<SquareId>,
}

impl Promotions {
    fn queue_mut(&mut self, team: PieceTeam) -> &mut VecDeque<SquareId> {
        match team {
            PieceTeam::Black => &mut self.black,
            PieceTeam::White => &mut self.white,
        }
    }

    /// Queues a square and refreshes the next pointer.
    pub fn push(&mut self, team: PieceTeam, square: SquareId) {
        self.queue_mut(team).push_back(square);
        self.refresh_next();
    }

    /// Removes the square currently named by `next_promotion`.
    pub fn pop_next(&mut self) -> Option<(PieceTeam, SquareId)> {
        let team = if !self.white.is_empty() {
            PieceTeam::White
        } else if !self.black.is_empty() {
            PieceTeam::Black
        } else {
            return None;
        };
        let square = self.queue_mut(team).pop_front();
        self.refresh_next();
        square.map(|s| (team, s))
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.next_promotion.is_some()
    }

    fn refresh_next(&mut self) {
        self.next_promotion = self.white.front().or(self.black.front()).copied();
    }
}

/// Captured pieces of one kind, credited to the capturing side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedTally {
    pub piece: PieceClass,
    pub points: u32,
    pub count: u32,
}

/// Non-square game state carried in the board snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub in_progress: bool,
    pub current_player: PieceTeam,
    pub promotions: Promotions,
    pub captured_pieces: ByTeam<Vec<CapturedTally>>,
    /// Completed moves since `start_game`.
    pub ply: u32,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            in_progress: false,
            current_player: PieceTeam::White,
            promotions: Promotions::default(),
            captured_pieces: ByTeam::default(),
            ply: 0,
        }
    }
}

impl GameState {
    /// Credits `captor` with one more captured `piece`.
    pub fn record_capture(&mut self, captor: PieceTeam, piece: PieceClass) {
        let tallies = &mut self.captured_pieces[captor];
        match tallies.iter_mut().find(|t| t.piece == piece) {
            Some(tally) => tally.count += 1,
            None => tallies.push(CapturedTally {
                piece,
                points: profile(piece).points,
                count: 1,
            }),
        }
    }

    /// Total points captured by `team`.
    pub fn material(&self, team: PieceTeam) -> u32 {
        self.captured_pieces[team]
            .iter()
            .map(|t| t.points * t.count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(id: &str) -> SquareId {
        id.parse().unwrap()
    }

    #[test]
    fn white_promotions_drain_before_black() {
        let mut promotions = Promotions::default();
        promotions.push(PieceTeam::Black, sq("B1"));
        assert_eq!(promotions.next_promotion, Some(sq("B1")));
        promotions.push(PieceTeam::White, sq("A8"));
        promotions.push(PieceTeam::White, sq("H8"));
        assert_eq!(promotions.next_promotion, Some(sq("A8")));

        assert_eq!(promotions.pop_next(), Some((PieceTeam::White, sq("A8"))));
        assert_eq!(promotions.next_promotion, Some(sq("H8")));
        assert_eq!(promotions.pop_next(), Some((PieceTeam::White, sq("H8"))));
        assert_eq!(promotions.next_promotion, Some(sq("B1")));
        assert_eq!(promotions.pop_next(), Some((PieceTeam::Black, sq("B1"))));
        assert!(!promotions.is_pending());
        assert_eq!(promotions.pop_next(), None);
    }

    #[test]
    fn captures_are_grouped_by_kind() {
        let mut state = GameState::default();
        state.record_capture(PieceTeam::White, PieceClass::Pawn);
        state.record_capture(PieceTeam::White, PieceClass::Pawn);
        state.record_capture(PieceTeam::White, PieceClass::Rook);
        state.record_capture(PieceTeam::Black, PieceClass::Queen);

        let white = &state.captured_pieces[PieceTeam::White];
        assert_eq!(white.len(), 2);
        assert_eq!(white[0].count, 2);
        assert_eq!(white[0].points, 1);
        assert_eq!(state.material(PieceTeam::White), 7);
        assert_eq!(state.material(PieceTeam::Black), 9);
    }
}
