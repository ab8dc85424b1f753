use serde::{Deserialize, Serialize};

use crate::{
    board_location::SquareId, piece_class::PieceClass, piece_team::{ByTeam, PieceTeam},
};

/// A directed relation from an occupied square to a square it can reach.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingEdge {
    pub source: SquareId,
    pub target: SquareId,
    /// Legal to play right now.
    pub moveable: bool,
    pub capture: bool,
    /// Cannot capture, and so does not attack `target`.
    pub move_only: bool,
    pub castling: bool,
    /// Squares from the source towards the target, excluding the source.
    /// Stops growing once it has taken in the opposing king's square.
    pub path: Vec<SquareId>,
    /// Every occupied square met on the way to the target (target included),
    /// keyed by the occupant's colour.
    pub blocked_by: ByTeam<Vec<SquareId>>,
}

impl TargetingEdge {
    pub fn new(source: SquareId, target: SquareId) -> Self {
        TargetingEdge {
            source,
            target,
            moveable: false,
            capture: false,
            move_only: false,
            castling: false,
            path: Vec::new(),
            blocked_by: ByTeam::default(),
        }
    }

    /// Blockers of either colour, in no particular order.
    pub fn blockers(&self) -> impl Iterator<Item = SquareId> + '_ {
        self.blocked_by
            .black
            .iter()
            .chain(self.blocked_by.white.iter())
            .copied()
    }

    /// True when the edge threatens its target: it can capture, and nothing
    /// other than the listed squares stands in the way.
    pub fn attacks_ignoring(&self, ignored: &[SquareId]) -> bool {
        !self.move_only
            && self
                .blockers()
                .all(|b| b == self.target || ignored.contains(&b))
    }
}

/// One of the 64 squares, with its occupant and attack-graph adjacency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Square {
    pub id: SquareId,
    pub x: u8,
    pub y: u8,
    pub piece: Option<PieceClass>,
    pub colour: Option<PieceTeam>,
    /// True only while the occupant has never moved.
    pub first_turn: bool,
    /// Outgoing edges computed from this square.
    pub targeting: Vec<TargetingEdge>,
    /// Incoming edges, keyed by the attacker's colour.
    pub targeted_by: ByTeam<Vec<TargetingEdge>>,
}

impl Square {
    pub fn empty(id: SquareId) -> Self {
        Square {
            id,
            x: id.x(),
            y: id.y(),
            piece: None,
            colour: None,
            first_turn: false,
            targeting: Vec::new(),
            targeted_by: ByTeam::default(),
        }
    }

    /// Kind and colour of the occupant, when there is one.
    #[inline]
    pub fn occupant(&self) -> Option<(PieceClass, PieceTeam)> {
        match (self.piece, self.colour) {
            (Some(piece), Some(colour)) => Some((piece, colour)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.piece.is_some()
    }

    #[inline]
    pub fn holds(&self, class: PieceClass, team: PieceTeam) -> bool {
        self.occupant() == Some((class, team))
    }

    pub fn place(&mut self, class: PieceClass, team: PieceTeam, first_turn: bool) {
        self.piece = Some(class);
        self.colour = Some(team);
        self.first_turn = first_turn;
    }

    /// Empties the square. Outgoing edges must be unlinked by the caller first.
    pub fn clear(&mut self) {
        self.piece = None;
        self.colour = None;
        self.first_turn = false;
        self.targeting.clear();
    }
}
