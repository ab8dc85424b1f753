use serde::{Deserialize, Serialize};

use crate::board_location::SquareId;

/// Result of the latest check evaluation.
///
/// At most one of `checkmate`/`stalemate` is set, and `check` never goes
/// together with `stalemate`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// King under consideration.
    pub target: Option<SquareId>,
    /// Squares of the pieces attacking that king.
    pub targetted_by: Vec<SquareId>,
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
}

impl Outcome {
    /// True once the game can no longer continue.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.checkmate || self.stalemate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_quiet() {
        let outcome = Outcome::default();
        assert!(!outcome.check && !outcome.is_terminal());
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json["targettedBy"].as_array().unwrap().is_empty());
        assert!(json["target"].is_null());
    }
}
