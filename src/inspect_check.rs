//! Check, checkmate and stalemate evaluation.
//!
//! The evaluator reads the attack graph only; it never mutates the board.
//! `check_for_checks` classifies one side's position:
//!
//! | king attacked | legal move | result                                |
//! |---------------|------------|---------------------------------------|
//! | no            | no         | stalemate                             |
//! | yes           | no         | checkmate                             |
//! | yes           | yes        | check                                 |
//! | no            | yes        | nothing                               |
//!
//! Black's evaluation at the start of a game is special: it is not black's
//! turn yet, so a missing legal move is not a result, while black starting in
//! check is an immediate loss because white moves first.

use tracing::info;

use crate::{
    board::Board, board_location::SquareId, game_outcome::Outcome, piece_team::PieceTeam,
};

/// When an evaluation happens, which decides how the table above applies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EvaluationContext {
    /// White's evaluation before the first move; white is to move.
    GameStartWhite,
    /// Black's evaluation before the first move; white is to move.
    GameStartBlack,
    /// Any evaluation after a move or promotion, for the side to move.
    InProgress,
}

/// Squares of the pieces currently giving check to `team`'s king.
pub fn king_attackers(board: &Board, team: PieceTeam) -> Vec<SquareId> {
    let Some(king) = board.king_square(team) else {
        return Vec::new();
    };
    board.square(king).targeted_by[team.opposite()]
        .iter()
        .filter(|edge| edge.capture)
        .map(|edge| edge.source)
        .collect()
}

/// True when any piece of `team` has a moveable edge.
pub fn has_legal_move(board: &Board, team: PieceTeam) -> bool {
    board
        .squares()
        .iter()
        .filter(|s| s.colour == Some(team))
        .any(|s| s.targeting.iter().any(|e| e.moveable))
}

/// Classifies `team`'s position. The returned outcome replaces the previous one.
pub fn check_for_checks(board: &Board, team: PieceTeam, context: EvaluationContext) -> Outcome {
    let Some(king) = board.king_square(team) else {
        return Outcome::default();
    };
    let attackers = king_attackers(board, team);
    let has_move = has_legal_move(board, team);
    let initial_black = context == EvaluationContext::GameStartBlack;

    let mut outcome = Outcome::default();
    match (attackers.is_empty(), has_move) {
        (true, false) if !initial_black => outcome.stalemate = true,
        (true, _) => return outcome,
        (false, false) => outcome.checkmate = true,
        (false, true) if initial_black => outcome.checkmate = true,
        (false, true) => outcome.check = true,
    }
    outcome.target = Some(king);
    outcome.targetted_by = attackers;
    outcome
}

/// Outcome for the board as it stands.
///
/// Before the first move both sides are evaluated, white first; black's
/// result wins only when it reports something.
pub fn evaluate_position(board: &Board) -> Outcome {
    let state = board.game_state();
    let outcome = if state.ply == 0 {
        let white = check_for_checks(board, PieceTeam::White, EvaluationContext::GameStartWhite);
        let black = check_for_checks(board, PieceTeam::Black, EvaluationContext::GameStartBlack);
        if black.check || black.checkmate || black.stalemate {
            black
        } else {
            white
        }
    } else {
        check_for_checks(board, state.current_player, EvaluationContext::InProgress)
    };
    if outcome.is_terminal() {
        info!(
            checkmate = outcome.checkmate,
            stalemate = outcome.stalemate,
            "game over"
        );
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack_graph::refresh_all;
    use crate::board::Placement;
    use crate::piece_class::PieceClass;
    use crate::presets::Preset;

    fn sq(id: &str) -> SquareId {
        id.parse().unwrap()
    }

    fn prepared(pieces: &[(&str, PieceClass, PieceTeam)], first: PieceTeam) -> Board {
        let mut board = Board::new();
        let placements: Vec<Placement> = pieces
            .iter()
            .map(|(id, class, team)| Placement::new(sq(id), *class, *team))
            .collect();
        board.add_piece(&placements);
        refresh_all(&mut board, first);
        board
    }

    #[test]
    fn quiet_start_position() {
        let mut board = Board::with_preset(Preset::Standard);
        refresh_all(&mut board, PieceTeam::Black);
        for team in PieceTeam::ALL {
            assert!(king_attackers(&board, team).is_empty());
            assert!(has_legal_move(&board, team));
            assert_eq!(
                check_for_checks(&board, team, EvaluationContext::InProgress),
                Outcome::default()
            );
        }
    }

    #[test]
    fn back_rank_queen_mates() {
        let board = prepared(
            &[
                ("E8", PieceClass::King, PieceTeam::Black),
                ("E7", PieceClass::Queen, PieceTeam::White),
                ("E6", PieceClass::King, PieceTeam::White),
            ],
            PieceTeam::White,
        );
        let outcome = check_for_checks(&board, PieceTeam::Black, EvaluationContext::InProgress);
        assert!(outcome.checkmate);
        assert!(!outcome.check && !outcome.stalemate);
        assert_eq!(outcome.target, Some(sq("E8")));
        assert_eq!(outcome.targetted_by, vec![sq("E7")]);
    }

    #[test]
    fn check_with_an_escape() {
        let board = prepared(
            &[
                ("E8", PieceClass::King, PieceTeam::Black),
                ("E1", PieceClass::Rook, PieceTeam::White),
                ("A1", PieceClass::King, PieceTeam::White),
            ],
            PieceTeam::White,
        );
        let outcome = check_for_checks(&board, PieceTeam::Black, EvaluationContext::InProgress);
        assert!(outcome.check && !outcome.checkmate);
        assert_eq!(outcome.targetted_by, vec![sq("E1")]);
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        let board = prepared(
            &[
                ("A8", PieceClass::King, PieceTeam::Black),
                ("C7", PieceClass::Queen, PieceTeam::White),
                ("C6", PieceClass::King, PieceTeam::White),
            ],
            PieceTeam::White,
        );
        let outcome = check_for_checks(&board, PieceTeam::Black, EvaluationContext::InProgress);
        assert!(outcome.stalemate && !outcome.check && !outcome.checkmate);
    }

    #[test]
    fn initial_black_evaluation_suppresses_stalemate_but_not_check() {
        let stalemated = prepared(
            &[
                ("A8", PieceClass::King, PieceTeam::Black),
                ("C7", PieceClass::Queen, PieceTeam::White),
                ("C6", PieceClass::King, PieceTeam::White),
            ],
            PieceTeam::White,
        );
        assert_eq!(
            check_for_checks(&stalemated, PieceTeam::Black, EvaluationContext::GameStartBlack),
            Outcome::default()
        );

        let checked = prepared(
            &[
                ("E8", PieceClass::King, PieceTeam::Black),
                ("E1", PieceClass::Rook, PieceTeam::White),
                ("A1", PieceClass::King, PieceTeam::White),
            ],
            PieceTeam::White,
        );
        let outcome = check_for_checks(&checked, PieceTeam::Black, EvaluationContext::GameStartBlack);
        assert!(outcome.checkmate);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let board = prepared(
            &[
                ("E8", PieceClass::King, PieceTeam::Black),
                ("E1", PieceClass::Rook, PieceTeam::White),
                ("A1", PieceClass::King, PieceTeam::White),
            ],
            PieceTeam::White,
        );
        let first = check_for_checks(&board, PieceTeam::Black, EvaluationContext::InProgress);
        let second = check_for_checks(&board, PieceTeam::Black, EvaluationContext::InProgress);
        assert_eq!(first, second);
    }
}
