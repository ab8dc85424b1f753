//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for the session binary, logs and
//! test failure messages.

use crate::{board::Board, board_location::SquareId, piece_class::PieceClass, piece_team::PieceTeam};

/// Render the board to a Unicode string for terminal output, rank 8 on top.
pub fn render_game_state(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  A B C D E F G H\n");

    for rank in (1..=8i8).rev() {
        out.push(char::from(b'0' + rank as u8));
        out.push(' ');

        for file in 1..=8i8 {
            let symbol = SquareId::new(file, rank)
                .and_then(|id| board.square(id).occupant())
                .map(|(class, team)| piece_to_unicode(team, class))
                .unwrap_or('·');
            out.push(symbol);

            if file < 8 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'0' + rank as u8));
        out.push('\n');
    }

    out.push_str("  A B C D E F G H");

    out
}

/// One-line summary of whose turn it is and how the game stands.
pub fn render_status(board: &Board) -> String {
    let state = board.game_state();
    let outcome = board.outcome();
    if !state.in_progress {
        return "not started".to_owned();
    }
    if let Some(square) = state.promotions.next_promotion {
        return format!("promotion pending on {square}");
    }
    let verdict = if outcome.checkmate {
        " - checkmate"
    } else if outcome.stalemate {
        " - stalemate"
    } else if outcome.check {
        " - check"
    } else {
        ""
    };
    format!("{} to move{}", state.current_player, verdict)
}

fn piece_to_unicode(team: PieceTeam, piece: PieceClass) -> char {
    match (team, piece) {
        (PieceTeam::White, PieceClass::Pawn) => '♙',
        (PieceTeam::White, PieceClass::Knight) => '♘',
        (PieceTeam::White, PieceClass::Bishop) => '♗',
        (PieceTeam::White, PieceClass::Rook) => '♖',
        (PieceTeam::White, PieceClass::Queen) => '♕',
        (PieceTeam::White, PieceClass::King) => '♔',
        (PieceTeam::Black, PieceClass::Pawn) => '♟',
        (PieceTeam::Black, PieceClass::Knight) => '♞',
        (PieceTeam::Black, PieceClass::Bishop) => '♝',
        (PieceTeam::Black, PieceClass::Rook) => '♜',
        (PieceTeam::Black, PieceClass::Queen) => '♛',
        (PieceTeam::Black, PieceClass::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::Preset;

    #[test]
    fn renders_start_position() {
        let board = Board::with_preset(Preset::Standard);
        let text = render_game_state(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[5], "4 · · · · · · · · 4");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }

    #[test]
    fn status_follows_the_game() {
        let mut board = Board::with_preset(Preset::Standard);
        assert_eq!(render_status(&board), "not started");
        board.start_game().unwrap();
        assert_eq!(render_status(&board), "white to move");
    }
}
