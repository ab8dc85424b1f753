//! Leaf counts reached by playing every legal move through `request_move`.

use chess_rules_engine::board::Board;
use chess_rules_engine::presets::Preset;

fn count_nodes(board: &Board, depth: u8) -> u64 {
    let moves = board.legal_moves(board.game_state().current_player);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .into_iter()
        .map(|(source, target)| {
            let mut child = board.clone();
            assert!(child.request_move(source, target).succeeded, "{source}-{target}");
            count_nodes(&child, depth - 1)
        })
        .sum()
}

#[test]
fn standard_layout_node_counts() {
    let mut board = Board::with_preset(Preset::Standard);
    board.start_game().expect("standard layout starts");

    for (depth, expected) in [(1, 20), (2, 400), (3, 8902)] {
        assert_eq!(count_nodes(&board, depth), expected, "depth {depth}");
    }
}
