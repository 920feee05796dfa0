use crate::board::{Board, Move};

// Make/unmake through the board's save stack; each jump of a chain is its own ply.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut nodes = 0u64;
    for mv in board.legal_moves() {
        let mut child = board.scoped();
        child.apply(&mv);
        nodes += perft(&mut child, depth - 1);
    }
    nodes
}

/// Per-root-move node counts.
pub fn divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 { return Vec::new(); }
    board
        .legal_moves()
        .into_iter()
        .map(|mv| {
            let mut child = board.scoped();
            child.apply(&mv);
            (mv, perft(&mut child, depth - 1))
        })
        .collect()
}
