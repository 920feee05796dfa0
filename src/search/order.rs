use crate::board::{Board, Move, BOARD_SIZE};
use crate::search::eval::advancement_bonus;
use crate::search::tt::{Entry, Tt};

const PREFERRED_BONUS: f64 = 10_000.0;
const CONTINUATION_BONUS: f64 = 100.0;
const HIT_WEIGHT: f64 = 1_000.0;
const ROW_SHIFT_BONUS: f64 = 1_000.0;

/// Legal moves, most promising first:
/// the move stored for this position (flagged `preferred`), then moves whose
/// child is already in the table (by its cached value), then men by
/// advancement, crowning, and whether they abandon the back row.
pub fn ordered_moves(board: &mut Board, tt: Option<&Tt>, cached: Option<&Entry>) -> Vec<Move> {
    let previous_best = cached.and_then(|e| e.best);
    let mover_red = board.red_to_move();
    let moves = board.legal_moves();
    let mut scored: Vec<(f64, Move)> = Vec::with_capacity(moves.len());
    for mut mv in moves {
        let mut key = 0.0;
        if previous_best == Some(mv) {
            key = PREFERRED_BONUS;
            mv.preferred = true;
        }
        let child_value = {
            let mut child = board.scoped();
            child.apply(&mv);
            if child.forced_continuation().is_some() { key += CONTINUATION_BONUS; }
            tt.and_then(|t| t.get(t.key(child.bits())))
                .map(|e| if child.red_to_move() == mover_red { e.value } else { -e.value })
        };
        if let Some(v) = child_value {
            scored.push(((key + v) * HIT_WEIGHT, mv));
            continue;
        }
        if !mv.piece.king {
            key += advancement_bonus(mv.piece, mv.to);
            let home_row = BOARD_SIZE - 1 - mv.piece.promotion_row();
            if mv.from.y == home_row { key -= ROW_SHIFT_BONUS; }
            if mv.promotes() { key += ROW_SHIFT_BONUS; }
        }
        scored.push((key, mv));
    }
    // stable: equal keys keep generation order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, mv)| mv).collect()
}
