use crate::board::{BitBoard, Piece, Square, BOARD_SIZE};

pub const MAN_VALUE: f64 = 1.0;
pub const KING_VALUE: f64 = 2.3;

// Men: bonus by rows advanced from the own back row, scaled by a column weight.
pub const ADVANCE_BONUS: [f64; 8] = [0.2, 0.0, 0.06, 0.08, 0.1, 0.2, 0.4, 0.0];
// Red's column weights; black uses the mirror image.
pub const COLUMN_WEIGHT: [f64; 8] = [1.08, 1.04, 1.01, 1.06, 1.05, 1.0, 1.03, 1.07];

// Back-row guard, double-corner and anchor squares, in red's frame.
pub const BACK_ROW_BONUS: f64 = 0.5;
pub const DOUBLE_CORNER_BONUS: f64 = 0.4;
pub const ANCHOR_BONUS: f64 = 0.9;

pub const CONE_BONUS: f64 = 0.01;

// Scores beyond this are forced wins/losses.
pub const DECISIVE_SCORE: f64 = 1_000.0;
pub const LOSS_SCORE: i64 = 1_000_000;

/// Score for the side to move when it has no legal move: the sooner, the worse.
pub fn loss_score(ply: u32) -> f64 { -((LOSS_SCORE / ply.max(1) as i64) as f64) }

pub fn is_decisive(value: f64) -> bool { value.abs() > DECISIVE_SCORE }

// Squares of black pieces are rotated so both colours are scored in red's frame,
// where the back row is y = 7 and men advance toward y = 0.
fn own_frame(piece: Piece, sq: Square) -> Square { if piece.red { sq } else { sq.rotated() } }

pub fn rows_advanced(piece: Piece, sq: Square) -> usize { (BOARD_SIZE - 1 - own_frame(piece, sq).y) as usize }

pub fn column_weight(piece: Piece, sq: Square) -> f64 { COLUMN_WEIGHT[own_frame(piece, sq).x as usize] }

/// Positional part of a man's value; also used for move ordering.
pub fn advancement_bonus(piece: Piece, sq: Square) -> f64 {
    ADVANCE_BONUS[rows_advanced(piece, sq)] * column_weight(piece, sq)
}

fn edge_bonus(piece: Piece, sq: Square) -> f64 {
    let s = own_frame(piece, sq);
    if s.y == BOARD_SIZE - 1 {
        if s.x == 2 || s.x == 6 { BACK_ROW_BONUS + DOUBLE_CORNER_BONUS } else { BACK_ROW_BONUS }
    } else if s.y == BOARD_SIZE - 2 && s.x == BOARD_SIZE - 1 {
        ANCHOR_BONUS
    } else {
        0.0
    }
}

pub fn piece_value(piece: Piece, sq: Square) -> f64 {
    let base = if piece.king { KING_VALUE } else { MAN_VALUE + advancement_bonus(piece, sq) };
    base + edge_bonus(piece, sq)
}

/// Most advanced piece of one colour; ties go to the lowest column in its own frame.
fn spearhead(bits: &BitBoard, red: bool) -> Option<Square> {
    bits.pieces(red)
        .map(|(sq, p)| own_frame(p, sq))
        .min_by_key(|s| (s.y, s.x))
}

// Enemy pieces inside the triangle the spearhead must cross to crown,
// each worth CONE_BONUS / distance to the spearhead's owner.
fn cone_bonus(bits: &BitBoard, red: bool) -> f64 {
    let Some(head) = spearhead(bits, red) else { return 0.0; };
    let mut bonus = 0.0;
    for (sq, p) in bits.pieces(!red) {
        // enemy square seen from the spearhead owner's frame
        let e = own_frame(Piece { red, king: p.king }, sq);
        let dist = head.y - e.y;
        if dist > 0 && (e.x - head.x).abs() <= dist {
            bonus += CONE_BONUS / dist as f64;
        }
    }
    bonus
}

fn side_score(bits: &BitBoard, red: bool) -> f64 {
    let material: f64 = bits.pieces(red).map(|(sq, p)| piece_value(p, sq)).sum();
    material + cone_bonus(bits, red)
}

/// Red-relative static evaluation: positive favours red.
pub fn evaluate(bits: &BitBoard) -> f64 { side_score(bits, true) - side_score(bits, false) }

/// Static evaluation from the side to move's perspective (negamax-friendly).
pub fn evaluate_for_mover(bits: &BitBoard) -> f64 {
    let base = evaluate(bits);
    if bits.red_to_move { base } else { -base }
}
