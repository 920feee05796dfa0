use std::fmt;

use super::{BitBoard, Piece, Square, BOARD_SIZE};

const DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// A single step or single jump. A multi-jump is a chain of capture moves
/// by the same side, linked through the forced-continuation square.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub capture: bool,
    /// Moved piece as it stood before the move.
    pub piece: Piece,
    /// Ordering hint: this was the best move the last time the position was searched.
    pub preferred: bool,
}

// Identity is the from/to pair; the flags are derived.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool { self.from == other.from && self.to == other.to }
}

impl Eq for Move {}

impl Move {
    pub fn new(from: Square, to: Square, capture: bool, piece: Piece) -> Self {
        Self { from, to, capture, piece, preferred: false }
    }

    /// Square of the jumped piece, if this is a capture.
    pub fn captured_square(&self) -> Option<Square> {
        if !self.capture { return None; }
        Some(Square::new((self.from.x + self.to.x) / 2, (self.from.y + self.to.y) / 2))
    }

    /// A man landing on its crowning row.
    pub fn promotes(&self) -> bool { !self.piece.king && self.to.y == self.piece.promotion_row() }

    /// Quiescence candidates: captures and crowning moves.
    pub fn is_noisy(&self) -> bool { self.capture || self.promotes() }

    /// Apply to a packed position. The turn passes unless the move was a jump
    /// that leaves another jump available from the landing square, in which case
    /// the landing square becomes the forced-continuation square.
    pub fn apply(&self, bits: &mut BitBoard) {
        bits.forced = None;
        bits.clear(self.from);
        bits.set(self.to, self.piece);
        if let Some(mid) = self.captured_square() {
            bits.clear(mid);
            if bits.has_capture_at(self.to) {
                bits.forced = Some(self.to);
                return;
            }
        }
        if self.to.y == self.piece.promotion_row() {
            bits.set(self.to, self.piece.crowned());
        }
        bits.red_to_move = !bits.red_to_move;
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.capture { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

impl BitBoard {
    /// Simple moves and single jumps for the piece on `sq`, in a fixed direction order.
    pub fn moves_at(&self, sq: Square) -> Vec<Move> {
        let mut out = Vec::with_capacity(4);
        let Some(piece) = self.get(sq) else { return out; };
        for (dx, dy) in DIRECTIONS {
            if !piece.king && dy != piece.forward() { continue; }
            let Some(next) = sq.offset(dx, dy) else { continue; };
            match self.get(next) {
                None => out.push(Move::new(sq, next, false, piece)),
                Some(other) if other.red != piece.red => {
                    if let Some(land) = next.offset(dx, dy) {
                        if self.is_empty(land) { out.push(Move::new(sq, land, true, piece)); }
                    }
                }
                Some(_) => {}
            }
        }
        out
    }

    pub fn has_capture_at(&self, sq: Square) -> bool { self.moves_at(sq).iter().any(|m| m.capture) }

    /// Legal moves for the side to move. A pending continuation allows only
    /// jumps from that square; otherwise any available jump makes jumping mandatory.
    pub fn legal_moves(&self) -> Vec<Move> {
        if let Some(sq) = self.forced {
            debug_assert!(self.get(sq).is_some(), "forced continuation from empty square {sq}");
            let mut moves = self.moves_at(sq);
            moves.retain(|m| m.capture);
            return moves;
        }
        let mut all = Vec::with_capacity(32);
        let mut found_capture = false;
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                let sq = Square::new(x, y);
                match self.get(sq) {
                    Some(p) if p.red == self.red_to_move => {
                        let moves = self.moves_at(sq);
                        found_capture |= moves.iter().any(|m| m.capture);
                        all.extend(moves);
                    }
                    _ => {}
                }
            }
        }
        if found_capture { all.retain(|m| m.capture); }
        all
    }
}
