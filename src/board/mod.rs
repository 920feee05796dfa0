use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use crate::error::{Error, Result};

pub mod moves;

pub use moves::Move;

pub const BOARD_SIZE: i8 = 8;

/// A square addressed as `(x, y)`, bit index `x + y * 8`. Row 0 is black's
/// back row, row 7 is red's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub x: i8,
    pub y: i8,
}

impl Square {
    pub const fn new(x: i8, y: i8) -> Self { Self { x, y } }

    pub fn on_board(x: i8, y: i8) -> bool { (0..BOARD_SIZE).contains(&x) && (0..BOARD_SIZE).contains(&y) }

    pub fn offset(self, dx: i8, dy: i8) -> Option<Square> {
        let (x, y) = (self.x + dx, self.y + dy);
        if Self::on_board(x, y) { Some(Square::new(x, y)) } else { None }
    }

    pub const fn index(self) -> u32 { (self.x + self.y * BOARD_SIZE) as u32 }

    pub const fn bit(self) -> u64 { 1u64 << self.index() }

    /// Point reflection through the board centre.
    pub fn rotated(self) -> Square { Square::new(BOARD_SIZE - 1 - self.x, BOARD_SIZE - 1 - self.y) }

    /// Playable (dark) squares are the ones with odd `x + y`.
    pub fn is_playable(self) -> bool { (self.x + self.y) % 2 != 0 }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.x as u8) as char, BOARD_SIZE - self.y)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let b = s.as_bytes();
        if b.len() != 2 || !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
            return Err(Error::InvalidSquare(s.to_string()));
        }
        let x = (b[0] - b'a') as i8;
        let rank = (b[1] - b'0') as i8;
        Ok(Square::new(x, BOARD_SIZE - rank))
    }
}

/// Colour and rank of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub red: bool,
    pub king: bool,
}

impl Piece {
    pub const RED_MAN: Piece = Piece { red: true, king: false };
    pub const RED_KING: Piece = Piece { red: true, king: true };
    pub const BLACK_MAN: Piece = Piece { red: false, king: false };
    pub const BLACK_KING: Piece = Piece { red: false, king: true };

    /// Row on which a man of this colour is crowned.
    pub const fn promotion_row(self) -> i8 { if self.red { 0 } else { BOARD_SIZE - 1 } }

    /// Row direction a man of this colour moves in.
    pub const fn forward(self) -> i8 { if self.red { -1 } else { 1 } }

    pub const fn crowned(self) -> Piece { Piece { red: self.red, king: true } }

    pub fn symbol(self) -> char {
        match (self.red, self.king) {
            (true, false) => 'r',
            (true, true) => 'R',
            (false, false) => 'b',
            (false, true) => 'B',
        }
    }

    pub fn from_symbol(c: char) -> Option<Piece> {
        match c {
            'r' => Some(Piece::RED_MAN),
            'R' => Some(Piece::RED_KING),
            'b' => Some(Piece::BLACK_MAN),
            'B' => Some(Piece::BLACK_KING),
            _ => None,
        }
    }
}

/// Packed position: three bit-sets plus turn and forced-continuation state.
/// `red` and `king` bits are always a subset of `exists`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitBoard {
    pub exists: u64,
    pub red: u64,
    pub king: u64,
    pub red_to_move: bool,
    /// Square that must keep jumping before the turn passes.
    pub forced: Option<Square>,
}

impl BitBoard {
    pub fn empty(red_to_move: bool) -> Self {
        Self { exists: 0, red: 0, king: 0, red_to_move, forced: None }
    }

    /// Standard opening setup, red to move. Black occupies rows 0-2, red rows 5-7.
    pub fn start() -> Self {
        let mut bb = Self::empty(true);
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                let sq = Square::new(x, y);
                if !sq.is_playable() { continue; }
                if y < 3 { bb.set(sq, Piece::BLACK_MAN); } else if y > 4 { bb.set(sq, Piece::RED_MAN); }
            }
        }
        bb
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        let bit = sq.bit();
        if self.exists & bit == 0 { return None; }
        Some(Piece { red: self.red & bit != 0, king: self.king & bit != 0 })
    }

    pub fn is_empty(&self, sq: Square) -> bool { self.exists & sq.bit() == 0 }

    pub fn set(&mut self, sq: Square, piece: Piece) {
        self.clear(sq);
        let bit = sq.bit();
        self.exists |= bit;
        if piece.red { self.red |= bit; }
        if piece.king { self.king |= bit; }
    }

    pub fn clear(&mut self, sq: Square) {
        let bit = !sq.bit();
        self.exists &= bit;
        self.red &= bit;
        self.king &= bit;
    }

    /// Pieces of one colour, scanned column by column.
    pub fn pieces(&self, red: bool) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|x| (0..BOARD_SIZE).map(move |y| Square::new(x, y)))
            .filter_map(move |sq| self.get(sq).filter(|p| p.red == red).map(|p| (sq, p)))
    }

    pub fn count(&self, red: bool) -> u32 {
        let side = if red { self.red } else { self.exists & !self.red };
        side.count_ones()
    }

    /// Colour-swapped, point-reflected copy with the turn passed to the other side.
    pub fn mirrored(&self) -> BitBoard {
        let mut out = BitBoard::empty(!self.red_to_move);
        for red in [true, false] {
            for (sq, p) in self.pieces(red) {
                out.set(sq.rotated(), Piece { red: !p.red, king: p.king });
            }
        }
        out.forced = self.forced.map(Square::rotated);
        out
    }
}

impl Default for BitBoard {
    fn default() -> Self { Self::start() }
}

/// Live board plus the save/restore stack used during search.
#[derive(Clone, Debug)]
pub struct Board {
    bits: BitBoard,
    history: Vec<BitBoard>,
    ply: u32,
}

impl Default for Board {
    fn default() -> Self { Self::new() }
}

impl Board {
    pub fn new() -> Self { Self::from_bits(BitBoard::start()) }

    pub fn from_bits(bits: BitBoard) -> Self { Self { bits, history: Vec::with_capacity(64), ply: 0 } }

    /// Build a position from eight rows of `.`/`r`/`R`/`b`/`B`, row 0 (black's back row) first.
    /// Whitespace inside a row is ignored.
    pub fn from_diagram(diagram: &str, red_to_move: bool) -> Result<Self> {
        let rows: Vec<Vec<char>> = diagram
            .lines()
            .map(|l| l.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|r| !r.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(Error::InvalidDiagram(format!("expected 8 rows, found {}", rows.len())));
        }
        let mut bits = BitBoard::empty(red_to_move);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE as usize {
                return Err(Error::InvalidDiagram(format!("row {} has {} squares", y, row.len())));
            }
            for (x, &c) in row.iter().enumerate() {
                if c == '.' { continue; }
                let piece = Piece::from_symbol(c)
                    .ok_or_else(|| Error::InvalidDiagram(format!("unknown symbol `{c}` at row {y}")))?;
                bits.set(Square::new(x as i8, y as i8), piece);
            }
        }
        Ok(Self::from_bits(bits))
    }

    pub fn bits(&self) -> &BitBoard { &self.bits }

    pub fn red_to_move(&self) -> bool { self.bits.red_to_move }

    pub fn forced_continuation(&self) -> Option<Square> { self.bits.forced }

    /// Game ply during play; inside a search it also counts the saved frames.
    pub fn ply(&self) -> u32 { self.ply }

    pub fn saved_frames(&self) -> usize { self.history.len() }

    pub fn save(&mut self) {
        self.history.push(self.bits);
        self.ply += 1;
    }

    /// Restore the last saved frame. An empty stack leaves the board untouched.
    pub fn load(&mut self) {
        if let Some(bits) = self.history.pop() {
            self.bits = bits;
            self.ply = self.ply.saturating_sub(1);
        }
    }

    /// Save now, restore when the guard drops.
    pub fn scoped(&mut self) -> Scoped<'_> {
        self.save();
        Scoped { board: self }
    }

    /// Apply a move inside a search frame; the frame's `save` already counted the ply.
    pub fn apply(&mut self, mv: &Move) { mv.apply(&mut self.bits); }

    /// Apply a move to the live game and advance the game ply.
    pub fn play(&mut self, mv: &Move) {
        self.apply(mv);
        self.ply += 1;
    }

    /// Apply an externally chosen move after checking it against the legal move set.
    pub fn play_checked(&mut self, mv: &Move) -> Result<Move> {
        let legal = self
            .legal_moves()
            .into_iter()
            .find(|m| m == mv)
            .ok_or_else(|| Error::IllegalMove(mv.to_string()))?;
        self.play(&legal);
        Ok(legal)
    }

    /// Resolve `c3-d4` / `c3xe5` against the legal moves of this position.
    pub fn parse_move(&self, text: &str) -> Result<Move> {
        let t = text.trim();
        let (from, to) = t
            .split_once(|c| c == '-' || c == 'x')
            .ok_or_else(|| Error::InvalidMove(t.to_string()))?;
        let from: Square = from.parse()?;
        let to: Square = to.parse()?;
        self.legal_moves()
            .into_iter()
            .find(|m| m.from == from && m.to == to)
            .ok_or_else(|| Error::IllegalMove(t.to_string()))
    }

    pub fn legal_moves(&self) -> Vec<Move> { self.bits.legal_moves() }

    /// The generated legal move equal to `mv`, carrying this position's piece flags.
    pub fn legal_move(&self, mv: &Move) -> Option<Move> { self.legal_moves().into_iter().find(|m| m == mv) }

    pub fn moves_at(&self, sq: Square) -> Vec<Move> { self.bits.moves_at(sq) }

    pub fn is_game_over(&self) -> bool { self.legal_moves().is_empty() }
}

/// Scoped save/restore frame; derefs to the board it guards.
pub struct Scoped<'a> {
    board: &'a mut Board,
}

impl Deref for Scoped<'_> {
    type Target = Board;
    fn deref(&self) -> &Board { self.board }
}

impl DerefMut for Scoped<'_> {
    fn deref_mut(&mut self) -> &mut Board { self.board }
}

impl Drop for Scoped<'_> {
    fn drop(&mut self) { self.board.load(); }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            write!(f, "{} ", BOARD_SIZE - y)?;
            for x in 0..BOARD_SIZE {
                let c = self.bits.get(Square::new(x, y)).map_or('.', Piece::symbol);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        let side = if self.red_to_move() { "red" } else { "black" };
        match self.forced_continuation() {
            Some(sq) => write!(f, "{side} to move (must continue jumping from {sq})"),
            None => write!(f, "{side} to move"),
        }
    }
}
