// Checkers engine: packed board, negascout search, pluggable leaf evaluation
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod perft;
pub mod search;
pub mod selfplay;

pub use board::{BitBoard, Board, Move, Piece, Square};
pub use config::{EngineConfig, LeafKind};
pub use engine::{Decision, Engine};
pub use error::{Error, Result};
