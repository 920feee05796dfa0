use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Move};
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    /// Plies after which a game is scored as a draw.
    pub max_plies: usize,
    /// Uniformly random plies played before the engines take over.
    pub random_plies: usize,
    pub seed: u64,
    pub red: EngineConfig,
    pub black: EngineConfig,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self {
            games: 10,
            max_plies: 200,
            random_plies: 4,
            seed: 42,
            red: EngineConfig::default(),
            black: EngineConfig::with_leaf(crate::config::LeafKind::Hybrid),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    RedWins,
    BlackWins,
    Draw,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<String>,
    pub outcome: Outcome,
}

fn select_random_move(board: &Board, rng: &mut SmallRng) -> Option<Move> {
    let moves = board.legal_moves();
    if moves.is_empty() { None } else { Some(moves[rng.gen_range(0..moves.len())]) }
}

/// Play one game from the start position. The side left without a legal move loses.
pub fn play_game(params: &SelfPlayParams, index: usize) -> GameRecord {
    let mut rng = SmallRng::seed_from_u64(params.seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    let mut red = Engine::from_config(&params.red);
    let mut black = Engine::from_config(&params.black);
    let mut board = Board::new();
    let mut moves: Vec<String> = Vec::new();

    while moves.len() < params.random_plies {
        let Some(mv) = select_random_move(&board, &mut rng) else { break; };
        board.play(&mv);
        moves.push(mv.to_string());
    }

    let outcome = loop {
        if moves.len() >= params.max_plies { break Outcome::Draw; }
        let engine = if board.red_to_move() { &mut red } else { &mut black };
        let decision = engine.think(&mut board);
        if decision.moves.is_empty() {
            break if board.red_to_move() { Outcome::BlackWins } else { Outcome::RedWins };
        }
        moves.extend(decision.moves.iter().map(Move::to_string));
    };
    debug!("game {} finished after {} plies: {:?}", index, moves.len(), outcome);
    GameRecord { moves, outcome }
}

/// Play `params.games` independent games in parallel; `on_game` runs as each one finishes.
pub fn generate_games<F>(params: &SelfPlayParams, on_game: F) -> Vec<GameRecord>
where
    F: Fn(&GameRecord) + Sync + Send,
{
    (0..params.games)
        .into_par_iter()
        .map(|i| {
            let game = play_game(params, i);
            on_game(&game);
            game
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub red_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
}

impl Summary {
    pub fn from_games(games: &[GameRecord]) -> Self {
        let mut s = Summary::default();
        for g in games {
            match g.outcome {
                Outcome::RedWins => s.red_wins += 1,
                Outcome::BlackWins => s.black_wins += 1,
                Outcome::Draw => s.draws += 1,
            }
        }
        s
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "red {} / black {} / draws {}", self.red_wins, self.black_wins, self.draws)
    }
}

/// One JSON object per line.
pub fn write_records<P: AsRef<Path>>(games: &[GameRecord], path: P) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<GameRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}
