use std::time::{Duration, Instant};

use log::info;

use crate::board::{Board, Move};
use crate::config::EngineConfig;
use crate::search::{EvictionStats, LeafEvaluator, PlyWindow, SearchParams, SearchResult, Searcher, Tt};

/// Moves committed by one call to [`Engine::think`]; more than one when the
/// engine had to keep jumping.
#[derive(Debug, Clone, Default)]
pub struct Decision {
    pub moves: Vec<Move>,
    /// Value of the last search, for the side that moved.
    pub value: f64,
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// A searcher plus its leaf strategy and budgets. Owns its transposition table,
/// which lives across moves and is trimmed once per decision.
pub struct Engine {
    searcher: Searcher,
    leaf: Box<dyn LeafEvaluator + Send>,
    params: SearchParams,
    window: PlyWindow,
}

impl Engine {
    pub fn new(leaf: Box<dyn LeafEvaluator + Send>, params: SearchParams, tt_buckets: usize) -> Self {
        let window = leaf.ply_window();
        Self { searcher: Searcher::new(Tt::new(tt_buckets)), leaf, params, window }
    }

    pub fn from_config(cfg: &EngineConfig) -> Self {
        let leaf = cfg.leaf.evaluator();
        let params = cfg.search_params(&*leaf);
        Self::new(leaf, params, cfg.tt_buckets)
    }

    /// Quiescence leaves, deepening from 9.
    pub fn baseline() -> Self { Self::from_config(&EngineConfig::default()) }

    /// Monte-Carlo-hybrid leaves, deepening from 2.
    pub fn hybrid() -> Self { Self::from_config(&EngineConfig::with_leaf(crate::config::LeafKind::Hybrid)) }

    pub fn leaf_name(&self) -> &'static str { self.leaf.name() }

    pub fn params(&self) -> &SearchParams { &self.params }

    pub fn searcher(&self) -> &Searcher { &self.searcher }

    /// Trim table entries that no longer fit around the game ply.
    pub fn evict(&mut self, current_ply: u32) -> EvictionStats {
        let stats = self.searcher.tt_mut().evict(current_ply, self.window);
        info!("cleaning transposition table at ply {}: {}", current_ply, stats);
        stats
    }

    /// Pick a move for the side to move without playing it.
    pub fn choose(&mut self, board: &mut Board) -> SearchResult {
        self.evict(board.ply());
        let result = self.searcher.search_with_params(&*self.leaf, board, &self.params);
        let tt = self.searcher.tt();
        info!("{} engine: {} ({} table entries in {} buckets)", self.leaf.name(), result, tt.len(), tt.bucket_count());
        result
    }

    /// Choose and play moves until the turn passes to the opponent. Returns an
    /// empty decision when the side to move has no legal move.
    pub fn think(&mut self, board: &mut Board) -> Decision {
        let t0 = Instant::now();
        let mut decision = Decision::default();
        loop {
            let result = self.choose(board);
            decision.nodes += result.nodes;
            let Some(mv) = result.best else { break; };
            decision.value = result.value;
            decision.depth = result.depth;
            info!("estimated position at {:.0}", 100.0 * result.value);
            board.play(&mv);
            decision.moves.push(mv);
            if board.forced_continuation().is_none() { break; }
        }
        decision.elapsed = t0.elapsed();
        decision
    }
}
