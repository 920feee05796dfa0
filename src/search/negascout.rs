use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::board::{Board, Move};
use crate::search::eval::{self, evaluate_for_mover};
use crate::search::leaf::LeafEvaluator;
use crate::search::order::ordered_moves;
use crate::search::tt::{Bound, Entry, Probe, Tt};

/// Root window; wider than any loss score.
pub const INFINITY: f64 = 1_000_000_000.0;
// Null window for scouting non-first moves.
const SCOUT_WINDOW: f64 = 1e-6;
/// Below this depth moves are searched in generation order.
pub const ORDERING_MIN_DEPTH: f64 = 4.0;
// Depth step for the table move; the discount re-verifies it a little deeper.
const PREFERRED_STEP: f64 = 0.9;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub start_depth: u32,
    pub max_depth: u32,
    pub node_budget: u64,
    pub movetime: Option<Duration>,
    pub use_tt: bool,
    pub order_moves: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            start_depth: 1,
            max_depth: 64,
            node_budget: 3_000_000,
            movetime: Some(Duration::from_secs(1)),
            use_tt: true,
            order_moves: true,
        }
    }
}

/// Whether a search may write the transposition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtMode {
    ReadWrite,
    ReadOnly,
}

/// Value of a node for its side to move, with the move that achieved it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scored {
    pub value: f64,
    pub best: Option<Move>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best: Option<Move>,
    /// From the side to move's perspective.
    pub value: f64,
    /// Depth of the iteration the result came from.
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub exhausted: bool,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let best = self.best.map_or_else(|| "(none)".to_string(), |m| m.to_string());
        write!(
            f,
            "bestmove={} value={:.3} depth={} nodes={} elapsed={}ms{}",
            best,
            self.value,
            self.depth,
            self.nodes,
            self.elapsed.as_millis(),
            if self.exhausted { " (node budget exhausted)" } else { "" }
        )
    }
}

pub struct Searcher {
    tt: Tt,
    nodes: u64,
    budget: i64,
    use_tt: bool,
    order_moves: bool,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(Tt::default()) }
}

impl Searcher {
    pub fn new(tt: Tt) -> Self {
        Self { tt, nodes: 0, budget: i64::MAX, use_tt: true, order_moves: true }
    }

    pub fn tt(&self) -> &Tt { &self.tt }

    pub fn tt_mut(&mut self) -> &mut Tt { &mut self.tt }

    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn exhausted(&self) -> bool { self.budget <= 0 }

    pub fn set_node_budget(&mut self, nodes: u64) { self.budget = i64::try_from(nodes).unwrap_or(i64::MAX); }

    pub fn set_use_tt(&mut self, on: bool) { self.use_tt = on; }

    pub fn set_order_moves(&mut self, on: bool) { self.order_moves = on; }

    fn configure(&mut self, params: &SearchParams) {
        self.nodes = 0;
        self.set_node_budget(params.node_budget);
        self.use_tt = params.use_tt;
        self.order_moves = params.order_moves;
    }

    // One call = one node against the budget.
    fn tick(&mut self) {
        self.nodes += 1;
        self.budget -= 1;
    }

    pub fn tt_entry(&self, board: &Board) -> Option<Entry> { self.tt.get(self.tt.key(board.bits())) }

    /// Quiescence value of `board` for the side to move, with a full window.
    pub fn qsearch_eval(&mut self, board: &mut Board) -> f64 { self.qsearch(board, -INFINITY, INFINITY) }

    /// Captures and crowning moves only, standing pat on the static evaluation.
    pub fn qsearch(&mut self, board: &mut Board, mut alpha: f64, beta: f64) -> f64 {
        self.tick();
        let stand = evaluate_for_mover(board.bits());
        if stand >= beta { return beta; }
        if self.exhausted() { return stand.max(alpha); }
        if stand > alpha { alpha = stand; }

        let moves = board.legal_moves();
        if moves.is_empty() { return eval::loss_score(board.ply()); }
        for mv in moves.iter().filter(|m| m.is_noisy()) {
            let score = {
                let mut child = board.scoped();
                child.apply(mv);
                if child.forced_continuation().is_some() {
                    self.qsearch(&mut child, alpha, beta)
                } else {
                    -self.qsearch(&mut child, -beta, -alpha)
                }
            };
            if score >= beta { return beta; }
            if score > alpha { alpha = score; }
        }
        alpha
    }

    /// Principal-variation search. Values are for the side to move; a child
    /// that continues a multi-jump keeps the same side, window and sign.
    pub fn negascout(
        &mut self,
        leaf: &dyn LeafEvaluator,
        board: &mut Board,
        depth: f64,
        alpha: f64,
        beta: f64,
        mode: TtMode,
    ) -> Scored {
        self.tick();
        let (orig_alpha, orig_beta) = (alpha, beta);
        let (mut alpha, mut beta) = (alpha, beta);

        let key = self.tt.key(board.bits());
        let cached = if self.use_tt { self.tt.get(key) } else { None };
        if let Some(entry) = &cached {
            match entry.probe(depth, alpha, beta) {
                Probe::Cutoff { value, best } => return Scored { value, best },
                Probe::Window { alpha: a, beta: b } => {
                    alpha = a;
                    beta = b;
                }
            }
        }

        if depth <= 0.0 || self.exhausted() {
            return Scored { value: leaf.evaluate(self, board, alpha, beta), best: None };
        }

        let moves = if self.order_moves && depth >= ORDERING_MIN_DEPTH {
            let tt = if self.use_tt { Some(&self.tt) } else { None };
            ordered_moves(board, tt, cached.as_ref())
        } else {
            board.legal_moves()
        };
        if moves.is_empty() {
            return Scored { value: eval::loss_score(board.ply()), best: None };
        }

        let (window_alpha, window_beta) = (alpha, beta);
        let mut best = Scored { value: f64::NEG_INFINITY, best: None };
        for (i, mv) in moves.iter().enumerate() {
            let step = if mv.preferred { PREFERRED_STEP } else { 1.0 };
            let value = {
                let mut child = board.scoped();
                child.apply(mv);
                self.search_child(leaf, &mut child, depth - step, alpha, beta, i == 0, mode)
            };
            if value > best.value { best = Scored { value, best: Some(*mv) }; }
            if best.value > alpha { alpha = best.value; }
            // Out of nodes: hand back what we have, never store it.
            if self.exhausted() { return best; }
            if alpha >= beta { break; }
        }

        if mode == TtMode::ReadWrite && self.use_tt {
            let bound = if best.value <= orig_alpha {
                Bound::Upper
            } else if best.value >= orig_beta {
                Bound::Lower
            } else {
                Bound::Exact
            };
            let entry = Entry {
                value: best.value,
                best: best.best,
                depth,
                alpha: window_alpha,
                beta: window_beta,
                bound,
                ply: board.ply(),
            };
            self.tt.put(key, entry);
        }
        best
    }

    // Value of an already-applied child, from the parent's perspective.
    // Later siblings get a null-window scout first and are re-searched only
    // when the scout lands inside the window.
    #[allow(clippy::too_many_arguments)]
    fn search_child(
        &mut self,
        leaf: &dyn LeafEvaluator,
        child: &mut Board,
        depth: f64,
        alpha: f64,
        beta: f64,
        first: bool,
        mode: TtMode,
    ) -> f64 {
        let scout_beta = alpha + SCOUT_WINDOW;
        if first || scout_beta <= alpha || scout_beta >= beta {
            return self.child_value(leaf, child, depth, alpha, beta, mode);
        }
        let scout = self.child_value(leaf, child, depth, alpha, scout_beta, mode);
        if scout > alpha && scout < beta && !self.exhausted() {
            return self.child_value(leaf, child, depth, alpha, beta, mode);
        }
        scout
    }

    fn child_value(&mut self, leaf: &dyn LeafEvaluator, child: &mut Board, depth: f64, alpha: f64, beta: f64, mode: TtMode) -> f64 {
        if child.forced_continuation().is_some() {
            // Same player jumps again: no sign flip.
            self.negascout(leaf, child, depth, alpha, beta, mode).value
        } else {
            -self.negascout(leaf, child, depth, -beta, -alpha, mode).value
        }
    }

    /// One full-window search to a fixed depth with no node limit.
    pub fn search_depth(&mut self, leaf: &dyn LeafEvaluator, board: &mut Board, depth: u32) -> SearchResult {
        let t0 = Instant::now();
        self.nodes = 0;
        self.budget = i64::MAX;
        let scored = self.negascout(leaf, board, depth as f64, -INFINITY, INFINITY, TtMode::ReadWrite);
        SearchResult { best: scored.best, value: scored.value, depth, nodes: self.nodes, elapsed: t0.elapsed(), exhausted: false }
    }

    /// Iterative deepening from `start_depth` until the time limit passes
    /// (checked between iterations only), the score turns decisive, the node
    /// budget runs out or `max_depth` is reached. An iteration cut short by the
    /// budget is used only if no iteration completed before it.
    pub fn search_with_params(&mut self, leaf: &dyn LeafEvaluator, board: &mut Board, params: &SearchParams) -> SearchResult {
        self.configure(params);
        let t0 = Instant::now();
        let mut completed: Option<SearchResult> = None;
        let mut depth = params.start_depth.max(1);
        loop {
            if let Some(limit) = params.movetime {
                if completed.is_some() && t0.elapsed() > limit { break; }
            }
            let scored = self.negascout(leaf, board, depth as f64, -INFINITY, INFINITY, TtMode::ReadWrite);
            let result = SearchResult {
                best: scored.best,
                value: scored.value,
                depth,
                nodes: self.nodes,
                elapsed: t0.elapsed(),
                exhausted: self.exhausted(),
            };
            if result.exhausted {
                debug!("depth {} cut short after {} nodes", depth, self.nodes);
                if completed.is_none() { completed = Some(result); }
                break;
            }
            info!(
                "depth {} value {:.3} best {} nodes {} {}ms",
                depth,
                result.value,
                result.best.map_or_else(|| "(none)".to_string(), |m| m.to_string()),
                result.nodes,
                result.elapsed.as_millis()
            );
            let done = result.best.is_none() || eval::is_decisive(result.value) || depth >= params.max_depth;
            completed = Some(result);
            if done { break; }
            depth += 1;
        }

        let mut out = completed.unwrap_or_default();
        // Table collisions can surface a move from another position; only a legal one is returned.
        out.best = match out.best.and_then(|m| board.legal_move(&m)) {
            Some(mv) => Some(mv),
            None => {
                let fallback = board.legal_moves().first().copied();
                if let Some(mv) = fallback { warn!("no usable searched move, falling back to {}", mv); }
                fallback
            }
        };
        out.nodes = self.nodes;
        out.elapsed = t0.elapsed();
        out.exhausted = self.exhausted();
        out
    }
}
