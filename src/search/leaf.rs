use crate::board::Board;
use crate::search::eval::{evaluate_for_mover, DECISIVE_SCORE};
use crate::search::negascout::{Searcher, TtMode, INFINITY};
use crate::search::tt::PlyWindow;

/// What the search returns once it runs out of depth or nodes.
pub trait LeafEvaluator {
    fn name(&self) -> &'static str;

    /// Value of `board` for its side to move. `alpha`/`beta` is the window of
    /// the calling node. The board must be left as it was found.
    fn evaluate(&self, searcher: &mut Searcher, board: &mut Board, alpha: f64, beta: f64) -> f64;

    /// First depth of iterative deepening.
    fn start_depth(&self) -> u32;

    /// Table entries to keep between moves.
    fn ply_window(&self) -> PlyWindow;
}

/// Plain static evaluation.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticEval;

impl LeafEvaluator for StaticEval {
    fn name(&self) -> &'static str { "static" }

    fn evaluate(&self, _searcher: &mut Searcher, board: &mut Board, _alpha: f64, _beta: f64) -> f64 {
        evaluate_for_mover(board.bits())
    }

    fn start_depth(&self) -> u32 { 1 }

    fn ply_window(&self) -> PlyWindow { Quiescence.ply_window() }
}

/// Resolve pending captures and crownings before trusting the evaluation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Quiescence;

impl LeafEvaluator for Quiescence {
    fn name(&self) -> &'static str { "quiescence" }

    fn evaluate(&self, searcher: &mut Searcher, board: &mut Board, alpha: f64, beta: f64) -> f64 {
        searcher.qsearch(board, alpha, beta)
    }

    fn start_depth(&self) -> u32 { 9 }

    fn ply_window(&self) -> PlyWindow { PlyWindow { min_ahead: 0, max_ahead: Some(9) } }
}

/// Play a short line of the engine's own best moves from the leaf and average
/// the shallow search values seen along it.
#[derive(Clone, Copy, Debug)]
pub struct MonteCarloHybrid {
    /// Counted rollout steps.
    pub steps: u32,
    /// Search depth of the first step; each played move takes half a ply off.
    pub depth: f64,
}

impl Default for MonteCarloHybrid {
    fn default() -> Self { Self { steps: 7, depth: 5.0 } }
}

impl LeafEvaluator for MonteCarloHybrid {
    fn name(&self) -> &'static str { "hybrid" }

    fn evaluate(&self, searcher: &mut Searcher, board: &mut Board, _alpha: f64, _beta: f64) -> f64 {
        let leaf_red = board.red_to_move();
        let mut line = board.scoped();
        let (mut total, mut counted, mut played) = (0.0, 0u32, 0u32);
        while counted < self.steps {
            let depth = self.depth - played as f64 / 2.0;
            // Rollout searches only read the table.
            let step = searcher.negascout(&Quiescence, &mut line, depth, -INFINITY, INFINITY, TtMode::ReadOnly);
            let value = if line.red_to_move() == leaf_red { step.value } else { -step.value };
            let Some(mv) = step.best.and_then(|m| line.legal_move(&m)) else {
                if counted == 0 { return value; }
                break;
            };
            // A jump on the last counted step extends the line.
            if !(mv.capture && counted + 1 == self.steps) {
                total += value;
                counted += 1;
            }
            if counted > 0 && (total / counted as f64).abs() > DECISIVE_SCORE { break; }
            line.apply(&mv);
            played += 1;
        }
        if counted == 0 { return evaluate_for_mover(line.bits()); }
        total / counted as f64
    }

    fn start_depth(&self) -> u32 { 2 }

    fn ply_window(&self) -> PlyWindow { PlyWindow { min_ahead: 3, max_ahead: None } }
}
