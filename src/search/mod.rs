pub mod eval;
pub mod hash;
pub mod leaf;
pub mod negascout;
pub mod order;
pub mod tt;

pub use leaf::{LeafEvaluator, MonteCarloHybrid, Quiescence, StaticEval};
pub use negascout::{Scored, SearchParams, SearchResult, Searcher, TtMode};
pub use tt::{Bound, Entry, EvictionStats, PlyWindow, Tt};
