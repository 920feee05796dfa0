use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::search::{LeafEvaluator, MonteCarloHybrid, Quiescence, SearchParams, StaticEval};

/// Which leaf evaluation the engine runs at the search horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LeafKind {
    #[default]
    Quiescence,
    Hybrid,
    Static,
}

impl LeafKind {
    pub fn evaluator(self) -> Box<dyn LeafEvaluator + Send> {
        match self {
            LeafKind::Quiescence => Box::new(Quiescence),
            LeafKind::Hybrid => Box::new(MonteCarloHybrid::default()),
            LeafKind::Static => Box::new(StaticEval),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub leaf: LeafKind,
    /// Wall-clock budget per decision, checked between deepening iterations.
    pub movetime_ms: u64,
    /// Node budget per decision.
    pub node_budget: u64,
    /// Overrides the leaf's own starting depth.
    pub start_depth: Option<u32>,
    pub max_depth: u32,
    pub tt_buckets: usize,
    pub use_tt: bool,
    pub order_moves: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            leaf: LeafKind::Quiescence,
            movetime_ms: 1_000,
            node_budget: 3_000_000,
            start_depth: None,
            max_depth: 64,
            tt_buckets: crate::search::hash::DEFAULT_BUCKETS,
            use_tt: true,
            order_moves: true,
        }
    }
}

impl EngineConfig {
    pub fn with_leaf(leaf: LeafKind) -> Self { Self { leaf, ..Self::default() } }

    pub fn from_json(text: &str) -> Result<Self> { Ok(serde_json::from_str(text)?) }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }

    pub fn search_params(&self, leaf: &dyn LeafEvaluator) -> SearchParams {
        SearchParams {
            start_depth: self.start_depth.unwrap_or_else(|| leaf.start_depth()),
            max_depth: self.max_depth,
            node_budget: self.node_budget,
            movetime: Some(Duration::from_millis(self.movetime_ms)),
            use_tt: self.use_tt,
            order_moves: self.order_moves,
        }
    }
}
