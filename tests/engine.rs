use checkers_engine::{Board, Engine, EngineConfig, LeafKind};
use pretty_assertions::assert_eq;

const DOUBLE_JUMP: &str = "
    . . . . . . . b
    . . . . . . . .
    . . . . . . . .
    . . . . b . . .
    . . . . . . . .
    . . b . . . . .
    . r . . . b . .
    . . . . . . r .
";

fn quick(leaf: LeafKind) -> EngineConfig {
    EngineConfig { movetime_ms: 60_000, node_budget: 20_000, start_depth: Some(1), max_depth: 4, ..EngineConfig::with_leaf(leaf) }
}

#[test]
fn think_finishes_the_jump_chain() {
    let mut b = Board::from_diagram(DOUBLE_JUMP, true).unwrap();
    let mut engine = Engine::from_config(&quick(LeafKind::Static));
    let decision = engine.think(&mut b);
    let played: Vec<String> = decision.moves.iter().map(|m| m.to_string()).collect();
    assert_eq!(played, vec!["b2xd4", "d4xf6"]);
    assert!(!b.red_to_move());
    assert_eq!(b.forced_continuation(), None);
    assert_eq!(b.ply(), 2);
    assert!(decision.nodes > 0);
}

#[test]
fn think_without_moves_plays_nothing() {
    let mut b = Board::from_diagram(
        "
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . b . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        ",
        true,
    )
    .unwrap();
    let before = *b.bits();
    let mut engine = Engine::from_config(&quick(LeafKind::Quiescence));
    let decision = engine.think(&mut b);
    assert!(decision.moves.is_empty());
    assert_eq!(*b.bits(), before);
}

#[test]
fn baseline_engine_opens_with_a_legal_move() {
    let mut b = Board::new();
    let mut engine = Engine::from_config(&quick(LeafKind::Quiescence));
    assert_eq!(engine.leaf_name(), "quiescence");
    let result = engine.choose(&mut b);
    let mv = result.best.expect("no opening move");
    assert!(b.legal_move(&mv).is_some());
    // choose does not play
    assert!(b.red_to_move());
    assert!(!engine.searcher().tt().is_empty());
}

#[test]
fn hybrid_engine_moves_under_a_small_budget() {
    let mut b = Board::new();
    let cfg = EngineConfig { node_budget: 5_000, movetime_ms: 10, ..EngineConfig::with_leaf(LeafKind::Hybrid) };
    let mut engine = Engine::from_config(&cfg);
    assert_eq!(engine.leaf_name(), "hybrid");
    assert_eq!(engine.params().start_depth, 2);
    let decision = engine.think(&mut b);
    assert_eq!(decision.moves.len(), 1);
    assert!(!b.red_to_move());
}

#[test]
fn eviction_follows_the_leaf_window() {
    let mut b = Board::new();
    let mut engine = Engine::from_config(&quick(LeafKind::Quiescence));
    engine.choose(&mut b);
    let stored = engine.searcher().tt().len();
    assert!(stored > 0);
    // everything was written within a few plies of the root
    let stats = engine.evict(100);
    assert_eq!(stats.removed, stored);
    assert!(engine.searcher().tt().is_empty());
}

#[test]
fn presets() {
    assert_eq!(Engine::baseline().params().start_depth, 9);
    assert_eq!(Engine::hybrid().params().start_depth, 2);
    assert_eq!(Engine::hybrid().leaf_name(), "hybrid");
    let small = Engine::from_config(&EngineConfig { tt_buckets: 64, ..EngineConfig::default() });
    assert_eq!(small.searcher().tt().bucket_count(), 64);
    assert_eq!(Engine::baseline().searcher().tt().bucket_count(), 1000);
}
