use std::time::Duration;

use checkers_engine::search::{MonteCarloHybrid, Quiescence};
use checkers_engine::{EngineConfig, Error, LeafKind};
use pretty_assertions::assert_eq;

#[test]
fn partial_json_fills_defaults() {
    let cfg = EngineConfig::from_json(r#"{ "leaf": "hybrid", "node_budget": 1000 }"#).unwrap();
    assert_eq!(cfg.leaf, LeafKind::Hybrid);
    assert_eq!(cfg.node_budget, 1000);
    assert_eq!(cfg.movetime_ms, EngineConfig::default().movetime_ms);
    assert_eq!(cfg.tt_buckets, 1000);
    assert!(cfg.use_tt);
}

#[test]
fn json_round_trip() {
    let cfg = EngineConfig { start_depth: Some(3), order_moves: false, ..EngineConfig::with_leaf(LeafKind::Static) };
    let text = cfg.to_json().unwrap();
    assert_eq!(EngineConfig::from_json(&text).unwrap(), cfg);
}

#[test]
fn unknown_leaf_is_a_config_error() {
    let err = EngineConfig::from_json(r#"{ "leaf": "random" }"#).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn load_from_file() {
    let dir = std::path::Path::new("target/config_test");
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join("engine.json");
    std::fs::write(&path, r#"{ "movetime_ms": 250 }"#).unwrap();
    let cfg = EngineConfig::load(&path).unwrap();
    assert_eq!(cfg.movetime_ms, 250);
    assert!(matches!(EngineConfig::load(dir.join("missing.json")), Err(Error::Io(_))));
}

#[test]
fn search_params_use_the_leaf_start_depth() {
    let cfg = EngineConfig::default();
    let p = cfg.search_params(&Quiescence);
    assert_eq!(p.start_depth, 9);
    assert_eq!(p.movetime, Some(Duration::from_millis(1000)));
    assert_eq!(p.node_budget, 3_000_000);
    assert_eq!(cfg.search_params(&MonteCarloHybrid::default()).start_depth, 2);

    let pinned = EngineConfig { start_depth: Some(5), ..cfg };
    assert_eq!(pinned.search_params(&Quiescence).start_depth, 5);
}
