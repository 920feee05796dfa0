use std::sync::atomic::{AtomicUsize, Ordering};

use checkers_engine::selfplay::{generate_games, play_game, read_records, write_records, SelfPlayParams, Summary};
use checkers_engine::{Board, EngineConfig, LeafKind};

fn tiny() -> SelfPlayParams {
    let engine = EngineConfig {
        node_budget: 2_000,
        start_depth: Some(1),
        max_depth: 2,
        ..EngineConfig::with_leaf(LeafKind::Static)
    };
    SelfPlayParams { games: 3, max_plies: 12, random_plies: 2, seed: 123, red: engine.clone(), black: engine }
}

#[test]
fn tiny_match_terminates_with_legal_games() {
    let params = tiny();
    let finished = AtomicUsize::new(0);
    let games = generate_games(&params, |_| {
        finished.fetch_add(1, Ordering::Relaxed);
    });
    assert_eq!(games.len(), 3);
    assert_eq!(finished.load(Ordering::Relaxed), 3);
    for g in &games {
        assert!(g.moves.len() >= params.random_plies);
        // replay the record through the move parser
        let mut b = Board::new();
        for text in &g.moves {
            let mv = b.parse_move(text).unwrap();
            b.play(&mv);
        }
    }
    let s = Summary::from_games(&games);
    assert_eq!(s.red_wins + s.black_wins + s.draws, 3);
}

#[test]
fn games_are_reproducible_from_the_seed() {
    let params = tiny();
    assert_eq!(play_game(&params, 1), play_game(&params, 1));
}

#[test]
fn write_and_read_records() {
    let params = SelfPlayParams { games: 2, ..tiny() };
    let games = generate_games(&params, |_| {});
    let outdir = std::path::Path::new("target/selfplay_test");
    std::fs::create_dir_all(outdir).unwrap();
    let path = outdir.join("games.jsonl");
    write_records(&games, &path).unwrap();
    let back = read_records(&path).unwrap();
    assert_eq!(back, games);
}
