use clap::Parser;
use checkers_engine::selfplay::{generate_games, write_records, SelfPlayParams, Summary};
use checkers_engine::{EngineConfig, LeafKind};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "checkers-selfplay", about = "Play engine-vs-engine matches")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    /// Random plies at the start of each game
    #[arg(long, default_value_t = 4)]
    random_plies: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, value_enum, default_value_t = LeafKind::Quiescence)]
    red: LeafKind,
    #[arg(long, value_enum, default_value_t = LeafKind::Hybrid)]
    black: LeafKind,
    #[arg(long, default_value_t = 200)]
    movetime_ms: u64,
    #[arg(long, default_value_t = 300_000)]
    nodes: u64,
    /// Worker threads (0 = rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,
    /// Write the games as JSON lines
    #[arg(long)]
    out: Option<PathBuf>,
}

fn engine_config(leaf: LeafKind, a: &Args) -> EngineConfig {
    EngineConfig { movetime_ms: a.movetime_ms, node_budget: a.nodes, ..EngineConfig::with_leaf(leaf) }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        max_plies: a.max_plies,
        random_plies: a.random_plies,
        seed: a.seed,
        red: engine_config(a.red, &a),
        black: engine_config(a.black, &a),
    };
    eprintln!("Playing {} games ({:?} red vs {:?} black, {}ms, {} nodes)", a.games, a.red, a.black, a.movetime_ms, a.nodes);

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {elapsed_precise}")?);
    let run = || generate_games(&params, |_| pb.inc(1));
    let games = if a.threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(a.threads).build()?;
        pool.install(run)
    } else {
        run()
    };
    pb.finish();

    println!("{}", Summary::from_games(&games));
    if let Some(out) = a.out {
        write_records(&games, &out)?;
        eprintln!("Wrote {} games to {}", games.len(), out.display());
    }
    Ok(())
}
