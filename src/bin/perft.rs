use checkers_engine::perft::{divide, perft};
use checkers_engine::Board;
use clap::Parser;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Move generator node counts")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// Print per-move counts at the root
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let mut board = Board::new();
    let t0 = Instant::now();
    let nodes = if args.divide {
        let per_move = divide(&mut board, args.depth);
        for (mv, n) in &per_move { println!("{mv}: {n}"); }
        if args.depth == 0 { 1 } else { per_move.iter().map(|(_, n)| n).sum() }
    } else {
        perft(&mut board, args.depth)
    };
    let dt = t0.elapsed().as_secs_f64();
    if args.nps {
        let nps = if dt > 0.0 { nodes as f64 / dt } else { f64::INFINITY };
        println!("nodes: {} elapsed: {:.3}s nps: {:.0}", nodes, dt, nps);
    } else {
        println!("nodes: {}", nodes);
    }
}
