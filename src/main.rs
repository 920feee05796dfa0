use anyhow::Result;
use checkers_engine::{Board, Engine, EngineConfig, LeafKind, Move};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play checkers against the negascout engine", long_about = None)]
struct Args {
    /// Your colour: 'r' for red, 'b' for black, 'n' to watch the engine play itself
    #[arg(long, default_value = "r")]
    human: String,

    /// Leaf evaluation of the engine [default: quiescence]
    #[arg(long, value_enum)]
    engine: Option<LeafKind>,

    /// Thinking time per decision in milliseconds
    #[arg(long)]
    movetime: Option<u64>,

    /// Node budget per decision
    #[arg(long)]
    nodes: Option<u64>,

    /// JSON engine configuration (command-line flags override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many plies
    #[arg(long, default_value_t = 400)]
    max_plies: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Human {
    Red,
    Black,
    Nobody,
}

fn parse_human(s: &str) -> Result<Human> {
    match s.to_lowercase().as_str() {
        "r" | "red" => Ok(Human::Red),
        "b" | "black" => Ok(Human::Black),
        "n" | "none" => Ok(Human::Nobody),
        _ => anyhow::bail!("Invalid colour: use 'r', 'b' or 'n'"),
    }
}

fn print_board(board: &Board) {
    println!("\n{}", board);
}

fn get_human_move(board: &Board) -> Result<Option<Move>> {
    loop {
        print!("Enter your move (e.g. c3-d4, c3xe5) or 'quit': ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 { return Ok(None); }
        let input = input.trim();
        if input == "quit" { return Ok(None); }

        match board.parse_move(input) {
            Ok(mv) => return Ok(Some(mv)),
            Err(e) => {
                println!("{e}");
                let legal: Vec<String> = board.legal_moves().iter().map(Move::to_string).collect();
                println!("Legal moves: {}", legal.join(" "));
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let human = parse_human(&args.human)?;

    let mut cfg = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(kind) = args.engine { cfg.leaf = kind; }
    if let Some(ms) = args.movetime { cfg.movetime_ms = ms; }
    if let Some(n) = args.nodes { cfg.node_budget = n; }
    let mut engine = Engine::from_config(&cfg);
    println!("Engine: {} leaves, {}ms, {} nodes", engine.leaf_name(), cfg.movetime_ms, cfg.node_budget);

    let mut board = Board::new();
    loop {
        print_board(&board);
        if board.is_game_over() {
            let winner = if board.red_to_move() { "Black" } else { "Red" };
            println!("\nNo moves left. {winner} wins!");
            break;
        }
        if board.ply() >= args.max_plies {
            println!("\nPly limit reached, game drawn.");
            break;
        }

        let human_turn = match human {
            Human::Red => board.red_to_move(),
            Human::Black => !board.red_to_move(),
            Human::Nobody => false,
        };
        if human_turn {
            let Some(mv) = get_human_move(&board)? else {
                println!("Thanks for playing!");
                break;
            };
            board.play_checked(&mv)?;
            // A pending multi-jump stays with the human.
        } else {
            println!("Thinking...");
            let decision = engine.think(&mut board);
            let played: Vec<String> = decision.moves.iter().map(Move::to_string).collect();
            println!(
                "Engine plays: {} (value {:.3}, depth {}, {} nodes, {}ms)",
                played.join(" "),
                decision.value,
                decision.depth,
                decision.nodes,
                decision.elapsed.as_millis()
            );
        }
    }

    Ok(())
}
