use checkers_engine::{Board, Piece, Square};
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

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

fn names(board: &Board) -> Vec<String> { board.legal_moves().iter().map(|m| m.to_string()).collect() }

#[test]
fn start_position_has_seven_moves() {
    let b = Board::new();
    assert_eq!(
        names(&b),
        vec!["a3-b4", "c3-d4", "c3-b4", "e3-f4", "e3-d4", "g3-h4", "g3-f4"]
    );
    assert!(b.legal_moves().iter().all(|m| !m.capture));
}

#[test]
fn capture_is_mandatory() {
    let mut b = Board::new();
    let m = b.parse_move("c3-d4").unwrap();
    b.play(&m);
    let m = b.parse_move("f6-e5").unwrap();
    b.play(&m);
    assert!(b.red_to_move());
    assert_eq!(names(&b), vec!["d4xf6"]);
}

#[test]
fn continuation_restricts_to_the_jumping_piece() {
    let mut b = Board::from_diagram(DOUBLE_JUMP, true).unwrap();
    assert_eq!(names(&b), vec!["b2xd4", "g1xe3"]);

    let first = b.parse_move("b2xd4").unwrap();
    b.play(&first);
    assert!(b.red_to_move(), "turn must not pass mid-chain");
    assert_eq!(b.forced_continuation(), Some(Square::new(3, 4)));
    // g1xe3 is still on the board but no longer legal
    assert_eq!(names(&b), vec!["d4xf6"]);

    let second = b.parse_move("d4xf6").unwrap();
    b.play(&second);
    assert!(!b.red_to_move());
    assert_eq!(b.forced_continuation(), None);
    assert_eq!(b.bits().count(false), 2);
}

#[test]
fn man_is_crowned_and_king_moves_backwards() {
    let diagram = "
        . . . . . . . .
        . . r . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . b
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
    ";
    let mut b = Board::from_diagram(diagram, true).unwrap();
    let crown = b.parse_move("c7-b8").unwrap();
    assert!(crown.promotes());
    assert!(crown.is_noisy());
    b.play(&crown);
    assert_eq!(b.bits().get(Square::new(1, 0)), Some(Piece::RED_KING));
    assert!(!b.red_to_move());

    assert_eq!(names(&b), vec!["h4-g3"]);
    let reply = b.parse_move("h4-g3").unwrap();
    b.play(&reply);

    let king_moves = b.moves_at(Square::new(1, 0));
    assert_eq!(king_moves.len(), 2);
    assert!(king_moves.iter().all(|m| m.to.y == 1));
}

#[test]
fn random_games_respect_forced_capture() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut b = Board::new();
        for _ in 0..150 {
            let legal = b.legal_moves();
            if legal.is_empty() { break; }
            if b.forced_continuation().is_none() {
                let own: Vec<_> = b
                    .bits()
                    .pieces(b.red_to_move())
                    .flat_map(|(sq, _)| b.moves_at(sq))
                    .collect();
                if own.iter().any(|m| m.capture) {
                    assert!(legal.iter().all(|m| m.capture), "quiet move offered with a capture on\n{}", b);
                } else {
                    assert_eq!(legal.len(), own.len());
                }
            } else {
                let from = b.forced_continuation().unwrap();
                assert!(legal.iter().all(|m| m.capture && m.from == from));
            }
            let mv = legal[rng.gen_range(0..legal.len())];
            b.play(&mv);
        }
    }
}

#[test]
fn pieces_never_overlap_colours() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut b = Board::new();
    for _ in 0..200 {
        let bits = b.bits();
        assert_eq!(bits.red & !bits.exists, 0);
        assert_eq!(bits.king & !bits.exists, 0);
        let legal = b.legal_moves();
        if legal.is_empty() { break; }
        let mv = legal[rng.gen_range(0..legal.len())];
        b.play(&mv);
    }
}
