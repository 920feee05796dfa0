use checkers_engine::perft::{divide, perft};
use checkers_engine::Board;

#[test]
fn perft_startpos_small_depths() {
    let mut b = Board::new();
    assert_eq!(perft(&mut b, 1), 7);
    assert_eq!(perft(&mut b, 2), 49);
    assert_eq!(perft(&mut b, 3), 302);
    assert_eq!(perft(&mut b, 4), 1469);
    assert_eq!(perft(&mut b, 5), 7361);
}

#[test]
fn divide_sums_to_perft_and_restores_board() {
    let mut b = Board::new();
    let before = *b.bits();
    let split = divide(&mut b, 4);
    assert_eq!(split.len(), 7);
    assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 1469);
    assert_eq!(*b.bits(), before);
    assert_eq!(b.saved_frames(), 0);
    assert_eq!(b.ply(), 0);
}
