use connectk::board::{diff, BoardState, Grid, Player};
use connectk::search::{Deadline, ManualClock, SearchNode, SearchParams, Searcher};
use std::time::Duration;

#[test]
fn empty_connect_four_board_has_42_root_children() {
    let g = Grid::new(7, 6, 4).unwrap();
    let clock = ManualClock::frozen();
    let mut s = Searcher::new(Player::One, SearchParams::default(), Deadline::new(&clock, Duration::MAX));
    let mut root = s.root(&g);
    s.extend(&mut root, 1);
    assert_eq!(root.children().len(), 42);
    for child in root.children() {
        let cell = diff(&g, child.board()).expect("child differs from root");
        assert_eq!(child.board().get(cell), Some(Player::One));
        assert_eq!(child.board().empty_cells(), 41);
        assert_eq!(child.mover(), Player::One);
    }
}

fn assert_full(node: &SearchNode<Grid>, plies: u32) {
    if plies == 0 {
        return;
    }
    assert_eq!(node.children().len(), node.capacity());
    assert_eq!(node.capacity(), node.board().empty_cells());
    for c in node.children() {
        assert_ne!(c.mover(), node.mover());
        assert_full(c, plies - 1);
    }
}

#[test]
fn full_expansion_matches_empty_cells_at_every_level() {
    let g = Grid::parse(3, "X../.O./...").unwrap();
    let clock = ManualClock::frozen();
    let mut s = Searcher::new(Player::One, SearchParams::default(), Deadline::new(&clock, Duration::MAX));
    let mut root = s.root(&g);
    for d in 1..=3 {
        s.extend(&mut root, d);
    }
    assert_full(&root, 3);
    assert_eq!(root.subtree_size(), 1 + 7 + 7 * 6 + 7 * 6 * 5);
    assert_eq!(root.height(), 3);
}
