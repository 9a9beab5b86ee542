use connectk::board::{diff, BoardState, Cell, Grid, Player};
use connectk::search::{Algorithm, Deadline, ManualClock, SearchParams, Searcher, LOSS_SCORE, WIN_SCORE};
use connectk::Agent;
use std::time::Duration;

fn params(algorithm: Algorithm, depth: u32) -> SearchParams {
    SearchParams { algorithm, max_depth: Some(depth), ..SearchParams::default() }
}

fn pick(board: &Grid, side: Player, params: SearchParams) -> Cell {
    let clock = ManualClock::frozen();
    let agent = Agent::new(side, board).with_params(params);
    let res = agent.search_with_clock(board, 1000, &clock).expect("search runs");
    assert!(!res.fallback);
    res.best_move
}

/// Extends a fresh tree to `depth` and runs one pass, returning the root.
fn one_pass(board: &Grid, side: Player, algorithm: Algorithm, depth: u32) -> connectk::search::SearchNode<Grid> {
    let clock = ManualClock::frozen();
    let mut s = Searcher::new(side, params(algorithm, depth), Deadline::new(&clock, Duration::MAX));
    let mut root = s.root(board);
    for d in 1..=depth {
        s.extend(&mut root, d);
    }
    s.search_depth(&mut root, depth);
    assert!(!root.time_expired());
    root
}

fn win_in_one_board() -> Grid {
    // X: three on the bottom row, blocked on the left by O; only (4,0) wins.
    Grid::from_rows(
        4,
        &[
            ".......",
            ".......",
            ".......",
            ".......",
            "O......",
            "OXXX..O",
        ],
    )
    .unwrap()
}

#[test]
fn takes_the_winning_extension_at_every_depth() {
    let g = win_in_one_board();
    for algorithm in [Algorithm::AlphaBeta, Algorithm::Minimax] {
        for depth in 1..=3 {
            assert_eq!(pick(&g, Player::One, params(algorithm, depth)), Cell::new(4, 0), "{algorithm:?} depth {depth}");
        }
    }
}

#[test]
fn winning_extension_wins_in_deeper_single_passes() {
    let g = Grid::from_rows(4, &[".....", ".....", "O....", "OXXX."]).unwrap();
    for algorithm in [Algorithm::AlphaBeta, Algorithm::Minimax] {
        for depth in 1..=3 {
            let root = one_pass(&g, Player::One, algorithm, depth);
            assert_eq!(root.heuristic(), WIN_SCORE, "{algorithm:?} depth {depth}");
            let best = root.best_child().unwrap();
            assert_eq!(diff(&g, best.board()), Some(Cell::new(4, 0)), "{algorithm:?} depth {depth}");
        }
    }
}

#[test]
fn blocks_the_only_threat() {
    // O threatens (3,0); X has nothing of its own.
    let g = Grid::from_rows(
        4,
        &[
            "......X",
            ".......",
            "...X...",
            ".......",
            ".......",
            "OOO....",
        ],
    )
    .unwrap();
    for algorithm in [Algorithm::AlphaBeta, Algorithm::Minimax] {
        for depth in 1..=2 {
            assert_eq!(pick(&g, Player::One, params(algorithm, depth)), Cell::new(3, 0), "{algorithm:?} depth {depth}");
        }
    }
}

#[test]
fn player_two_blocks_too() {
    let g = Grid::from_rows(4, &[".....", "X....", "X..O.", "X..O."]).unwrap();
    assert_eq!(pick(&g, Player::Two, params(Algorithm::AlphaBeta, 2)), Cell::new(0, 3));
}

#[test]
fn alpha_beta_agrees_with_minimax() {
    let boards = [
        Grid::parse(3, "..../.X../..O./....").unwrap(),
        Grid::parse(3, "X.../..../.O../...X").unwrap(),
        Grid::parse(4, "...../.X.../..O../...../.....").unwrap(),
    ];
    for g in &boards {
        for depth in 1..=3 {
            let mm = one_pass(g, Player::One, Algorithm::Minimax, depth);
            let ab = one_pass(g, Player::One, Algorithm::AlphaBeta, depth);
            assert_eq!(mm.heuristic(), ab.heuristic(), "board\n{g}\ndepth {depth}");
            assert_eq!(
                mm.best_child().unwrap().heuristic(),
                ab.best_child().unwrap().heuristic(),
                "board\n{g}\ndepth {depth}"
            );
        }
    }
}

#[test]
fn alpha_beta_evaluates_fewer_nodes() {
    let g = Grid::parse(3, "..../.X../..O./....").unwrap();
    let count = |algorithm| {
        let clock = ManualClock::frozen();
        let agent = Agent::new(Player::One, &g).with_params(params(algorithm, 3));
        agent.search_with_clock(&g, 1000, &clock).unwrap()
    };
    let mm = count(Algorithm::Minimax);
    let ab = count(Algorithm::AlphaBeta);
    assert_eq!(mm.score, ab.score);
    assert!(ab.nodes < mm.nodes, "alpha-beta {} vs minimax {}", ab.nodes, mm.nodes);
}

#[test]
fn lost_position_still_returns_a_legal_move() {
    // O has two open threats; every X move loses.
    let g = Grid::parse(3, "O.O/.../O.O").unwrap();
    let clock = ManualClock::frozen();
    let agent = Agent::new(Player::One, &g).with_params(params(Algorithm::AlphaBeta, 2));
    let res = agent.search_with_clock(&g, 1000, &clock).unwrap();
    assert_eq!(res.score, LOSS_SCORE);
    assert!(g.get(res.best_move).is_none());
}

#[test]
fn deepening_stops_at_the_number_of_empty_cells() {
    // Two empty cells; X must block O's column at (1,0).
    let g = Grid::parse(3, "XOX/XOO/O..").unwrap();
    let clock = ManualClock::frozen();
    let agent = Agent::new(Player::One, &g);
    let res = agent.search_with_clock(&g, 1000, &clock).unwrap();
    assert_eq!(res.depth_reached, 2);
    assert_eq!(res.best_move, Cell::new(1, 0));
    assert!(!res.timed_out);
}
