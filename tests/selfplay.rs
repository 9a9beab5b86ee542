use connectk::search::SearchParams;
use connectk::selfplay::{generate_games, read_jsonl, write_jsonl, SelfPlayParams};
use pretty_assertions::assert_eq;

fn fixed_depth_params(seed: u64) -> SelfPlayParams {
    SelfPlayParams {
        games: 3,
        width: 4,
        height: 4,
        k: 3,
        random_plies: 2,
        movetime_ms: 1000,
        fixed_depth: true,
        seed,
        search: SearchParams { max_depth: Some(1), ..SearchParams::default() },
    }
}

#[test]
fn selfplay_generates_games_deterministically() {
    let params = fixed_depth_params(42);
    let g1 = generate_games(&params, |_| {}).unwrap();
    let g2 = generate_games(&params, |_| {}).unwrap();
    assert_eq!(g1.len(), 3);
    assert_eq!(g1, g2);
}

#[test]
fn recorded_games_replay_to_their_result() {
    let mut seen = 0;
    let games = generate_games(&fixed_depth_params(7), |_| seen += 1).unwrap();
    assert_eq!(seen, games.len());
    for g in &games {
        let board = g.replay().unwrap();
        assert_eq!(board.winner(), g.winner);
        assert!(g.moves.len() <= 16);
    }
}

#[test]
fn fixed_depth_requires_a_depth_cap() {
    let mut params = fixed_depth_params(1);
    params.search.max_depth = None;
    assert!(generate_games(&params, |_| {}).is_err());
}

#[test]
fn jsonl_round_trip() {
    let games = generate_games(&fixed_depth_params(123), |_| {}).unwrap();
    let path = std::env::temp_dir().join(format!("connectk_selfplay_{}.jsonl", std::process::id()));
    write_jsonl(&games, &path).unwrap();
    let back = read_jsonl(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(back, games);
}
