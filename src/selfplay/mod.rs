use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::agent::Agent;
use crate::board::{BoardState, Cell, Grid, Player};
use crate::error::{Error, Result};
use crate::search::{ManualClock, SearchParams, SystemClock};

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub width: usize,
    pub height: usize,
    pub k: usize,
    /// Uniformly random moves played before the agents take over.
    pub random_plies: usize,
    pub movetime_ms: i64,
    /// Search against a frozen clock; `search.max_depth` must then be set.
    pub fixed_depth: bool,
    pub seed: u64,
    pub search: SearchParams,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self {
            games: 10,
            width: 7,
            height: 6,
            k: 4,
            random_plies: 2,
            movetime_ms: 200,
            fixed_depth: false,
            seed: 42,
            search: SearchParams::default(),
        }
    }
}

/// One finished game. Player one always moves first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub width: usize,
    pub height: usize,
    pub k: usize,
    pub moves: Vec<Cell>,
    /// `None` for a draw.
    pub winner: Option<Player>,
}

impl GameRecord {
    /// Replays the moves, rejecting any illegal one.
    pub fn replay(&self) -> Result<Grid> {
        let mut board = Grid::new(self.width, self.height, self.k)?;
        let mut to_move = Player::One;
        for &cell in &self.moves {
            board = board.try_place(cell, to_move)?;
            to_move = to_move.opponent();
        }
        Ok(board)
    }
}

pub fn generate_games(params: &SelfPlayParams, mut on_game: impl FnMut(&GameRecord)) -> Result<Vec<GameRecord>> {
    if params.fixed_depth && params.search.max_depth.is_none() {
        return Err(Error::InvalidParams("fixed-depth self-play needs max_depth".to_string()));
    }
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let mut games = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let record = play_game(params, &mut rng)?;
        debug!("game {} finished after {} moves, winner {:?}", gi, record.moves.len(), record.winner);
        on_game(&record);
        games.push(record);
    }
    Ok(games)
}

fn play_game(params: &SelfPlayParams, rng: &mut SmallRng) -> Result<GameRecord> {
    let mut board = Grid::new(params.width, params.height, params.k)?;
    let agents = [
        Agent::new(Player::One, &board).with_params(params.search),
        Agent::new(Player::Two, &board).with_params(params.search),
    ];
    let mut moves = Vec::new();
    let mut to_move = Player::One;
    while board.winner().is_none() && board.empty_cells() > 0 {
        let cell = if moves.len() < params.random_plies {
            random_empty(&board, rng)
        } else {
            let agent = &agents[(to_move.number() - 1) as usize];
            if params.fixed_depth {
                agent.search_with_clock(&board, params.movetime_ms, &ManualClock::frozen())?.best_move
            } else {
                agent.search_with_clock(&board, params.movetime_ms, &SystemClock::start())?.best_move
            }
        };
        board = board.try_place(cell, to_move)?;
        moves.push(cell);
        to_move = to_move.opponent();
    }
    Ok(GameRecord { width: params.width, height: params.height, k: params.k, moves, winner: board.winner() })
}

fn random_empty(board: &Grid, rng: &mut SmallRng) -> Cell {
    let empties: Vec<Cell> = crate::board::scan_order(board).filter(|&c| board.is_empty_at(c)).collect();
    empties[rng.gen_range(0..empties.len())]
}

/// Writes one JSON record per line.
pub fn write_jsonl<P: AsRef<Path>>(games: &[GameRecord], path: P) -> Result<()> {
    if let Some(dir) = path.as_ref().parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let mut w = BufWriter::new(File::create(path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<GameRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}
