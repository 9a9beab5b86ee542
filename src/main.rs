use anyhow::{Context, Result};
use clap::Parser;
use connectk::search::{Algorithm, ManualClock, SearchParams, SystemClock};
use connectk::{Agent, Grid, Player};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "connectk", version, about = "Pick the next move on a connect-K board")]
struct Args {
    /// Board rows, top row first, separated by '/': '.' empty, 'X' player 1, 'O' player 2
    #[arg(long)]
    board: Option<String>,

    /// Width of an empty board (ignored with --board)
    #[arg(long, default_value_t = 7)]
    width: usize,

    /// Height of an empty board (ignored with --board)
    #[arg(long, default_value_t = 6)]
    height: usize,

    /// Pieces in a row needed to win
    #[arg(long, default_value_t = 4)]
    k: usize,

    /// Side to move: 1 or 2
    #[arg(long, default_value_t = 1)]
    side: u8,

    /// Time budget in milliseconds
    #[arg(long, default_value_t = 5000)]
    movetime: i64,

    /// JSON file with search parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use plain minimax instead of alpha-beta
    #[arg(long, default_value_t = false)]
    minimax: bool,

    /// Fixed depth cap
    #[arg(long)]
    depth: Option<u32>,

    /// Blocked-threat weight
    #[arg(long)]
    threat_weight: Option<i32>,

    /// Ignore the clock entirely (requires --depth)
    #[arg(long, default_value_t = false)]
    no_clock: bool,

    /// Print the search result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut params = match &args.config {
        Some(path) => SearchParams::from_json_file(path)
            .with_context(|| format!("loading search config {}", path.display()))?,
        None => SearchParams::default(),
    };
    if args.minimax { params.algorithm = Algorithm::Minimax; }
    if let Some(d) = args.depth { params.max_depth = Some(d); }
    if let Some(w) = args.threat_weight { params.threat_weight = w; }
    params.validate()?;
    if args.no_clock && params.max_depth.is_none() {
        anyhow::bail!("--no-clock needs --depth to terminate");
    }

    let board = match &args.board {
        Some(text) => Grid::parse(args.k, text).context("parsing --board")?,
        None => Grid::new(args.width, args.height, args.k)?,
    };
    let side = Player::from_number(args.side)?;
    let agent = Agent::new(side, &board).with_params(params);

    let result = if args.no_clock {
        let clock = ManualClock::frozen();
        agent.search_with_clock(&board, args.movetime, &clock)?
    } else {
        let clock = SystemClock::start();
        agent.search_with_clock(&board, args.movetime, &clock)?
    };

    if args.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("{}\n", board);
        println!(
            "bestmove={} score={} depth={} nodes={} elapsed={}ms timed_out={} fallback={}",
            result.best_move,
            result.score,
            result.depth_reached,
            result.nodes,
            result.elapsed_ms,
            result.timed_out,
            result.fallback
        );
    }
    Ok(())
}
