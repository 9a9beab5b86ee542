use clap::Parser;
use connectk::search::{Algorithm, SearchParams};
use connectk::selfplay::{generate_games, write_jsonl, SelfPlayParams};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "connectk-selfplay", about = "Play agent-vs-agent games and write them as JSONL")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 7)]
    width: usize,
    #[arg(long, default_value_t = 6)]
    height: usize,
    #[arg(long, default_value_t = 4)]
    k: usize,
    #[arg(long, default_value_t = 2)]
    random_plies: usize,
    #[arg(long, default_value_t = 200)]
    movetime_ms: i64,
    /// Search to exactly this depth with no clock
    #[arg(long)]
    depth: Option<u32>,
    #[arg(long, default_value_t = false)]
    minimax: bool,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let search = SearchParams {
        algorithm: if a.minimax { Algorithm::Minimax } else { Algorithm::AlphaBeta },
        max_depth: a.depth,
        ..SearchParams::default()
    };
    let params = SelfPlayParams {
        games: a.games,
        width: a.width,
        height: a.height,
        k: a.k,
        random_plies: a.random_plies,
        movetime_ms: a.movetime_ms,
        fixed_depth: a.depth.is_some(),
        seed: a.seed,
        search,
    };
    let bar = ProgressBar::new(a.games as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games {msg}")?);
    let mut wins = [0usize; 3];
    let games = generate_games(&params, |g| {
        let slot = g.winner.map(|p| p.number() as usize).unwrap_or(0);
        wins[slot] += 1;
        bar.set_message(format!("p1 {} / p2 {} / draw {}", wins[1], wins[2], wins[0]));
        bar.inc(1);
    })?;
    bar.finish();
    write_jsonl(&games, &a.out)?;
    eprintln!("Wrote {} games to {}", games.len(), a.out.display());
    Ok(())
}
