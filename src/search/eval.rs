use std::time::Duration;

use crate::board::{lines, BoardState, Player};
use crate::search::clock::{Deadline, ManualClock};
use crate::search::threat::ThreatPattern;

/// Score of a position the evaluating side has already won.
pub const WIN_SCORE: i32 = i32::MAX;
/// Score of a position the opponent has already won.
pub const LOSS_SCORE: i32 = i32::MIN;

pub fn is_decided(score: i32) -> bool {
    score == WIN_SCORE || score == LOSS_SCORE
}

/// Closeness of coordinate `x` to the middle of an axis of length `n`.
pub fn proximity(x: usize, n: usize) -> i32 {
    let center = (n / 2) as i32;
    center - (center - x as i32).abs()
}

/// Raw heuristic terms accumulated over every K-cell line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// Lines still winnable by us (no opponent piece).
    pub open_lines: i32,
    /// Lines still winnable by the opponent (no piece of ours).
    pub opponent_open_lines: i32,
    pub col_proximity: i32,
    pub row_proximity: i32,
    pub opponent_col_proximity: i32,
    pub opponent_row_proximity: i32,
    pub blocked_threats: i32,
}

impl Features {
    /// Weighted sum of the terms, kept strictly between `LOSS_SCORE` and
    /// `WIN_SCORE` so a heuristic value is never mistaken for a decided game.
    pub fn utility(&self, threat_weight: i32) -> i32 {
        let sum = i64::from(self.open_lines) - i64::from(self.opponent_open_lines)
            + i64::from(self.col_proximity)
            + i64::from(self.row_proximity)
            - i64::from(self.opponent_col_proximity)
            - i64::from(self.opponent_row_proximity)
            + i64::from(threat_weight) * i64::from(self.blocked_threats);
        sum.clamp(i64::from(LOSS_SCORE) + 1, i64::from(WIN_SCORE) - 1) as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// `WIN_SCORE` / `LOSS_SCORE` for decided boards, utility otherwise.
    pub score: i32,
    pub features: Features,
    /// False when the opponent can complete a line on the next ply.
    pub quiescent: bool,
    /// False when the deadline cut the scan short; `score` is then partial.
    pub complete: bool,
}

/// Static evaluator from the point of view of one side.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    me: Player,
    threat_weight: i32,
}

impl Evaluator {
    pub fn new(me: Player, threat_weight: i32) -> Self {
        Self { me, threat_weight }
    }

    pub fn side(&self) -> Player { self.me }

    /// Evaluates `board`, reached by a move of `mover`, polling `deadline` once per line.
    pub fn evaluate<B: BoardState>(&self, board: &B, mover: Player, deadline: &Deadline<'_>) -> Evaluation {
        let me = self.me;
        let them = me.opponent();
        let (width, height, k) = (board.width(), board.height(), board.k());
        let mut f = Features::default();
        let mut quiescent = true;
        let mut line_buf: Vec<Option<Player>> = Vec::with_capacity(k);

        for line in lines(width, height, k) {
            if deadline.expired() {
                return Evaluation { score: f.utility(self.threat_weight), features: f, quiescent, complete: false };
            }
            line_buf.clear();
            let mut mine = 0usize;
            let mut theirs = 0usize;
            for m in 0..k {
                let cell = line.cell(m);
                let occupant = board.get(cell);
                line_buf.push(occupant);
                match occupant {
                    Some(p) if p == me => {
                        mine += 1;
                        if mine == k {
                            return self.decided(WIN_SCORE, f, quiescent);
                        }
                        f.col_proximity += proximity(cell.col, width);
                        f.row_proximity += proximity(cell.row, height);
                    }
                    Some(_) => {
                        theirs += 1;
                        if theirs == k {
                            return self.decided(LOSS_SCORE, f, quiescent);
                        }
                        f.opponent_col_proximity += proximity(cell.col, width);
                        f.opponent_row_proximity += proximity(cell.row, height);
                    }
                    None => {}
                }
            }
            if theirs == k - 1 && mine == 0 && mover != them {
                quiescent = false;
            }
            if theirs == 0 {
                f.open_lines += 1;
            }
            if mine == 0 {
                f.opponent_open_lines += 1;
            }
            if ThreatPattern::classify(&line_buf, me).is_some() {
                f.blocked_threats += 1;
            }
        }
        Evaluation { score: f.utility(self.threat_weight), features: f, quiescent, complete: true }
    }

    /// Evaluates without any time limit.
    pub fn evaluate_unbounded<B: BoardState>(&self, board: &B, mover: Player) -> Evaluation {
        let clock = ManualClock::frozen();
        let deadline = Deadline::new(&clock, Duration::MAX);
        self.evaluate(board, mover, &deadline)
    }

    fn decided(&self, score: i32, features: Features, quiescent: bool) -> Evaluation {
        Evaluation { score, features, quiescent, complete: true }
    }
}
