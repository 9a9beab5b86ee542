//! Blocked-threat shapes.
//!
//! A blocked threat is a K-cell line where the opponent has built K-2 or K-1
//! pieces and our single piece (or pair of end pieces) already sits on the
//! cell that would have let the opponent complete or extend it. Lines are
//! read in scan direction; index 0 is the line's start cell.

use crate::board::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatPattern {
    /// K-2 opponent pieces, our piece at `blocker`, last cell still empty.
    OpenTail { blocker: usize },
    /// First cell empty, K-2 opponent pieces, our piece capping the last cell.
    OpenHead,
    /// Our pieces on both ends around K-2 opponent pieces.
    Sandwich,
    /// Our piece on the first cell in front of K-1 opponent pieces.
    HeadBlock,
    /// K-1 opponent pieces closed by our piece on the last cell.
    TailBlock,
}

impl ThreatPattern {
    /// Matches `line` against the catalogue without allocating.
    pub fn classify(line: &[Option<Player>], me: Player) -> Option<ThreatPattern> {
        let k = line.len();
        if k < 2 {
            return None;
        }
        let mut mine = 0usize;
        let mut theirs = 0usize;
        let mut my_pos = 0usize;
        let mut empty_pos = 0usize;
        for (i, cell) in line.iter().enumerate() {
            match *cell {
                Some(p) if p == me => { mine += 1; my_pos = i; }
                Some(_) => theirs += 1,
                None => empty_pos = i,
            }
        }
        let empties = k - mine - theirs;
        match (mine, theirs, empties) {
            (1, t, 1) if t == k - 2 => {
                if empty_pos == k - 1 {
                    Some(ThreatPattern::OpenTail { blocker: my_pos })
                } else if empty_pos == 0 && my_pos == k - 1 {
                    Some(ThreatPattern::OpenHead)
                } else {
                    None
                }
            }
            (2, t, 0) if t == k - 2 => {
                let ends_mine = line[0] == Some(me) && line[k - 1] == Some(me);
                ends_mine.then_some(ThreatPattern::Sandwich)
            }
            (1, t, 0) if t == k - 1 => match my_pos {
                0 => Some(ThreatPattern::HeadBlock),
                p if p == k - 1 => Some(ThreatPattern::TailBlock),
                _ => None,
            },
            _ => None,
        }
    }
}
