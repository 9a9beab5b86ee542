pub mod grid;

pub use grid::Grid;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// One of the two sides of a connect-K game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn from_number(n: u8) -> Result<Player> {
        match n {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(Error::InvalidPlayer(other)),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// A board coordinate. Row 0 is the bottom row, column 0 the leftmost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

impl Cell {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.col, self.row)
    }
}

/// Immutable board snapshot consumed by the search.
///
/// Implementations must never mutate `self` in `place`; each move yields a
/// fresh snapshot that differs from its parent in exactly one cell.
pub trait BoardState: Clone {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Number of pieces in a row needed to win.
    fn k(&self) -> usize;
    fn get(&self, cell: Cell) -> Option<Player>;
    /// Returns a new snapshot with `player` on `cell`. `cell` must be empty.
    fn place(&self, cell: Cell, player: Player) -> Self;
    fn empty_cells(&self) -> usize;

    fn is_empty_at(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }
}

/// The four line directions of a rectangular grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Up and to the right.
    Diagonal,
    /// Up and to the left.
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Horizontal, Direction::Vertical, Direction::Diagonal, Direction::AntiDiagonal];
}

/// A run of `k` cells starting at `start` and stepping along `dir`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    pub start: Cell,
    pub dir: Direction,
}

impl Line {
    /// The `m`-th cell of the line. Only valid for lines produced by `lines`.
    pub fn cell(&self, m: usize) -> Cell {
        let Cell { col, row } = self.start;
        match self.dir {
            Direction::Horizontal => Cell::new(col + m, row),
            Direction::Vertical => Cell::new(col, row + m),
            Direction::Diagonal => Cell::new(col + m, row + m),
            Direction::AntiDiagonal => Cell::new(col - m, row + m),
        }
    }
}

/// Every in-bounds line of length `k`, grouped by direction:
/// horizontal, vertical, diagonal, anti-diagonal.
pub fn lines(width: usize, height: usize, k: usize) -> impl Iterator<Item = Line> {
    Direction::ALL.into_iter().flat_map(move |dir| line_starts(width, height, k, dir))
}

fn line_starts(width: usize, height: usize, k: usize, dir: Direction) -> Vec<Line> {
    let mut out = Vec::new();
    if k == 0 {
        return out;
    }
    let (Some(last_col), Some(last_row)) = (width.checked_sub(k), height.checked_sub(k)) else {
        // Only straight lines along the longer axis can fit.
        match dir {
            Direction::Horizontal if k <= width => {
                for row in 0..height {
                    for col in 0..=width - k { out.push(Line { start: Cell::new(col, row), dir }); }
                }
            }
            Direction::Vertical if k <= height => {
                for col in 0..width {
                    for row in 0..=height - k { out.push(Line { start: Cell::new(col, row), dir }); }
                }
            }
            _ => {}
        }
        return out;
    };
    match dir {
        Direction::Horizontal => {
            for row in 0..height {
                for col in 0..=last_col { out.push(Line { start: Cell::new(col, row), dir }); }
            }
        }
        Direction::Vertical => {
            for col in 0..width {
                for row in 0..=last_row { out.push(Line { start: Cell::new(col, row), dir }); }
            }
        }
        Direction::Diagonal => {
            for col in 0..=last_col {
                for row in 0..=last_row { out.push(Line { start: Cell::new(col, row), dir }); }
            }
        }
        Direction::AntiDiagonal => {
            for col in (k - 1..width).rev() {
                for row in 0..=last_row { out.push(Line { start: Cell::new(col, row), dir }); }
            }
        }
    }
    out
}

/// Cells in search order: row 0 (bottom) upwards, each row left to right.
pub fn scan_order<B: BoardState>(board: &B) -> impl Iterator<Item = Cell> {
    let (w, h) = (board.width(), board.height());
    (0..h).flat_map(move |row| (0..w).map(move |col| Cell::new(col, row)))
}

/// First cell (in scan order) whose occupancy differs between two snapshots.
pub fn diff<B: BoardState>(before: &B, after: &B) -> Option<Cell> {
    scan_order(before).find(|&c| before.get(c) != after.get(c))
}

/// First empty cell in scan order.
pub fn first_empty<B: BoardState>(board: &B) -> Option<Cell> {
    scan_order(board).find(|&c| board.is_empty_at(c))
}

/// The player owning a completed line, if any.
pub fn winner<B: BoardState>(board: &B) -> Option<Player> {
    let k = board.k();
    lines(board.width(), board.height(), k).find_map(|line| {
        let p = board.get(line.cell(0))?;
        (1..k).all(|m| board.get(line.cell(m)) == Some(p)).then_some(p)
    })
}

/// Rejects boards the search cannot work on.
pub fn validate<B: BoardState>(board: &B) -> Result<()> {
    let (width, height, k) = (board.width(), board.height(), board.k());
    if width == 0 || height == 0 || k == 0 || (k > width && k > height) {
        return Err(Error::InvalidDimensions { width, height, k });
    }
    if board.empty_cells() == 0 {
        return Err(Error::BoardFull);
    }
    if let Some(winner) = winner(board) {
        return Err(Error::GameOver { winner });
    }
    Ok(())
}
