use std::fmt;

use super::{BoardState, Cell, Player};
use crate::error::{Error, Result};

/// Rectangular connect-K board backed by a flat cell vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    k: usize,
    cells: Vec<Option<Player>>,
    empty: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize, k: usize) -> Result<Self> {
        if width == 0 || height == 0 || k == 0 || (k > width && k > height) {
            return Err(Error::InvalidDimensions { width, height, k });
        }
        Ok(Self { width, height, k, cells: vec![None; width * height], empty: width * height })
    }

    /// Parses rows given top row first: `.` empty, `X` player one, `O` player two.
    pub fn from_rows(k: usize, rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.trim().chars().count()).unwrap_or(0);
        let mut grid = Self::new(width, height, k)?;
        for (line, text) in rows.iter().enumerate() {
            let text = text.trim();
            if text.chars().count() != width {
                return Err(Error::ParseBoard {
                    line,
                    reason: format!("expected {} cells, got {}", width, text.chars().count()),
                });
            }
            let row = height - 1 - line;
            for (col, ch) in text.chars().enumerate() {
                let occupant = match ch {
                    '.' | '0' => None,
                    'X' | 'x' | '1' => Some(Player::One),
                    'O' | 'o' | '2' => Some(Player::Two),
                    other => {
                        return Err(Error::ParseBoard { line, reason: format!("unexpected character '{other}'") })
                    }
                };
                if let Some(p) = occupant {
                    grid.set(Cell::new(col, row), p);
                }
            }
        }
        Ok(grid)
    }

    /// Same as `from_rows` with rows separated by `/`.
    pub fn parse(k: usize, text: &str) -> Result<Self> {
        let rows: Vec<&str> = text.split('/').collect();
        Self::from_rows(k, &rows)
    }

    pub fn try_place(&self, cell: Cell, player: Player) -> Result<Self> {
        if !self.in_bounds(cell) {
            return Err(Error::CellOutOfBounds(cell));
        }
        if self.get(cell).is_some() {
            return Err(Error::CellOccupied(cell));
        }
        Ok(self.place(cell, player))
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.col < self.width && cell.row < self.height
    }

    /// The player owning a completed line, if any.
    pub fn winner(&self) -> Option<Player> {
        super::winner(self)
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.width + cell.col
    }

    fn set(&mut self, cell: Cell, player: Player) {
        let idx = self.index(cell);
        if self.cells[idx].is_none() {
            self.empty -= 1;
        }
        self.cells[idx] = Some(player);
    }
}

impl BoardState for Grid {
    fn width(&self) -> usize { self.width }
    fn height(&self) -> usize { self.height }
    fn k(&self) -> usize { self.k }

    fn get(&self, cell: Cell) -> Option<Player> {
        self.cells[self.index(cell)]
    }

    fn place(&self, cell: Cell, player: Player) -> Self {
        debug_assert!(self.get(cell).is_none(), "placing on occupied cell {cell}");
        let mut next = self.clone();
        next.set(cell, player);
        next
    }

    fn empty_cells(&self) -> usize { self.empty }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.height).rev() {
            for col in 0..self.width {
                let ch = self.get(Cell::new(col, row)).map(Player::symbol).unwrap_or('.');
                write!(f, "{ch}")?;
            }
            if row > 0 { writeln!(f)?; }
        }
        Ok(())
    }
}
