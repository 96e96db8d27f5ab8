//! Three-valued verdict grid shown to the player

use crate::bdd::Cell;
use crate::error::{QueensError, Result};
use serde::{Deserialize, Serialize};

/// What is known about one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No valid completion places a queen here
    Forbidden,
    /// Allowed, but not required
    #[default]
    Undetermined,
    /// A queen was placed here or every completion needs one
    Queen,
}

impl Verdict {
    pub fn is_decided(self) -> bool {
        self != Verdict::Undetermined
    }
}

impl From<Verdict> for i8 {
    fn from(verdict: Verdict) -> i8 {
        match verdict {
            Verdict::Forbidden => -1,
            Verdict::Undetermined => 0,
            Verdict::Queen => 1,
        }
    }
}

/// N x N grid of verdicts, stored column-major so that `[col][row]` views are cheap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictGrid {
    size: usize,
    cells: Vec<Verdict>,
}

impl VerdictGrid {
    /// Create a grid with every cell undetermined
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Verdict::Undetermined; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn offset(&self, col: usize, row: usize) -> Result<usize> {
        if col >= self.size || row >= self.size {
            return Err(QueensError::InvalidCoordinate {
                col,
                row,
                size: self.size,
            });
        }
        Ok(col * self.size + row)
    }

    pub fn get(&self, col: usize, row: usize) -> Result<Verdict> {
        Ok(self.cells[self.offset(col, row)?])
    }

    /// Set a cell. Decided cells are absorbing: only undetermined cells change.
    pub fn decide(&mut self, col: usize, row: usize, verdict: Verdict) -> Result<bool> {
        let offset = self.offset(col, row)?;
        if self.cells[offset].is_decided() {
            return Ok(false);
        }
        self.cells[offset] = verdict;
        Ok(verdict.is_decided())
    }

    /// Undetermined cells of `row`, by column
    pub fn undetermined_in_row(&self, row: usize) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size)
            .filter(move |&col| self.cells[col * self.size + row] == Verdict::Undetermined)
            .map(move |col| Cell::new(col, row))
    }

    /// Undetermined cells of `col`, by row
    pub fn undetermined_in_col(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size)
            .filter(move |&row| self.cells[col * self.size + row] == Verdict::Undetermined)
            .map(move |row| Cell::new(col, row))
    }

    /// Cells holding `verdict`, column by column
    pub fn cells_with(&self, verdict: Verdict) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, &v)| v == verdict)
            .map(move |(offset, _)| Cell::new(offset / self.size, offset % self.size))
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.cells.iter().filter(|&&v| v == verdict).count()
    }

    /// Rows in which no cell can hold a queen any more
    pub fn rows_without_candidates(&self) -> Vec<usize> {
        (0..self.size)
            .filter(|&row| {
                (0..self.size).all(|col| self.cells[col * self.size + row] == Verdict::Forbidden)
            })
            .collect()
    }

    /// True when no cell is undetermined and every row holds exactly one queen
    pub fn is_solved(&self) -> bool {
        self.count(Verdict::Undetermined) == 0
            && (0..self.size).all(|row| {
                (0..self.size)
                    .filter(|&col| self.cells[col * self.size + row] == Verdict::Queen)
                    .count()
                    == 1
            })
    }

    /// `[col][row]` matrix of -1 / 0 / +1
    pub fn to_matrix(&self) -> Vec<Vec<i8>> {
        self.cells
            .chunks(self.size)
            .map(|column| column.iter().map(|&v| i8::from(v)).collect())
            .collect()
    }
}
