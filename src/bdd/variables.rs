//! Mapping between board cells and diagram variables

use crate::error::{QueensError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A board cell addressed by column and row (both zero based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: usize,
    pub row: usize,
}

impl Cell {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl FromStr for Cell {
    type Err = String;

    /// Parse `"col,row"`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (col, row) = s
            .split_once(',')
            .ok_or_else(|| format!("expected `col,row`, got `{}`", s))?;
        let col = col
            .trim()
            .parse()
            .map_err(|e| format!("invalid column `{}`: {}", col.trim(), e))?;
        let row = row
            .trim()
            .parse()
            .map_err(|e| format!("invalid row `{}`: {}", row.trim(), e))?;
        Ok(Self { col, row })
    }
}

/// Bijection between the N² cells and the variable indices `row * N + col`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableMapping {
    size: usize,
}

impl VariableMapping {
    /// Create the mapping for an `size` x `size` board
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(QueensError::InvalidBoardSize(size));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of variables (one per cell)
    pub fn variable_count(&self) -> usize {
        self.size * self.size
    }

    /// Variable index of the cell at (`col`, `row`)
    pub fn index(&self, col: usize, row: usize) -> Result<usize> {
        if col >= self.size || row >= self.size {
            return Err(QueensError::InvalidCoordinate {
                col,
                row,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }

    /// Variable index of `cell`
    pub fn index_of(&self, cell: Cell) -> Result<usize> {
        self.index(cell.col, cell.row)
    }

    /// Inverse of [`VariableMapping::index`]
    pub fn cell(&self, index: usize) -> Result<Cell> {
        if index >= self.variable_count() {
            return Err(QueensError::InvalidVariable {
                index,
                count: self.variable_count(),
            });
        }
        Ok(Cell {
            col: index % self.size,
            row: index / self.size,
        })
    }

    /// All cells in variable order (row-major)
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.variable_count()).map(move |index| Cell {
            col: index % self.size,
            row: index / self.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_layout() {
        let mapping = VariableMapping::new(4).unwrap();

        assert_eq!(mapping.index(0, 0).unwrap(), 0);
        assert_eq!(mapping.index(3, 0).unwrap(), 3);
        assert_eq!(mapping.index(0, 1).unwrap(), 4);
        assert_eq!(mapping.index(2, 3).unwrap(), 14);
        assert_eq!(mapping.variable_count(), 16);
    }

    #[test]
    fn test_inverse() {
        let mapping = VariableMapping::new(5).unwrap();

        for index in 0..mapping.variable_count() {
            let cell = mapping.cell(index).unwrap();
            assert_eq!(mapping.index_of(cell).unwrap(), index);
        }
    }

    #[test]
    fn test_out_of_range() {
        let mapping = VariableMapping::new(3).unwrap();

        assert_eq!(
            mapping.index(3, 0),
            Err(QueensError::InvalidCoordinate { col: 3, row: 0, size: 3 })
        );
        assert!(mapping.index(0, 3).is_err());
        assert_eq!(
            mapping.cell(9),
            Err(QueensError::InvalidVariable { index: 9, count: 9 })
        );
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(VariableMapping::new(0), Err(QueensError::InvalidBoardSize(0)));
    }

    #[test]
    fn test_cells_are_unique_and_row_major() {
        let mapping = VariableMapping::new(3).unwrap();
        let cells: Vec<Cell> = mapping.cells().collect();

        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[1], Cell::new(1, 0));
        assert_eq!(cells[3], Cell::new(0, 1));
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!("2,5".parse::<Cell>().unwrap(), Cell::new(2, 5));
        assert_eq!(" 0 , 1 ".parse::<Cell>().unwrap(), Cell::new(0, 1));
        assert!("3".parse::<Cell>().is_err());
        assert!("a,1".parse::<Cell>().is_err());
    }
}
