//! N-Queens assistant on binary decision diagrams
//!
//! The whole non-attack constraint is encoded as a single Boolean function.
//! Each placed queen restricts that function, and every cell is then
//! classified as forbidden, forced or still open.

pub mod bdd;
pub mod config;
pub mod error;
pub mod queens;
pub mod utils;

pub use config::Settings;
pub use error::QueensError;
pub use queens::{Placement, QueensBoard, Verdict};

use anyhow::Result;
use bdd::Cell;

/// Build a board from `settings` and place `queens` in order
pub fn play(settings: &Settings, queens: &[Cell]) -> Result<QueensBoard> {
    let mut board = QueensBoard::from_settings(settings)?;
    for &cell in queens {
        board.insert(cell)?;
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play() {
        let mut settings = Settings::default();
        settings.board.size = 5;

        let board = play(&settings, &[Cell::new(0, 0), Cell::new(2, 1)]).unwrap();
        assert!(board.is_solved());
        assert_eq!(board.placed_queens().len(), 2);
    }

    #[test]
    fn test_play_rejects_off_board_queen() {
        let mut settings = Settings::default();
        settings.board.size = 4;

        let error = play(&settings, &[Cell::new(7, 0)]).unwrap_err();
        assert_eq!(
            error.downcast_ref::<QueensError>(),
            Some(&QueensError::InvalidCoordinate { col: 7, row: 0, size: 4 })
        );
    }
}
