//! Undo support layered on top of the append-only board

use super::{Placement, QueensBoard};
use crate::bdd::{BddEngine, DiagramEngine};
use crate::error::Result;

/// Keeps a full board snapshot per accepted placement so that placements
/// can be taken back without retracting anything from a formula.
#[derive(Debug, Clone)]
pub struct BoardHistory<E: DiagramEngine + Clone = BddEngine> {
    current: QueensBoard<E>,
    snapshots: Vec<QueensBoard<E>>,
}

impl<E: DiagramEngine + Clone> BoardHistory<E> {
    pub fn new(board: QueensBoard<E>) -> Self {
        Self {
            current: board,
            snapshots: Vec::new(),
        }
    }

    pub fn board(&self) -> &QueensBoard<E> {
        &self.current
    }

    /// Place a queen, remembering the previous board when something changed
    pub fn insert_queen(&mut self, col: usize, row: usize) -> Result<Placement> {
        let snapshot = self.current.clone();
        let placement = self.current.insert_queen(col, row)?;
        if let Placement::Placed(_) = placement {
            self.snapshots.push(snapshot);
        }
        Ok(placement)
    }

    /// Return to the board before the last accepted placement
    pub fn undo(&mut self) -> bool {
        match self.snapshots.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Number of placements that can be undone
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    pub fn into_board(self) -> QueensBoard<E> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queens::Verdict;

    #[test]
    fn test_undo_restores_previous_grid() {
        let board = QueensBoard::new(6).unwrap();
        let initial = board.get_board();
        let mut history = BoardHistory::new(board);

        history.insert_queen(1, 0).unwrap();
        assert!(history.board().is_solved());
        assert_eq!(history.depth(), 1);

        assert!(history.undo());
        assert_eq!(history.board().get_board(), initial);
        assert_eq!(history.board().solution_count(), 4.0);
        assert!(!history.undo());
    }

    #[test]
    fn test_ignored_placements_are_not_recorded() {
        let mut history = BoardHistory::new(QueensBoard::new(4).unwrap());

        history.insert_queen(0, 0).unwrap();
        assert_eq!(history.depth(), 0);
        assert_eq!(history.board().verdict(0, 0).unwrap(), Verdict::Forbidden);
    }

    #[test]
    fn test_alternative_after_undo() {
        let mut history = BoardHistory::new(QueensBoard::new(5).unwrap());

        history.insert_queen(0, 0).unwrap();
        history.insert_queen(2, 1).unwrap();
        assert!(history.board().is_solved());

        history.undo();
        history.insert_queen(3, 1).unwrap();
        assert!(history.board().is_solved());
        assert_eq!(history.board().verdict(1, 2).unwrap(), Verdict::Queen);
        assert_eq!(history.depth(), 2);
    }
}
