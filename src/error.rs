//! Error types for the N-Queens constraint core

use thiserror::Error;

/// Errors raised by the board, the constraint store and the diagram engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueensError {
    /// A cell outside the board was addressed
    #[error("coordinate ({col}, {row}) is outside the {size}x{size} board")]
    InvalidCoordinate { col: usize, row: usize, size: usize },

    /// A variable index outside the allocated range was used
    #[error("variable index {index} is out of range ({count} variables allocated)")]
    InvalidVariable { index: usize, count: usize },

    #[error("board size must be at least 1 (got {0})")]
    InvalidBoardSize(usize),

    /// The engine cannot allocate the requested number of variables
    #[error("decision diagram engine cannot allocate {requested} variables (maximum {max})")]
    TooManyVariables { requested: usize, max: usize },

    /// A diagram grew past the configured node budget. Fatal for the board.
    #[error("decision diagram engine exhausted its node budget: {nodes} nodes exceeds the limit of {limit}")]
    EngineResourceExhausted { nodes: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, QueensError>;
