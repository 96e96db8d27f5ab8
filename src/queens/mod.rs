//! Board-facing N-Queens assistant: verdict grid, inference and placement

pub mod grid;
pub mod inference;
pub mod board;
pub mod history;

pub use grid::{Verdict, VerdictGrid};
pub use inference::{BoardInference, InferenceReport, InferenceStrategy};
pub use board::{BoardStatistics, Placement, QueensBoard};
pub use history::BoardHistory;
