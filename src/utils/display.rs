//! Display and output formatting utilities

use crate::bdd::{Cell, DiagramEngine};
use crate::config::OutputFormat;
use crate::queens::{QueensBoard, Verdict, VerdictGrid};
use anyhow::Result;
use serde::Serialize;

/// Format boards for display
pub struct BoardFormatter;

impl BoardFormatter {
    fn symbol(verdict: Verdict) -> char {
        match verdict {
            Verdict::Queen => 'Q',
            Verdict::Undetermined => '·',
            Verdict::Forbidden => 'x',
        }
    }

    /// Format a grid in compact form, one line per row
    pub fn format_grid_compact(grid: &VerdictGrid) -> String {
        let mut output = String::with_capacity(grid.size() * (grid.size() + 1));
        for row in 0..grid.size() {
            for col in 0..grid.size() {
                output.push(grid.get(col, row).map(Self::symbol).unwrap_or('?'));
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with column and row numbers
    pub fn format_grid_with_coords(grid: &VerdictGrid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.size() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        // Rows with row numbers
        for row in 0..grid.size() {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.size() {
                output.push(' ');
                output.push(grid.get(col, row).map(Self::symbol).unwrap_or('?'));
            }
            output.push('\n');
        }

        output
    }

    /// One-line status: solved, unsolvable or still open
    pub fn format_status<E: DiagramEngine>(board: &QueensBoard<E>) -> String {
        let empty_rows = board.rows_without_candidates();
        if board.is_solved() {
            "solved".to_string()
        } else if !empty_rows.is_empty() {
            format!("no solution left (rows without candidates: {:?})", empty_rows)
        } else {
            format!("{} solution(s) remaining", board.solution_count())
        }
    }

    /// Render a board in the requested output format
    pub fn render<E: DiagramEngine>(board: &QueensBoard<E>, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(format!(
                "{}Status: {}\n",
                Self::format_grid_with_coords(board.grid()),
                Self::format_status(board)
            )),
            OutputFormat::Json => {
                let snapshot = BoardSnapshot {
                    size: board.size(),
                    board: board.get_board(),
                    placed: board.placed_queens(),
                    solved: board.is_solved(),
                    rows_without_candidates: board.rows_without_candidates(),
                    solutions: board.solution_count(),
                };
                Ok(serde_json::to_string_pretty(&snapshot)?)
            }
        }
    }
}

/// JSON view of a board, `board` indexed `[col][row]`
#[derive(Debug, Serialize)]
struct BoardSnapshot {
    size: usize,
    board: Vec<Vec<i8>>,
    placed: Vec<Cell>,
    solved: bool,
    rows_without_candidates: Vec<usize>,
    solutions: f64,
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_formatting() {
        let mut board = QueensBoard::new(4).unwrap();
        board.insert_queen(1, 0).unwrap();

        let compact = BoardFormatter::format_grid_compact(board.grid());
        assert_eq!(compact, "xQxx\nxxxQ\nQxxx\nxxQx\n");

        let with_coords = BoardFormatter::format_grid_with_coords(board.grid());
        assert!(with_coords.starts_with("    0 1 2 3\n"));
        assert!(with_coords.contains(" 0  x Q x x"));
    }

    #[test]
    fn test_status() {
        let board = QueensBoard::new(3).unwrap();
        assert!(BoardFormatter::format_status(&board).starts_with("no solution left"));

        let board = QueensBoard::new(4).unwrap();
        assert_eq!(BoardFormatter::format_status(&board), "2 solution(s) remaining");
    }

    #[test]
    fn test_json_output() {
        let mut board = QueensBoard::new(4).unwrap();
        board.insert_queen(1, 0).unwrap();

        let json = BoardFormatter::render(&board, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["size"], 4);
        assert_eq!(value["solved"], true);
        assert_eq!(value["board"][1][0], 1);
        assert_eq!(value["board"][0][0], -1);
        assert_eq!(value["placed"][0]["col"], 1);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
