//! Construction of the global N-Queens formula

use super::{DiagramEngine, VariableMapping};
use crate::error::Result;
use itertools::iproduct;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Builds the formula that accepts exactly the complete, non-attacking
/// placements of N queens.
///
/// Two rule families are conjoined:
/// 1. row coverage: every row holds at least one queen;
/// 2. per-cell safety: a queen at (c, r) excludes every other queen in its
///    column, row and both diagonals.
pub struct ConstraintBuilder<'a, E: DiagramEngine> {
    engine: &'a E,
    mapping: VariableMapping,
    statistics: BuildStatistics,
}

impl<'a, E: DiagramEngine> ConstraintBuilder<'a, E> {
    pub fn new(engine: &'a E, mapping: VariableMapping) -> Self {
        Self {
            engine,
            mapping,
            statistics: BuildStatistics {
                board_size: mapping.size(),
                variables: mapping.variable_count(),
                ..BuildStatistics::default()
            },
        }
    }

    /// Build the formula and return it together with build statistics
    pub fn build(mut self) -> Result<(E::Formula, BuildStatistics)> {
        let start_time = Instant::now();
        let size = self.mapping.size();
        let mut formula = self.engine.constant(true);

        for row in 0..size {
            let coverage = self.row_coverage(row)?;
            formula = self.engine.and(&formula, &coverage)?;
        }

        for (row, col) in iproduct!(0..size, 0..size) {
            let clause = self.cell_clause(col, row)?;
            formula = self.engine.and(&formula, &clause)?;
        }

        self.statistics.node_count = self.engine.node_count(&formula);
        self.statistics.build_time = start_time.elapsed();

        info!(
            size,
            nodes = self.statistics.node_count,
            literals = self.statistics.literals,
            elapsed_ms = self.statistics.build_time.as_millis() as u64,
            "built placement formula"
        );

        Ok((formula, self.statistics))
    }

    /// `v(0,row) | v(1,row) | ... | v(N-1,row)`
    fn row_coverage(&mut self, row: usize) -> Result<E::Formula> {
        let mut clause = self.engine.constant(false);
        for col in 0..self.mapping.size() {
            let literal = self.literal(col, row, true)?;
            clause = self.engine.or(&clause, &literal)?;
        }
        self.statistics.coverage_clauses += 1;
        Ok(clause)
    }

    /// `!v(col,row) | SafeIfPresent(col,row)`
    fn cell_clause(&mut self, col: usize, row: usize) -> Result<E::Formula> {
        let size = self.mapping.size();
        let mut safe = self.engine.constant(true);

        for i in 0..size {
            if i != row {
                // column
                safe = self.exclude(&safe, col, i)?;
                // descending diagonal
                if let Some(diag_col) = (row + col).checked_sub(i) {
                    if diag_col > 0 && diag_col < size {
                        safe = self.exclude(&safe, diag_col, i)?;
                    }
                }
            }
            if i != col {
                // row
                safe = self.exclude(&safe, i, row)?;
                // ascending diagonal
                if let Some(diag_row) = (row + i).checked_sub(col) {
                    if diag_row > 0 && diag_row < size {
                        safe = self.exclude(&safe, i, diag_row)?;
                    }
                }
            }
        }

        let absent = self.literal(col, row, false)?;
        let clause = self.engine.or(&absent, &safe)?;
        self.statistics.cell_clauses += 1;

        debug!(col, row, nodes = self.engine.node_count(&clause), "cell clause");
        Ok(clause)
    }

    fn exclude(&mut self, safe: &E::Formula, col: usize, row: usize) -> Result<E::Formula> {
        let literal = self.literal(col, row, false)?;
        self.engine.and(safe, &literal)
    }

    fn literal(&mut self, col: usize, row: usize, positive: bool) -> Result<E::Formula> {
        let variable = self.mapping.index(col, row)?;
        self.statistics.literals += 1;
        self.engine.literal(variable, positive)
    }
}

/// Statistics about one formula construction
#[derive(Debug, Clone, Default)]
pub struct BuildStatistics {
    pub board_size: usize,
    pub variables: usize,
    pub coverage_clauses: usize,
    pub cell_clauses: usize,
    pub literals: usize,
    pub node_count: usize,
    pub build_time: Duration,
}

impl std::fmt::Display for BuildStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Formula Statistics:")?;
        writeln!(f, "  Board: {}x{}", self.board_size, self.board_size)?;
        writeln!(f, "  Variables: {}", self.variables)?;
        writeln!(f, "  Row coverage clauses: {}", self.coverage_clauses)?;
        writeln!(f, "  Cell clauses: {}", self.cell_clauses)?;
        writeln!(f, "  Literals: {}", self.literals)?;
        writeln!(f, "  Diagram nodes: {}", self.node_count)?;
        writeln!(f, "  Build time: {:.3}s", self.build_time.as_secs_f64())?;
        Ok(())
    }
}
