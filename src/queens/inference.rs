//! Verdict inference from the placement formula

use super::{Verdict, VerdictGrid};
use crate::bdd::{ConstraintStore, DiagramEngine, VariableMapping};
use crate::error::Result;
use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which forced-singleton scans run after the impossibility pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InferenceStrategy {
    /// Only mark forbidden cells
    ImpossibilityOnly,
    /// Force the last candidate of a row
    #[default]
    RowSingletons,
    /// Force the last candidate of a row or of a column
    RowAndColumnSingletons,
}

/// Outcome of one refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InferenceReport {
    pub probes: usize,
    pub forbidden: usize,
    pub forced: usize,
}

/// Derives the verdict grid from the current formula.
///
/// Inference only reads the formula. Cells it forces are never fed back
/// into the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardInference {
    strategy: InferenceStrategy,
}

impl BoardInference {
    pub fn new(strategy: InferenceStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> InferenceStrategy {
        self.strategy
    }

    /// Update `grid` from the formula held by `store`
    pub fn refresh<E: DiagramEngine>(
        &self,
        store: &ConstraintStore<E>,
        mapping: &VariableMapping,
        grid: &mut VerdictGrid,
    ) -> Result<InferenceReport> {
        let mut report = InferenceReport::default();

        // Impossibility pass
        for cell in mapping.cells() {
            if grid.get(cell.col, cell.row)?.is_decided() {
                continue;
            }
            report.probes += 1;
            if store.is_forbidden(mapping.index_of(cell)?)? {
                grid.decide(cell.col, cell.row, Verdict::Forbidden)?;
                report.forbidden += 1;
            }
        }

        // Forced-singleton pass
        if self.strategy != InferenceStrategy::ImpossibilityOnly {
            for row in 0..grid.size() {
                let single = grid.undetermined_in_row(row).exactly_one().ok();
                if let Some(cell) = single {
                    grid.decide(cell.col, cell.row, Verdict::Queen)?;
                    report.forced += 1;
                }
            }
        }
        if self.strategy == InferenceStrategy::RowAndColumnSingletons {
            for col in 0..grid.size() {
                let single = grid.undetermined_in_col(col).exactly_one().ok();
                if let Some(cell) = single {
                    grid.decide(cell.col, cell.row, Verdict::Queen)?;
                    report.forced += 1;
                }
            }
        }

        debug!(
            strategy = ?self.strategy,
            probes = report.probes,
            forbidden = report.forbidden,
            forced = report.forced,
            "inference refreshed"
        );
        Ok(report)
    }
}
