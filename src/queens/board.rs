//! Interactive N-Queens board driven by the placement formula

use super::{BoardInference, InferenceReport, InferenceStrategy, Verdict, VerdictGrid};
use crate::bdd::{BddEngine, BuildStatistics, Cell, ConstraintStore, DiagramEngine, EngineCapacity, VariableMapping};
use crate::config::Settings;
use crate::error::{QueensError, Result};
use tracing::{debug, info, warn};

/// Result of a placement request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The queen was placed and the board recomputed
    Placed(InferenceReport),
    /// The cell was already forbidden or holds a queen; nothing changed
    AlreadyDecided(Verdict),
}

/// An N-Queens board whose verdicts follow from a decision diagram.
///
/// Every placement narrows the formula; decisions are permanent. See
/// [`BoardHistory`](super::BoardHistory) for an undo layer.
#[derive(Debug, Clone)]
pub struct QueensBoard<E: DiagramEngine = BddEngine> {
    mapping: VariableMapping,
    store: ConstraintStore<E>,
    inference: BoardInference,
    capacity: EngineCapacity,
    grid: VerdictGrid,
    failure: Option<QueensError>,
}

impl QueensBoard<BddEngine> {
    /// Create a board with the default engine capacity and row-singleton inference
    pub fn new(size: usize) -> Result<Self> {
        Self::with_options(size, EngineCapacity::default(), InferenceStrategy::default())
    }

    /// Create a board from loaded settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::with_options(
            settings.board.size,
            EngineCapacity::from(&settings.engine),
            settings.inference.strategy,
        )
    }
}

impl<E: DiagramEngine> QueensBoard<E> {
    /// Create a board on any engine backend
    pub fn with_options(size: usize, capacity: EngineCapacity, strategy: InferenceStrategy) -> Result<Self> {
        let mapping = VariableMapping::new(size)?;
        let store = ConstraintStore::build(mapping, capacity)?;
        let mut board = Self {
            mapping,
            store,
            inference: BoardInference::new(strategy),
            capacity,
            grid: VerdictGrid::new(size),
            failure: None,
        };

        let report = board.refresh()?;
        info!(
            size,
            forbidden = report.forbidden,
            forced = report.forced,
            "board initialized"
        );
        Ok(board)
    }

    /// Discard the current formula and start over with a board of `size`
    pub fn initialize_board(&mut self, size: usize) -> Result<()> {
        *self = Self::with_options(size, self.capacity, self.inference.strategy())?;
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.mapping.size()
    }

    /// `[col][row]` matrix: -1 forbidden, 0 undetermined, 1 queen
    pub fn get_board(&self) -> Vec<Vec<i8>> {
        self.grid.to_matrix()
    }

    pub fn grid(&self) -> &VerdictGrid {
        &self.grid
    }

    pub fn verdict(&self, col: usize, row: usize) -> Result<Verdict> {
        self.grid.get(col, row)
    }

    /// Place a queen at (`col`, `row`).
    ///
    /// Decided cells are left alone and reported as [`Placement::AlreadyDecided`].
    /// If the engine runs out of nodes, whether while narrowing the formula or
    /// while recomputing the grid, every later placement fails with the same
    /// error.
    pub fn insert_queen(&mut self, col: usize, row: usize) -> Result<Placement> {
        let variable = self.mapping.index(col, row)?;
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }

        let current = self.grid.get(col, row)?;
        if current.is_decided() {
            debug!(col, row, verdict = ?current, "placement ignored");
            return Ok(Placement::AlreadyDecided(current));
        }

        let report = match self.place(col, row, variable) {
            Ok(report) => report,
            Err(e) => {
                warn!(col, row, error = %e, "board is no longer usable");
                self.failure = Some(e.clone());
                return Err(e);
            }
        };
        debug!(
            col,
            row,
            forbidden = report.forbidden,
            forced = report.forced,
            "queen placed"
        );
        Ok(Placement::Placed(report))
    }

    /// Place a queen on `cell`
    pub fn insert(&mut self, cell: Cell) -> Result<Placement> {
        self.insert_queen(cell.col, cell.row)
    }

    /// Narrow the formula and recompute the grid. Any error leaves the board
    /// half-updated, so the caller must treat it as fatal.
    fn place(&mut self, col: usize, row: usize, variable: usize) -> Result<InferenceReport> {
        self.store.restrict_true(variable)?;
        self.grid.decide(col, row, Verdict::Queen)?;
        self.refresh()
    }

    fn refresh(&mut self) -> Result<InferenceReport> {
        self.inference.refresh(&self.store, &self.mapping, &mut self.grid)
    }

    /// Rows in which no queen can be placed any more. Non-empty means the
    /// current decisions admit no solution.
    pub fn rows_without_candidates(&self) -> Vec<usize> {
        self.grid.rows_without_candidates()
    }

    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    /// Number of complete solutions consistent with the placed queens
    pub fn solution_count(&self) -> f64 {
        self.store.solution_count()
    }

    /// One complete solution consistent with the placed queens
    pub fn witness(&self) -> Option<Vec<Cell>> {
        self.store
            .witness()?
            .into_iter()
            .map(|variable| self.mapping.cell(variable).ok())
            .collect()
    }

    /// Cells where a queen was placed explicitly, in placement order
    pub fn placed_queens(&self) -> Vec<Cell> {
        self.store
            .decisions()
            .iter()
            .filter_map(|&variable| self.mapping.cell(variable).ok())
            .collect()
    }

    pub fn strategy(&self) -> InferenceStrategy {
        self.inference.strategy()
    }

    pub fn statistics(&self) -> BoardStatistics {
        BoardStatistics {
            size: self.size(),
            placed: self.store.decisions().len(),
            queens: self.grid.count(Verdict::Queen),
            forbidden: self.grid.count(Verdict::Forbidden),
            undetermined: self.grid.count(Verdict::Undetermined),
            node_count: self.store.node_count(),
            solutions: self.solution_count(),
            build: self.store.build_statistics().clone(),
        }
    }
}

/// Snapshot of a board's progress
#[derive(Debug, Clone)]
pub struct BoardStatistics {
    pub size: usize,
    pub placed: usize,
    pub queens: usize,
    pub forbidden: usize,
    pub undetermined: usize,
    pub node_count: usize,
    pub solutions: f64,
    pub build: BuildStatistics,
}

impl std::fmt::Display for BoardStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Board Statistics:")?;
        writeln!(f, "  Board: {}x{}", self.size, self.size)?;
        writeln!(f, "  Queens placed: {}", self.placed)?;
        writeln!(f, "  Queens (placed or forced): {}", self.queens)?;
        writeln!(f, "  Forbidden cells: {}", self.forbidden)?;
        writeln!(f, "  Undetermined cells: {}", self.undetermined)?;
        writeln!(f, "  Diagram nodes: {}", self.node_count)?;
        writeln!(f, "  Remaining solutions: {}", self.solutions)?;
        Ok(())
    }
}
