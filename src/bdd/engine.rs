//! Decision-diagram engine seam and the `biodivine-lib-bdd` backend

use crate::error::{QueensError, Result};
use biodivine_lib_bdd::{Bdd, BddVariable, BddVariableSet};
use std::fmt;

/// Node and cache budget handed to an engine at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineCapacity {
    /// Largest diagram (in nodes) any operation may return
    pub node_limit: usize,
    /// Operation cache size. Backends without a tunable cache only report it.
    pub cache_size: usize,
}

impl Default for EngineCapacity {
    fn default() -> Self {
        Self {
            node_limit: 2_000_000,
            cache_size: 200_000,
        }
    }
}

/// Capability interface over a canonical Boolean-function algebra.
///
/// Variables are allocated once, at creation, and addressed by index. The
/// diagram returned by every operation that builds one is checked against the
/// node budget once it is built; a result larger than the budget is dropped
/// and reported as [`QueensError::EngineResourceExhausted`].
pub trait DiagramEngine: Sized {
    type Formula: Clone + fmt::Debug + PartialEq;

    /// Create an engine with `variable_count` variables
    fn create(capacity: EngineCapacity, variable_count: usize) -> Result<Self>;

    fn capacity(&self) -> EngineCapacity;

    fn variable_count(&self) -> usize;

    /// The constant `true` or `false` function
    fn constant(&self, value: bool) -> Self::Formula;

    /// Positive (`x`) or negative (`!x`) literal of `variable`
    fn literal(&self, variable: usize, positive: bool) -> Result<Self::Formula>;

    fn and(&self, left: &Self::Formula, right: &Self::Formula) -> Result<Self::Formula>;

    fn or(&self, left: &Self::Formula, right: &Self::Formula) -> Result<Self::Formula>;

    /// Fix `variable` to `value` in `formula`
    fn restrict(&self, formula: &Self::Formula, variable: usize, value: bool) -> Result<Self::Formula>;

    fn is_false(&self, formula: &Self::Formula) -> bool;

    fn is_true(&self, formula: &Self::Formula) -> bool;

    /// Number of nodes in the diagram of `formula`
    fn node_count(&self, formula: &Self::Formula) -> usize;

    /// Number of satisfying assignments over all allocated variables
    fn satisfying_count(&self, formula: &Self::Formula) -> f64;

    /// One satisfying assignment, indexed by variable
    fn witness(&self, formula: &Self::Formula) -> Option<Vec<bool>>;
}

/// [`DiagramEngine`] backed by `biodivine_lib_bdd`
#[derive(Clone)]
pub struct BddEngine {
    variable_set: BddVariableSet,
    variables: Vec<BddVariable>,
    capacity: EngineCapacity,
}

impl BddEngine {
    fn variable(&self, index: usize) -> Result<BddVariable> {
        self.variables
            .get(index)
            .copied()
            .ok_or(QueensError::InvalidVariable {
                index,
                count: self.variables.len(),
            })
    }

    fn within_budget(&self, bdd: Bdd) -> Result<Bdd> {
        let nodes = bdd.size();
        if nodes > self.capacity.node_limit {
            return Err(QueensError::EngineResourceExhausted {
                nodes,
                limit: self.capacity.node_limit,
            });
        }
        Ok(bdd)
    }
}

impl fmt::Debug for BddEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BddEngine")
            .field("variables", &self.variables.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl DiagramEngine for BddEngine {
    type Formula = Bdd;

    fn create(capacity: EngineCapacity, variable_count: usize) -> Result<Self> {
        let max = usize::from(u16::MAX);
        let count = u16::try_from(variable_count).map_err(|_| QueensError::TooManyVariables {
            requested: variable_count,
            max,
        })?;

        let variable_set = BddVariableSet::new_anonymous(count);
        let variables = variable_set.variables();

        Ok(Self {
            variable_set,
            variables,
            capacity,
        })
    }

    fn capacity(&self) -> EngineCapacity {
        self.capacity
    }

    fn variable_count(&self) -> usize {
        self.variables.len()
    }

    fn constant(&self, value: bool) -> Bdd {
        if value {
            self.variable_set.mk_true()
        } else {
            self.variable_set.mk_false()
        }
    }

    fn literal(&self, variable: usize, positive: bool) -> Result<Bdd> {
        let var = self.variable(variable)?;
        Ok(if positive {
            self.variable_set.mk_var(var)
        } else {
            self.variable_set.mk_not_var(var)
        })
    }

    fn and(&self, left: &Bdd, right: &Bdd) -> Result<Bdd> {
        self.within_budget(left.and(right))
    }

    fn or(&self, left: &Bdd, right: &Bdd) -> Result<Bdd> {
        self.within_budget(left.or(right))
    }

    fn restrict(&self, formula: &Bdd, variable: usize, value: bool) -> Result<Bdd> {
        let var = self.variable(variable)?;
        self.within_budget(formula.var_restrict(var, value))
    }

    fn is_false(&self, formula: &Bdd) -> bool {
        formula.is_false()
    }

    fn is_true(&self, formula: &Bdd) -> bool {
        formula.is_true()
    }

    fn node_count(&self, formula: &Bdd) -> usize {
        formula.size()
    }

    fn satisfying_count(&self, formula: &Bdd) -> f64 {
        formula.cardinality()
    }

    fn witness(&self, formula: &Bdd) -> Option<Vec<bool>> {
        let valuation = formula.sat_witness()?;
        Some(self.variables.iter().map(|&var| valuation.value(var)).collect())
    }
}
