//! Owner of the current placement formula

use super::{BuildStatistics, ConstraintBuilder, DiagramEngine, EngineCapacity, VariableMapping};
use crate::error::Result;
use tracing::{debug, warn};

/// Holds the placement formula and narrows it as decisions arrive.
///
/// The store is append-only: a variable can be fixed to `true`, but a decision
/// can never be retracted.
#[derive(Debug, Clone)]
pub struct ConstraintStore<E: DiagramEngine> {
    engine: E,
    formula: E::Formula,
    decisions: Vec<usize>,
    build_statistics: BuildStatistics,
}

impl<E: DiagramEngine> ConstraintStore<E> {
    /// Allocate one variable per cell and build the placement formula
    pub fn build(mapping: VariableMapping, capacity: EngineCapacity) -> Result<Self> {
        let engine = E::create(capacity, mapping.variable_count())?;
        let (formula, build_statistics) = ConstraintBuilder::new(&engine, mapping).build()?;

        Ok(Self {
            engine,
            formula,
            decisions: Vec::new(),
            build_statistics,
        })
    }

    /// Narrow the formula to assignments where `variable` is true.
    ///
    /// On failure the stored formula is unchanged.
    pub fn restrict_true(&mut self, variable: usize) -> Result<()> {
        if self.decisions.contains(&variable) {
            return Ok(());
        }

        let restricted = self
            .engine
            .restrict(&self.formula, variable, true)
            .inspect_err(|e| warn!(variable, error = %e, "restriction failed"))?;

        self.formula = restricted;
        self.decisions.push(variable);

        debug!(
            variable,
            nodes = self.engine.node_count(&self.formula),
            "formula restricted"
        );
        Ok(())
    }

    /// True when no completion of the current formula sets `variable`
    pub fn is_forbidden(&self, variable: usize) -> Result<bool> {
        let probe = self.engine.restrict(&self.formula, variable, true)?;
        Ok(self.engine.is_false(&probe))
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.engine.is_false(&self.formula)
    }

    pub fn formula(&self) -> &E::Formula {
        &self.formula
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn node_count(&self) -> usize {
        self.engine.node_count(&self.formula)
    }

    /// Number of complete placements still consistent with the decisions
    pub fn solution_count(&self) -> f64 {
        // Every decided variable is free after restriction, doubling the count.
        self.engine.satisfying_count(&self.formula) / 2f64.powi(self.decisions.len() as i32)
    }

    /// One complete placement consistent with the decisions, as the list of
    /// variables set to true
    pub fn witness(&self) -> Option<Vec<usize>> {
        let mut values = self.engine.witness(&self.formula)?;
        for &variable in &self.decisions {
            let slot = values.get_mut(variable)?;
            *slot = true;
        }
        Some(
            values
                .into_iter()
                .enumerate()
                .filter_map(|(variable, value)| value.then_some(variable))
                .collect(),
        )
    }

    /// Variables fixed to true so far, in decision order
    pub fn decisions(&self) -> &[usize] {
        &self.decisions
    }

    pub fn build_statistics(&self) -> &BuildStatistics {
        &self.build_statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bdd::BddEngine;

    fn store(size: usize) -> (VariableMapping, ConstraintStore<BddEngine>) {
        let mapping = VariableMapping::new(size).unwrap();
        let store = ConstraintStore::build(mapping, EngineCapacity::default()).unwrap();
        (mapping, store)
    }

    #[test]
    fn test_restriction_narrows() {
        let (mapping, mut store) = store(5);
        assert_eq!(store.solution_count(), 10.0);

        store.restrict_true(mapping.index(0, 0).unwrap()).unwrap();
        assert_eq!(store.solution_count(), 2.0);
        assert_eq!(store.decisions(), &[0]);
        assert!(!store.is_unsatisfiable());
    }

    #[test]
    fn test_forbidden_check_is_pure() {
        let (mapping, store) = store(4);
        let before = store.formula().clone();

        // No 4-queens solution uses a corner.
        assert!(store.is_forbidden(mapping.index(0, 0).unwrap()).unwrap());
        assert!(!store.is_forbidden(mapping.index(1, 0).unwrap()).unwrap());
        assert_eq!(store.formula(), &before);
    }

    #[test]
    fn test_witness_respects_decisions() {
        let (mapping, mut store) = store(6);
        let decided = mapping.index(1, 0).unwrap();
        store.restrict_true(decided).unwrap();

        let witness = store.witness().unwrap();
        assert_eq!(witness.len(), 6);
        assert!(witness.contains(&decided));
    }

    #[test]
    fn test_restricting_forbidden_cell_empties_formula() {
        let (mapping, mut store) = store(4);
        store.restrict_true(mapping.index(0, 0).unwrap()).unwrap();

        assert!(store.is_unsatisfiable());
        assert!(store.witness().is_none());
        assert_eq!(store.solution_count(), 0.0);
    }

    #[test]
    fn test_repeated_decision_is_identity() {
        let (mapping, mut store) = store(5);
        let variable = mapping.index(0, 0).unwrap();

        store.restrict_true(variable).unwrap();
        store.restrict_true(variable).unwrap();

        assert_eq!(store.decisions().len(), 1);
        assert_eq!(store.solution_count(), 2.0);
    }
}
