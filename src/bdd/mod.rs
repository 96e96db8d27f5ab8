//! Decision-diagram encoding of the N-Queens constraint

pub mod variables;
pub mod engine;
pub mod constraints;
pub mod store;

pub use variables::{Cell, VariableMapping};
pub use engine::{BddEngine, DiagramEngine, EngineCapacity};
pub use constraints::{BuildStatistics, ConstraintBuilder};
pub use store::ConstraintStore;
