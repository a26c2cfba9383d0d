//! Declarative MILP formulation of the VRPTW.
//!
//! The model is a plain value: decision variables with structured keys,
//! sparse constraint rows tagged with their generating family, and a linear
//! objective. Solver adapters consume it read-only.

mod builder;
mod constraint;
mod model;
mod variable;

pub use builder::build_model;
pub use constraint::{Constraint, ConstraintKind, Objective, ObjectiveSense, Sense};
pub use model::MilpModel;
pub use variable::{Domain, VarId, VarKey, Variable};
