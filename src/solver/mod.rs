//! Solver adapter seam.
//!
//! The formulation treats the mathematical solver as an opaque external
//! collaborator: it receives the declarative model and returns a status plus
//! variable values. Nothing here assumes a particular solving strategy.
//!
//! [`EnumerationSolver`] is a reference adapter for small instances so the
//! full pipeline can run without an external MIP backend.

mod enumerate;

use serde::Serialize;
use thiserror::Error;

use crate::milp::{MilpModel, VarId};

pub use enumerate::EnumerationSolver;

/// Outcome classification reported by a solver backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// A provably optimal assignment was found.
    Optimal,
    /// The model admits no feasible assignment.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
    /// The backend stopped without a classification.
    Unknown,
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A complete variable assignment returned by a solver, laid out in the
/// model's `VarId` order.
#[derive(Debug, Clone)]
pub struct Assignment {
    values: Vec<f64>,
    objective: f64,
}

impl Assignment {
    /// Creates an assignment from raw values and the objective they attain.
    pub fn new(values: Vec<f64>, objective: f64) -> Self {
        Self { values, objective }
    }

    /// The value assigned to a variable (0.0 for unknown ids).
    pub fn value(&self, id: VarId) -> f64 {
        self.values.get(id.index()).copied().unwrap_or(0.0)
    }

    /// All values, in `VarId` order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The objective value of this assignment.
    pub fn objective(&self) -> f64 {
        self.objective
    }
}

/// What a solve call produced: a status, and an assignment when the status
/// is [`SolveStatus::Optimal`].
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    status: SolveStatus,
    assignment: Option<Assignment>,
}

impl SolveOutcome {
    /// An optimal outcome carrying its assignment.
    pub fn optimal(assignment: Assignment) -> Self {
        Self {
            status: SolveStatus::Optimal,
            assignment: Some(assignment),
        }
    }

    /// A terminal outcome without a solution.
    pub fn without_solution(status: SolveStatus) -> Self {
        debug_assert!(status != SolveStatus::Optimal);
        Self {
            status,
            assignment: None,
        }
    }

    /// The status classification.
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// The assignment, present when the status is optimal.
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }
}

/// Adapter-side failures, distinct from a non-optimal solve status.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The instance exceeds what the adapter is willing to enumerate.
    #[error("instance too large for this adapter: {customers} customers (limit {limit})")]
    InstanceTooLarge {
        /// Customers in the instance.
        customers: usize,
        /// The adapter's limit.
        limit: usize,
    },
    /// An optimal status was reported without an assignment.
    #[error("solver reported optimal but returned no assignment")]
    MissingAssignment,
    /// A backend-specific failure.
    #[error("solver backend failure: {0}")]
    Backend(String),
}

/// The opaque solve seam: `solve(model) -> outcome`.
///
/// Implementations must return variable values that respect the model's
/// constraints whenever they report [`SolveStatus::Optimal`]; callers treat
/// everything else about the backend as a black box.
pub trait SolverAdapter {
    /// Solves the model, returning a status and (if optimal) an assignment.
    fn solve(&self, model: &MilpModel) -> Result<SolveOutcome, SolverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(SolveStatus::Optimal.to_string(), "optimal");
        assert_eq!(SolveStatus::Infeasible.to_string(), "infeasible");
    }

    #[test]
    fn test_assignment_lookup() {
        let a = Assignment::new(vec![1.0, 0.5], 7.0);
        assert_eq!(a.objective(), 7.0);
        assert_eq!(a.values().len(), 2);
    }

    #[test]
    fn test_outcome_constructors() {
        let out = SolveOutcome::without_solution(SolveStatus::Infeasible);
        assert_eq!(out.status(), SolveStatus::Infeasible);
        assert!(out.assignment().is_none());

        let out = SolveOutcome::optimal(Assignment::new(vec![], 0.0));
        assert_eq!(out.status(), SolveStatus::Optimal);
        assert!(out.assignment().is_some());
    }
}
