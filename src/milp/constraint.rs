//! Sparse constraint rows and the objective.

use super::variable::VarId;

/// Comparison sense of a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Left-hand side `<=` right-hand side.
    Le,
    /// Left-hand side `==` right-hand side.
    Eq,
    /// Left-hand side `>=` right-hand side.
    Ge,
}

/// The constraint family a row belongs to, with its generating indices.
///
/// Carried alongside every row so diagnostics and solver adapters can relate
/// a violated row back to the formulation without parsing names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Exactly one outgoing arc over all vehicles leaves the customer.
    VisitOnce {
        /// Customer node id.
        customer: usize,
    },
    /// Exactly one arc leaves the depot for the vehicle.
    DepotStart {
        /// Vehicle id.
        vehicle: usize,
    },
    /// Exactly one arc enters the auxiliary depot for the vehicle.
    DepotEnd {
        /// Vehicle id.
        vehicle: usize,
    },
    /// Inflow equals outflow at the customer for the vehicle.
    FlowConservation {
        /// Customer node id.
        node: usize,
        /// Vehicle id.
        vehicle: usize,
    },
    /// Total demand served by the vehicle stays within its capacity.
    Capacity {
        /// Vehicle id.
        vehicle: usize,
    },
    /// Big-M arrival-time propagation along an arc.
    TimePropagation {
        /// Source node id.
        from: usize,
        /// Destination node id.
        to: usize,
        /// Vehicle id.
        vehicle: usize,
    },
    /// Arrival no earlier than the customer's ready time.
    TimeWindowLower {
        /// Customer node id.
        node: usize,
        /// Vehicle id.
        vehicle: usize,
    },
    /// Arrival no later than the customer's due date.
    TimeWindowUpper {
        /// Customer node id.
        node: usize,
        /// Vehicle id.
        vehicle: usize,
    },
}

/// A sparse linear constraint row: `sum(coeff * var) sense rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    kind: ConstraintKind,
    terms: Vec<(VarId, f64)>,
    sense: Sense,
    rhs: f64,
}

impl Constraint {
    /// Creates a constraint row.
    pub fn new(kind: ConstraintKind, terms: Vec<(VarId, f64)>, sense: Sense, rhs: f64) -> Self {
        Self {
            kind,
            terms,
            sense,
            rhs,
        }
    }

    /// The constraint family this row belongs to.
    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Non-zero coefficients over variable ids.
    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    /// Comparison sense.
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Right-hand side constant.
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Evaluates the left-hand side under the given variable values.
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(id, coeff)| coeff * values.get(id.index()).copied().unwrap_or(0.0))
            .sum()
    }

    /// Returns `true` if the row holds under the given values within `tol`.
    pub fn satisfied(&self, values: &[f64], tol: f64) -> bool {
        let lhs = self.lhs(values);
        match self.sense {
            Sense::Le => lhs <= self.rhs + tol,
            Sense::Eq => (lhs - self.rhs).abs() <= tol,
            Sense::Ge => lhs >= self.rhs - tol,
        }
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    /// Minimize the objective.
    Minimize,
    /// Maximize the objective.
    Maximize,
}

/// The linear objective: direction plus sparse coefficients.
#[derive(Debug, Clone)]
pub struct Objective {
    sense: ObjectiveSense,
    terms: Vec<(VarId, f64)>,
}

impl Objective {
    /// Creates an objective.
    pub fn new(sense: ObjectiveSense, terms: Vec<(VarId, f64)>) -> Self {
        Self { sense, terms }
    }

    /// Optimization direction.
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    /// Non-zero coefficients over variable ids.
    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    /// Evaluates the objective under the given variable values.
    pub fn value(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(id, coeff)| coeff * values.get(id.index()).copied().unwrap_or(0.0))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(sense: Sense, rhs: f64) -> Constraint {
        Constraint::new(
            ConstraintKind::VisitOnce { customer: 1 },
            vec![(VarId::new(0), 1.0), (VarId::new(1), 2.0)],
            sense,
            rhs,
        )
    }

    #[test]
    fn test_lhs_evaluation() {
        let c = row(Sense::Eq, 5.0);
        assert_eq!(c.lhs(&[1.0, 2.0]), 5.0);
        assert_eq!(c.lhs(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_satisfied_by_sense() {
        let values = [1.0, 2.0]; // lhs = 5
        assert!(row(Sense::Eq, 5.0).satisfied(&values, 1e-9));
        assert!(!row(Sense::Eq, 4.0).satisfied(&values, 1e-9));
        assert!(row(Sense::Le, 5.0).satisfied(&values, 1e-9));
        assert!(!row(Sense::Le, 4.9).satisfied(&values, 1e-9));
        assert!(row(Sense::Ge, 5.0).satisfied(&values, 1e-9));
        assert!(!row(Sense::Ge, 5.1).satisfied(&values, 1e-9));
    }

    #[test]
    fn test_objective_value() {
        let obj = Objective::new(
            ObjectiveSense::Minimize,
            vec![(VarId::new(0), 3.0), (VarId::new(2), 0.5)],
        );
        assert_eq!(obj.value(&[2.0, 100.0, 4.0]), 8.0);
    }
}
