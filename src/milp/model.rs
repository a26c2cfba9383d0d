//! The declarative MILP model handed to solver adapters.

use std::collections::HashMap;

use super::constraint::{Constraint, Objective, ObjectiveSense};
use super::variable::{Domain, VarId, VarKey, Variable};

/// An immutable mixed-integer linear program: variables, sparse constraint
/// rows, and a linear objective, with a structured-key index for looking up
/// arc and arrival variables.
///
/// Models are produced by [`build_model`](super::build_model) and consumed
/// read-only by [`SolverAdapter`](crate::solver::SolverAdapter)
/// implementations and the route extractor; there is no ambient solver
/// handle or global state.
#[derive(Debug, Clone)]
pub struct MilpModel {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Objective,
    index: HashMap<VarKey, VarId>,
    num_nodes: usize,
    num_vehicles: usize,
}

impl MilpModel {
    pub(crate) fn new(num_nodes: usize, num_vehicles: usize) -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: Objective::new(ObjectiveSense::Minimize, Vec::new()),
            index: HashMap::new(),
            num_nodes,
            num_vehicles,
        }
    }

    pub(crate) fn add_variable(
        &mut self,
        key: VarKey,
        domain: Domain,
        lower: f64,
        upper: f64,
    ) -> VarId {
        debug_assert!(!self.index.contains_key(&key));
        let id = VarId::new(self.variables.len());
        self.variables.push(Variable::new(key, domain, lower, upper));
        self.index.insert(key, id);
        id
    }

    pub(crate) fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub(crate) fn set_objective(&mut self, objective: Objective) {
        self.objective = objective;
    }

    /// All decision variables, in `VarId` order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The variable behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this model.
    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.index()]
    }

    /// All constraint rows.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The objective.
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Number of decision variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraint rows.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Number of nodes in the underlying network (`num_customers + 2`).
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of vehicles in the fleet.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Looks up a variable by structured key.
    pub fn var(&self, key: VarKey) -> Option<VarId> {
        self.index.get(&key).copied()
    }

    /// Looks up the arc-selection variable `from -> to` for a vehicle.
    ///
    /// Returns `None` for arcs the formulation excludes (self-loops, arcs
    /// into the depot, arcs out of the auxiliary depot).
    pub fn arc(&self, from: usize, to: usize, vehicle: usize) -> Option<VarId> {
        self.var(VarKey::Arc { from, to, vehicle })
    }

    /// Looks up the arrival-time variable at a node for a vehicle.
    pub fn arrival(&self, node: usize, vehicle: usize) -> Option<VarId> {
        self.var(VarKey::Arrival { node, vehicle })
    }

    /// Checks a full variable assignment against every bound and row.
    ///
    /// Used by enumeration-style adapters and by tests to validate solver
    /// output against the declarative model.
    pub fn is_feasible(&self, values: &[f64], tol: f64) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let bounds_ok = self
            .variables
            .iter()
            .zip(values)
            .all(|(v, &x)| x >= v.lower() - tol && x <= v.upper() + tol);
        bounds_ok && self.constraints.iter().all(|c| c.satisfied(values, tol))
    }

    /// Returns the rows violated by the given assignment.
    pub fn violated_rows(&self, values: &[f64], tol: f64) -> Vec<&Constraint> {
        self.constraints
            .iter()
            .filter(|c| !c.satisfied(values, tol))
            .collect()
    }
}
