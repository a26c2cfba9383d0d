//! Exhaustive reference adapter for small instances.

use tracing::debug;

use crate::milp::{ConstraintKind, Domain, MilpModel};

use super::{Assignment, SolveOutcome, SolveStatus, SolverAdapter, SolverError};

const FEASIBILITY_TOL: f64 = 1e-6;
const OBJECTIVE_TOL: f64 = 1e-9;

/// A deterministic, exhaustive solver adapter.
///
/// Enumerates every assignment of customers to vehicles and every visit
/// order per vehicle, schedules each candidate at its earliest arrival
/// times, and checks the candidate against every row of the model. The
/// best feasible candidate (ties broken by enumeration order, which is
/// lexicographic in customer-to-vehicle assignment and visit order) is
/// returned as optimal.
///
/// This exists so the pipeline and its laws can be exercised without an
/// external MIP backend. It refuses instances beyond a small size guard
/// rather than running for an unbounded time.
///
/// # Examples
///
/// ```
/// use vrptw_exact::milp::build_model;
/// use vrptw_exact::models::{Instance, Node, TimeWindow, Vehicle};
/// use vrptw_exact::network::RoutingNetwork;
/// use vrptw_exact::solver::{EnumerationSolver, SolveStatus, SolverAdapter};
///
/// let tw = TimeWindow::new(0.0, 1000.0).unwrap();
/// let instance = Instance::new(
///     vec![Vehicle::new(0, 10.0)],
///     Node::depot(0.0, 0.0, tw),
///     vec![Node::customer(1, 1.0, 0.0, 5.0, 0.0, tw)],
/// );
/// let network = RoutingNetwork::from_instance(&instance);
/// let model = build_model(&network, instance.vehicles());
/// let outcome = EnumerationSolver::new().solve(&model).unwrap();
/// assert_eq!(outcome.status(), SolveStatus::Optimal);
/// ```
#[derive(Debug, Clone)]
pub struct EnumerationSolver {
    max_customers: usize,
}

impl EnumerationSolver {
    /// Assignment combinations the adapter is willing to walk.
    const MAX_COMBINATIONS: u128 = 1 << 16;

    /// Creates an adapter with the default size guard (8 customers).
    pub fn new() -> Self {
        Self { max_customers: 8 }
    }

    /// Overrides the customer-count guard.
    pub fn with_max_customers(max_customers: usize) -> Self {
        Self { max_customers }
    }
}

impl Default for EnumerationSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverAdapter for EnumerationSolver {
    fn solve(&self, model: &MilpModel) -> Result<SolveOutcome, SolverError> {
        let num_nodes = model.num_nodes();
        let num_vehicles = model.num_vehicles();
        let num_customers = num_nodes - 2;

        let combinations = (num_vehicles as u128).saturating_pow(num_customers as u32);
        if num_customers > self.max_customers || combinations > Self::MAX_COMBINATIONS {
            return Err(SolverError::InstanceTooLarge {
                customers: num_customers,
                limit: self.max_customers,
            });
        }
        if num_vehicles == 0 {
            return Ok(SolveOutcome::without_solution(SolveStatus::Infeasible));
        }

        let (service, ready) = timing_data(model);

        let mut best: Option<(Vec<f64>, f64)> = None;
        let mut candidates = 0usize;
        let mut vehicle_of = vec![0usize; num_customers];
        loop {
            // Group customers per vehicle under the current assignment,
            // then try every visit order within each group.
            let mut groups: Vec<Vec<usize>> = vec![Vec::new(); num_vehicles];
            for (slot, &vehicle) in vehicle_of.iter().enumerate() {
                groups[vehicle].push(slot + 1);
            }
            let orderings: Vec<Vec<Vec<usize>>> =
                groups.iter().map(|g| permutations(g)).collect();

            let mut choice = vec![0usize; num_vehicles];
            loop {
                let routes: Vec<&[usize]> = choice
                    .iter()
                    .zip(&orderings)
                    .map(|(&c, perms)| perms[c].as_slice())
                    .collect();
                candidates += 1;
                if let Some((values, objective)) =
                    evaluate_candidate(model, &routes, &service, &ready)
                {
                    let improves = best
                        .as_ref()
                        .map_or(true, |(_, b)| objective < b - OBJECTIVE_TOL);
                    if improves {
                        best = Some((values, objective));
                    }
                }
                if !advance(&mut choice, |k| orderings[k].len()) {
                    break;
                }
            }
            if !advance(&mut vehicle_of, |_| num_vehicles) {
                break;
            }
        }

        debug!(candidates, feasible = best.is_some(), "enumeration finished");
        Ok(match best {
            Some((values, objective)) => {
                SolveOutcome::optimal(Assignment::new(values, objective))
            }
            None => SolveOutcome::without_solution(SolveStatus::Infeasible),
        })
    }
}

/// Recovers per-node service times and ready times from the model's rows.
///
/// The propagation row for an arc out of `from` is
/// `t[from] - t[to] + M*x <= M - service(from)`, so the service time is the
/// binary coefficient minus the right-hand side; ready times are the
/// right-hand sides of the lower window rows.
fn timing_data(model: &MilpModel) -> (Vec<f64>, Vec<f64>) {
    let mut service = vec![0.0; model.num_nodes()];
    let mut ready = vec![0.0; model.num_nodes()];
    for c in model.constraints() {
        match c.kind() {
            ConstraintKind::TimePropagation {
                from, vehicle: 0, ..
            } => {
                let big_m = c
                    .terms()
                    .iter()
                    .find(|(id, _)| model.variable(*id).domain() == Domain::Binary)
                    .map(|&(_, coeff)| coeff);
                if let Some(big_m) = big_m {
                    service[from] = big_m - c.rhs();
                }
            }
            ConstraintKind::TimeWindowLower { node, vehicle: 0 } => {
                ready[node] = c.rhs();
            }
            _ => {}
        }
    }
    (service, ready)
}

/// Builds the full variable assignment for one set of candidate routes and
/// validates it against every bound and row of the model.
///
/// Arrivals follow the earliest schedule: departure from the depot at its
/// ready time, then `max(ready, previous + service)` along the route.
/// Unvisited nodes sit at their ready time, where the big-M rows are
/// vacuous. Returns `None` if a needed arc is not in the model or any row
/// is violated.
fn evaluate_candidate(
    model: &MilpModel,
    routes: &[&[usize]],
    service: &[f64],
    ready: &[f64],
) -> Option<(Vec<f64>, f64)> {
    let aux = model.num_nodes() - 1;
    let mut values = vec![0.0; model.num_variables()];

    for node in 0..model.num_nodes() {
        for vehicle in 0..model.num_vehicles() {
            if let Some(id) = model.arrival(node, vehicle) {
                values[id.index()] = ready[node];
            }
        }
    }

    for (vehicle, route) in routes.iter().enumerate() {
        let mut prev = 0usize;
        let mut time = ready[0];
        for &customer in route.iter() {
            let arc = model.arc(prev, customer, vehicle)?;
            values[arc.index()] = 1.0;
            time = (time + service[prev]).max(ready[customer]);
            if let Some(id) = model.arrival(customer, vehicle) {
                values[id.index()] = time;
            }
            prev = customer;
        }
        let arc = model.arc(prev, aux, vehicle)?;
        values[arc.index()] = 1.0;
        let return_time = (time + service[prev]).max(ready[aux]);
        if let Some(id) = model.arrival(aux, vehicle) {
            values[id.index()] = return_time;
        }
    }

    if !model.is_feasible(&values, FEASIBILITY_TOL) {
        return None;
    }
    let objective = model.objective().value(&values);
    Some((values, objective))
}

/// Lexicographic permutations of the given items.
fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for (i, &head) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

/// Advances a mixed-radix odometer; returns `false` once it wraps around.
fn advance(digits: &mut [usize], radix: impl Fn(usize) -> usize) -> bool {
    for i in (0..digits.len()).rev() {
        digits[i] += 1;
        if digits[i] < radix(i) {
            return true;
        }
        digits[i] = 0;
    }
    false
}
