//! End-to-end solve pipeline.

use tracing::{debug, info};

use crate::error::Error;
use crate::extract::extract_routes;
use crate::milp::build_model;
use crate::models::Instance;
use crate::network::RoutingNetwork;
use crate::report::SolveReport;
use crate::solver::{SolveStatus, SolverAdapter, SolverError};

/// Runs the full pipeline: instance -> network -> model -> solver ->
/// route extraction -> report.
///
/// The stages are strictly sequential and single-threaded; the solve call
/// is the only potentially long-running step and its duration is entirely
/// up to the adapter. A non-optimal status becomes a "no feasible
/// solution" report, not an error.
///
/// # Examples
///
/// ```
/// use vrptw_exact::models::{Instance, Node, TimeWindow, Vehicle};
/// use vrptw_exact::pipeline::solve_instance;
/// use vrptw_exact::solver::EnumerationSolver;
///
/// let tw = TimeWindow::new(0.0, 1000.0).unwrap();
/// let instance = Instance::new(
///     vec![Vehicle::new(0, 10.0)],
///     Node::depot(0.0, 0.0, tw),
///     vec![
///         Node::customer(1, 1.0, 0.0, 5.0, 0.0, tw),
///         Node::customer(2, 2.0, 0.0, 5.0, 0.0, tw),
///     ],
/// );
/// let report = solve_instance(&instance, &EnumerationSolver::new()).unwrap();
/// assert!(report.is_feasible());
/// assert!((report.total_distance().unwrap() - 4.0).abs() < 1e-6);
/// ```
pub fn solve_instance(
    instance: &Instance,
    solver: &dyn SolverAdapter,
) -> Result<SolveReport, Error> {
    if instance.num_customers() == 0 {
        return Err(Error::EmptyInstance);
    }

    let network = RoutingNetwork::from_instance(instance);
    let model = build_model(&network, instance.vehicles());
    debug!(
        nodes = network.num_nodes(),
        vehicles = instance.num_vehicles(),
        variables = model.num_variables(),
        constraints = model.num_constraints(),
        "solving instance"
    );

    let outcome = solver.solve(&model)?;
    match outcome.status() {
        SolveStatus::Optimal => {
            let assignment = outcome
                .assignment()
                .ok_or(SolverError::MissingAssignment)?;
            let routes = extract_routes(&model, &network, assignment)?;
            let total = assignment.objective();
            info!(total_distance = total, "optimal solution found");
            Ok(SolveReport::optimal(routes, total))
        }
        status => {
            info!(%status, "no feasible solution");
            Ok(SolveReport::no_solution(status))
        }
    }
}
