//! Deterministic route reconstruction from an arc assignment.

use thiserror::Error;
use tracing::{debug, warn};

use crate::milp::MilpModel;
use crate::models::{Route, Visit};
use crate::network::RoutingNetwork;
use crate::solver::Assignment;

/// Arc values above this threshold count as selected.
const ACTIVE_THRESHOLD: f64 = 0.5;

/// Structural defects found while walking an assignment.
///
/// These indicate a modeling or numeric-tolerance problem in the solution,
/// not a genuinely infeasible instance, and are therefore reported
/// separately from a solver's `Infeasible` status. The degree and flow
/// constraints alone do not exclude closed sub-cycles disconnected from the
/// depot, so the walk guards against them instead of assuming they cannot
/// occur.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The walk exceeded `num_nodes` steps without reaching the auxiliary
    /// depot.
    #[error("vehicle {vehicle}: walk did not terminate within the node budget (cycle)")]
    CycleDetected {
        /// The vehicle whose walk looped.
        vehicle: usize,
    },
    /// The walk stopped at a node with no active outgoing arc before
    /// reaching the auxiliary depot.
    #[error("vehicle {vehicle}: walk stranded at node {node} before the auxiliary depot")]
    UnterminatedWalk {
        /// The vehicle whose walk stranded.
        vehicle: usize,
        /// The node where no outgoing arc was active.
        node: usize,
    },
    /// Customers that no vehicle's walk reached (e.g. assigned to a
    /// disconnected sub-cycle).
    #[error("customers not reached by any route: {customers:?}")]
    UnvisitedCustomers {
        /// The unreached customer node ids, ascending.
        customers: Vec<usize>,
    },
}

/// Reconstructs one ordered route per vehicle from an optimal assignment.
///
/// Each walk starts at the depot and follows the unique active outgoing arc
/// (`x > 0.5`), taking the lowest destination id if several appear active,
/// until it reaches the auxiliary depot. Walks are bounded by `num_nodes`
/// steps; exceeding the bound, stranding before the auxiliary depot, or
/// leaving a customer unreached is reported as an [`ExtractionError`].
///
/// # Examples
///
/// ```
/// use vrptw_exact::extract::extract_routes;
/// use vrptw_exact::milp::build_model;
/// use vrptw_exact::models::{Instance, Node, TimeWindow, Vehicle};
/// use vrptw_exact::network::RoutingNetwork;
/// use vrptw_exact::solver::{EnumerationSolver, SolverAdapter};
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
/// let routes = extract_routes(&model, &network, outcome.assignment().unwrap()).unwrap();
/// assert_eq!(routes[0].customer_ids(), vec![1]);
/// ```
pub fn extract_routes(
    model: &MilpModel,
    network: &RoutingNetwork,
    assignment: &Assignment,
) -> Result<Vec<Route>, ExtractionError> {
    let aux = network.auxiliary_depot_id();
    let mut routes = Vec::with_capacity(model.num_vehicles());
    let mut visited = vec![false; network.num_nodes()];

    for vehicle in 0..model.num_vehicles() {
        let mut route = Route::new(vehicle);
        let mut distance = 0.0;
        let mut current = network.depot_id();
        let mut steps = 0;

        while current != aux {
            if steps > network.num_nodes() {
                warn!(vehicle, "extraction walk exceeded the node budget");
                return Err(ExtractionError::CycleDetected { vehicle });
            }
            let Some(next) = active_successor(model, assignment, current, vehicle, aux) else {
                warn!(vehicle, node = current, "extraction walk stranded");
                return Err(ExtractionError::UnterminatedWalk {
                    vehicle,
                    node: current,
                });
            };
            debug!(vehicle, from = current, to = next, "vehicle travels arc");
            distance += network.distance(current, next);
            if next != aux {
                visited[next] = true;
                let arrival_time = model
                    .arrival(next, vehicle)
                    .map(|id| assignment.value(id))
                    .unwrap_or_default();
                route.push_visit(Visit {
                    customer_id: next,
                    arrival_time,
                });
            }
            current = next;
            steps += 1;
        }

        route.set_total_distance(distance);
        routes.push(route);
    }

    let unvisited: Vec<usize> = network
        .customer_ids()
        .filter(|&c| !visited[c])
        .collect();
    if !unvisited.is_empty() {
        warn!(?unvisited, "customers unreachable from any depot walk");
        return Err(ExtractionError::UnvisitedCustomers {
            customers: unvisited,
        });
    }

    Ok(routes)
}

/// The lowest-id node reachable from `current` over an active arc.
fn active_successor(
    model: &MilpModel,
    assignment: &Assignment,
    current: usize,
    vehicle: usize,
    aux: usize,
) -> Option<usize> {
    (1..=aux).find(|&next| {
        next != current
            && model
                .arc(current, next, vehicle)
                .is_some_and(|id| assignment.value(id) > ACTIVE_THRESHOLD)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::build_model;
    use crate::models::{Instance, Node, TimeWindow, Vehicle};
    use proptest::prelude::*;

    fn setup(num_vehicles: usize) -> (RoutingNetwork, MilpModel) {
        let tw = TimeWindow::new(0.0, 1000.0).expect("valid");
        let vehicles = (0..num_vehicles).map(|k| Vehicle::new(k, 10.0)).collect();
        let instance = Instance::new(
            vehicles,
            Node::depot(0.0, 0.0, tw),
            vec![
                Node::customer(1, 1.0, 0.0, 5.0, 0.0, tw),
                Node::customer(2, 2.0, 0.0, 5.0, 0.0, tw),
            ],
        );
        let network = RoutingNetwork::from_instance(&instance);
        let model = build_model(&network, instance.vehicles());
        (network, model)
    }

    fn assignment_with_arcs(model: &MilpModel, arcs: &[(usize, usize, usize)]) -> Assignment {
        let mut values = vec![0.0; model.num_variables()];
        for &(from, to, vehicle) in arcs {
            let id = model.arc(from, to, vehicle).expect("arc exists");
            values[id.index()] = 1.0;
        }
        Assignment::new(values, 0.0)
    }

    #[test]
    fn test_extracts_ordered_route() {
        let (network, model) = setup(1);
        let assignment = assignment_with_arcs(&model, &[(0, 1, 0), (1, 2, 0), (2, 3, 0)]);
        let routes = extract_routes(&model, &network, &assignment).expect("extracted");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].customer_ids(), vec![1, 2]);
        assert!((routes[0].total_distance() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_idle_vehicle_empty_route() {
        let (network, model) = setup(2);
        let assignment = assignment_with_arcs(
            &model,
            &[(0, 1, 0), (1, 2, 0), (2, 3, 0), (0, 3, 1)],
        );
        let routes = extract_routes(&model, &network, &assignment).expect("extracted");
        assert_eq!(routes.len(), 2);
        assert!(routes[1].is_empty());
        assert_eq!(routes[1].total_distance(), 0.0);
    }

    #[test]
    fn test_cycle_detected() {
        let (network, model) = setup(1);
        // 0 -> 1 -> 2 -> 1 -> ... never reaches the auxiliary depot.
        let assignment = assignment_with_arcs(&model, &[(0, 1, 0), (1, 2, 0), (2, 1, 0)]);
        let err = extract_routes(&model, &network, &assignment).unwrap_err();
        assert_eq!(err, ExtractionError::CycleDetected { vehicle: 0 });
    }

    #[test]
    fn test_unterminated_walk() {
        let (network, model) = setup(1);
        let assignment = assignment_with_arcs(&model, &[(0, 1, 0)]);
        let err = extract_routes(&model, &network, &assignment).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::UnterminatedWalk {
                vehicle: 0,
                node: 1
            }
        );
    }

    #[test]
    fn test_unvisited_customers_reported() {
        let (network, model) = setup(1);
        // Vehicle goes straight home; both customers sit on a sub-cycle the
        // walk never reaches.
        let assignment = assignment_with_arcs(&model, &[(0, 3, 0), (1, 2, 0), (2, 1, 0)]);
        let err = extract_routes(&model, &network, &assignment).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::UnvisitedCustomers {
                customers: vec![1, 2]
            }
        );
    }

    #[test]
    fn test_ascending_tie_break() {
        let (network, model) = setup(1);
        // Two active arcs out of the depot: the walk must take node 1, so
        // node 2 is the one left unvisited.
        let assignment =
            assignment_with_arcs(&model, &[(0, 1, 0), (0, 2, 0), (1, 3, 0), (2, 3, 0)]);
        let err = extract_routes(&model, &network, &assignment).unwrap_err();
        assert_eq!(err, ExtractionError::UnvisitedCustomers { customers: vec![2] });
    }

    proptest! {
        // Termination law: the walk finishes (with a result or an anomaly)
        // within the step budget for arbitrary fractional arc values.
        #[test]
        fn prop_extraction_terminates(raw in prop::collection::vec(0.0f64..1.0, 11)) {
            let (network, model) = setup(1);
            prop_assert_eq!(model.num_variables(), raw.len());
            let assignment = Assignment::new(raw, 0.0);
            let _ = extract_routes(&model, &network, &assignment);
        }
    }
}
