//! Constraint model generation for the VRPTW formulation.

use tracing::debug;

use crate::models::Vehicle;
use crate::network::RoutingNetwork;

use super::constraint::{Constraint, ConstraintKind, Objective, ObjectiveSense, Sense};
use super::model::MilpModel;
use super::variable::{Domain, VarKey};

/// Builds the full MILP for an instance: arc-selection and arrival-time
/// variables, the minimum-distance objective, and every constraint family
/// (visit-once, depot start/end, flow conservation, capacity, big-M time
/// propagation, time windows).
///
/// This is a pure, total function; constraint generation is `O(n² · v)` in
/// the number of nodes `n` and vehicles `v`, and rows are emitted directly
/// in sparse form.
///
/// Arcs excluded from the formulation: self-loops, arcs into the depot, and
/// arcs out of the auxiliary depot. The depot -> auxiliary-depot arc exists
/// (zero cost) so an idle vehicle has a well-formed empty route.
///
/// # Examples
///
/// ```
/// use vrptw_exact::milp::build_model;
/// use vrptw_exact::models::{Instance, Node, TimeWindow, Vehicle};
/// use vrptw_exact::network::RoutingNetwork;
///
/// let tw = TimeWindow::new(0.0, 1000.0).unwrap();
/// let instance = Instance::new(
///     vec![Vehicle::new(0, 10.0)],
///     Node::depot(0.0, 0.0, tw),
///     vec![Node::customer(1, 1.0, 0.0, 5.0, 0.0, tw)],
/// );
/// let network = RoutingNetwork::from_instance(&instance);
/// let model = build_model(&network, instance.vehicles());
/// assert!(model.arc(0, 1, 0).is_some());
/// assert!(model.arc(1, 0, 0).is_none()); // no arcs back into the depot
/// ```
pub fn build_model(network: &RoutingNetwork, vehicles: &[Vehicle]) -> MilpModel {
    debug_assert!(vehicles.iter().enumerate().all(|(k, v)| v.id() == k));
    let depot = network.depot_id();
    let aux = network.auxiliary_depot_id();
    let num_vehicles = vehicles.len();

    let mut model = MilpModel::new(network.num_nodes(), num_vehicles);
    let big_m = big_m_for(network);

    // Arc-selection variables. Sources are depot + customers, destinations
    // are customers + auxiliary depot.
    for vehicle in 0..num_vehicles {
        for from in depot..aux {
            for to in 1..=aux {
                if from == to {
                    continue;
                }
                model.add_variable(VarKey::Arc { from, to, vehicle }, Domain::Binary, 0.0, 1.0);
            }
        }
    }

    // Arrival-time variables for every node and vehicle.
    for vehicle in 0..num_vehicles {
        for node in depot..=aux {
            model.add_variable(
                VarKey::Arrival { node, vehicle },
                Domain::Continuous,
                0.0,
                big_m,
            );
        }
    }

    // Objective: minimize total distance over all selected arcs.
    let mut objective = Vec::new();
    for vehicle in 0..num_vehicles {
        for from in depot..aux {
            for to in 1..=aux {
                if let Some(id) = model.arc(from, to, vehicle) {
                    objective.push((id, network.distance(from, to)));
                }
            }
        }
    }
    model.set_objective(Objective::new(ObjectiveSense::Minimize, objective));

    // Visit-once: exactly one outgoing arc per customer, over all vehicles.
    for customer in network.customer_ids() {
        let mut terms = Vec::new();
        for vehicle in 0..num_vehicles {
            for to in 1..=aux {
                if let Some(id) = model.arc(customer, to, vehicle) {
                    terms.push((id, 1.0));
                }
            }
        }
        model.add_constraint(Constraint::new(
            ConstraintKind::VisitOnce { customer },
            terms,
            Sense::Eq,
            1.0,
        ));
    }

    // Depot start: each vehicle leaves the depot exactly once.
    for vehicle in 0..num_vehicles {
        let terms = (1..=aux)
            .filter_map(|to| model.arc(depot, to, vehicle))
            .map(|id| (id, 1.0))
            .collect();
        model.add_constraint(Constraint::new(
            ConstraintKind::DepotStart { vehicle },
            terms,
            Sense::Eq,
            1.0,
        ));
    }

    // Depot end: each vehicle enters the auxiliary depot exactly once.
    for vehicle in 0..num_vehicles {
        let terms = (depot..aux)
            .filter_map(|from| model.arc(from, aux, vehicle))
            .map(|id| (id, 1.0))
            .collect();
        model.add_constraint(Constraint::new(
            ConstraintKind::DepotEnd { vehicle },
            terms,
            Sense::Eq,
            1.0,
        ));
    }

    // Flow conservation: inflow equals outflow at every customer.
    for node in network.customer_ids() {
        for vehicle in 0..num_vehicles {
            let mut terms: Vec<_> = (depot..aux)
                .filter_map(|from| model.arc(from, node, vehicle))
                .map(|id| (id, 1.0))
                .collect();
            terms.extend(
                (1..=aux)
                    .filter_map(|to| model.arc(node, to, vehicle))
                    .map(|id| (id, -1.0)),
            );
            model.add_constraint(Constraint::new(
                ConstraintKind::FlowConservation { node, vehicle },
                terms,
                Sense::Eq,
                0.0,
            ));
        }
    }

    // Capacity: demand served by a vehicle (customers whose outgoing arc it
    // takes) stays within its capacity.
    for vehicle in vehicles {
        let mut terms = Vec::new();
        for customer in network.customer_ids() {
            let demand = network.node(customer).demand();
            for to in 1..=aux {
                if let Some(id) = model.arc(customer, to, vehicle.id()) {
                    terms.push((id, demand));
                }
            }
        }
        model.add_constraint(Constraint::new(
            ConstraintKind::Capacity {
                vehicle: vehicle.id(),
            },
            terms,
            Sense::Le,
            vehicle.capacity(),
        ));
    }

    // Time propagation: t[to] >= t[from] + service(from) - M * (1 - x),
    // emitted as t[from] - t[to] + M * x <= M - service(from). M is chosen
    // from the instance so the row is vacuous whenever the arc is unused.
    for vehicle in 0..num_vehicles {
        for from in depot..aux {
            let service = network.node(from).service_time();
            for to in 1..=aux {
                let Some(x) = model.arc(from, to, vehicle) else {
                    continue;
                };
                let t_from = model
                    .arrival(from, vehicle)
                    .expect("arrival variable exists for every node");
                let t_to = model
                    .arrival(to, vehicle)
                    .expect("arrival variable exists for every node");
                model.add_constraint(Constraint::new(
                    ConstraintKind::TimePropagation { from, to, vehicle },
                    vec![(t_from, 1.0), (t_to, -1.0), (x, big_m)],
                    Sense::Le,
                    big_m - service,
                ));
            }
        }
    }

    // Time windows: ready <= t <= due at every customer, for every vehicle.
    for node in network.customer_ids() {
        let window = network.node(node).time_window();
        for vehicle in 0..num_vehicles {
            let t = model
                .arrival(node, vehicle)
                .expect("arrival variable exists for every customer");
            model.add_constraint(Constraint::new(
                ConstraintKind::TimeWindowLower { node, vehicle },
                vec![(t, 1.0)],
                Sense::Ge,
                window.ready(),
            ));
            model.add_constraint(Constraint::new(
                ConstraintKind::TimeWindowUpper { node, vehicle },
                vec![(t, 1.0)],
                Sense::Le,
                window.due(),
            ));
        }
    }

    debug!(
        variables = model.num_variables(),
        constraints = model.num_constraints(),
        big_m,
        "built VRPTW model"
    );
    model
}

/// Instance-derived big-M: the latest possible departure over all nodes.
///
/// Any feasible arrival satisfies `t[from] + service(from) - t[to] <= M`,
/// so the propagation row cannot cut off valid schedules while still
/// binding when the arc is selected.
fn big_m_for(network: &RoutingNetwork) -> f64 {
    network
        .nodes()
        .iter()
        .map(|n| n.time_window().due() + n.service_time())
        .fold(1.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Instance, Node, TimeWindow};

    fn scenario_a() -> (RoutingNetwork, Vec<Vehicle>) {
        let tw = TimeWindow::new(0.0, 1000.0).expect("valid");
        let instance = Instance::new(
            vec![Vehicle::new(0, 10.0)],
            Node::depot(0.0, 0.0, tw),
            vec![
                Node::customer(1, 1.0, 0.0, 5.0, 0.0, tw),
                Node::customer(2, 2.0, 0.0, 5.0, 0.0, tw),
            ],
        );
        let network = RoutingNetwork::from_instance(&instance);
        let vehicles = instance.vehicles().to_vec();
        (network, vehicles)
    }

    #[test]
    fn test_variable_and_constraint_counts() {
        let (network, vehicles) = scenario_a();
        let model = build_model(&network, &vehicles);
        // n=2 customers, v=1: arcs (n+1)^2 - n = 7, arrivals n+2 = 4.
        assert_eq!(model.num_variables(), 11);
        // visit-once 2, start 1, end 1, flow 2, capacity 1, propagation 7,
        // windows 4.
        assert_eq!(model.num_constraints(), 18);
    }

    #[test]
    fn test_excluded_arcs() {
        let (network, vehicles) = scenario_a();
        let model = build_model(&network, &vehicles);
        let aux = network.auxiliary_depot_id();
        assert!(model.arc(1, 1, 0).is_none()); // self-loop
        assert!(model.arc(1, 0, 0).is_none()); // into depot
        assert!(model.arc(aux, 1, 0).is_none()); // out of auxiliary depot
        assert!(model.arc(0, aux, 0).is_some()); // idle-vehicle arc
    }

    #[test]
    fn test_route_assignment_is_feasible() {
        let (network, vehicles) = scenario_a();
        let model = build_model(&network, &vehicles);
        let mut values = vec![0.0; model.num_variables()];
        // Route 0 -> 1 -> 2 -> aux with all arrivals at 0.
        for (from, to) in [(0, 1), (1, 2), (2, 3)] {
            let id = model.arc(from, to, 0).expect("arc exists");
            values[id.index()] = 1.0;
        }
        assert!(model.is_feasible(&values, 1e-6));
        assert!((model.objective().value(&values) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_capacity_row_cuts_overload() {
        let tw = TimeWindow::new(0.0, 1000.0).expect("valid");
        let instance = Instance::new(
            vec![Vehicle::new(0, 4.0)],
            Node::depot(0.0, 0.0, tw),
            vec![
                Node::customer(1, 1.0, 0.0, 5.0, 0.0, tw),
                Node::customer(2, 2.0, 0.0, 5.0, 0.0, tw),
            ],
        );
        let network = RoutingNetwork::from_instance(&instance);
        let model = build_model(&network, instance.vehicles());
        let mut values = vec![0.0; model.num_variables()];
        for (from, to) in [(0, 1), (1, 2), (2, 3)] {
            let id = model.arc(from, to, 0).expect("arc exists");
            values[id.index()] = 1.0;
        }
        let violated = model.violated_rows(&values, 1e-6);
        assert!(violated
            .iter()
            .any(|c| matches!(c.kind(), ConstraintKind::Capacity { vehicle: 0 })));
    }

    #[test]
    fn test_big_m_dominates_windows() {
        let tw = TimeWindow::new(50.0, 500.0).expect("valid");
        let depot_tw = TimeWindow::new(0.0, 800.0).expect("valid");
        let instance = Instance::new(
            vec![Vehicle::new(0, 10.0)],
            Node::depot(0.0, 0.0, depot_tw),
            vec![Node::customer(1, 1.0, 0.0, 5.0, 30.0, tw)],
        );
        let network = RoutingNetwork::from_instance(&instance);
        assert_eq!(big_m_for(&network), 800.0);
        let model = build_model(&network, instance.vehicles());
        // Unused arcs must leave timing unconstrained: the idle route
        // 0 -> aux with customer arrival pinned at its ready time is valid
        // except for the visit-once family.
        let mut values = vec![0.0; model.num_variables()];
        let idle = model.arc(0, 2, 0).expect("arc exists");
        values[idle.index()] = 1.0;
        let t1 = model.arrival(1, 0).expect("arrival exists");
        values[t1.index()] = 50.0;
        let violated = model.violated_rows(&values, 1e-6);
        assert!(violated
            .iter()
            .all(|c| matches!(c.kind(), ConstraintKind::VisitOnce { .. })));
    }
}
