//! Parsed problem instance.

use super::{Node, Vehicle};

/// An immutable VRPTW instance: a fleet of vehicles plus the depot and
/// customer records parsed from an instance file.
///
/// Node ids are positional: the depot is node 0, customers are nodes
/// `1..=num_customers` in input order. The auxiliary depot does not exist
/// at this stage; it is appended by
/// [`RoutingNetwork::from_instance`](crate::network::RoutingNetwork::from_instance).
///
/// # Examples
///
/// ```
/// use vrptw_exact::models::{Instance, Node, TimeWindow, Vehicle};
///
/// let tw = TimeWindow::new(0.0, 1000.0).unwrap();
/// let instance = Instance::new(
///     vec![Vehicle::new(0, 100.0)],
///     Node::depot(0.0, 0.0, tw),
///     vec![Node::customer(1, 1.0, 0.0, 5.0, 0.0, tw)],
/// );
/// assert_eq!(instance.num_customers(), 1);
/// assert_eq!(instance.num_vehicles(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    vehicles: Vec<Vehicle>,
    nodes: Vec<Node>,
}

impl Instance {
    /// Creates an instance from a fleet, the depot record, and customer
    /// records in input order.
    ///
    /// Customer ids must already be positional (1, 2, ...); the Solomon
    /// loader and the test helpers both construct them that way.
    pub fn new(vehicles: Vec<Vehicle>, depot: Node, customers: Vec<Node>) -> Self {
        debug_assert!(depot.id() == 0);
        debug_assert!(customers.iter().enumerate().all(|(i, c)| c.id() == i + 1));
        let mut nodes = Vec::with_capacity(customers.len() + 1);
        nodes.push(depot);
        nodes.extend(customers);
        Self { vehicles, nodes }
    }

    /// The fleet.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Depot plus customers (depot first).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The depot record.
    pub fn depot(&self) -> &Node {
        &self.nodes[0]
    }

    /// Customer records in input order.
    pub fn customers(&self) -> &[Node] {
        &self.nodes[1..]
    }

    /// Number of customers (excluding the depot).
    pub fn num_customers(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Number of vehicles in the fleet.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }
}
