//! Routing network: node set and distance geometry.

use crate::distance::DistanceMatrix;
use crate::models::{Instance, Node};

/// The geometric side of the formulation: the full node set (depot,
/// customers, auxiliary depot) and the symmetric Euclidean distance matrix
/// over it.
///
/// Node 0 and node `num_nodes - 1` both carry the depot coordinates but are
/// distinct nodes, so `num_nodes == num_customers + 2`.
///
/// # Examples
///
/// ```
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
/// assert_eq!(network.num_nodes(), 3);
/// assert_eq!(network.auxiliary_depot_id(), 2);
/// assert_eq!(network.distance(0, 2), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct RoutingNetwork {
    nodes: Vec<Node>,
    distances: DistanceMatrix,
}

impl RoutingNetwork {
    /// Builds the network from a parsed instance, appending the auxiliary
    /// depot after the last customer.
    pub fn from_instance(instance: &Instance) -> Self {
        let mut nodes = instance.nodes().to_vec();
        let aux = Node::auxiliary_depot(nodes.len(), instance.depot());
        nodes.push(aux);
        let distances = DistanceMatrix::from_nodes(&nodes);
        Self { nodes, distances }
    }

    /// All nodes: depot, customers in input order, auxiliary depot.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id is out of bounds.
    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    /// The distance matrix over all nodes.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Distance between two nodes.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Total number of nodes (`num_customers + 2`).
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of customer nodes.
    pub fn num_customers(&self) -> usize {
        self.nodes.len() - 2
    }

    /// The depot node id (always 0).
    pub fn depot_id(&self) -> usize {
        0
    }

    /// The auxiliary depot node id (always `num_nodes - 1`).
    pub fn auxiliary_depot_id(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Customer node ids, ascending.
    pub fn customer_ids(&self) -> std::ops::Range<usize> {
        1..self.auxiliary_depot_id()
    }
}
