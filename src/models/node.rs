//! Node and time window types.

/// The time interval during which service at a node may begin.
///
/// A vehicle must arrive no later than `due` and may arrive as early as
/// `ready` (waiting is allowed if early).
///
/// # Examples
///
/// ```
/// use vrptw_exact::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert!(tw.ready() <= tw.due());
/// assert!(tw.contains(150.0));
/// assert!(!tw.contains(250.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due` or either value is non-finite.
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || !due.is_finite() || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// Earliest allowable arrival time.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest allowable arrival time.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.ready && time <= self.due
    }
}

/// The role a node plays in the routing network.
///
/// The auxiliary depot is a duplicate of the depot placed at the end of the
/// node list so that a vehicle's return arc is structurally different from
/// its departure arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The departure depot (node 0).
    Depot,
    /// A customer that must be visited exactly once.
    Customer,
    /// The return depot (node `num_nodes - 1`), same coordinates as the depot.
    AuxiliaryDepot,
}

/// A node in the routing network: the depot, a customer, or the auxiliary
/// depot.
///
/// Node ids are positional: 0 is the depot, `1..=num_customers` are the
/// customers in input order, and `num_customers + 1` is the auxiliary depot.
///
/// # Examples
///
/// ```
/// use vrptw_exact::models::{Node, NodeKind, TimeWindow};
///
/// let tw = TimeWindow::new(0.0, 1000.0).unwrap();
/// let depot = Node::depot(35.0, 35.0, tw);
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.kind(), NodeKind::Depot);
///
/// let c = Node::customer(1, 41.0, 49.0, 10.0, 90.0, tw);
/// assert_eq!(c.demand(), 10.0);
/// assert!(c.is_customer());
/// ```
#[derive(Debug, Clone)]
pub struct Node {
    id: usize,
    kind: NodeKind,
    x: f64,
    y: f64,
    demand: f64,
    service_time: f64,
    time_window: TimeWindow,
}

impl Node {
    /// Creates a node with explicit id and kind.
    pub fn new(
        id: usize,
        kind: NodeKind,
        x: f64,
        y: f64,
        demand: f64,
        service_time: f64,
        time_window: TimeWindow,
    ) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            demand,
            service_time,
            time_window,
        }
    }

    /// Creates the depot node (id 0, no demand, no service).
    pub fn depot(x: f64, y: f64, time_window: TimeWindow) -> Self {
        Self::new(0, NodeKind::Depot, x, y, 0.0, 0.0, time_window)
    }

    /// Creates a customer node.
    pub fn customer(
        id: usize,
        x: f64,
        y: f64,
        demand: f64,
        service_time: f64,
        time_window: TimeWindow,
    ) -> Self {
        Self::new(id, NodeKind::Customer, x, y, demand, service_time, time_window)
    }

    /// Creates the auxiliary depot at the depot's coordinates.
    pub fn auxiliary_depot(id: usize, depot: &Node) -> Self {
        Self::new(
            id,
            NodeKind::AuxiliaryDepot,
            depot.x,
            depot.y,
            0.0,
            0.0,
            depot.time_window,
        )
    }

    /// Node id (position in the network's node list).
    pub fn id(&self) -> usize {
        self.id
    }

    /// The role of this node.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Demand at this node (zero for the depot and auxiliary depot).
    pub fn demand(&self) -> f64 {
        self.demand
    }

    /// Service duration at this node.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    /// The time window during which service may begin.
    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    /// Returns `true` if this node is a customer.
    pub fn is_customer(&self) -> bool {
        self.kind == NodeKind::Customer
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
