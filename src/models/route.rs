//! Route and visit types.

use serde::Serialize;

/// A single customer visit within a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    /// Customer node id being visited.
    pub customer_id: usize,
    /// Arrival time at this customer, as assigned by the solver.
    pub arrival_time: f64,
}

/// An ordered sequence of customer visits assigned to a single vehicle.
///
/// A route starts at the depot and ends at the auxiliary depot; neither is
/// stored in `visits`.
///
/// # Examples
///
/// ```
/// use vrptw_exact::models::{Route, Visit};
///
/// let mut route = Route::new(0);
/// route.push_visit(Visit { customer_id: 1, arrival_time: 10.0 });
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.vehicle_id(), 0);
/// assert_eq!(route.customer_ids(), vec![1]);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    vehicle_id: usize,
    visits: Vec<Visit>,
    total_distance: f64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            visits: Vec::new(),
            total_distance: 0.0,
        }
    }

    /// Appends a visit to the end of this route.
    pub fn push_visit(&mut self, visit: Visit) {
        self.visits.push(visit);
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the ordered sequence of visits.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Returns the number of customer visits (excluding depots).
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` if this route visits no customers.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Returns the customer node ids in visit order.
    pub fn customer_ids(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.customer_id).collect()
    }

    /// Total distance of this route, including the depot departure and the
    /// auxiliary-depot return arc.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Sets the total distance (used by the route extractor).
    pub fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }
}
