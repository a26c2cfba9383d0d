//! Vehicle type with capacity.

/// A vehicle in the fleet.
///
/// Every vehicle departs from the depot and returns to the auxiliary depot.
/// Solomon-style instances use a homogeneous fleet, so a vehicle carries only
/// an id and a load capacity.
///
/// # Examples
///
/// ```
/// use vrptw_exact::models::Vehicle;
///
/// let v = Vehicle::new(0, 200.0);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 200.0);
/// ```
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: usize,
    capacity: f64,
}

impl Vehicle {
    /// Creates a vehicle with the given id and capacity.
    pub fn new(id: usize, capacity: f64) -> Self {
        Self { id, capacity }
    }

    /// Vehicle id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }
}
