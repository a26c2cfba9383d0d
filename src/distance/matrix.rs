//! Dense distance matrix.

use crate::models::Node;

/// A dense n×n distance matrix stored in row-major order.
///
/// Built from node coordinates with Euclidean distance, so it is symmetric
/// with a zero diagonal by construction.
///
/// # Examples
///
/// ```
/// use vrptw_exact::models::{Node, TimeWindow};
/// use vrptw_exact::distance::DistanceMatrix;
///
/// let tw = TimeWindow::new(0.0, 1000.0).unwrap();
/// let nodes = vec![
///     Node::depot(0.0, 0.0, tw),
///     Node::customer(1, 3.0, 4.0, 10.0, 0.0, tw),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.get(0, 0), 0.0);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from node coordinates.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;
    use proptest::prelude::*;

    fn node(id: usize, x: f64, y: f64) -> Node {
        let tw = TimeWindow::new(0.0, 1000.0).expect("valid");
        Node::customer(id, x, y, 0.0, 0.0, tw)
    }

    #[test]
    fn test_euclidean_345() {
        let nodes = vec![node(0, 0.0, 0.0), node(1, 3.0, 4.0)];
        let dm = DistanceMatrix::from_nodes(&nodes);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(1, 0) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_diagonal() {
        let nodes = vec![node(0, 1.0, 2.0), node(1, 3.0, 4.0), node(2, -5.0, 0.5)];
        let dm = DistanceMatrix::from_nodes(&nodes);
        for i in 0..dm.size() {
            assert_eq!(dm.get(i, i), 0.0);
        }
    }

    proptest! {
        #[test]
        fn prop_symmetric_nonnegative(
            coords in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 1..16)
        ) {
            let nodes: Vec<Node> = coords
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| node(i, x, y))
                .collect();
            let dm = DistanceMatrix::from_nodes(&nodes);
            prop_assert!(dm.is_symmetric(1e-12));
            for i in 0..dm.size() {
                prop_assert_eq!(dm.get(i, i), 0.0);
                for j in 0..dm.size() {
                    prop_assert!(dm.get(i, j) >= 0.0);
                }
            }
        }
    }
}
