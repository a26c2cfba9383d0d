//! Distance matrix over the routing network.

mod matrix;

pub use matrix::DistanceMatrix;
