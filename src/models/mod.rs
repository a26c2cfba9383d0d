//! Domain model types for the VRPTW formulation.
//!
//! Provides the core abstractions: nodes with demands and time windows
//! (depot, customers, auxiliary depot), vehicles with capacity, the parsed
//! problem instance, and routes as ordered sequences of visits.

mod instance;
mod node;
mod route;
mod vehicle;

pub use instance::Instance;
pub use node::{Node, NodeKind, TimeWindow};
pub use route::{Route, Visit};
pub use vehicle::Vehicle;
