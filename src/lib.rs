//! # vrptw-exact
//!
//! Exact formulation of the capacitated Vehicle Routing Problem with Time
//! Windows (VRPTW): generates a declarative MILP (arc selection, timing,
//! capacity, flow conservation, big-M time coupling) over a depot /
//! customers / auxiliary-depot node set, hands it to a pluggable solver
//! adapter, and deterministically reconstructs per-vehicle routes from the
//! returned arc assignment.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Node, TimeWindow, Vehicle, Instance, Route)
//! - [`distance`] — Symmetric Euclidean distance matrix
//! - [`network`] — Node set with the duplicated auxiliary depot
//! - [`milp`] — Model IR (variables, sparse rows, objective) and the builder
//! - [`solver`] — The opaque solve seam and an exhaustive reference adapter
//! - [`extract`] — Depot-to-auxiliary-depot route walks with anomaly checks
//! - [`report`] — Human- and machine-readable solution diagnostics
//! - [`io`] — Solomon-format instance loading
//! - [`pipeline`] — Wiring of the stages, load to report

pub mod distance;
pub mod error;
pub mod extract;
pub mod io;
pub mod milp;
pub mod models;
pub mod network;
pub mod pipeline;
pub mod report;
pub mod solver;

pub use error::Error;
