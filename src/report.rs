//! Solution diagnostics.

use std::fmt;

use serde::Serialize;

use crate::models::Route;
use crate::solver::SolveStatus;

/// The result of a full solve: status, per-vehicle routes, and total cost.
///
/// `Display` renders the human-readable diagnostics; the type also
/// serializes for machine-readable output.
///
/// # Examples
///
/// ```
/// use vrptw_exact::report::SolveReport;
/// use vrptw_exact::solver::SolveStatus;
///
/// let report = SolveReport::no_solution(SolveStatus::Infeasible);
/// assert!(!report.is_feasible());
/// assert_eq!(report.to_string(), "no feasible solution (infeasible)\n");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    status: SolveStatus,
    routes: Vec<Route>,
    total_distance: Option<f64>,
}

impl SolveReport {
    /// A report for an optimal solve.
    pub fn optimal(routes: Vec<Route>, total_distance: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            routes,
            total_distance: Some(total_distance),
        }
    }

    /// A report for a solve that produced no solution.
    pub fn no_solution(status: SolveStatus) -> Self {
        Self {
            status,
            routes: Vec::new(),
            total_distance: None,
        }
    }

    /// The solver's status classification.
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Per-vehicle routes (empty unless the status is optimal).
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Total distance traveled, when a solution exists.
    pub fn total_distance(&self) -> Option<f64> {
        self.total_distance
    }

    /// Returns `true` if a solution was found.
    pub fn is_feasible(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total_distance {
            Some(total) => {
                writeln!(f, "optimal solution found, total distance {total:.2}")?;
                for route in &self.routes {
                    if route.is_empty() {
                        writeln!(f, "vehicle {}: idle", route.vehicle_id())?;
                        continue;
                    }
                    let stops: Vec<String> = route
                        .visits()
                        .iter()
                        .map(|v| v.customer_id.to_string())
                        .collect();
                    writeln!(
                        f,
                        "vehicle {}: depot -> {} -> depot (distance {:.2})",
                        route.vehicle_id(),
                        stops.join(" -> "),
                        route.total_distance(),
                    )?;
                }
                Ok(())
            }
            None => writeln!(f, "no feasible solution ({})", self.status),
        }
    }
}
