//! Crate-level error type.

use thiserror::Error;

use crate::extract::ExtractionError;
use crate::io::DataFormatError;
use crate::solver::SolverError;

/// Everything that can go wrong between loading an instance and reporting
/// its solution.
///
/// A non-optimal solver *status* is not an error: it is reported through
/// [`SolveReport`](crate::report::SolveReport). Extraction anomalies are
/// kept separate from solver failures because they indicate a modeling or
/// numeric-tolerance defect rather than a truly infeasible instance.
#[derive(Debug, Error)]
pub enum Error {
    /// The instance file violates the format contract.
    #[error(transparent)]
    DataFormat(#[from] DataFormatError),
    /// The instance contains no customer records.
    #[error("no customer records in instance")]
    EmptyInstance,
    /// The instance file could not be read.
    #[error("failed to read instance file: {0}")]
    Io(#[from] std::io::Error),
    /// A solver adapter failed.
    #[error(transparent)]
    Solver(#[from] SolverError),
    /// The arc assignment could not be walked into routes.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}
