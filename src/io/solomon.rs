//! Solomon-format instance loading.
//!
//! The format is plain text and line-oriented: a section header containing
//! the token `VEHICLE` with `<num_vehicles> <capacity>` two lines below it,
//! then a section header containing `CUST NO.` followed by customer records
//! of exactly 7 whitespace-separated fields:
//! `id x y demand ready_time due_date service_time`. The first record is
//! the depot.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::error::Error;
use crate::models::{Instance, Node, TimeWindow, Vehicle};

const RECORD_FIELDS: usize = 7;

/// Violations of the instance-file contract. Fatal for the instance.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataFormatError {
    /// No line containing the `VEHICLE` token.
    #[error("vehicle section not found in the input file")]
    MissingVehicleSection,
    /// The file ends before the vehicle-count line.
    #[error("vehicle section is truncated")]
    TruncatedVehicleSection,
    /// No line containing the `CUST NO.` token.
    #[error("customer section not found in the input file")]
    MissingCustomerSection,
    /// A data row without exactly 7 whitespace-separated fields.
    #[error("line {line}: expected 7 fields, found {found}")]
    FieldCount {
        /// 1-based line number.
        line: usize,
        /// Number of fields found.
        found: usize,
    },
    /// A field that does not parse as the expected number.
    #[error("line {line}: malformed {field} field")]
    InvalidField {
        /// 1-based line number.
        line: usize,
        /// Name of the offending field.
        field: &'static str,
    },
    /// A record whose ready time exceeds its due date.
    #[error("line {line}: ready time exceeds due date")]
    InvalidTimeWindow {
        /// 1-based line number.
        line: usize,
    },
    /// A record with a negative demand.
    #[error("line {line}: negative demand")]
    NegativeDemand {
        /// 1-based line number.
        line: usize,
    },
    /// The vehicle section declares an empty fleet.
    #[error("instance declares zero vehicles")]
    ZeroVehicles,
}

/// Reads and parses a Solomon-format instance file.
pub fn read_instance<P: AsRef<Path>>(path: P) -> Result<Instance, Error> {
    let text = std::fs::read_to_string(path)?;
    parse_instance(&text)
}

/// Parses a Solomon-format instance from text.
///
/// Validation happens here, before any model construction: section markers
/// must be present, every non-blank record row must have exactly 7 numeric
/// fields, time windows must satisfy `ready <= due`, and at least one
/// customer must remain after the depot record.
///
/// # Examples
///
/// ```
/// use vrptw_exact::io::solomon::parse_instance;
///
/// let text = "\
/// VEHICLE
/// NUMBER     CAPACITY
///   2          50
///
/// CUST NO.  XCOORD.  YCOORD.  DEMAND  READY TIME  DUE DATE  SERVICE TIME
///
///     0        0        0        0        0         100          0
///     1        1        0       10        0         100          5
/// ";
/// let instance = parse_instance(text).unwrap();
/// assert_eq!(instance.num_vehicles(), 2);
/// assert_eq!(instance.num_customers(), 1);
/// ```
pub fn parse_instance(text: &str) -> Result<Instance, Error> {
    let lines: Vec<&str> = text.lines().collect();

    let vehicle_header = lines
        .iter()
        .position(|l| l.contains("VEHICLE"))
        .ok_or(DataFormatError::MissingVehicleSection)?;
    let vehicle_line = vehicle_header + 2;
    let fleet = lines
        .get(vehicle_line)
        .ok_or(DataFormatError::TruncatedVehicleSection)?;
    let mut fields = fleet.split_whitespace();
    let num_vehicles: usize = fields
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or(DataFormatError::InvalidField {
            line: vehicle_line + 1,
            field: "vehicle count",
        })?;
    let capacity: f64 = parse_field(fields.next(), vehicle_line + 1, "vehicle capacity")?;
    if num_vehicles == 0 {
        return Err(DataFormatError::ZeroVehicles.into());
    }

    let customer_header = lines
        .iter()
        .position(|l| l.contains("CUST NO."))
        .ok_or(DataFormatError::MissingCustomerSection)?;

    let mut nodes: Vec<Node> = Vec::new();
    for (offset, raw) in lines[customer_header + 1..].iter().enumerate() {
        let line = customer_header + offset + 2; // 1-based
        if raw.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = raw.split_whitespace().collect();
        if fields.len() != RECORD_FIELDS {
            return Err(DataFormatError::FieldCount {
                line,
                found: fields.len(),
            }
            .into());
        }
        nodes.push(parse_record(&fields, line, nodes.len())?);
    }

    let mut records = nodes.into_iter();
    let depot = records.next().ok_or(Error::EmptyInstance)?;
    let customers: Vec<Node> = records.collect();
    if customers.is_empty() {
        return Err(Error::EmptyInstance);
    }

    let vehicles = (0..num_vehicles)
        .map(|k| Vehicle::new(k, capacity))
        .collect();
    debug!(
        vehicles = num_vehicles,
        capacity,
        customers = customers.len(),
        "parsed instance"
    );
    Ok(Instance::new(vehicles, depot, customers))
}

/// Parses one 7-field record. The record at position 0 is the depot; the
/// file's own id column is ignored in favor of positional ids so the node
/// list lines up with the distance matrix.
fn parse_record(
    fields: &[&str],
    line: usize,
    position: usize,
) -> Result<Node, DataFormatError> {
    let x = parse_field(fields.get(1).copied(), line, "x coordinate")?;
    let y = parse_field(fields.get(2).copied(), line, "y coordinate")?;
    let demand: f64 = parse_field(fields.get(3).copied(), line, "demand")?;
    let ready: f64 = parse_field(fields.get(4).copied(), line, "ready time")?;
    let due: f64 = parse_field(fields.get(5).copied(), line, "due date")?;
    let service: f64 = parse_field(fields.get(6).copied(), line, "service time")?;

    if demand < 0.0 {
        return Err(DataFormatError::NegativeDemand { line });
    }
    let window =
        TimeWindow::new(ready, due).ok_or(DataFormatError::InvalidTimeWindow { line })?;

    Ok(if position == 0 {
        Node::depot(x, y, window)
    } else {
        Node::customer(position, x, y, demand, service, window)
    })
}

fn parse_field(
    field: Option<&str>,
    line: usize,
    name: &'static str,
) -> Result<f64, DataFormatError> {
    field
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or(DataFormatError::InvalidField { line, field: name })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "\
C101

VEHICLE
NUMBER     CAPACITY
  3          200

CUSTOMER
CUST NO.  XCOORD.  YCOORD.  DEMAND   READY TIME  DUE DATE  SERVICE TIME

    0       40       50        0         0        1236         0
    1       45       68       10         0        1127        90
    2       45       70       30       825         870        90
";

    #[test]
    fn test_parse_valid_instance() {
        let instance = parse_instance(VALID).expect("parses");
        assert_eq!(instance.num_vehicles(), 3);
        assert_eq!(instance.num_customers(), 2);
        assert_eq!(instance.vehicles()[0].capacity(), 200.0);
        let depot = instance.depot();
        assert_eq!((depot.x(), depot.y()), (40.0, 50.0));
        let c2 = &instance.customers()[1];
        assert_eq!(c2.id(), 2);
        assert_eq!(c2.demand(), 30.0);
        assert_eq!(c2.time_window().ready(), 825.0);
        assert_eq!(c2.service_time(), 90.0);
    }

    #[test]
    fn test_missing_vehicle_section() {
        let err = parse_instance("CUST NO.\n0 0 0 0 0 1 0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::DataFormat(DataFormatError::MissingVehicleSection)
        ));
    }

    #[test]
    fn test_truncated_vehicle_section() {
        let err = parse_instance("VEHICLE\nNUMBER CAPACITY\n").unwrap_err();
        assert!(matches!(
            err,
            Error::DataFormat(DataFormatError::TruncatedVehicleSection)
        ));
    }

    #[test]
    fn test_missing_customer_section() {
        let err = parse_instance("VEHICLE\nNUMBER CAPACITY\n2 100\n").unwrap_err();
        assert!(matches!(
            err,
            Error::DataFormat(DataFormatError::MissingCustomerSection)
        ));
    }

    #[test]
    fn test_wrong_field_count() {
        let text = "VEHICLE\n_\n1 100\nCUST NO.\n0 0 0 0 0 1\n";
        let err = parse_instance(text).unwrap_err();
        assert!(matches!(
            err,
            Error::DataFormat(DataFormatError::FieldCount { found: 6, .. })
        ));
    }

    #[test]
    fn test_malformed_demand() {
        let text = "VEHICLE\n_\n1 100\nCUST NO.\n0 0 0 zero 0 1 0\n";
        let err = parse_instance(text).unwrap_err();
        assert!(matches!(
            err,
            Error::DataFormat(DataFormatError::InvalidField {
                field: "demand",
                ..
            })
        ));
    }

    #[test]
    fn test_inverted_time_window_rejected() {
        // Scenario D: ready > due must be caught by the loader, before any
        // model construction.
        let text = "VEHICLE\n_\n1 100\nCUST NO.\n0 0 0 0 0 100 0\n1 1 0 5 50 20 0\n";
        let err = parse_instance(text).unwrap_err();
        assert!(matches!(
            err,
            Error::DataFormat(DataFormatError::InvalidTimeWindow { line: 6 })
        ));
    }

    #[test]
    fn test_negative_demand_rejected() {
        let text = "VEHICLE\n_\n1 100\nCUST NO.\n0 0 0 0 0 100 0\n1 1 0 -5 0 20 0\n";
        let err = parse_instance(text).unwrap_err();
        assert!(matches!(
            err,
            Error::DataFormat(DataFormatError::NegativeDemand { .. })
        ));
    }

    #[test]
    fn test_zero_vehicles_rejected() {
        let text = "VEHICLE\n_\n0 100\nCUST NO.\n0 0 0 0 0 100 0\n1 1 0 5 0 20 0\n";
        let err = parse_instance(text).unwrap_err();
        assert!(matches!(
            err,
            Error::DataFormat(DataFormatError::ZeroVehicles)
        ));
    }

    #[test]
    fn test_depot_only_is_empty() {
        let text = "VEHICLE\n_\n1 100\nCUST NO.\n0 0 0 0 0 100 0\n";
        let err = parse_instance(text).unwrap_err();
        assert!(matches!(err, Error::EmptyInstance));
    }

    #[test]
    fn test_no_records_is_empty() {
        let text = "VEHICLE\n_\n1 100\nCUST NO.\n";
        let err = parse_instance(text).unwrap_err();
        assert!(matches!(err, Error::EmptyInstance));
    }
}
