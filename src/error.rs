use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::solver::SolveStatus;

/// Input table an invalid record came from, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Table {
    Routes,
    Capacities,
    Demands,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Routes => "Routes",
            Self::Capacities => "Capacities",
            Self::Demands => "Demands",
        };
        write!(f, "{s}")
    }
}

/// Errors raised while turning raw tabular records into a [`Network`].
///
/// Every variant pinpoints the offending record (table, row, field) so the
/// ingestion layer can report the exact cell that needs fixing. Rows are
/// counted from 1, matching how people read their spreadsheets.
///
/// [`Network`]: crate::domain::Network
// `Display` and `Error` are implemented by hand rather than derived with
// thiserror: the `DuplicateRoute` variant has a field named `source`, which
// thiserror would mandate be an error source (and `String` is not one).
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingField {
        table: Table,
        row: usize,
        field: &'static str,
    },

    InvalidNumber {
        table: Table,
        row: usize,
        field: &'static str,
        value: String,
    },

    NegativeValue {
        table: Table,
        row: usize,
        field: &'static str,
        value: f64,
    },

    DuplicateRoute { source: String, target: String },

    DuplicateNode { table: Table, node: String },

    AmbiguousRole { node: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { table, row, field } => {
                write!(f, "{table} row {row}: missing required field '{field}'")
            }
            Self::InvalidNumber {
                table,
                row,
                field,
                value,
            } => {
                write!(
                    f,
                    "{table} row {row}: field '{field}' is not a finite number: '{value}'"
                )
            }
            Self::NegativeValue {
                table,
                row,
                field,
                value,
            } => {
                write!(
                    f,
                    "{table} row {row}: field '{field}' must not be negative (got {value})"
                )
            }
            Self::DuplicateRoute { source, target } => {
                write!(
                    f,
                    "duplicate route from '{source}' to '{target}'; each (source, target) pair may appear only once"
                )
            }
            Self::DuplicateNode { table, node } => {
                write!(f, "{table}: node '{node}' is listed more than once")
            }
            Self::AmbiguousRole { node } => {
                write!(
                    f,
                    "node '{node}' appears in both the Capacities and Demands tables; its role is ambiguous"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Error raised when aggregating a solution that carries no flow assignment.
///
/// Calling [`aggregate`] on anything but an `Optimal` solution is caller
/// misuse; the status must be checked first.
///
/// [`aggregate`]: crate::report::aggregate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    #[error("cannot aggregate a solution with status '{status}'; only Optimal solutions carry a flow assignment")]
    NotOptimal { status: SolveStatus },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::MissingField {
            table: Table::Routes,
            row: 3,
            field: "source",
        };
        assert_eq!(err.to_string(), "Routes row 3: missing required field 'source'");

        let err = ValidationError::AmbiguousRole {
            node: "Depot".to_string(),
        };
        assert!(err.to_string().contains("Depot"));
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn test_aggregation_error_display() {
        let err = AggregationError::NotOptimal {
            status: SolveStatus::Infeasible,
        };
        assert!(err.to_string().contains("Infeasible"));
    }
}
