//! routeflow - minimum-cost transportation network flow engine.
//!
//! Takes a tabular description of routes, supply capacities and demands,
//! validates it into a canonical flow network, solves the resulting linear
//! program to optimality (or proves infeasibility) and projects the result
//! into auditable reporting structures. Ingestion (sheets, files) and
//! presentation (charts, CSV export) are external collaborators; this crate
//! is the stateless computation between them.
//!
//! The pipeline is three calls:
//!
//! ```
//! use routeflow::{aggregate, build_network, solve};
//! use routeflow::{CapacityRecord, DemandRecord, RouteRecord};
//!
//! let routes = vec![
//!     RouteRecord::new("Factory A", "Branch 1", "2"),
//!     RouteRecord::new("Factory B", "Branch 1", "3"),
//! ];
//! let capacities = vec![
//!     CapacityRecord::new("Factory A", "100"),
//!     CapacityRecord::new("Factory B", "50"),
//! ];
//! let demands = vec![DemandRecord::new("Branch 1", "120")];
//!
//! let network = build_network(&routes, &capacities, &demands)?;
//! let solution = solve(&network);
//! assert!(solution.is_optimal());
//!
//! let report = aggregate(&solution, &network)?;
//! assert_eq!(report.active_arcs, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod domain;
pub mod error;
pub mod report;
pub mod solver;

pub use builder::build_network;
pub use domain::{Arc, ArcFlow, CapacityRecord, DemandRecord, Network, NodeRole, RouteRecord};
pub use error::{AggregationError, Table, ValidationError};
pub use report::{
    aggregate, aggregate_with_epsilon, Report, Shipment, DEFAULT_ACTIVE_FLOW_EPSILON,
};
pub use solver::{solve, Solution, SolveStatus};
