//! Pure projection of an optimal solution into reporting structures.
//!
//! Nothing here optimizes or mutates; the aggregator reads a solved plan and
//! derives the shipment table, KPI scalars and per-node totals that the
//! reporting/visualization layer renders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Network;
use crate::error::AggregationError;
use crate::solver::Solution;

/// Flow below this threshold is solver noise, not an active route. Applied
/// to reporting only; the optimization itself never uses it.
pub const DEFAULT_ACTIVE_FLOW_EPSILON: f64 = 1e-9;

/// One active route of the optimized shipment plan.
///
/// Serializes with the export table's column names, so a reporting
/// collaborator can feed these rows straight into a delimited-text writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Target")]
    pub target: String,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "Unit Cost")]
    pub unit_cost: f64,
    #[serde(rename = "Total Cost")]
    pub line_cost: f64,
}

/// Summary of an optimal transportation plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Active routes with their shipped quantity and line cost.
    pub shipments: Vec<Shipment>,
    /// Objective value of the solution.
    pub total_cost: f64,
    /// Sum of flow over all active routes.
    pub total_flow: f64,
    /// Routes actually carrying flow.
    pub active_arcs: usize,
    /// Routes defined in the network.
    pub total_arcs: usize,
    /// Total cost over total flow; zero when nothing moves.
    pub average_unit_cost: f64,
    /// Total quantity leaving each sender.
    pub outflow_by_source: BTreeMap<String, f64>,
    /// Total quantity arriving at each receiver.
    pub inflow_by_target: BTreeMap<String, f64>,
}

/// Aggregate an optimal solution with the default activity epsilon.
pub fn aggregate(solution: &Solution, network: &Network) -> Result<Report, AggregationError> {
    aggregate_with_epsilon(solution, network, DEFAULT_ACTIVE_FLOW_EPSILON)
}

/// Aggregate an optimal solution, treating flow <= `epsilon` as inactive.
///
/// Fails only when the solution is not `Optimal`; that is a caller bug, not
/// a data condition.
pub fn aggregate_with_epsilon(
    solution: &Solution,
    network: &Network,
    epsilon: f64,
) -> Result<Report, AggregationError> {
    if !solution.is_optimal() {
        return Err(AggregationError::NotOptimal {
            status: solution.status().clone(),
        });
    }

    let total_cost = solution.objective().unwrap_or(0.0);
    let mut shipments = Vec::new();
    let mut total_flow = 0.0;
    let mut outflow_by_source: BTreeMap<String, f64> = BTreeMap::new();
    let mut inflow_by_target: BTreeMap<String, f64> = BTreeMap::new();

    // Flows are ordered like the network's arcs; see Solution::flows.
    for (arc, assigned) in network.arcs().iter().zip(solution.flows()) {
        debug_assert_eq!(arc.source, assigned.source);
        debug_assert_eq!(arc.target, assigned.target);

        if assigned.flow <= epsilon {
            continue;
        }

        shipments.push(Shipment {
            source: arc.source.clone(),
            target: arc.target.clone(),
            quantity: assigned.flow,
            unit_cost: arc.cost,
            line_cost: assigned.flow * arc.cost,
        });
        total_flow += assigned.flow;
        *outflow_by_source.entry(arc.source.clone()).or_insert(0.0) += assigned.flow;
        *inflow_by_target.entry(arc.target.clone()).or_insert(0.0) += assigned.flow;
    }

    let average_unit_cost = if total_flow > 0.0 {
        total_cost / total_flow
    } else {
        0.0
    };

    Ok(Report {
        active_arcs: shipments.len(),
        total_arcs: network.arcs().len(),
        shipments,
        total_cost,
        total_flow,
        average_unit_cost,
        outflow_by_source,
        inflow_by_target,
    })
}
