//! The optimization engine: one [`Network`] in, one [`Solution`] out.
//!
//! Solving is a single deterministic, synchronous attempt with no shared
//! state between invocations. Infeasibility is a normal outcome reported
//! through the status, never an error; numeric failures inside the solver
//! surface as [`SolveStatus::Error`], distinct from genuine infeasibility.

mod lp;

use good_lp::ResolutionError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{ArcFlow, Network};

/// Outcome of a solve attempt. Callers must branch on this before reading
/// the objective or the flow assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// A finite minimum was found; objective and flows are populated.
    Optimal,
    /// No flow assignment satisfies all constraints.
    Infeasible,
    /// Cannot arise with non-negative costs and lower-bounded flows, but
    /// reported rather than swallowed if the backend ever claims it.
    Unbounded,
    /// The numerical backend failed for reasons other than infeasibility.
    Error(String),
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Optimal => write!(f, "Optimal"),
            Self::Infeasible => write!(f, "Infeasible"),
            Self::Unbounded => write!(f, "Unbounded"),
            Self::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}

/// Immutable result of one solve invocation.
///
/// The flow assignment is present only for `Optimal` solutions and is
/// ordered like [`Network::arcs`] of the network it was solved against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    status: SolveStatus,
    objective: Option<f64>,
    flows: Vec<ArcFlow>,
}

impl Solution {
    fn optimal(objective: f64, flows: Vec<ArcFlow>) -> Self {
        Self {
            status: SolveStatus::Optimal,
            objective: Some(objective),
            flows,
        }
    }

    fn with_status(status: SolveStatus) -> Self {
        Self {
            status,
            objective: None,
            flows: Vec::new(),
        }
    }

    pub fn status(&self) -> &SolveStatus {
        &self.status
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Total cost of the optimal plan; `None` unless the status is `Optimal`.
    pub fn objective(&self) -> Option<f64> {
        self.objective
    }

    /// Per-arc flows; empty unless the status is `Optimal`.
    pub fn flows(&self) -> &[ArcFlow] {
        &self.flows
    }

    /// Flow on one route, if the solution assigned any.
    pub fn flow(&self, source: &str, target: &str) -> Option<f64> {
        self.flows
            .iter()
            .find(|f| f.source == source && f.target == target)
            .map(|f| f.flow)
    }
}

/// Solve the min-cost flow problem for a validated network.
///
/// Never fails for a structurally valid [`Network`]: every outcome,
/// including backend failures, is reported through [`SolveStatus`].
pub fn solve(network: &Network) -> Solution {
    // Degenerate but legal input: nothing to route. Optimal at zero cost
    // unless someone still demands goods that cannot arrive.
    if network.arcs().is_empty() {
        return if network.demand_nodes().values().any(|&d| d > 0.0) {
            info!("no routes defined but positive demand declared; infeasible");
            Solution::with_status(SolveStatus::Infeasible)
        } else {
            Solution::optimal(0.0, Vec::new())
        };
    }

    // A destination no route reaches can never meet a positive demand; skip
    // the LP rather than hand the backend a constraint without variables.
    for (node, &demand) in network.demand_nodes() {
        if demand > 0.0 && !network.arcs().iter().any(|a| a.target == *node) {
            info!(node = node.as_str(), demand, "demand node has no inbound route; infeasible");
            return Solution::with_status(SolveStatus::Infeasible);
        }
    }

    match lp::solve_lp(network) {
        Ok((objective, values)) => {
            let flows = network
                .arcs()
                .iter()
                .zip(values)
                .map(|(arc, flow)| ArcFlow {
                    source: arc.source.clone(),
                    target: arc.target.clone(),
                    flow,
                })
                .collect();
            info!(objective, arcs = network.arcs().len(), "solved to optimality");
            Solution::optimal(objective, flows)
        }
        Err(ResolutionError::Infeasible) => {
            info!("no feasible flow assignment exists");
            Solution::with_status(SolveStatus::Infeasible)
        }
        Err(ResolutionError::Unbounded) => {
            warn!("solver reported an unbounded program");
            Solution::with_status(SolveStatus::Unbounded)
        }
        Err(err) => {
            warn!(error = %err, "solver backend failed");
            Solution::with_status(SolveStatus::Error(err.to_string()))
        }
    }
}
