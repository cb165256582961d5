use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Structural role of a node, derived from table membership and never
/// declared by the caller: listed in Capacities -> `Supply`, listed in
/// Demands -> `Demand`, appearing only as a route endpoint -> `Transshipment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    Supply,
    Demand,
    Transshipment,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Supply => "Supply",
            Self::Demand => "Demand",
            Self::Transshipment => "Transshipment",
        };
        write!(f, "{s}")
    }
}

/// Directed route between two nodes with a unit transport cost.
///
/// Identity is the `(source, target)` pair. `capacity` is the upper bound on
/// flow over this route; `None` means unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub source: String,
    pub target: String,
    pub cost: f64,
    pub capacity: Option<f64>,
}

impl Arc {
    /// Whether a given flow value fits under this arc's capacity, if any.
    pub fn admits(&self, flow: f64) -> bool {
        match self.capacity {
            Some(cap) => flow <= cap,
            None => true,
        }
    }
}

/// Flow assigned to one arc by the solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcFlow {
    pub source: String,
    pub target: String,
    pub flow: f64,
}

/// Canonical, validated flow network.
///
/// Built once by [`build_network`](crate::builder::build_network) and treated
/// as immutable from then on: the solver takes it by shared reference and
/// never mutates it. Supply/demand tables and the transshipment set are
/// `BTree`-backed so iteration order (and with it constraint order and the
/// reported flow order) is deterministic across solves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    arcs: Vec<Arc>,
    supply: BTreeMap<String, f64>,
    demand: BTreeMap<String, f64>,
    transshipment: BTreeSet<String>,
}

impl Network {
    pub(crate) fn new(
        arcs: Vec<Arc>,
        supply: BTreeMap<String, f64>,
        demand: BTreeMap<String, f64>,
        transshipment: BTreeSet<String>,
    ) -> Self {
        Self {
            arcs,
            supply,
            demand,
            transshipment,
        }
    }

    /// All arcs, in the order the routes table declared them.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Supply nodes with their declared capacities.
    pub fn supply_nodes(&self) -> &BTreeMap<String, f64> {
        &self.supply
    }

    /// Demand nodes with their declared minimum required inflow.
    pub fn demand_nodes(&self) -> &BTreeMap<String, f64> {
        &self.demand
    }

    /// Nodes that appear only as route endpoints; they must balance inflow
    /// and outflow exactly.
    pub fn transshipment_nodes(&self) -> &BTreeSet<String> {
        &self.transshipment
    }

    /// Role of a named node, or `None` if the node is unknown to the network.
    pub fn role(&self, name: &str) -> Option<NodeRole> {
        if self.supply.contains_key(name) {
            Some(NodeRole::Supply)
        } else if self.demand.contains_key(name) {
            Some(NodeRole::Demand)
        } else if self.transshipment.contains(name) {
            Some(NodeRole::Transshipment)
        } else {
            None
        }
    }

    pub fn node_count(&self) -> usize {
        self.supply.len() + self.demand.len() + self.transshipment.len()
    }

    /// Sum of all declared supply capacities.
    pub fn total_supply(&self) -> f64 {
        self.supply.values().sum()
    }

    /// Sum of all declared demands.
    pub fn total_demand(&self) -> f64 {
        self.demand.values().sum()
    }
}
