use serde::{Deserialize, Serialize};

/// One row of the routes table, exactly as the ingestion layer hands it over.
///
/// Cells are kept as optional strings on purpose: spreadsheet rows are
/// stringly typed, and all parsing/validation happens in one place, the
/// [builder](crate::builder::build_network). A `None` or blank cell counts as
/// missing, except for `capacity` where it means the route is unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    #[serde(alias = "Source")]
    pub source: Option<String>,
    #[serde(alias = "Target")]
    pub target: Option<String>,
    #[serde(alias = "Cost")]
    pub cost: Option<String>,
    #[serde(alias = "Route_Capacity")]
    pub capacity: Option<String>,
}

impl RouteRecord {
    pub fn new(source: &str, target: &str, cost: &str) -> Self {
        Self {
            source: Some(source.to_string()),
            target: Some(target.to_string()),
            cost: Some(cost.to_string()),
            capacity: None,
        }
    }

    pub fn with_capacity(mut self, capacity: &str) -> Self {
        self.capacity = Some(capacity.to_string());
        self
    }
}

/// One row of the capacities table: a supply point and its production limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityRecord {
    #[serde(alias = "Node")]
    pub node: Option<String>,
    #[serde(alias = "Capacity")]
    pub capacity: Option<String>,
}

impl CapacityRecord {
    pub fn new(node: &str, capacity: &str) -> Self {
        Self {
            node: Some(node.to_string()),
            capacity: Some(capacity.to_string()),
        }
    }
}

/// One row of the demands table: a destination and its required quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandRecord {
    #[serde(alias = "Node")]
    pub node: Option<String>,
    #[serde(alias = "Demand")]
    pub demand: Option<String>,
}

impl DemandRecord {
    pub fn new(node: &str, demand: &str) -> Self {
        Self {
            node: Some(node.to_string()),
            demand: Some(demand.to_string()),
        }
    }
}
