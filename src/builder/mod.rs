//! Boundary between stringly-typed tabular input and the typed network model.
//!
//! Everything spreadsheet-shaped is dealt with here: cell trimming, numeric
//! parsing, duplicate detection and role classification. Past this point the
//! rest of the engine only ever sees a validated [`Network`].

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use tracing::debug;

use crate::domain::{Arc, CapacityRecord, DemandRecord, Network, RouteRecord};
use crate::error::{Table, ValidationError};

/// Validate raw route/capacity/demand records and assemble a [`Network`].
///
/// Node names are trimmed before any comparison; matching is case-sensitive
/// after trimming. A blank route capacity means the route is unbounded,
/// never zero. Node roles are purely set-derived: a node listed under
/// Capacities is a supply point, one listed under Demands is a destination,
/// and any other route endpoint is a transshipment point.
///
/// A supply/demand imbalance is *not* rejected here; whether the demands can
/// actually be met is the solver's feasibility verdict.
pub fn build_network(
    routes: &[RouteRecord],
    capacities: &[CapacityRecord],
    demands: &[DemandRecord],
) -> Result<Network, ValidationError> {
    let arcs = parse_routes(routes)?;

    if let Some((source, target)) = arcs
        .iter()
        .map(|a| (a.source.as_str(), a.target.as_str()))
        .duplicates()
        .next()
    {
        return Err(ValidationError::DuplicateRoute {
            source: source.to_string(),
            target: target.to_string(),
        });
    }

    let supply = parse_node_table(
        capacities.iter().map(|r| (&r.node, &r.capacity)),
        Table::Capacities,
        "capacity",
    )?;
    let demand = parse_node_table(
        demands.iter().map(|r| (&r.node, &r.demand)),
        Table::Demands,
        "demand",
    )?;

    if let Some(node) = supply.keys().find(|node| demand.contains_key(*node)) {
        return Err(ValidationError::AmbiguousRole { node: node.clone() });
    }

    // Endpoints declared in neither table move goods through without
    // producing or consuming any.
    let transshipment: BTreeSet<String> = arcs
        .iter()
        .flat_map(|a| [a.source.as_str(), a.target.as_str()])
        .filter(|name| !supply.contains_key(*name) && !demand.contains_key(*name))
        .map(str::to_string)
        .collect();

    debug!(
        routes = arcs.len(),
        supply_nodes = supply.len(),
        demand_nodes = demand.len(),
        transshipment_nodes = transshipment.len(),
        "network built"
    );

    Ok(Network::new(arcs, supply, demand, transshipment))
}

fn parse_routes(routes: &[RouteRecord]) -> Result<Vec<Arc>, ValidationError> {
    routes
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let row = idx + 1;
            let source = required_name(&record.source, Table::Routes, row, "source")?;
            let target = required_name(&record.target, Table::Routes, row, "target")?;
            let cost = required_number(&record.cost, Table::Routes, row, "cost")?;
            let cost = non_negative(cost, Table::Routes, row, "cost")?;
            let capacity = optional_number(&record.capacity, Table::Routes, row, "capacity")?;
            if let Some(cap) = capacity {
                non_negative(cap, Table::Routes, row, "capacity")?;
            }
            Ok(Arc {
                source,
                target,
                cost,
                capacity,
            })
        })
        .collect()
}

fn parse_node_table<'a>(
    records: impl Iterator<Item = (&'a Option<String>, &'a Option<String>)>,
    table: Table,
    value_field: &'static str,
) -> Result<BTreeMap<String, f64>, ValidationError> {
    let mut parsed = BTreeMap::new();
    for (idx, (node_cell, value_cell)) in records.enumerate() {
        let row = idx + 1;
        let node = required_name(node_cell, table, row, "node")?;
        let value = required_number(value_cell, table, row, value_field)?;
        let value = non_negative(value, table, row, value_field)?;
        if parsed.insert(node.clone(), value).is_some() {
            return Err(ValidationError::DuplicateNode { table, node });
        }
    }
    Ok(parsed)
}

/// A name cell must be present and non-blank after trimming.
fn required_name(
    cell: &Option<String>,
    table: Table,
    row: usize,
    field: &'static str,
) -> Result<String, ValidationError> {
    match cell.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(ValidationError::MissingField { table, row, field }),
    }
}

fn required_number(
    cell: &Option<String>,
    table: Table,
    row: usize,
    field: &'static str,
) -> Result<f64, ValidationError> {
    let raw = match cell.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(ValidationError::MissingField { table, row, field }),
    };
    parse_finite(raw, table, row, field)
}

/// Absent or blank cells are fine (unbounded); anything else must parse.
fn optional_number(
    cell: &Option<String>,
    table: Table,
    row: usize,
    field: &'static str,
) -> Result<Option<f64>, ValidationError> {
    match cell.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => parse_finite(raw, table, row, field).map(Some),
        _ => Ok(None),
    }
}

fn parse_finite(
    raw: &str,
    table: Table,
    row: usize,
    field: &'static str,
) -> Result<f64, ValidationError> {
    // "NaN" and "inf" parse as f64 but are still garbage cells.
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidNumber {
            table,
            row,
            field,
            value: raw.to_string(),
        }),
    }
}

fn non_negative(
    value: f64,
    table: Table,
    row: usize,
    field: &'static str,
) -> Result<f64, ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::NegativeValue {
            table,
            row,
            field,
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NodeRole;
    use rstest::rstest;

    #[test]
    fn test_classifies_roles_from_table_membership() {
        let routes = vec![
            RouteRecord::new("Factory", "Depot", "1.0"),
            RouteRecord::new("Depot", "Branch", "2.0"),
        ];
        let capacities = vec![CapacityRecord::new("Factory", "100")];
        let demands = vec![DemandRecord::new("Branch", "60")];

        let net = build_network(&routes, &capacities, &demands).unwrap();
        assert_eq!(net.role("Factory"), Some(NodeRole::Supply));
        assert_eq!(net.role("Branch"), Some(NodeRole::Demand));
        assert_eq!(net.role("Depot"), Some(NodeRole::Transshipment));
        assert_eq!(net.arcs().len(), 2);
    }

    #[test]
    fn test_trims_whitespace_before_matching() {
        let routes = vec![RouteRecord::new("  Factory ", " Branch  ", " 2.0 ")];
        let capacities = vec![CapacityRecord::new("Factory", " 100 ")];
        let demands = vec![DemandRecord::new(" Branch", "60")];

        let net = build_network(&routes, &capacities, &demands).unwrap();
        assert_eq!(net.role("Factory"), Some(NodeRole::Supply));
        assert_eq!(net.role("Branch"), Some(NodeRole::Demand));
        assert!(net.transshipment_nodes().is_empty());
        assert_eq!(net.arcs()[0].cost, 2.0);
    }

    #[test]
    fn test_name_matching_is_case_sensitive() {
        let routes = vec![RouteRecord::new("factory", "Branch", "2.0")];
        let capacities = vec![CapacityRecord::new("Factory", "100")];
        let demands = vec![DemandRecord::new("Branch", "60")];

        let net = build_network(&routes, &capacities, &demands).unwrap();
        // "factory" != "Factory": the route endpoint becomes transshipment.
        assert_eq!(net.role("factory"), Some(NodeRole::Transshipment));
        assert_eq!(net.role("Factory"), Some(NodeRole::Supply));
    }

    #[rstest]
    #[case::blank(Some("   ".to_string()))]
    #[case::absent(None)]
    fn test_blank_route_capacity_is_unbounded(#[case] cell: Option<String>) {
        let mut route = RouteRecord::new("A", "B", "1.0");
        route.capacity = cell;
        let capacities = vec![CapacityRecord::new("A", "10")];
        let demands = vec![DemandRecord::new("B", "5")];

        let net = build_network(&[route], &capacities, &demands).unwrap();
        assert_eq!(net.arcs()[0].capacity, None);
    }

    #[test]
    fn test_declared_route_capacity_is_kept() {
        let route = RouteRecord::new("A", "B", "1.0").with_capacity("30");
        let net = build_network(
            &[route],
            &[CapacityRecord::new("A", "10")],
            &[DemandRecord::new("B", "5")],
        )
        .unwrap();
        assert_eq!(net.arcs()[0].capacity, Some(30.0));
    }

    #[test]
    fn test_missing_source_rejected() {
        let route = RouteRecord {
            source: None,
            ..RouteRecord::new("A", "B", "1.0")
        };
        let err = build_network(&[route], &[], &[]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                table: Table::Routes,
                row: 1,
                field: "source"
            }
        );
    }

    #[rstest]
    #[case::words("cheap")]
    #[case::nan("NaN")]
    #[case::infinity("inf")]
    fn test_non_numeric_cost_rejected(#[case] cost: &str) {
        let route = RouteRecord::new("A", "B", cost);
        let err = build_network(&[route], &[], &[]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidNumber { field: "cost", .. }
        ));
    }

    #[test]
    fn test_negative_values_rejected() {
        let err = build_network(
            &[RouteRecord::new("A", "B", "1.0")],
            &[CapacityRecord::new("A", "-5")],
            &[],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NegativeValue {
                table: Table::Capacities,
                ..
            }
        ));

        let err = build_network(
            &[RouteRecord::new("A", "B", "1.0")],
            &[],
            &[DemandRecord::new("B", "-1")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NegativeValue {
                table: Table::Demands,
                ..
            }
        ));

        let err = build_network(&[RouteRecord::new("A", "B", "-2")], &[], &[]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NegativeValue { field: "cost", .. }
        ));
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let routes = vec![
            RouteRecord::new("A", "B", "1.0"),
            RouteRecord::new("A", "C", "2.0"),
            RouteRecord::new("A", "B", "3.0"),
        ];
        let err = build_network(&routes, &[], &[]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateRoute {
                source: "A".to_string(),
                target: "B".to_string()
            }
        );
    }

    #[test]
    fn test_node_in_both_tables_rejected() {
        // Scenario: a node declared as both producer and consumer.
        let err = build_network(
            &[RouteRecord::new("A", "B", "1.0")],
            &[CapacityRecord::new("A", "10"), CapacityRecord::new("B", "3")],
            &[DemandRecord::new("B", "5")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::AmbiguousRole {
                node: "B".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_node_row_rejected() {
        let err = build_network(
            &[RouteRecord::new("A", "B", "1.0")],
            &[CapacityRecord::new("A", "10"), CapacityRecord::new("A", "20")],
            &[],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateNode {
                table: Table::Capacities,
                node: "A".to_string()
            }
        );
    }

    #[test]
    fn test_imbalanced_totals_are_not_rejected() {
        // Supply 10 vs demand 50: feasibility is the solver's call, not ours.
        let net = build_network(
            &[RouteRecord::new("A", "B", "1.0")],
            &[CapacityRecord::new("A", "10")],
            &[DemandRecord::new("B", "50")],
        )
        .unwrap();
        assert_eq!(net.total_supply(), 10.0);
        assert_eq!(net.total_demand(), 50.0);
    }

    #[test]
    fn test_nodes_absent_from_routes_are_still_typed() {
        // A supply point with no outgoing route is odd but valid input.
        let net = build_network(
            &[RouteRecord::new("A", "B", "1.0")],
            &[CapacityRecord::new("A", "10"), CapacityRecord::new("C", "5")],
            &[DemandRecord::new("B", "5")],
        )
        .unwrap();
        assert_eq!(net.role("C"), Some(NodeRole::Supply));
        assert_eq!(net.node_count(), 3);
    }
}
