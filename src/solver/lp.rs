//! Linear-programming formulation of the min-cost flow problem.
//!
//! One non-negative continuous variable per arc, cost-weighted sum as the
//! objective, and the constraint system from the network model:
//! supply outflow <= capacity, demand inflow >= demand, transshipment
//! inflow == outflow, and per-arc caps where declared. Unbounded arcs simply
//! get no cap constraint; no big-M sentinel ever enters the program.

use good_lp::{
    constraint, default_solver, variable, Expression, ProblemVariables, ResolutionError,
    Solution as _, SolverModel, Variable,
};

use crate::domain::{Arc, Network};

/// Solve the LP for the given network.
///
/// Returns the objective value and per-arc flows (ordered like
/// `network.arcs()`), or the raw solver error for the caller to translate
/// into a status.
pub(crate) fn solve_lp(network: &Network) -> Result<(f64, Vec<f64>), ResolutionError> {
    let arcs = network.arcs();

    let mut problem = ProblemVariables::new();
    let flow: Vec<Variable> = arcs
        .iter()
        .map(|_| problem.add(variable().min(0.0)))
        .collect();

    let total_cost: Expression = arcs
        .iter()
        .zip(&flow)
        .map(|(arc, &f)| f * arc.cost)
        .sum();

    let mut model = problem.minimise(total_cost).using(default_solver);

    // Supply: total outflow may not exceed the declared capacity. Supply
    // nodes without outgoing routes satisfy this trivially and get no row.
    for (node, &capacity) in network.supply_nodes() {
        if has_outgoing(arcs, node) {
            let outflow = outflow_of(arcs, &flow, node);
            model = model.with(constraint!(outflow <= capacity));
        }
    }

    // Demand: total inflow must reach at least the declared demand. The
    // inequality direction is deliberate; a destination may receive more
    // than it asked for if costs and caps allow it.
    for (node, &demand) in network.demand_nodes() {
        if has_incoming(arcs, node) {
            let inflow = inflow_of(arcs, &flow, node);
            model = model.with(constraint!(inflow >= demand));
        }
    }

    // Transshipment: hard balance, these nodes neither store nor create
    // goods. Every transshipment node is an arc endpoint by construction,
    // so at least one side of the equality carries variables.
    for node in network.transshipment_nodes() {
        let inflow = inflow_of(arcs, &flow, node);
        let outflow = outflow_of(arcs, &flow, node);
        model = model.with(constraint!(inflow == outflow));
    }

    for (arc, &f) in arcs.iter().zip(&flow) {
        if let Some(cap) = arc.capacity {
            model = model.with(constraint!(f <= cap));
        }
    }

    let solution = model.solve()?;

    let values: Vec<f64> = flow.iter().map(|&f| solution.value(f)).collect();
    let objective = arcs
        .iter()
        .zip(&values)
        .map(|(arc, value)| arc.cost * value)
        .sum();

    Ok((objective, values))
}

fn has_outgoing(arcs: &[Arc], node: &str) -> bool {
    arcs.iter().any(|a| a.source == node)
}

fn has_incoming(arcs: &[Arc], node: &str) -> bool {
    arcs.iter().any(|a| a.target == node)
}

fn outflow_of(arcs: &[Arc], flow: &[Variable], node: &str) -> Expression {
    arcs.iter()
        .zip(flow)
        .filter(|(arc, _)| arc.source == node)
        .map(|(_, &f)| Expression::from(f))
        .sum()
}

fn inflow_of(arcs: &[Arc], flow: &[Variable], node: &str) -> Expression {
    arcs.iter()
        .zip(flow)
        .filter(|(arc, _)| arc.target == node)
        .map(|(_, &f)| Expression::from(f))
        .sum()
}
