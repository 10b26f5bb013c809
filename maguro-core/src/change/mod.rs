//! Incremental change-statistic computation.
//!
//! [`change_statistics`] computes `g(y+) - g(y-)` for a dyad: the
//! difference each statistic would see if the dyad were toggled from absent
//! to present with every other dyad held fixed. Every delta comes from
//! local quantities (degrees, endpoint attributes, and shared-partner
//! counts read before any toggle); the evaluate-both-graphs formulation
//! exists solely as the property-test oracle in `property::oracle`.

use crate::{
    error::{MaguroError, Result},
    graph::Graph,
    statistics::{attribute_column, binomial, gwesp_weight, numeric_value},
    term::Term,
};

/// Computes the change-statistic vector for toggling `dyad` on, one entry
/// per term in term order.
///
/// The dyad's current state does not matter: a present edge is removed for
/// the measurement and restored before returning, on both success and error
/// paths. The borrow is mutable only for that toggle-compute-revert
/// sequence; the graph is bit-identical afterwards.
///
/// # Errors
/// Returns [`MaguroError::Graph`] for an invalid dyad and the same term and
/// attribute errors as [`crate::evaluate`].
///
/// # Examples
/// ```
/// use maguro_core::{GraphBuilder, Term, change_statistics};
///
/// let mut graph = GraphBuilder::new(4)
///     .with_edges([(0, 2), (1, 2)])
///     .build()
///     .expect("valid graph");
/// // Toggling (0, 1) closes one triangle through the shared partner 2.
/// let delta = change_statistics(&mut graph, (0, 1), &[Term::Edges, Term::Triangles])
///     .expect("terms are valid");
/// assert_eq!(delta, vec![1.0, 1.0]);
/// ```
pub fn change_statistics(
    graph: &mut Graph,
    dyad: (usize, usize),
    terms: &[Term],
) -> Result<Vec<f64>> {
    let (i, j) = dyad;
    let was_present = graph.toggle(i, j).map_err(MaguroError::from)?;
    if !was_present {
        // The probe toggle added the edge; take it back out so the deltas
        // are measured against the edge-absent baseline.
        graph.toggle(i, j).map_err(MaguroError::from)?;
    }
    let deltas = terms
        .iter()
        .map(|term| term_delta(graph, i, j, term))
        .collect();
    if was_present {
        graph.toggle(i, j).map_err(MaguroError::from)?;
    }
    deltas
}

/// Change in a single term when the absent dyad `(i, j)` is toggled on.
#[expect(
    clippy::cast_precision_loss,
    reason = "counts stay far below 2^52 at enumerable sizes"
)]
fn term_delta(graph: &Graph, i: usize, j: usize, term: &Term) -> Result<f64> {
    term.validate()?;
    match term {
        Term::Edges => Ok(1.0),
        Term::KStar { k } => {
            Ok(binomial(total_degree(graph, i), k - 1) + binomial(total_degree(graph, j), k - 1))
        }
        Term::TwoPath => Ok(two_path_delta(graph, i, j)),
        Term::Triangles => Ok(graph.shared_partners(i, j).len() as f64),
        Term::Mutual => {
            if !graph.is_directed() {
                return Err(MaguroError::UndirectedMutual);
            }
            Ok(if graph.has_edge(j, i) { 1.0 } else { 0.0 })
        }
        Term::NodeOFactor { attribute } => {
            let (x_i, x_j) = endpoint_values(graph, attribute, i, j)?;
            Ok(x_i + x_j)
        }
        Term::NodeIFactor { attribute } => {
            let (x_i, x_j) = endpoint_values(graph, attribute, i, j)?;
            Ok(if graph.is_directed() { x_j } else { x_i + x_j })
        }
        Term::NodeEFactor { attribute } => {
            let (x_i, x_j) = endpoint_values(graph, attribute, i, j)?;
            Ok(if graph.is_directed() { x_i } else { x_i + x_j })
        }
        Term::NodeMatch { attribute } => {
            let column = attribute_column(graph, attribute)?;
            Ok(if column[i] == column[j] { 1.0 } else { 0.0 })
        }
        Term::AbsDiff { attribute } => {
            let (x_i, x_j) = endpoint_values(graph, attribute, i, j)?;
            Ok((x_i - x_j).abs())
        }
        Term::Gwesp { alpha, .. } => Ok(gwesp_delta(graph, i, j, *alpha)),
    }
}

fn endpoint_values(graph: &Graph, attribute: &str, i: usize, j: usize) -> Result<(f64, f64)> {
    let column = attribute_column(graph, attribute)?;
    Ok((
        numeric_value(column, attribute, i)?,
        numeric_value(column, attribute, j)?,
    ))
}

fn total_degree(graph: &Graph, node: usize) -> usize {
    if graph.is_directed() {
        graph.out_neighbours(node).len() + graph.in_neighbours(node).len()
    } else {
        graph.out_neighbours(node).len()
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "degree sums stay far below 2^52 at enumerable sizes"
)]
fn two_path_delta(graph: &Graph, i: usize, j: usize) -> f64 {
    if graph.is_directed() {
        // The new arc pairs with every arc into i and every arc out of j;
        // a reverse arc would contribute two reversal pairs that the
        // statistic excludes.
        let pairs = graph.in_neighbours(i).len() + graph.out_neighbours(j).len();
        let reversals = if graph.has_edge(j, i) { 2 } else { 0 };
        (pairs - reversals) as f64
    } else {
        (graph.out_neighbours(i).len() + graph.out_neighbours(j).len()) as f64
    }
}

/// Gwesp delta: the new edge arrives with its own shared-partner count, and
/// each shared partner bumps the count of two already-present edges.
fn gwesp_delta(graph: &Graph, i: usize, j: usize, alpha: f64) -> f64 {
    let partners = graph.shared_partners(i, j);
    let mut delta = gwesp_weight(alpha, partners.len());
    for &k in &partners {
        let (first, second) = if graph.is_directed() {
            // Arc (k, i) gains the partner j; arc (j, k) gains the partner i.
            ((k, i), (j, k))
        } else {
            ((i, k), (j, k))
        };
        for (a, b) in [first, second] {
            let p = graph.shared_partners(a, b).len();
            delta += gwesp_weight(alpha, p + 1) - gwesp_weight(alpha, p);
        }
    }
    delta
}

#[cfg(test)]
mod property;
