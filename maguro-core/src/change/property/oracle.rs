//! Evaluate-twice oracle for change-statistic verification.
//!
//! The trusted reference computes `g(y+) - g(y-)` literally: materialize the
//! dyad-present and dyad-absent states and evaluate the full statistic
//! vector in each. Quadratic in graph size and only suitable for tests; the
//! production path in [`crate::change_statistics`] must agree with it for
//! every term.

use crate::{error::Result, graph::Graph, statistics::evaluate, term::Term};

/// Computes the change-statistic vector by full double evaluation.
///
/// Restores the dyad's original state before returning.
pub(super) fn oracle_change(
    graph: &mut Graph,
    dyad: (usize, usize),
    terms: &[Term],
) -> Result<Vec<f64>> {
    let (i, j) = dyad;
    let was_present = graph.has_edge(i, j);

    if !was_present {
        graph.toggle(i, j)?;
    }
    let with_edge = evaluate(graph, terms)?;
    graph.toggle(i, j)?;
    let without_edge = evaluate(graph, terms)?;
    if was_present {
        graph.toggle(i, j)?;
    }

    Ok(with_edge
        .iter()
        .zip(&without_edge)
        .map(|(plus, minus)| plus - minus)
        .collect())
}
