//! Exhaustive enumeration of small labeled graphs and canonical
//! classification.
//!
//! The space of labeled graphs grows as `2^(n(n-1)/2)` undirected and
//! `2^(n(n-1))` directed, so enumeration is a pedagogical tool for small `n`
//! only, never a general inference path. Requests beyond
//! [`MAX_UNDIRECTED_NODES`] / [`MAX_DIRECTED_NODES`] are refused outright.
//!
//! Classification groups labeled graphs by a fingerprint (sorted degree
//! sequences plus a quantized statistic vector), not by solving graph
//! isomorphism. At the enumerable sizes the fingerprint separates the true
//! isomorphism classes; for larger graphs or degenerate statistic choices it
//! can merge distinct classes, which is a documented limitation of the
//! heuristic rather than a defect to engineer around.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

use crate::{
    error::{MaguroError, Result},
    graph::{Direction, Graph},
    statistics::evaluate,
    term::Term,
};

/// Largest node count [`enumerate_all`] accepts for undirected graphs
/// (2^15 labeled graphs).
pub const MAX_UNDIRECTED_NODES: usize = 6;

/// Largest node count [`enumerate_all`] accepts for directed graphs
/// (2^20 labeled graphs).
pub const MAX_DIRECTED_NODES: usize = 5;

/// Quantization grid applied to statistic values before they enter a
/// fingerprint, absorbing float summation noise across graphs of one class.
const FINGERPRINT_GRID: f64 = 1e-9;

/// A set of labeled graphs with identical structure up to node relabeling.
///
/// Built once by [`classify`] and read-only thereafter: the representative
/// is the first enumerated member, the multiplicity counts the labeled
/// graphs that share the fingerprint, and the statistic vector holds the
/// classification terms evaluated on the representative.
#[derive(Clone, Debug)]
pub struct CanonicalClass {
    representative: Graph,
    multiplicity: usize,
    statistics: Vec<f64>,
}

impl CanonicalClass {
    /// Returns the first enumerated member of the class.
    #[must_use]
    pub fn representative(&self) -> &Graph {
        &self.representative
    }

    /// Returns the number of labeled graphs in the class.
    #[must_use]
    pub fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    /// Returns the classification statistics of the representative.
    #[must_use]
    pub fn statistics(&self) -> &[f64] {
        &self.statistics
    }
}

/// Fingerprint key: degree sequences disambiguated by quantized statistics.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct Fingerprint {
    degrees: Vec<(usize, usize)>,
    statistics: Vec<i64>,
}

/// Enumerates every labeled graph on `node_count` nodes.
///
/// # Errors
/// Returns [`MaguroError::EnumerationCapExceeded`] beyond the size cap and
/// [`MaguroError::Graph`] for a zero node count.
///
/// # Examples
/// ```
/// use maguro_core::enumerate_all;
///
/// let graphs = enumerate_all(3, false).expect("under the cap");
/// assert_eq!(graphs.len(), 8);
/// let digraphs = enumerate_all(3, true).expect("under the cap");
/// assert_eq!(digraphs.len(), 64);
/// ```
#[instrument]
pub fn enumerate_all(node_count: usize, directed: bool) -> Result<Vec<Graph>> {
    let cap = if directed {
        MAX_DIRECTED_NODES
    } else {
        MAX_UNDIRECTED_NODES
    };
    if node_count > cap {
        return Err(MaguroError::EnumerationCapExceeded {
            requested: node_count,
            cap,
            directed,
        });
    }
    // Validates node_count >= 1 before any slot math.
    let empty = Graph::new(node_count, directed)?;

    let slots: Vec<(usize, usize)> = empty.dyads().collect();
    let total: u64 = 1 << slots.len();
    debug!(node_count, directed, graphs = total, "enumerating labeled graphs");

    let mut graphs = Vec::with_capacity(usize::try_from(total).unwrap_or(usize::MAX));
    for mask in 0..total {
        let mut graph = empty.clone();
        for (bit, &(i, j)) in slots.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                graph.add_edge(i, j)?;
            }
        }
        graphs.push(graph);
    }

    #[cfg(feature = "metrics")]
    metrics::counter!("census_graphs_enumerated").increment(total);

    Ok(graphs)
}

/// Groups labeled graphs into canonical classes by fingerprint.
///
/// `terms` sharpens the fingerprint beyond the degree sequences; evaluation
/// runs in parallel when the `parallel` feature is enabled. Passing an empty
/// term list is accepted but leaves the fingerprint at the degree sequences
/// alone, which merges more aggressively.
///
/// # Errors
/// Returns the term and attribute errors of [`evaluate`] for the
/// classification terms.
#[instrument(skip(graphs, terms), fields(graphs = graphs.len(), terms = terms.len()))]
pub fn classify(graphs: Vec<Graph>, terms: &[Term]) -> Result<Vec<CanonicalClass>> {
    if terms.is_empty() {
        warn!("classification fingerprint reduces to the degree sequence; distinct classes may merge");
    }

    #[cfg(feature = "parallel")]
    let statistics = graphs
        .par_iter()
        .map(|graph| evaluate(graph, terms))
        .collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let statistics = graphs
        .iter()
        .map(|graph| evaluate(graph, terms))
        .collect::<Result<Vec<_>>>()?;

    let mut classes: Vec<CanonicalClass> = Vec::new();
    let mut index: HashMap<Fingerprint, usize> = HashMap::new();
    for (graph, stats) in graphs.into_iter().zip(statistics) {
        let key = fingerprint(&graph, &stats)?;
        if let Some(&position) = index.get(&key) {
            classes[position].multiplicity += 1;
        } else {
            index.insert(key, classes.len());
            classes.push(CanonicalClass {
                representative: graph,
                multiplicity: 1,
                statistics: stats,
            });
        }
    }

    debug!(classes = classes.len(), "canonical classification complete");
    #[cfg(feature = "metrics")]
    metrics::counter!("census_classes_built").increment(classes.len() as u64);

    Ok(classes)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "quantized statistics stay far below i64 range at enumerable sizes"
)]
fn fingerprint(graph: &Graph, statistics: &[f64]) -> Result<Fingerprint> {
    let mut degrees = Vec::with_capacity(graph.node_count());
    for node in 0..graph.node_count() {
        let in_degree = graph.degree(node, Direction::In).map_err(MaguroError::from)?;
        let out_degree = graph.degree(node, Direction::Out).map_err(MaguroError::from)?;
        degrees.push((in_degree, out_degree));
    }
    degrees.sort_unstable();

    let quantized = statistics
        .iter()
        .map(|value| (value / FINGERPRINT_GRID).round() as i64)
        .collect();
    Ok(Fingerprint {
        degrees,
        statistics: quantized,
    })
}
