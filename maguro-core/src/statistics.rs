//! Network statistic evaluation.
//!
//! [`evaluate`] maps a term list over a graph into an ordered statistic
//! vector. Directed graphs use two documented closure conventions applied
//! uniformly here and in [`crate::change_statistics`]: triangles are
//! directed 3-cycles, and the shared partners of an arc `(i, j)` are the
//! nodes `k` with `j -> k -> i`.

use crate::{
    error::{MaguroError, Result},
    graph::{AttributeValue, Graph},
    term::Term,
};

/// Computes the statistic vector for `terms` over `graph`.
///
/// One entry per term, in term order.
///
/// # Errors
/// Returns [`MaguroError::MissingAttribute`] when a term references an
/// attribute the graph does not carry,
/// [`MaguroError::AttributeNotNumeric`] when a numeric term meets a
/// categorical value, [`MaguroError::UndirectedMutual`] for `mutual` on an
/// undirected graph, and the parameter errors from [`Term::validate`].
///
/// # Examples
/// ```
/// use maguro_core::{GraphBuilder, Term, evaluate};
///
/// // A triangle: every edge has exactly one shared partner.
/// let graph = GraphBuilder::new(3)
///     .with_edges([(0, 1), (1, 2), (0, 2)])
///     .build()
///     .expect("valid graph");
/// let stats = evaluate(&graph, &[Term::Edges, Term::Triangles]).expect("terms are valid");
/// assert_eq!(stats, vec![3.0, 1.0]);
/// ```
pub fn evaluate(graph: &Graph, terms: &[Term]) -> Result<Vec<f64>> {
    terms.iter().map(|term| evaluate_term(graph, term)).collect()
}

#[expect(
    clippy::cast_precision_loss,
    reason = "counts stay far below 2^52 at enumerable sizes"
)]
fn evaluate_term(graph: &Graph, term: &Term) -> Result<f64> {
    term.validate()?;
    match term {
        Term::Edges => Ok(graph.edge_count() as f64),
        Term::KStar { k } => Ok(star_count(graph, *k)),
        Term::TwoPath => Ok(two_path_count(graph)),
        Term::Triangles => Ok(triangle_count(graph) as f64),
        Term::Mutual => {
            if !graph.is_directed() {
                return Err(MaguroError::UndirectedMutual);
            }
            Ok(mutual_count(graph) as f64)
        }
        Term::NodeOFactor { attribute } => {
            edge_sum(graph, attribute, |x_i, x_j| x_i + x_j)
        }
        Term::NodeIFactor { attribute } => edge_sum(graph, attribute, |x_i, x_j| {
            if graph.is_directed() { x_j } else { x_i + x_j }
        }),
        Term::NodeEFactor { attribute } => edge_sum(graph, attribute, |x_i, x_j| {
            if graph.is_directed() { x_i } else { x_i + x_j }
        }),
        Term::NodeMatch { attribute } => {
            let column = attribute_column(graph, attribute)?;
            let matched = graph
                .edges()
                .filter(|&(i, j)| column[i] == column[j])
                .count();
            Ok(matched as f64)
        }
        Term::AbsDiff { attribute } => edge_sum(graph, attribute, |x_i, x_j| (x_i - x_j).abs()),
        Term::Gwesp { alpha, .. } => {
            let total = graph
                .edges()
                .map(|(i, j)| gwesp_weight(*alpha, graph.shared_partners(i, j).len()))
                .sum();
            Ok(total)
        }
    }
}

/// Looks up an attribute column, surfacing absence as an error.
pub(crate) fn attribute_column<'g>(
    graph: &'g Graph,
    attribute: &str,
) -> Result<&'g [AttributeValue]> {
    graph
        .attribute(attribute)
        .ok_or_else(|| MaguroError::MissingAttribute {
            attribute: attribute.into(),
        })
}

/// Coerces one attribute value to a number, surfacing the failing node.
pub(crate) fn numeric_value(
    column: &[AttributeValue],
    attribute: &str,
    node: usize,
) -> Result<f64> {
    column[node]
        .numeric()
        .ok_or_else(|| MaguroError::AttributeNotNumeric {
            attribute: attribute.into(),
            node,
        })
}

fn edge_sum(
    graph: &Graph,
    attribute: &str,
    combine: impl Fn(f64, f64) -> f64,
) -> Result<f64> {
    let column = attribute_column(graph, attribute)?;
    let mut total = 0.0;
    for (i, j) in graph.edges() {
        let x_i = numeric_value(column, attribute, i)?;
        let x_j = numeric_value(column, attribute, j)?;
        total += combine(x_i, x_j);
    }
    Ok(total)
}

fn star_count(graph: &Graph, k: usize) -> f64 {
    (0..graph.node_count())
        .map(|node| binomial(total_degree(graph, node), k))
        .sum()
}

#[expect(
    clippy::cast_precision_loss,
    reason = "degree products stay far below 2^52 at enumerable sizes"
)]
fn two_path_count(graph: &Graph) -> f64 {
    if graph.is_directed() {
        // Paths i -> j -> k with i != k: every (in, out) arc pair at j,
        // minus the reversals contributed by mutual dyads.
        let pairs: usize = (0..graph.node_count())
            .map(|j| graph.in_neighbours(j).len() * graph.out_neighbours(j).len())
            .sum();
        (pairs - 2 * mutual_count(graph)) as f64
    } else {
        star_count(graph, 2)
    }
}

fn triangle_count(graph: &Graph) -> usize {
    if graph.is_directed() {
        // Each 3-cycle i -> j -> k -> i is counted at its smallest-labeled
        // source node.
        graph
            .edges()
            .map(|(i, j)| {
                graph
                    .cyclic_shared_partners(i, j)
                    .iter()
                    .filter(|&&k| i < j && i < k)
                    .count()
            })
            .sum()
    } else {
        // Each triangle {i, j, k} with i < j < k is counted at edge (i, j).
        graph
            .edges()
            .map(|(i, j)| {
                graph
                    .shared_partners(i, j)
                    .iter()
                    .filter(|&&k| k > j)
                    .count()
            })
            .sum()
    }
}

pub(crate) fn mutual_count(graph: &Graph) -> usize {
    graph
        .edges()
        .filter(|&(i, j)| i < j && graph.has_edge(j, i))
        .count()
}

fn total_degree(graph: &Graph, node: usize) -> usize {
    if graph.is_directed() {
        graph.out_neighbours(node).len() + graph.in_neighbours(node).len()
    } else {
        graph.out_neighbours(node).len()
    }
}

/// Binomial coefficient `C(n, k)` as a float.
#[expect(
    clippy::cast_precision_loss,
    reason = "operands stay far below 2^52 at enumerable sizes"
)]
pub(crate) fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let mut result = 1.0;
    for offset in 0..k {
        result *= (n - offset) as f64 / (offset + 1) as f64;
    }
    result
}

/// Geometrically weighted shared-partner contribution
/// `e^alpha * (1 - (1 - e^(-alpha))^p)`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "shared-partner counts fit comfortably in i32"
)]
pub(crate) fn gwesp_weight(alpha: f64, shared_partners: usize) -> f64 {
    alpha.exp() * (1.0 - (1.0 - (-alpha).exp()).powi(shared_partners as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;

    fn triangle() -> Graph {
        GraphBuilder::new(3)
            .with_edges([(0, 1), (1, 2), (0, 2)])
            .build()
            .expect("valid graph")
    }

    fn star() -> Graph {
        GraphBuilder::new(4)
            .with_edges([(0, 1), (0, 2), (0, 3)])
            .build()
            .expect("valid graph")
    }

    #[test]
    fn counts_edges_and_stars() {
        let stats = evaluate(
            &star(),
            &[Term::Edges, Term::KStar { k: 2 }, Term::KStar { k: 3 }],
        )
        .expect("terms are valid");
        assert_eq!(stats, vec![3.0, 3.0, 1.0]);
    }

    #[test]
    fn two_path_matches_two_star_when_undirected() {
        let path = GraphBuilder::new(3)
            .with_edges([(0, 1), (1, 2)])
            .build()
            .expect("valid graph");
        let stats = evaluate(&path, &[Term::TwoPath, Term::KStar { k: 2 }])
            .expect("terms are valid");
        assert_eq!(stats, vec![1.0, 1.0]);
    }

    #[test]
    fn directed_two_paths_exclude_reversals() {
        // 0 <-> 1 plus 1 -> 2: the only two-paths are 0 -> 1 -> 2 and the
        // cycle rotations absent here.
        let graph = GraphBuilder::new(3)
            .directed(true)
            .with_edges([(0, 1), (1, 0), (1, 2)])
            .build()
            .expect("valid graph");
        let stats = evaluate(&graph, &[Term::TwoPath]).expect("term is valid");
        assert_eq!(stats, vec![1.0]);
    }

    #[test]
    fn counts_undirected_triangles_once() {
        // Two triangles sharing the edge (0, 1).
        let graph = GraphBuilder::new(4)
            .with_edges([(0, 1), (1, 2), (0, 2), (1, 3), (0, 3)])
            .build()
            .expect("valid graph");
        let stats = evaluate(&graph, &[Term::Triangles]).expect("term is valid");
        assert_eq!(stats, vec![2.0]);
    }

    #[test]
    fn directed_triangles_are_three_cycles() {
        // One 3-cycle and one transitive (non-cyclic) triple.
        let graph = GraphBuilder::new(4)
            .directed(true)
            .with_edges([(0, 1), (1, 2), (2, 0), (1, 3), (3, 2)])
            .build()
            .expect("valid graph");
        let stats = evaluate(&graph, &[Term::Triangles]).expect("term is valid");
        assert_eq!(stats, vec![1.0]);
    }

    #[test]
    fn mutual_counts_reciprocated_dyads_once() {
        let graph = GraphBuilder::new(3)
            .directed(true)
            .with_edges([(0, 1), (1, 0), (1, 2)])
            .build()
            .expect("valid graph");
        let stats = evaluate(&graph, &[Term::Mutual]).expect("term is valid");
        assert_eq!(stats, vec![1.0]);
    }

    #[test]
    fn mutual_requires_direction() {
        let result = evaluate(&triangle(), &[Term::Mutual]);
        assert_eq!(result, Err(MaguroError::UndirectedMutual));
    }

    #[test]
    fn attribute_terms_sum_over_edges() {
        let graph = GraphBuilder::new(3)
            .with_attribute(
                "age",
                vec![
                    AttributeValue::Number(10.0),
                    AttributeValue::Number(14.0),
                    AttributeValue::Number(11.0),
                ],
            )
            .with_edges([(0, 1), (1, 2)])
            .build()
            .expect("valid graph");
        let stats = evaluate(
            &graph,
            &[
                Term::NodeOFactor { attribute: "age".to_owned() },
                Term::AbsDiff { attribute: "age".to_owned() },
            ],
        )
        .expect("terms are valid");
        assert_eq!(stats, vec![(10.0 + 14.0) + (14.0 + 11.0), 4.0 + 3.0]);
    }

    #[test]
    fn directed_activity_terms_split_by_endpoint() {
        let graph = GraphBuilder::new(3)
            .directed(true)
            .with_attribute(
                "w",
                vec![
                    AttributeValue::Number(1.0),
                    AttributeValue::Number(2.0),
                    AttributeValue::Number(4.0),
                ],
            )
            .with_edges([(0, 1), (2, 1)])
            .build()
            .expect("valid graph");
        let stats = evaluate(
            &graph,
            &[
                Term::NodeIFactor { attribute: "w".to_owned() },
                Term::NodeEFactor { attribute: "w".to_owned() },
            ],
        )
        .expect("terms are valid");
        // In-degree weights node 1 twice; out-degree weights nodes 0 and 2.
        assert_eq!(stats, vec![4.0, 5.0]);
    }

    #[test]
    fn nodematch_counts_matching_endpoints() {
        let graph = GraphBuilder::new(4)
            .with_attribute(
                "team",
                vec![
                    AttributeValue::Category("red".to_owned()),
                    AttributeValue::Category("red".to_owned()),
                    AttributeValue::Category("blue".to_owned()),
                    AttributeValue::Category("blue".to_owned()),
                ],
            )
            .with_edges([(0, 1), (1, 2), (2, 3)])
            .build()
            .expect("valid graph");
        let stats = evaluate(
            &graph,
            &[Term::NodeMatch { attribute: "team".to_owned() }],
        )
        .expect("term is valid");
        assert_eq!(stats, vec![2.0]);
    }

    #[test]
    fn missing_and_non_numeric_attributes_error() {
        let graph = GraphBuilder::new(2)
            .with_attribute("team", vec![
                AttributeValue::Category("red".to_owned()),
                AttributeValue::Category("blue".to_owned()),
            ])
            .with_edge(0, 1)
            .build()
            .expect("valid graph");
        assert_eq!(
            evaluate(&graph, &[Term::AbsDiff { attribute: "age".to_owned() }]),
            Err(MaguroError::MissingAttribute { attribute: "age".into() })
        );
        assert_eq!(
            evaluate(&graph, &[Term::AbsDiff { attribute: "team".to_owned() }]),
            Err(MaguroError::AttributeNotNumeric { attribute: "team".into(), node: 0 })
        );
    }

    #[test]
    fn gwesp_of_a_triangle_is_the_edge_count() {
        // f(1) = e^alpha * e^(-alpha) = 1 for every decay value.
        for alpha in [0.25, 0.5, 1.5] {
            let stats = evaluate(&triangle(), &[Term::Gwesp { alpha, fixed: true }])
                .expect("term is valid");
            assert!((stats[0] - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn gwesp_discounts_additional_partners() {
        let alpha = 0.5_f64;
        // K4: every edge has two shared partners.
        let graph = GraphBuilder::new(4)
            .with_edges([(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)])
            .build()
            .expect("valid graph");
        let stats = evaluate(&graph, &[Term::Gwesp { alpha, fixed: true }])
            .expect("term is valid");
        let f2 = alpha.exp() * (1.0 - (1.0 - (-alpha).exp()).powi(2));
        assert!((stats[0] - 6.0 * f2).abs() < 1e-12);
        assert!(f2 < 2.0, "each extra partner must add less than the first");
    }

    #[test]
    fn binomial_handles_degenerate_orders() {
        assert_eq!(binomial(3, 2), 3.0);
        assert_eq!(binomial(2, 3), 0.0);
        assert_eq!(binomial(5, 0), 1.0);
    }
}
