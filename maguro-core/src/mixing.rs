//! Group-by-group dyad cross-tabulation.
//!
//! A [`MixingMatrix`] counts every dyad of a graph into
//! `(ego group, alter group, tie state)` cells, where groups are the
//! distinct values of a categorical (or boolean) node attribute. Directed
//! graphs tabulate ordered dyads; undirected graphs tabulate each unordered
//! dyad once, in the cell of its lower-indexed endpoint. The cell total
//! always equals the dyad count of the graph, which is what makes the
//! segregation measures in [`crate::segregation`] well-defined shares.

use std::collections::BTreeMap;

use crate::{
    error::{MaguroError, Result},
    graph::{AttributeValue, Graph},
    statistics::attribute_column,
};

/// Cross-tabulation of dyads by ego group, alter group, and tie state.
///
/// Built once from a graph and a grouping attribute; immutable afterwards.
/// Group indices follow the sorted order of the distinct attribute values,
/// exposed via [`MixingMatrix::labels`].
///
/// # Examples
/// ```
/// use maguro_core::{AttributeValue, GraphBuilder, MixingMatrix};
///
/// let graph = GraphBuilder::new(4)
///     .with_attribute(
///         "hall",
///         vec![
///             AttributeValue::Category("east".to_owned()),
///             AttributeValue::Category("east".to_owned()),
///             AttributeValue::Category("west".to_owned()),
///             AttributeValue::Category("west".to_owned()),
///         ],
///     )
///     .with_edges([(0, 1), (1, 2)])
///     .build()
///     .expect("valid graph");
/// let matrix = MixingMatrix::build(&graph, "hall").expect("attribute is categorical");
/// assert_eq!(matrix.labels(), ["east", "west"]);
/// assert_eq!(matrix.total_dyads(), 6);
/// assert_eq!(matrix.total_ties(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MixingMatrix {
    labels: Vec<String>,
    sizes: Vec<usize>,
    cells: Vec<[u64; 2]>,
    directed: bool,
}

impl MixingMatrix {
    /// Tabulates every dyad of `graph` by the grouping attribute.
    ///
    /// # Errors
    /// Returns [`MaguroError::MissingAttribute`] when the attribute is
    /// absent and [`MaguroError::GroupingNotCategorical`] when any node
    /// carries a numeric value for it.
    pub fn build(graph: &Graph, group_attribute: &str) -> Result<Self> {
        let column = attribute_column(graph, group_attribute)?;

        let mut memberships = Vec::with_capacity(graph.node_count());
        for value in column {
            let label = match value {
                AttributeValue::Category(label) => label.clone(),
                AttributeValue::Flag(flag) => flag.to_string(),
                AttributeValue::Number(_) => {
                    return Err(MaguroError::GroupingNotCategorical {
                        attribute: group_attribute.into(),
                    });
                }
            };
            memberships.push(label);
        }

        // Sorted label order fixes the group indexing.
        let label_index: BTreeMap<&str, usize> = memberships
            .iter()
            .map(String::as_str)
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(index, label)| (label, index))
            .collect();
        let group_count = label_index.len();
        let labels: Vec<String> = label_index.keys().map(|&label| label.to_owned()).collect();
        let groups: Vec<usize> = memberships
            .iter()
            .map(|label| label_index.get(label.as_str()).copied().unwrap_or(0))
            .collect();

        let mut sizes = vec![0_usize; group_count];
        for &group in &groups {
            sizes[group] += 1;
        }

        let mut cells = vec![[0_u64; 2]; group_count * group_count];
        for (i, j) in graph.dyads() {
            let state = usize::from(graph.has_edge(i, j));
            cells[groups[i] * group_count + groups[j]][state] += 1;
        }

        Ok(Self {
            labels,
            sizes,
            cells,
            directed: graph.is_directed(),
        })
    }

    /// Returns the sorted group labels; the index of a label is its group id.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the number of nodes in each group.
    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether the tabulated graph was directed.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns one cell: dyads from `ego` group to `alter` group in the
    /// given tie state. Out-of-range groups count zero dyads.
    #[must_use]
    pub fn cell(&self, ego: usize, alter: usize, tied: bool) -> u64 {
        self.cells
            .get(ego * self.group_count() + alter)
            .map_or(0, |cell| cell[usize::from(tied)])
    }

    /// Returns the tied dyad count from `ego` to `alter`.
    #[must_use]
    pub fn ties(&self, ego: usize, alter: usize) -> u64 {
        self.cell(ego, alter, true)
    }

    /// Returns the dyad count from `ego` to `alter` regardless of state.
    #[must_use]
    pub fn dyads(&self, ego: usize, alter: usize) -> u64 {
        self.cell(ego, alter, false) + self.cell(ego, alter, true)
    }

    /// Returns the total tied dyad count.
    #[must_use]
    pub fn total_ties(&self) -> u64 {
        self.cells.iter().map(|cell| cell[1]).sum()
    }

    /// Returns the total dyad count across all cells.
    #[must_use]
    pub fn total_dyads(&self) -> u64 {
        self.cells.iter().map(|cell| cell[0] + cell[1]).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;

    fn two_hall_graph(directed: bool) -> Graph {
        GraphBuilder::new(4)
            .directed(directed)
            .with_attribute(
                "hall",
                vec![
                    AttributeValue::Category("east".to_owned()),
                    AttributeValue::Category("east".to_owned()),
                    AttributeValue::Category("west".to_owned()),
                    AttributeValue::Category("west".to_owned()),
                ],
            )
            .with_edges([(0, 1), (1, 2), (2, 3)])
            .build()
            .expect("valid graph")
    }

    #[test]
    fn cell_totals_cover_every_undirected_dyad() {
        let matrix = MixingMatrix::build(&two_hall_graph(false), "hall")
            .expect("attribute is categorical");
        assert_eq!(matrix.total_dyads(), 6);
        assert_eq!(matrix.total_ties(), 3);
        assert_eq!(matrix.ties(0, 0), 1);
        assert_eq!(matrix.ties(1, 1), 1);
        assert_eq!(matrix.ties(0, 1), 1);
        assert_eq!(matrix.dyads(0, 1), 4);
    }

    #[test]
    fn cell_totals_cover_every_ordered_dyad() {
        let matrix = MixingMatrix::build(&two_hall_graph(true), "hall")
            .expect("attribute is categorical");
        assert_eq!(matrix.total_dyads(), 12);
        assert_eq!(matrix.total_ties(), 3);
        assert_eq!(matrix.ties(0, 1), 1);
        assert_eq!(matrix.ties(1, 0), 0);
    }

    #[test]
    fn groups_follow_sorted_label_order() {
        let graph = GraphBuilder::new(3)
            .with_attribute(
                "tier",
                vec![
                    AttributeValue::Category("senior".to_owned()),
                    AttributeValue::Category("junior".to_owned()),
                    AttributeValue::Category("senior".to_owned()),
                ],
            )
            .build()
            .expect("valid graph");
        let matrix = MixingMatrix::build(&graph, "tier").expect("attribute is categorical");
        assert_eq!(matrix.labels(), ["junior", "senior"]);
        assert_eq!(matrix.sizes(), [1, 2]);
    }

    #[test]
    fn boolean_flags_form_two_groups() {
        let graph = GraphBuilder::new(3)
            .with_attribute(
                "smokes",
                vec![
                    AttributeValue::Flag(true),
                    AttributeValue::Flag(false),
                    AttributeValue::Flag(true),
                ],
            )
            .with_edge(0, 2)
            .build()
            .expect("valid graph");
        let matrix = MixingMatrix::build(&graph, "smokes").expect("flags are categorical");
        assert_eq!(matrix.labels(), ["false", "true"]);
        assert_eq!(matrix.ties(1, 1), 1);
    }

    #[test]
    fn rejects_numeric_groupings_and_missing_attributes() {
        let graph = GraphBuilder::new(2)
            .with_attribute("age", vec![
                AttributeValue::Number(35.0),
                AttributeValue::Number(40.0),
            ])
            .build()
            .expect("valid graph");
        assert_eq!(
            MixingMatrix::build(&graph, "age"),
            Err(MaguroError::GroupingNotCategorical { attribute: "age".into() })
        );
        assert_eq!(
            MixingMatrix::build(&graph, "hall"),
            Err(MaguroError::MissingAttribute { attribute: "hall".into() })
        );
    }
}
