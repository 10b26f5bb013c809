//! Builder for constructing validated [`Graph`] instances.
//!
//! All structural validation happens in [`GraphBuilder::build`], so a
//! successfully built graph always satisfies the representation invariants:
//! no self-loops, no duplicate edges, and attribute columns exactly as long
//! as the node set.

use crate::{error::GraphError, graph::AttributeValue, graph::Graph};

/// Configures and constructs [`Graph`] instances.
///
/// # Examples
/// ```
/// use maguro_core::{AttributeValue, GraphBuilder};
///
/// let graph = GraphBuilder::new(3)
///     .directed(true)
///     .with_attribute(
///         "team",
///         vec![
///             AttributeValue::Category("red".to_owned()),
///             AttributeValue::Category("red".to_owned()),
///             AttributeValue::Category("blue".to_owned()),
///         ],
///     )
///     .with_edge(0, 1)
///     .with_edge(1, 2)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert!(graph.attribute("team").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    node_count: usize,
    directed: bool,
    attributes: Vec<(String, Vec<AttributeValue>)>,
    edges: Vec<(usize, usize)>,
}

impl GraphBuilder {
    /// Creates a builder for a graph with `node_count` nodes.
    ///
    /// The graph is undirected unless [`GraphBuilder::directed`] says
    /// otherwise.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            directed: false,
            attributes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Sets whether the graph stores ordered arcs.
    #[must_use]
    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// Registers a named attribute column, one value per node.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, values: Vec<AttributeValue>) -> Self {
        self.attributes.push((name.to_owned(), values));
        self
    }

    /// Queues an edge from `i` to `j` for insertion at build time.
    #[must_use]
    pub fn with_edge(mut self, i: usize, j: usize) -> Self {
        self.edges.push((i, j));
        self
    }

    /// Queues every edge in `edges` for insertion at build time.
    #[must_use]
    pub fn with_edges<I: IntoIterator<Item = (usize, usize)>>(mut self, edges: I) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Validates the configuration and constructs the graph.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyNodeSet`] for a zero node count,
    /// [`GraphError::AttributeLengthMismatch`] or
    /// [`GraphError::DuplicateAttribute`] for malformed attribute columns,
    /// and [`GraphError::NodeOutOfRange`], [`GraphError::SelfLoop`], or
    /// [`GraphError::DuplicateEdge`] for malformed edges.
    pub fn build(self) -> Result<Graph, GraphError> {
        let mut graph = Graph::new(self.node_count, self.directed)?;
        for (name, values) in self.attributes {
            graph.insert_attribute(&name, values)?;
        }
        for (i, j) in self.edges {
            graph.add_edge(i, j)?;
        }
        Ok(graph)
    }
}
