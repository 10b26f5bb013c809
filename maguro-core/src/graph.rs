//! Directed and undirected graph representation with node attributes.
//!
//! Nodes are identified by `0..node_count`. Edges are unordered pairs for
//! undirected graphs and ordered pairs (arcs) for directed graphs; self-loops
//! and multi-edges are rejected. Node attributes are stored as named columns
//! with one [`AttributeValue`] per node.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::GraphError;

/// Degree direction selector.
///
/// Undirected graphs ignore the selector and always report total degree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    /// Arcs arriving at the node.
    In,
    /// Arcs leaving the node.
    Out,
    /// All incident ties (in plus out for directed graphs).
    Total,
}

/// A single node-attribute value.
///
/// Attribute columns are homogeneous in intent but heterogeneity is not
/// rejected at construction; terms that require numeric values surface
/// per-node coercion failures instead.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// A boolean marker, coerced to 1.0/0.0 by numeric terms.
    Flag(bool),
    /// A categorical label, usable for matching and grouping only.
    Category(String),
    /// A real-valued measurement.
    Number(f64),
}

impl AttributeValue {
    /// Returns the numeric coercion of the value, if one exists.
    ///
    /// `Flag` coerces to an indicator; `Category` has no numeric form.
    #[must_use]
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Self::Flag(true) => Some(1.0),
            Self::Flag(false) => Some(0.0),
            Self::Number(value) => Some(*value),
            Self::Category(_) => None,
        }
    }
}

/// A simple labeled graph with optional node attributes.
///
/// Directedness is fixed at construction. The only mutations are
/// [`Graph::add_edge`], [`Graph::remove_edge`], and [`Graph::toggle`]; the
/// node set and attribute table never change after [`crate::GraphBuilder`]
/// hands the graph over.
///
/// # Examples
/// ```
/// use maguro_core::{Direction, GraphBuilder};
///
/// let mut graph = GraphBuilder::new(3)
///     .with_edge(0, 1)
///     .build()
///     .expect("valid graph");
/// assert!(graph.has_edge(1, 0));
/// assert_eq!(graph.degree(1, Direction::Total).expect("in range"), 1);
///
/// let was_present = graph.toggle(1, 2).expect("in range");
/// assert!(!was_present);
/// assert_eq!(graph.edge_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    node_count: usize,
    directed: bool,
    out_neighbours: Vec<BTreeSet<usize>>,
    in_neighbours: Vec<BTreeSet<usize>>,
    edge_count: usize,
    attributes: BTreeMap<String, Vec<AttributeValue>>,
}

impl Graph {
    /// Creates an empty graph with `node_count` nodes and no attributes.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyNodeSet`] when `node_count` is zero.
    pub fn new(node_count: usize, directed: bool) -> Result<Self, GraphError> {
        if node_count == 0 {
            return Err(GraphError::EmptyNodeSet);
        }
        Ok(Self {
            node_count,
            directed,
            out_neighbours: vec![BTreeSet::new(); node_count],
            in_neighbours: vec![BTreeSet::new(); node_count],
            edge_count: 0,
            attributes: BTreeMap::new(),
        })
    }

    pub(crate) fn insert_attribute(
        &mut self,
        name: &str,
        values: Vec<AttributeValue>,
    ) -> Result<(), GraphError> {
        if values.len() != self.node_count {
            return Err(GraphError::AttributeLengthMismatch {
                attribute: name.into(),
                expected: self.node_count,
                got: values.len(),
            });
        }
        if self.attributes.contains_key(name) {
            return Err(GraphError::DuplicateAttribute {
                attribute: name.into(),
            });
        }
        self.attributes.insert(name.to_owned(), values);
        Ok(())
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of edges (arcs for directed graphs).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns whether the graph is directed.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns the attribute column registered under `name`, if any.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&[AttributeValue]> {
        self.attributes.get(name).map(Vec::as_slice)
    }

    fn check_endpoints(&self, i: usize, j: usize) -> Result<(), GraphError> {
        for node in [i, j] {
            if node >= self.node_count {
                return Err(GraphError::NodeOutOfRange {
                    node,
                    node_count: self.node_count,
                });
            }
        }
        if i == j {
            return Err(GraphError::SelfLoop { node: i });
        }
        Ok(())
    }

    /// Returns whether the edge (arc) from `i` to `j` is present.
    ///
    /// For undirected graphs `(i, j)` and `(j, i)` are the same edge.
    /// Out-of-range endpoints report absence rather than erroring, so the
    /// query can be used freely in counting loops.
    #[must_use]
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.out_neighbours
            .get(i)
            .is_some_and(|neighbours| neighbours.contains(&j))
    }

    /// Inserts the edge from `i` to `j`.
    ///
    /// Insertion is not idempotent: callers that need no-op semantics must
    /// check [`Graph::has_edge`] first.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`], [`GraphError::SelfLoop`], or
    /// [`GraphError::DuplicateEdge`].
    pub fn add_edge(&mut self, i: usize, j: usize) -> Result<(), GraphError> {
        self.check_endpoints(i, j)?;
        if self.has_edge(i, j) {
            return Err(GraphError::DuplicateEdge {
                source: i,
                target: j,
            });
        }
        self.link(i, j);
        Ok(())
    }

    /// Removes the edge from `i` to `j`.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`], [`GraphError::SelfLoop`], or
    /// [`GraphError::EdgeAbsent`].
    pub fn remove_edge(&mut self, i: usize, j: usize) -> Result<(), GraphError> {
        self.check_endpoints(i, j)?;
        if !self.has_edge(i, j) {
            return Err(GraphError::EdgeAbsent {
                source: i,
                target: j,
            });
        }
        self.unlink(i, j);
        Ok(())
    }

    /// Flips the presence of the edge from `i` to `j` and reports the
    /// previous state.
    ///
    /// Applying `toggle` twice to the same dyad restores the adjacency
    /// structure exactly, which is what makes toggle-compute-revert
    /// sequences in the change-statistic engine safe.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`] or [`GraphError::SelfLoop`].
    ///
    /// # Examples
    /// ```
    /// use maguro_core::GraphBuilder;
    ///
    /// let mut graph = GraphBuilder::new(2).build().expect("valid graph");
    /// let before = graph.clone();
    /// assert!(!graph.toggle(0, 1).expect("in range"));
    /// assert!(graph.toggle(0, 1).expect("in range"));
    /// assert_eq!(graph, before);
    /// ```
    pub fn toggle(&mut self, i: usize, j: usize) -> Result<bool, GraphError> {
        self.check_endpoints(i, j)?;
        let was_present = self.has_edge(i, j);
        if was_present {
            self.unlink(i, j);
        } else {
            self.link(i, j);
        }
        Ok(was_present)
    }

    fn link(&mut self, i: usize, j: usize) {
        self.out_neighbours[i].insert(j);
        if self.directed {
            self.in_neighbours[j].insert(i);
        } else {
            self.out_neighbours[j].insert(i);
        }
        self.edge_count += 1;
    }

    fn unlink(&mut self, i: usize, j: usize) {
        self.out_neighbours[i].remove(&j);
        if self.directed {
            self.in_neighbours[j].remove(&i);
        } else {
            self.out_neighbours[j].remove(&i);
        }
        self.edge_count -= 1;
    }

    /// Returns the degree of `node` in the requested direction.
    ///
    /// Undirected graphs ignore `direction` and report total degree.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`] for an invalid node.
    pub fn degree(&self, node: usize, direction: Direction) -> Result<usize, GraphError> {
        if node >= self.node_count {
            return Err(GraphError::NodeOutOfRange {
                node,
                node_count: self.node_count,
            });
        }
        let degree = if self.directed {
            match direction {
                Direction::Out => self.out_neighbours[node].len(),
                Direction::In => self.in_neighbours[node].len(),
                Direction::Total => self.out_neighbours[node].len() + self.in_neighbours[node].len(),
            }
        } else {
            self.out_neighbours[node].len()
        };
        Ok(degree)
    }

    /// Returns the nodes adjacent to both `i` and `j`.
    ///
    /// For directed graphs adjacency means any incident arc (in or out), so
    /// the result is the intersection of the total neighbourhoods. The
    /// directed-closure statistics use [`Graph::cyclic_shared_partners`]
    /// instead.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`] or [`GraphError::SelfLoop`].
    pub fn common_neighbours(&self, i: usize, j: usize) -> Result<BTreeSet<usize>, GraphError> {
        self.check_endpoints(i, j)?;
        let left = self.total_neighbourhood(i);
        let right = self.total_neighbourhood(j);
        Ok(left.intersection(&right).copied().collect())
    }

    fn total_neighbourhood(&self, node: usize) -> BTreeSet<usize> {
        let mut all = self.out_neighbours[node].clone();
        if self.directed {
            all.extend(self.in_neighbours[node].iter().copied());
        }
        all
    }

    /// Shared partners of the dyad `(i, j)` under the closure convention in
    /// force for this graph's mode.
    ///
    /// Undirected: common neighbours of `i` and `j`. Directed: the cyclic
    /// form `{k : (j, k) present and (k, i) present}`, matching the
    /// 3-cycle triangle convention.
    pub(crate) fn shared_partners(&self, i: usize, j: usize) -> BTreeSet<usize> {
        if self.directed {
            self.cyclic_shared_partners(i, j)
        } else {
            self.out_neighbours[i]
                .intersection(&self.out_neighbours[j])
                .copied()
                .collect()
        }
    }

    /// Nodes `k` closing a directed 3-cycle `i -> j -> k -> i` once the arc
    /// `(i, j)` is present.
    pub(crate) fn cyclic_shared_partners(&self, i: usize, j: usize) -> BTreeSet<usize> {
        self.out_neighbours[j]
            .iter()
            .filter(|&&k| self.out_neighbours[k].contains(&i))
            .copied()
            .collect()
    }

    pub(crate) fn out_neighbours(&self, node: usize) -> &BTreeSet<usize> {
        &self.out_neighbours[node]
    }

    pub(crate) fn in_neighbours(&self, node: usize) -> &BTreeSet<usize> {
        if self.directed {
            &self.in_neighbours[node]
        } else {
            &self.out_neighbours[node]
        }
    }

    /// Iterates the edges of the graph.
    ///
    /// Directed graphs yield every arc; undirected graphs yield each edge
    /// once as an `(i, j)` pair with `i < j`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.out_neighbours
            .iter()
            .enumerate()
            .flat_map(move |(i, neighbours)| {
                neighbours
                    .iter()
                    .filter(move |&&j| self.directed || i < j)
                    .map(move |&j| (i, j))
            })
    }

    /// Iterates every dyad of the graph regardless of tie state.
    ///
    /// Directed graphs yield all ordered pairs `i != j`; undirected graphs
    /// yield unordered pairs as `(i, j)` with `i < j`.
    pub fn dyads(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.node_count;
        let directed = self.directed;
        (0..n).flat_map(move |i| {
            let start = if directed { 0 } else { i + 1 };
            (start..n)
                .filter(move |&j| j != i)
                .map(move |j| (i, j))
        })
    }
}
