//! Shared test fixtures used across maguro crates.

pub mod fixtures {
    //! Deterministic graphs with known statistics for tests and benches.

    use maguro_core::{AttributeValue, Graph, GraphBuilder};

    /// Number of pupils in the first classroom hall.
    pub const CLASSROOM_HALL_EAST: usize = 14;
    /// Number of pupils in the second classroom hall.
    pub const CLASSROOM_HALL_WEST: usize = 12;
    /// Friendship ties inside either hall.
    pub const CLASSROOM_WITHIN_TIES: usize = 81;
    /// Friendship ties crossing the halls.
    pub const CLASSROOM_BETWEEN_TIES: usize = 7;

    /// The classroom friendship network: 26 pupils split across two halls
    /// (14 and 12), with 88 undirected ties of which 7 cross the halls.
    ///
    /// Within-hall ties fill the lexicographically first dyads of each
    /// hall (45 east, 36 west), and the 7 crossing ties pair pupils
    /// `(0, 14) .. (6, 20)`, so every derived count is reproducible.
    ///
    /// # Panics
    /// Panics if the fixture definition itself is malformed; fixture
    /// construction is infallible for correct constants.
    #[must_use]
    pub fn classroom() -> Graph {
        let east = CLASSROOM_HALL_EAST;
        let total = CLASSROOM_HALL_EAST + CLASSROOM_HALL_WEST;

        let mut halls = Vec::with_capacity(total);
        halls.resize(east, AttributeValue::Category("east".to_owned()));
        halls.resize(total, AttributeValue::Category("west".to_owned()));

        let mut edges = Vec::new();
        edges.extend(leading_dyads(0, east, 45));
        edges.extend(leading_dyads(east, total, 36));
        edges.extend((0..CLASSROOM_BETWEEN_TIES).map(|k| (k, east + k)));

        GraphBuilder::new(total)
            .with_attribute("hall", halls)
            .with_edges(edges)
            .build()
            .expect("classroom fixture is well-formed")
    }

    /// The lexicographically first `count` dyads among nodes in
    /// `low..high`.
    fn leading_dyads(low: usize, high: usize, count: usize) -> Vec<(usize, usize)> {
        (low..high)
            .flat_map(|i| ((i + 1)..high).map(move |j| (i, j)))
            .take(count)
            .collect()
    }

    /// A path on `n` nodes: edges `(0,1), (1,2), ...`.
    ///
    /// # Panics
    /// Panics for `n == 0`.
    #[must_use]
    pub fn path(n: usize) -> Graph {
        GraphBuilder::new(n)
            .with_edges((1..n).map(|i| (i - 1, i)))
            .build()
            .expect("path fixture is well-formed")
    }

    /// A cycle on `n >= 3` nodes.
    ///
    /// # Panics
    /// Panics for `n < 3`.
    #[must_use]
    pub fn cycle(n: usize) -> Graph {
        GraphBuilder::new(n)
            .with_edges((1..n).map(|i| (i - 1, i)))
            .with_edge(n - 1, 0)
            .build()
            .expect("cycle fixture is well-formed")
    }

    /// The complete graph on `n` nodes.
    ///
    /// # Panics
    /// Panics for `n == 0`.
    #[must_use]
    pub fn complete(n: usize) -> Graph {
        GraphBuilder::new(n)
            .with_edges((0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))))
            .build()
            .expect("complete fixture is well-formed")
    }

    /// Two disjoint cliques of `size` nodes each, labeled `"a"` and `"b"`
    /// under the `"clique"` attribute. No tie crosses the cliques.
    ///
    /// # Panics
    /// Panics for `size == 0`.
    #[must_use]
    pub fn two_cliques(size: usize) -> Graph {
        let total = 2 * size;
        let mut labels = Vec::with_capacity(total);
        labels.resize(size, AttributeValue::Category("a".to_owned()));
        labels.resize(total, AttributeValue::Category("b".to_owned()));

        let within = |offset: usize| {
            (offset..offset + size).flat_map(move |i| ((i + 1)..offset + size).map(move |j| (i, j)))
        };
        GraphBuilder::new(total)
            .with_attribute("clique", labels)
            .with_edges(within(0))
            .with_edges(within(size))
            .build()
            .expect("two-clique fixture is well-formed")
    }
}
