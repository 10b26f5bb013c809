//! Fixture generation for change-statistic property tests.
//!
//! Produces random graphs in both modes with numeric and categorical
//! attribute columns, plus a probe dyad. Density is sampled per fixture so
//! the suite covers near-empty graphs (no shared partners) through dense
//! ones (every delta path active).

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{builder::GraphBuilder, graph::AttributeValue, graph::Graph};

/// Smallest generated node count; three nodes give the first triangles.
const MIN_NODES: usize = 3;
/// Largest generated node count; big enough for several shared partners.
const MAX_NODES: usize = 9;

/// A generated graph plus the dyad to probe.
#[derive(Clone, Debug)]
pub(super) struct ChangeFixture {
    /// Graph under test, carrying `score` and `team` attribute columns.
    pub graph: Graph,
    /// Probe dyad; may or may not be tied in the generated graph.
    pub dyad: (usize, usize),
}

/// Generates fixtures across both graph modes and the full density range.
pub(super) fn change_fixture_strategy() -> impl Strategy<Value = ChangeFixture> {
    (any::<u64>(), any::<bool>())
        .prop_map(|(seed, directed)| generate_fixture(seed, directed))
}

/// Generates a fixture for one seed and mode, deterministically.
pub(super) fn generate_fixture(seed: u64, directed: bool) -> ChangeFixture {
    let mut rng = SmallRng::seed_from_u64(seed);
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let edge_probability: f64 = rng.gen_range(0.05..=0.75);

    let score = (0..node_count)
        .map(|_| AttributeValue::Number(f64::from(rng.gen_range(0_u8..6))))
        .collect();
    let teams = ["red", "blue", "green"];
    let team = (0..node_count)
        .map(|_| AttributeValue::Category(teams[rng.gen_range(0..teams.len())].to_owned()))
        .collect();

    let mut builder = GraphBuilder::new(node_count)
        .directed(directed)
        .with_attribute("score", score)
        .with_attribute("team", team);
    for i in 0..node_count {
        let start = if directed { 0 } else { i + 1 };
        for j in start..node_count {
            if j != i && rng.gen_bool(edge_probability) {
                builder = builder.with_edge(i, j);
            }
        }
    }
    let graph = builder.build().expect("generated configuration is valid");

    let i = rng.gen_range(0..node_count);
    let offset = rng.gen_range(1..node_count);
    let j = (i + offset) % node_count;
    ChangeFixture { graph, dyad: (i, j) }
}
