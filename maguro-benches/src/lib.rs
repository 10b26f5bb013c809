//! Support library for maguro benchmarks.
//!
//! Provides seeded random-graph generation so benchmark inputs are
//! reproducible across runs and machines.

use maguro_core::{AttributeValue, Graph, GraphBuilder};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Generates a Bernoulli random graph with per-node attributes.
///
/// Every dyad is tied independently with probability `density`. Nodes carry
/// a numeric `score` column and a two-level categorical `hall` column so
/// attribute-based terms have something to chew on.
///
/// # Panics
/// Panics if `node_count` is zero or `density` is outside `[0, 1]`.
#[must_use]
pub fn random_graph(seed: u64, node_count: usize, density: f64, directed: bool) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);

    let score = (0..node_count)
        .map(|_| AttributeValue::Number(f64::from(rng.gen_range(0_u8..100))))
        .collect();
    let hall = (0..node_count)
        .map(|_| {
            let label = if rng.gen_bool(0.5) { "east" } else { "west" };
            AttributeValue::Category(label.to_owned())
        })
        .collect();

    let mut builder = GraphBuilder::new(node_count)
        .directed(directed)
        .with_attribute("score", score)
        .with_attribute("hall", hall);
    for i in 0..node_count {
        let start = if directed { 0 } else { i + 1 };
        for j in start..node_count {
            if j != i && rng.gen_bool(density) {
                builder = builder.with_edge(i, j);
            }
        }
    }
    builder.build().expect("generated configuration is valid")
}
