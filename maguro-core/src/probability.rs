//! Exact ERGM probabilities over enumerated graph classes.
//!
//! With every labeled graph of a small network enumerated and grouped into
//! canonical classes, the model probabilities are exact: each class carries
//! weight `multiplicity * exp(theta.g)` and the normalizing constant is the
//! plain sum over classes. Normalization shifts by the maximum exponent
//! first, so strongly weighted models stay inside `f64` range.

use tracing::{debug, instrument};

use crate::{
    census::CanonicalClass,
    change::change_statistics,
    error::Result,
    graph::Graph,
    statistics::evaluate,
    term::Model,
};

/// The exact probability distribution over a set of canonical classes.
///
/// Probabilities are aligned with the class slice that produced the
/// distribution: entry `c` is the probability that a random graph drawn from
/// the model lies in class `c`. Per-labeled-graph probabilities divide out
/// the multiplicity, and the expected statistic vector summarizes the model
/// in its mean-value parameterization.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
    class_probabilities: Vec<f64>,
    multiplicities: Vec<usize>,
    expected_statistics: Vec<f64>,
}

impl Distribution {
    /// Returns the per-class probabilities, summing to one.
    #[must_use]
    pub fn class_probabilities(&self) -> &[f64] {
        &self.class_probabilities
    }

    /// Returns the probability of one labeled graph in class `class_index`.
    ///
    /// Every labeled member of a class shares the class weight, so this is
    /// the class probability divided by the multiplicity, the quantity that
    /// is uniform across all labeled graphs under the null model.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "multiplicities stay far below 2^52 at enumerable sizes"
    )]
    pub fn labeled_probability(&self, class_index: usize) -> Option<f64> {
        let probability = self.class_probabilities.get(class_index)?;
        let multiplicity = *self.multiplicities.get(class_index)?;
        Some(probability / multiplicity as f64)
    }

    /// Returns the expected statistic vector `E[g]` under the distribution,
    /// in the model's term order.
    #[must_use]
    pub fn expected_statistics(&self) -> &[f64] {
        &self.expected_statistics
    }

    /// Returns the number of classes the distribution covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.class_probabilities.len()
    }

    /// Returns whether the distribution covers no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_probabilities.is_empty()
    }
}

/// Computes the unnormalized ERGM weight `exp(theta . g(graph))`.
///
/// # Errors
/// Returns the term and attribute errors of [`evaluate`].
pub fn unnormalized_weight(graph: &Graph, model: &Model) -> Result<f64> {
    let statistics = evaluate(graph, model.terms())?;
    Ok(model.linear_predictor(&statistics).exp())
}

/// Normalizes class weights into the exact model distribution.
///
/// # Errors
/// Returns the term and attribute errors of [`evaluate`] for the model
/// terms on any class representative.
///
/// # Examples
/// ```
/// use maguro_core::{Model, Term, classify, distribution, enumerate_all};
///
/// let graphs = enumerate_all(4, false).expect("under the cap");
/// let classes = classify(graphs, &[Term::Edges, Term::Triangles]).expect("valid terms");
/// let model = Model::new(vec![(Term::Edges, -0.5)]).expect("valid model");
/// let dist = distribution(&classes, &model).expect("valid model");
/// let total: f64 = dist.class_probabilities().iter().sum();
/// assert!((total - 1.0).abs() < 1e-9);
/// ```
#[instrument(skip(classes, model), fields(classes = classes.len(), terms = model.len()))]
#[expect(
    clippy::cast_precision_loss,
    reason = "multiplicities stay far below 2^52 at enumerable sizes"
)]
pub fn distribution(classes: &[CanonicalClass], model: &Model) -> Result<Distribution> {
    let mut statistics = Vec::with_capacity(classes.len());
    let mut log_weights = Vec::with_capacity(classes.len());
    for class in classes {
        let stats = evaluate(class.representative(), model.terms())?;
        let log_weight = (class.multiplicity() as f64).ln() + model.linear_predictor(&stats);
        statistics.push(stats);
        log_weights.push(log_weight);
    }

    let shift = log_weights
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let shifted: Vec<f64> = log_weights
        .iter()
        .map(|log_weight| (log_weight - shift).exp())
        .collect();
    let normalizer: f64 = shifted.iter().sum();
    let class_probabilities: Vec<f64> =
        shifted.iter().map(|weight| weight / normalizer).collect();

    let mut expected_statistics = vec![0.0; model.len()];
    for (probability, stats) in class_probabilities.iter().zip(&statistics) {
        for (expectation, value) in expected_statistics.iter_mut().zip(stats) {
            *expectation += probability * value;
        }
    }

    debug!(normalizer, shift, "normalized exact distribution");
    Ok(Distribution {
        class_probabilities,
        multiplicities: classes.iter().map(CanonicalClass::multiplicity).collect(),
        expected_statistics,
    })
}

/// Computes the conditional probability that `dyad` is tied given the rest
/// of the graph: `1 / (1 + exp(-theta.delta))` with delta the change-statistic vector.
///
/// The borrow is mutable for the internal toggle-compute-revert sequence;
/// the graph is returned bit-identical.
///
/// # Errors
/// Returns [`crate::MaguroError::Graph`] for an invalid dyad and the term
/// and attribute errors of [`change_statistics`].
///
/// # Examples
/// ```
/// use maguro_core::{GraphBuilder, Model, Term, conditional_tie_probability};
///
/// let mut graph = GraphBuilder::new(4)
///     .with_edges([(0, 1), (1, 2), (2, 3)])
///     .build()
///     .expect("valid graph");
/// let model = Model::new(vec![(Term::Edges, -0.5), (Term::TwoPath, 0.2)])
///     .expect("valid model");
/// // Toggling (1, 3) creates one edge and three two-paths.
/// let p = conditional_tie_probability(&mut graph, (1, 3), &model)
///     .expect("valid dyad and model");
/// let logit: f64 = -0.5 + 0.2 * 3.0;
/// assert!((p - 1.0 / (1.0 + (-logit).exp())).abs() < 1e-12);
/// ```
pub fn conditional_tie_probability(
    graph: &mut Graph,
    dyad: (usize, usize),
    model: &Model,
) -> Result<f64> {
    let delta = change_statistics(graph, dyad, model.terms())?;
    let logit = model.linear_predictor(&delta);
    Ok(1.0 / (1.0 + (-logit).exp()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::GraphBuilder, census::classify, census::enumerate_all, term::Term};

    fn four_node_classes() -> Vec<CanonicalClass> {
        let graphs = enumerate_all(4, false).expect("under the cap");
        classify(graphs, &[Term::Edges, Term::Triangles]).expect("terms are valid")
    }

    #[test]
    fn probabilities_sum_to_one() {
        let classes = four_node_classes();
        let model = Model::new(vec![(Term::Edges, -0.5), (Term::Triangles, 0.3)])
            .expect("terms are distinct");
        let dist = distribution(&classes, &model).expect("model evaluates");
        let total: f64 = dist.class_probabilities().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn null_model_is_uniform_over_labeled_graphs() {
        let classes = four_node_classes();
        let model = Model::new(vec![(Term::Edges, 0.0)]).expect("term is valid");
        let dist = distribution(&classes, &model).expect("model evaluates");
        for (index, class) in classes.iter().enumerate() {
            let labeled = dist.labeled_probability(index).expect("index in range");
            assert!((labeled - 1.0 / 64.0).abs() < 1e-12);
            let class_probability = dist.class_probabilities()[index];
            #[expect(
                clippy::cast_precision_loss,
                reason = "multiplicities are tiny in this census"
            )]
            let expected = class.multiplicity() as f64 / 64.0;
            assert!((class_probability - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn expected_statistics_match_hand_computation() {
        // Null model on 4 nodes: each of the 6 possible edges is present in
        // half of the 64 graphs, so E[edges] = 3.
        let classes = four_node_classes();
        let model = Model::new(vec![(Term::Edges, 0.0)]).expect("term is valid");
        let dist = distribution(&classes, &model).expect("model evaluates");
        assert!((dist.expected_statistics()[0] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn weight_is_exponential_in_the_statistics() {
        let graph = GraphBuilder::new(3)
            .with_edges([(0, 1), (1, 2)])
            .build()
            .expect("valid graph");
        let model = Model::new(vec![(Term::Edges, 0.25)]).expect("term is valid");
        let weight = unnormalized_weight(&graph, &model).expect("model evaluates");
        assert!((weight - (0.5_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn conditional_probability_uses_change_statistics() {
        let mut graph = GraphBuilder::new(4)
            .with_edges([(0, 1), (1, 2), (2, 3)])
            .build()
            .expect("valid graph");
        let pristine = graph.clone();
        let model = Model::new(vec![(Term::Edges, -0.5), (Term::TwoPath, 0.2)])
            .expect("terms are distinct");
        let p = conditional_tie_probability(&mut graph, (1, 3), &model)
            .expect("dyad and model are valid");
        assert_eq!(graph, pristine);
        let logit: f64 = 0.1;
        assert!((p - 1.0 / (1.0 + (-logit).exp())).abs() < 1e-12);
    }
}
