//! Model terms and coefficient vectors.
//!
//! [`Term`] is a closed tagged-variant type: one variant per statistic kind,
//! each carrying only the parameters that kind needs. Evaluation dispatches
//! over the variants directly, so an unknown term name is unrepresentable.

use std::fmt;

use crate::error::{MaguroError, Result};

/// A named network statistic specification.
///
/// See [`crate::evaluate`] for the per-term formulas and the directed-graph
/// conventions.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Term {
    /// Edge (arc) count.
    Edges,
    /// `sum_i C(degree(i), k)` over total degrees, `k >= 2`.
    KStar {
        /// Star order.
        k: usize,
    },
    /// Two-path count: `kstar(2)` on undirected graphs, directed paths
    /// `i -> j -> k` on directed graphs.
    TwoPath,
    /// Triangle count; directed graphs count 3-cycles.
    Triangles,
    /// Mutual dyad count; directed graphs only.
    Mutual,
    /// Activity of both endpoints: `sum over edges (i, j) of (x_i + x_j)`.
    NodeOFactor {
        /// Name of the numeric node attribute.
        attribute: String,
    },
    /// In-degree-weighted attribute sum: `sum_i x_i * indegree(i)`.
    NodeIFactor {
        /// Name of the numeric node attribute.
        attribute: String,
    },
    /// Out-degree-weighted attribute sum: `sum_i x_i * outdegree(i)`.
    NodeEFactor {
        /// Name of the numeric node attribute.
        attribute: String,
    },
    /// Homophily count: edges whose endpoints share an attribute value.
    NodeMatch {
        /// Name of the node attribute compared for equality.
        attribute: String,
    },
    /// Heterophily magnitude: `sum over edges of |x_i - x_j|`.
    AbsDiff {
        /// Name of the numeric node attribute.
        attribute: String,
    },
    /// Geometrically weighted edgewise shared partners with fixed decay.
    Gwesp {
        /// Decay parameter, strictly positive.
        alpha: f64,
        /// Must be `true`; the curved variant is unsupported.
        fixed: bool,
    },
}

impl Term {
    /// Checks the variant's parameters.
    ///
    /// # Errors
    /// Returns [`MaguroError::InvalidStarOrder`] for `kstar` with `k < 2`,
    /// [`MaguroError::InvalidGwespDecay`] for `gwesp` with `alpha <= 0`, and
    /// [`MaguroError::CurvedGwespUnsupported`] for `gwesp` with
    /// `fixed == false`.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::KStar { k } if k < 2 => Err(MaguroError::InvalidStarOrder { k }),
            Self::Gwesp { alpha, .. } if alpha <= 0.0 => {
                Err(MaguroError::InvalidGwespDecay { alpha })
            }
            Self::Gwesp { fixed: false, .. } => Err(MaguroError::CurvedGwespUnsupported),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edges => write!(f, "edges"),
            Self::KStar { k } => write!(f, "kstar({k})"),
            Self::TwoPath => write!(f, "twopath"),
            Self::Triangles => write!(f, "triangles"),
            Self::Mutual => write!(f, "mutual"),
            Self::NodeOFactor { attribute } => write!(f, "nodeofactor({attribute})"),
            Self::NodeIFactor { attribute } => write!(f, "nodeifactor({attribute})"),
            Self::NodeEFactor { attribute } => write!(f, "nodeefactor({attribute})"),
            Self::NodeMatch { attribute } => write!(f, "nodematch({attribute})"),
            Self::AbsDiff { attribute } => write!(f, "absdiff({attribute})"),
            Self::Gwesp { alpha, .. } => write!(f, "gwesp({alpha})"),
        }
    }
}

/// An ordered sequence of terms paired with fitted coefficients.
///
/// Term order fixes the coordinate order of every statistic and
/// change-statistic vector computed for the model, so a `Model` built from
/// externally fitted coefficients keeps their original alignment.
///
/// # Examples
/// ```
/// use maguro_core::{Model, Term};
///
/// let model = Model::new(vec![
///     (Term::Edges, -0.5),
///     (Term::TwoPath, 0.2),
/// ])
/// .expect("terms are distinct and valid");
/// assert_eq!(model.len(), 2);
/// assert!((model.linear_predictor(&[1.0, 3.0]) - 0.1).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    terms: Vec<Term>,
    coefficients: Vec<f64>,
}

impl Model {
    /// Builds a model from `(term, coefficient)` pairs.
    ///
    /// # Errors
    /// Returns [`MaguroError::DuplicateTerm`] when the same `(name,
    /// parameters)` combination appears twice, or the underlying parameter
    /// error when a term fails [`Term::validate`].
    pub fn new(pairs: Vec<(Term, f64)>) -> Result<Self> {
        let mut terms = Vec::with_capacity(pairs.len());
        let mut coefficients = Vec::with_capacity(pairs.len());
        for (term, coefficient) in pairs {
            term.validate()?;
            if terms.contains(&term) {
                return Err(MaguroError::DuplicateTerm {
                    term: term.to_string(),
                });
            }
            terms.push(term);
            coefficients.push(coefficient);
        }
        Ok(Self {
            terms,
            coefficients,
        })
    }

    /// Returns the terms in coordinate order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Returns the coefficients in coordinate order.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns whether the model has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Computes `theta . g` for a statistic or change-statistic vector.
    ///
    /// `statistics` must have one entry per term, in term order.
    #[must_use]
    pub fn linear_predictor(&self, statistics: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(statistics)
            .map(|(theta, g)| theta * g)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_star_order() {
        assert_eq!(
            Term::KStar { k: 1 }.validate(),
            Err(MaguroError::InvalidStarOrder { k: 1 })
        );
        assert!(Term::KStar { k: 2 }.validate().is_ok());
    }

    #[test]
    fn validates_gwesp_parameters() {
        assert_eq!(
            Term::Gwesp { alpha: 0.0, fixed: true }.validate(),
            Err(MaguroError::InvalidGwespDecay { alpha: 0.0 })
        );
        assert_eq!(
            Term::Gwesp { alpha: 0.5, fixed: false }.validate(),
            Err(MaguroError::CurvedGwespUnsupported)
        );
        assert!(Term::Gwesp { alpha: 0.5, fixed: true }.validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_terms() {
        let result = Model::new(vec![(Term::Edges, 1.0), (Term::Edges, 2.0)]);
        assert_eq!(
            result,
            Err(MaguroError::DuplicateTerm { term: "edges".to_owned() })
        );
    }

    #[test]
    fn distinguishes_parameterized_terms() {
        let model = Model::new(vec![
            (Term::KStar { k: 2 }, 0.1),
            (Term::KStar { k: 3 }, 0.2),
        ])
        .expect("different star orders are distinct terms");
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn surfaces_term_validation_in_model_construction() {
        let result = Model::new(vec![(Term::Gwesp { alpha: -1.0, fixed: true }, 0.3)]);
        assert_eq!(result, Err(MaguroError::InvalidGwespDecay { alpha: -1.0 }));
    }

    #[test]
    fn display_labels_include_parameters() {
        assert_eq!(Term::KStar { k: 3 }.to_string(), "kstar(3)");
        assert_eq!(
            Term::NodeMatch { attribute: "team".to_owned() }.to_string(),
            "nodematch(team)"
        );
        assert_eq!(Term::Gwesp { alpha: 0.5, fixed: true }.to_string(), "gwesp(0.5)");
    }
}
