//! Maguro core library: exact computation for exponential random graph
//! models (ERGMs) at pedagogical sizes.
//!
//! The crate covers the deterministic side of ERGM analysis: evaluating
//! network statistics and their change statistics under dyad toggles,
//! computing exact model probabilities by enumerating every labeled graph of
//! a small network, and deriving mixing-matrix segregation measures
//! (assortativity, Freeman, Coleman). Fitting is out of scope; a [`Model`]
//! carries coefficients estimated elsewhere.
//!
//! # Directed conventions
//!
//! Triangles on directed graphs are 3-cycles (`i -> j -> k -> i`), and the
//! shared partners of an arc `(i, j)` are the nodes closing such a cycle.
//! The same convention backs [`evaluate`] and [`change_statistics`], which
//! is what keeps the change-statistic identity `g(y+) - g(y-)` exact.
//!
//! # Enumeration bounds
//!
//! [`enumerate_all`] refuses node counts above
//! [`MAX_UNDIRECTED_NODES`] / [`MAX_DIRECTED_NODES`]: the labeled-graph
//! space doubles with every dyad slot, and the caps hold a full run at
//! about a million materialized graphs. Exact distributions are a teaching
//! instrument, not an inference engine.
//!
//! # Metrics
//!
//! When the `metrics` feature is enabled the census emits:
//!
//! - `census_graphs_enumerated` (counter)
//! - `census_classes_built` (counter)
//!
//! These metric names are stable for downstream crates.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod census;
mod change;
mod error;
mod graph;
mod mixing;
mod probability;
mod segregation;
mod statistics;
mod term;

pub use crate::{
    builder::GraphBuilder,
    census::{CanonicalClass, MAX_DIRECTED_NODES, MAX_UNDIRECTED_NODES, classify, enumerate_all},
    change::change_statistics,
    error::{GraphError, GraphErrorCode, MaguroError, MaguroErrorCode, Result},
    graph::{AttributeValue, Direction, Graph},
    mixing::MixingMatrix,
    probability::{Distribution, conditional_tie_probability, distribution, unnormalized_weight},
    segregation::{assortativity, coleman_index, freeman_index},
    statistics::evaluate,
    term::{Model, Term},
};
