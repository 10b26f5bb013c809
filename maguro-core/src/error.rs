//! Error types for the maguro core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by structural [`crate::Graph`] operations.
///
/// `Display` and [`std::error::Error`] are implemented by hand rather than
/// derived via `thiserror`: the `DuplicateEdge`/`EdgeAbsent` variants carry a
/// field literally named `source` (an edge endpoint), which `thiserror` would
/// otherwise force to be the error source. The hand-written impls reproduce the
/// same messages and report no underlying source.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GraphError {
    /// The graph was constructed with zero nodes.
    EmptyNodeSet,
    /// An endpoint referenced a node outside `0..node_count`.
    NodeOutOfRange {
        /// The offending node identifier.
        node: usize,
        /// The number of nodes in the graph.
        node_count: usize,
    },
    /// Both endpoints of an edge were the same node.
    SelfLoop {
        /// The node referenced by both endpoints.
        node: usize,
    },
    /// The edge to insert is already present.
    DuplicateEdge {
        /// Ego endpoint of the duplicate edge.
        source: usize,
        /// Alter endpoint of the duplicate edge.
        target: usize,
    },
    /// The edge to remove is not present.
    EdgeAbsent {
        /// Ego endpoint of the missing edge.
        source: usize,
        /// Alter endpoint of the missing edge.
        target: usize,
    },
    /// An attribute column's length did not match the node count.
    AttributeLengthMismatch {
        /// Name of the malformed attribute column.
        attribute: Arc<str>,
        /// Number of nodes in the graph.
        expected: usize,
        /// Number of values supplied for the attribute.
        got: usize,
    },
    /// The same attribute name was registered twice.
    DuplicateAttribute {
        /// Name of the attribute registered twice.
        attribute: Arc<str>,
    },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNodeSet => f.write_str("graph must contain at least one node"),
            Self::NodeOutOfRange { node, node_count } => write!(
                f,
                "node {node} is out of range for a graph of {node_count} nodes"
            ),
            Self::SelfLoop { node } => write!(f, "self-loop on node {node} is not permitted"),
            Self::DuplicateEdge { source, target } => {
                write!(f, "edge ({source}, {target}) is already present")
            }
            Self::EdgeAbsent { source, target } => {
                write!(f, "edge ({source}, {target}) is not present")
            }
            Self::AttributeLengthMismatch {
                attribute,
                expected,
                got,
            } => write!(
                f,
                "attribute `{attribute}` has {got} values but the graph has {expected} nodes"
            ),
            Self::DuplicateAttribute { attribute } => {
                write!(f, "attribute `{attribute}` is already registered")
            }
        }
    }
}

impl std::error::Error for GraphError {}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The graph was constructed with zero nodes.
        EmptyNodeSet => EmptyNodeSet => "GRAPH_EMPTY_NODE_SET",
        /// An endpoint referenced a node outside the graph.
        NodeOutOfRange => NodeOutOfRange { .. } => "GRAPH_NODE_OUT_OF_RANGE",
        /// Both endpoints of an edge were the same node.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// The edge to insert is already present.
        DuplicateEdge => DuplicateEdge { .. } => "GRAPH_DUPLICATE_EDGE",
        /// The edge to remove is not present.
        EdgeAbsent => EdgeAbsent { .. } => "GRAPH_EDGE_ABSENT",
        /// An attribute column's length did not match the node count.
        AttributeLengthMismatch => AttributeLengthMismatch { .. } => "GRAPH_ATTRIBUTE_LENGTH_MISMATCH",
        /// The same attribute name was registered twice.
        DuplicateAttribute => DuplicateAttribute { .. } => "GRAPH_DUPLICATE_ATTRIBUTE",
    }
}

/// Error type produced by model specification and statistic evaluation.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MaguroError {
    /// `kstar` requires a star order of at least two.
    #[error("kstar requires k >= 2 (got {k})")]
    InvalidStarOrder {
        /// The invalid star order supplied by the caller.
        k: usize,
    },
    /// `gwesp` requires a strictly positive decay parameter.
    #[error("gwesp requires alpha > 0 (got {alpha})")]
    InvalidGwespDecay {
        /// The invalid decay parameter supplied by the caller.
        alpha: f64,
    },
    /// The curved (non-fixed) gwesp variant is not supported.
    #[error("gwesp with fixed = false (curved decay) is not supported")]
    CurvedGwespUnsupported,
    /// `mutual` is only defined for directed graphs.
    #[error("mutual requires a directed graph")]
    UndirectedMutual,
    /// A referenced node attribute is absent from the graph.
    #[error("attribute `{attribute}` is not present on the graph")]
    MissingAttribute {
        /// Name of the absent attribute.
        attribute: Arc<str>,
    },
    /// A term required a numeric attribute but found a categorical value.
    #[error("attribute `{attribute}` has a non-numeric value at node {node}")]
    AttributeNotNumeric {
        /// Name of the non-numeric attribute.
        attribute: Arc<str>,
        /// Node at which the non-numeric value was found.
        node: usize,
    },
    /// A grouping attribute must be categorical or boolean.
    #[error("attribute `{attribute}` is numeric and cannot define mixing groups")]
    GroupingNotCategorical {
        /// Name of the numeric attribute offered as a grouping.
        attribute: Arc<str>,
    },
    /// The same term appeared twice in a model.
    #[error("term `{term}` appears more than once in the model")]
    DuplicateTerm {
        /// Display label of the duplicated term.
        term: String,
    },
    /// The Freeman index is only defined for exactly two groups.
    #[error("freeman index requires exactly 2 groups (got {got})")]
    GroupCountNotTwo {
        /// Number of groups present in the mixing matrix.
        got: usize,
    },
    /// A group index exceeded the number of groups in a mixing matrix.
    #[error("group {group} is out of range for a mixing matrix of {group_count} groups")]
    GroupOutOfRange {
        /// The offending group index.
        group: usize,
        /// Number of groups present in the mixing matrix.
        group_count: usize,
    },
    /// An enumeration request exceeded the hard safety cap.
    #[error("enumeration of {requested} nodes (directed: {directed}) exceeds the cap of {cap}")]
    EnumerationCapExceeded {
        /// Node count requested by the caller.
        requested: usize,
        /// Largest node count the engine will enumerate.
        cap: usize,
        /// Whether the request was for directed graphs.
        directed: bool,
    },
    /// A structural graph operation failed during evaluation.
    #[error("graph operation failed: {0}")]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`MaguroError`] variants.
    enum MaguroErrorCode for MaguroError {
        /// `kstar` requires a star order of at least two.
        InvalidStarOrder => InvalidStarOrder { .. } => "MAGURO_INVALID_STAR_ORDER",
        /// `gwesp` requires a strictly positive decay parameter.
        InvalidGwespDecay => InvalidGwespDecay { .. } => "MAGURO_INVALID_GWESP_DECAY",
        /// The curved (non-fixed) gwesp variant is not supported.
        CurvedGwespUnsupported => CurvedGwespUnsupported => "MAGURO_CURVED_GWESP_UNSUPPORTED",
        /// `mutual` is only defined for directed graphs.
        UndirectedMutual => UndirectedMutual => "MAGURO_UNDIRECTED_MUTUAL",
        /// A referenced node attribute is absent from the graph.
        MissingAttribute => MissingAttribute { .. } => "MAGURO_MISSING_ATTRIBUTE",
        /// A term required a numeric attribute but found a categorical value.
        AttributeNotNumeric => AttributeNotNumeric { .. } => "MAGURO_ATTRIBUTE_NOT_NUMERIC",
        /// A grouping attribute must be categorical or boolean.
        GroupingNotCategorical => GroupingNotCategorical { .. } => "MAGURO_GROUPING_NOT_CATEGORICAL",
        /// The same term appeared twice in a model.
        DuplicateTerm => DuplicateTerm { .. } => "MAGURO_DUPLICATE_TERM",
        /// The Freeman index is only defined for exactly two groups.
        GroupCountNotTwo => GroupCountNotTwo { .. } => "MAGURO_GROUP_COUNT_NOT_TWO",
        /// A group index exceeded the number of groups in a mixing matrix.
        GroupOutOfRange => GroupOutOfRange { .. } => "MAGURO_GROUP_OUT_OF_RANGE",
        /// An enumeration request exceeded the hard safety cap.
        EnumerationCapExceeded => EnumerationCapExceeded { .. } => "MAGURO_ENUMERATION_CAP_EXCEEDED",
        /// A structural graph operation failed during evaluation.
        GraphFailure => Graph { .. } => "MAGURO_GRAPH_FAILURE",
    }
}

impl MaguroError {
    /// Retrieve the inner [`GraphErrorCode`] when the error originated in a structural operation.
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, MaguroError>;
