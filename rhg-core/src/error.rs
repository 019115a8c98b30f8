//! Error types for the random hyperbolic graph core.
//!
//! Domain errors reject invalid coordinates and parameters at the call that
//! introduces them. Replay errors surface at the event-consumer boundary when a
//! stream contradicts the state of the graph it is applied to.

use std::fmt;

use thiserror::Error;

use crate::PointId;

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
            #[must_use]
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
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Errors produced while validating inputs or building indexes and graphs.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeneratorError {
    /// A radial coordinate lies outside the disk (or is not finite).
    #[error("point {point} has radius {radius}, outside the disk of radius {bound}")]
    OutsideDisk {
        /// Identity of the offending point.
        point: PointId,
        /// Radial coordinate supplied by the caller.
        radius: f64,
        /// Euclidean radius of the disk.
        bound: f64,
    },
    /// An angular coordinate lies outside `[0, 2π)` (or is not finite).
    #[error("point {point} has angle {angle}, outside [0, 2π)")]
    InvalidAngle {
        /// Identity of the offending point.
        point: PointId,
        /// Angular coordinate supplied by the caller.
        angle: f64,
    },
    /// A query point was not a finite point strictly inside the unit disk.
    #[error("query point (angle {angle}, radius {radius}) is not inside the unit disk")]
    InvalidQueryPoint {
        /// Angular coordinate of the query.
        angle: f64,
        /// Radial coordinate of the query.
        radius: f64,
    },
    /// A distance threshold was negative or NaN.
    #[error("distance threshold must be non-negative (got {threshold})")]
    NegativeThreshold {
        /// Threshold supplied by the caller.
        threshold: f64,
    },
    /// A model or index parameter was invalid.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// The same identity was inserted twice.
    #[error("point {point} is already indexed")]
    DuplicatePoint {
        /// Identity that was already present.
        point: PointId,
    },
    /// An operation referenced an identity that is not indexed.
    #[error("point {point} is not indexed")]
    UnknownPoint {
        /// Identity that could not be found.
        point: PointId,
    },
    /// Angle and radius sequences had different lengths.
    #[error("coordinate length mismatch: {angles} angles but {radii} radii")]
    LengthMismatch {
        /// Number of angles supplied.
        angles: usize,
        /// Number of radii supplied.
        radii: usize,
    },
    /// No disk radius yields the requested average degree.
    #[error(
        "no disk radius reaches average degree {average_degree} for {nodes} nodes with exponent {exponent}"
    )]
    UnreachableDegree {
        /// Requested node count.
        nodes: usize,
        /// Requested average degree.
        average_degree: f64,
        /// Requested power-law exponent.
        exponent: f64,
    },
}

define_error_codes! {
    /// Stable codes describing [`GeneratorError`] variants.
    enum GeneratorErrorCode for GeneratorError {
        /// A radial coordinate lies outside the disk.
        OutsideDisk => OutsideDisk { .. } => "RHG_OUTSIDE_DISK",
        /// An angular coordinate lies outside `[0, 2π)`.
        InvalidAngle => InvalidAngle { .. } => "RHG_INVALID_ANGLE",
        /// A query point was not inside the unit disk.
        InvalidQueryPoint => InvalidQueryPoint { .. } => "RHG_INVALID_QUERY_POINT",
        /// A distance threshold was negative or NaN.
        NegativeThreshold => NegativeThreshold { .. } => "RHG_NEGATIVE_THRESHOLD",
        /// A model or index parameter was invalid.
        InvalidParameter => InvalidParameter { .. } => "RHG_INVALID_PARAMETER",
        /// The same identity was inserted twice.
        DuplicatePoint => DuplicatePoint { .. } => "RHG_DUPLICATE_POINT",
        /// An operation referenced an identity that is not indexed.
        UnknownPoint => UnknownPoint { .. } => "RHG_UNKNOWN_POINT",
        /// Angle and radius sequences had different lengths.
        LengthMismatch => LengthMismatch { .. } => "RHG_LENGTH_MISMATCH",
        /// No disk radius yields the requested average degree.
        UnreachableDegree => UnreachableDegree { .. } => "RHG_UNREACHABLE_DEGREE",
    }
}

/// Consistency violations raised while replaying a [`crate::GraphEvent`]
/// stream into a [`crate::GraphStore`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ReplayError {
    /// An edge addition targeted an edge that is already present.
    #[error("edge ({u}, {v}) is already present")]
    DuplicateEdge {
        /// First endpoint.
        u: PointId,
        /// Second endpoint.
        v: PointId,
    },
    /// An edge removal targeted an edge that is absent.
    #[error("edge ({u}, {v}) is not present")]
    MissingEdge {
        /// First endpoint.
        u: PointId,
        /// Second endpoint.
        v: PointId,
    },
    /// An edge event referenced a node the store does not hold.
    #[error("node {node} does not exist")]
    UnknownNode {
        /// Node referenced by the event.
        node: PointId,
    },
    /// A node addition announced an id the store did not assign.
    #[error("node addition announced id {announced} but the store assigned {assigned}")]
    NodeIdMismatch {
        /// Id carried by the event.
        announced: PointId,
        /// Id assigned by the store.
        assigned: PointId,
    },
    /// An edge event connected a node to itself.
    #[error("self-loop on node {node}")]
    SelfLoop {
        /// Node referenced twice.
        node: PointId,
    },
}

define_error_codes! {
    /// Stable codes describing [`ReplayError`] variants.
    enum ReplayErrorCode for ReplayError {
        /// An edge addition targeted an edge that is already present.
        DuplicateEdge => DuplicateEdge { .. } => "REPLAY_DUPLICATE_EDGE",
        /// An edge removal targeted an edge that is absent.
        MissingEdge => MissingEdge { .. } => "REPLAY_MISSING_EDGE",
        /// An edge event referenced a node the store does not hold.
        UnknownNode => UnknownNode { .. } => "REPLAY_UNKNOWN_NODE",
        /// A node addition announced an id the store did not assign.
        NodeIdMismatch => NodeIdMismatch { .. } => "REPLAY_NODE_ID_MISMATCH",
        /// An edge event connected a node to itself.
        SelfLoop => SelfLoop { .. } => "REPLAY_SELF_LOOP",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GeneratorError>;
