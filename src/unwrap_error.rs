//! UnwrapError: Unified error type for mesh-unwrap public APIs
//!
//! Geometry operations never fail on degenerate input; non-finite values flow
//! through instead. Only packing, configuration and mesh I/O report errors.

use std::fmt;
use thiserror::Error;

/// Page dimension named by an [`UnwrapError::UnpackableItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis2 {
    Width,
    Height,
}

impl fmt::Display for Axis2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis2::Width => f.write_str("width"),
            Axis2::Height => f.write_str("height"),
        }
    }
}

/// Unified error type for mesh-unwrap operations.
#[derive(Debug, Error)]
pub enum UnwrapError {
    /// A polygon (plus page margins) is larger than the page along `dimension`.
    #[error("polygon {dimension} ({extent}) with margins does not fit page {dimension} ({limit})")]
    UnpackableItem {
        dimension: Axis2,
        extent: f64,
        limit: f64,
    },
    /// Page layout or unwrap configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Malformed mesh text.
    #[error("mesh parse error: {0}")]
    MeshIoParse(String),
    /// A face refers to a point that does not exist (indices are 1-based).
    #[error("face {face} references point {index}, but only {count} points exist")]
    VertexIndexOutOfRange {
        face: usize,
        index: i64,
        count: usize,
    },
    /// A face has fewer than three vertices.
    #[error("face {face} has {count} vertices, at least 3 are required")]
    TooFewVertices { face: usize, count: usize },
    /// Stored derived data disagrees with a fresh recomputation.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    /// Underlying reader or writer failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
