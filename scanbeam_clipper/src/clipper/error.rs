//! Error type for clipping operations.

use thiserror::Error;

/// Errors returned by the clipping engine.
///
/// Degenerate input paths are not errors, they are dropped when added (see
/// [Clipper::add_path](super::Clipper::add_path)). Every sweep failure aborts the whole execute
/// call with no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipError {
    /// Another execute call on the same clipper is still running.
    #[error("execute already in progress on this clipper")]
    ExecuteLocked,

    /// Input coordinate magnitude exceeds the supported range.
    #[error("coordinate ({x}, {y}) is outside the supported range")]
    CoordinateOutOfRange { x: i64, y: i64 },

    /// Intersections within a scanbeam could not be ordered so every swap acts on adjacent edges.
    #[error("unable to order intersections between y = {bot_y} and y = {top_y}")]
    IntersectionOrder { bot_y: i64, top_y: i64 },

    /// Two edges swapped order within a scanbeam but no intersection point could be computed.
    #[error("edges crossed within a scanbeam without an intersection point")]
    MissingIntersection,

    /// Internal sweep state was inconsistent.
    #[error("sweep invariant violated: {0}")]
    Invariant(&'static str),
}

/// Result type alias for clipping operations.
pub type ClipResult<T> = Result<T, ClipError>;
