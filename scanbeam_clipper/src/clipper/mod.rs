//! Polygon boolean clipping engine: a scanbeam sweep over integer coordinate polygons computing
//! intersection, union, difference and xor under even-odd, nonzero, positive or negative fill.
mod bounds;
mod edge;
mod engine;
mod error;
mod finalize;
mod horizontal;
mod intersect;
mod join;
mod minkowski;
mod output;
mod scanbeam;
mod solution;
mod sweep;
mod winding;

pub use engine::*;
pub use error::*;
pub use minkowski::*;
pub use solution::*;

use crate::core::math::IntPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// Boolean operation applied between the subject and clip polygon sets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ClipType {
    /// Regions filled in both sets.
    Intersection,
    /// Regions filled in either set.
    Union,
    /// Regions filled in the subject set but not the clip set.
    Difference,
    /// Regions filled in exactly one of the sets.
    Xor,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// Rule deciding which regions of a (possibly self intersecting) polygon set are filled, from the
/// winding number of the region.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FillRule {
    /// Odd winding numbers are filled.
    EvenOdd,
    /// Non zero winding numbers are filled.
    NonZero,
    /// Winding numbers greater than zero are filled.
    Positive,
    /// Winding numbers less than zero are filled.
    Negative,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// Which operand of the boolean operation a path belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PolyType {
    Subject,
    Clip,
}

impl PolyType {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            PolyType::Subject => PolyType::Clip,
            PolyType::Clip => PolyType::Subject,
        }
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
/// Behavior switches for clip operations.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ClipOptions {
    /// Output outer loops with negative area and holes with positive area.
    pub reverse_solution: bool,
    /// Split output loops at vertexes where they touch themselves or each other so every output
    /// loop is strictly simple.
    pub strictly_simple: bool,
    /// Keep collinear vertexes of input and output loops instead of removing them.
    pub preserve_collinear: bool,
}

impl ClipOptions {
    #[inline]
    pub fn new() -> Self {
        Self {
            reverse_solution: false,
            strictly_simple: false,
            preserve_collinear: false,
        }
    }
}

/// Compute a boolean operation between `subject` and `clip` closed path sets using default
/// options.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::path;
/// # use scanbeam_clipper::clipper::*;
/// let subject = vec![path![(0, 0), (10, 0), (10, 10), (0, 10)]];
/// let clip = vec![path![(5, 5), (15, 5), (15, 15), (5, 15)]];
/// let union = boolean_op(
///     ClipType::Union,
///     &subject,
///     &clip,
///     FillRule::NonZero,
///     FillRule::NonZero,
/// )
/// .unwrap();
/// assert_eq!(union.len(), 1);
/// assert_eq!(union.total_area(), 175.0);
/// ```
pub fn boolean_op<P>(
    clip_type: ClipType,
    subject: &[P],
    clip: &[P],
    subject_fill: FillRule,
    clip_fill: FillRule,
) -> ClipResult<Solution>
where
    P: AsRef<[IntPoint]>,
{
    boolean_op_with_options(
        clip_type,
        subject,
        clip,
        subject_fill,
        clip_fill,
        &ClipOptions::new(),
    )
}

/// Same as [boolean_op] with explicit options.
pub fn boolean_op_with_options<P>(
    clip_type: ClipType,
    subject: &[P],
    clip: &[P],
    subject_fill: FillRule,
    clip_fill: FillRule,
    options: &ClipOptions,
) -> ClipResult<Solution>
where
    P: AsRef<[IntPoint]>,
{
    let mut clipper = Clipper::with_options(*options);
    clipper.add_paths(subject, PolyType::Subject, true)?;
    clipper.add_paths(clip, PolyType::Clip, true)?;
    clipper.execute(clip_type, subject_fill, clip_fill)
}
