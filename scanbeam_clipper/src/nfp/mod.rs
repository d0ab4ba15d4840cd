//! No-fit polygons (the locus of one part's reference vertex while it touches another part) built
//! from Minkowski sums, and a generational cache for them.
mod cache;

pub use cache::*;

use crate::{
    clipper::{boolean_op, minkowski_sum, ClipResult, ClipType, FillRule},
    core::math::{area, path_bounds, IntPoint, Path, Paths},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// Which side of polygon `a` polygon `b` is placed on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NfpMode {
    /// `b` slides around the outside of `a`.
    Outside,
    /// `b` slides around the inside of `a` (e.g. `a` is the sheet/bin).
    Inside,
}

fn reflected(path: &[IntPoint]) -> Path {
    path.iter().map(IntPoint::negate).collect()
}

fn translated(path: &[IntPoint], offset: IntPoint) -> Path {
    path.iter().map(|&p| p + offset).collect()
}

/// No-fit polygon of `b` relative to `a`, expressed as positions of `b[0]`.
///
/// For [NfpMode::Outside] the result is a single loop: placing `b[0]` on it makes `b` touch `a`
/// without overlapping, inside it they overlap. For [NfpMode::Inside] the result is the region
/// (possibly several loops, with holes) where `b[0]` may be placed so `b` lies within `a`. It is
/// empty when `b` cannot fit.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::path;
/// # use scanbeam_clipper::core::math::*;
/// # use scanbeam_clipper::nfp::*;
/// let a = path![(0, 0), (10, 0), (10, 10), (0, 10)];
/// let b = path![(0, 0), (2, 0), (2, 2), (0, 2)];
/// let outside = no_fit_polygon(&a, &b, NfpMode::Outside).unwrap();
/// assert_eq!(outside.len(), 1);
/// assert_eq!(area(&outside[0]), 144.0);
///
/// let inside = no_fit_polygon(&a, &b, NfpMode::Inside).unwrap();
/// assert_eq!(inside.len(), 1);
/// assert_eq!(area(&inside[0]), 64.0);
/// ```
pub fn no_fit_polygon(a: &[IntPoint], b: &[IntPoint], mode: NfpMode) -> ClipResult<Paths> {
    let (Some(&reference), Some((a_min, a_max)), Some((b_min, b_max))) =
        (b.first(), path_bounds(a), path_bounds(b))
    else {
        return Ok(Paths::new());
    };

    // positions of b[0] where b touches the boundary of a
    let touching = minkowski_sum(&reflected(b), a, true)?;
    let touching: Paths = touching.iter().map(|p| translated(p, reference)).collect();

    match mode {
        NfpMode::Outside => {
            let outer = touching
                .into_iter()
                .filter(|p| area(p) > 0.0)
                .max_by(|p1, p2| area(p1).total_cmp(&area(p2)));
            Ok(outer.into_iter().collect())
        }
        NfpMode::Inside => {
            if b_max.x - b_min.x > a_max.x - a_min.x || b_max.y - b_min.y > a_max.y - a_min.y {
                return Ok(Paths::new());
            }
            let solution = boolean_op(
                ClipType::Difference,
                &[a.to_vec()],
                &touching,
                FillRule::NonZero,
                FillRule::NonZero,
            )?;
            Ok(solution.into_paths())
        }
    }
}
