//! Minkowski sum and difference of integer paths, computed as the union of the quadrilaterals
//! swept between consecutive translated copies of a pattern.

use crate::core::math::{orientation, IntPoint, Path, Paths};

use super::{ClipResult, ClipType, Clipper, FillRule, PolyType};

fn minkowski_quads(
    pattern: &[IntPoint],
    path: &[IntPoint],
    is_sum: bool,
    is_closed: bool,
) -> Paths {
    let pattern_count = pattern.len();
    let path_count = path.len();
    if pattern_count == 0 || path_count == 0 {
        return Paths::new();
    }

    let copies: Vec<Path> = path
        .iter()
        .map(|&origin| {
            pattern
                .iter()
                .map(|&p| if is_sum { origin + p } else { origin - p })
                .collect()
        })
        .collect();

    let delta = usize::from(is_closed);
    let strip_count = path_count - 1 + delta;
    let mut quads = Paths::with_capacity(strip_count * pattern_count);
    for i in 0..strip_count {
        let (a, b) = (&copies[i % path_count], &copies[(i + 1) % path_count]);
        for j in 0..pattern_count {
            let j_next = (j + 1) % pattern_count;
            let mut quad = vec![a[j], b[j], b[j_next], a[j_next]];
            if !orientation(&quad) {
                quad.reverse();
            }
            quads.push(quad);
        }
    }
    quads
}

fn union_nonzero(subject: &[Path], clip: &[Path]) -> ClipResult<Paths> {
    let mut clipper = Clipper::new();
    clipper.add_paths(subject, PolyType::Subject, true)?;
    clipper.add_paths(clip, PolyType::Clip, true)?;
    let solution = clipper.execute(ClipType::Union, FillRule::NonZero, FillRule::NonZero)?;
    Ok(solution.into_paths())
}

/// Minkowski sum of `pattern` swept along `path` (`path` treated as a closed loop when
/// `path_is_closed`).
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::path;
/// # use scanbeam_clipper::clipper::*;
/// # use scanbeam_clipper::core::math::*;
/// let square = path![(0, 0), (10, 0), (10, 10), (0, 10)];
/// let small = path![(0, 0), (2, 0), (2, 2), (0, 2)];
/// let sum = minkowski_sum(&small, &square, true).unwrap();
/// // outer loop 12x12 with an 8x8 hole
/// let total: f64 = sum.iter().map(|p| area(p)).sum();
/// assert_eq!(total, 144.0 - 64.0);
/// ```
pub fn minkowski_sum(
    pattern: &[IntPoint],
    path: &[IntPoint],
    path_is_closed: bool,
) -> ClipResult<Paths> {
    let quads = minkowski_quads(pattern, path, true, path_is_closed);
    union_nonzero(&quads, &[])
}

/// Minkowski sum of `pattern` swept along every path of `paths`. For closed paths the pattern
/// translated to each path is included so the interior of each loop is covered.
pub fn minkowski_sum_paths<P>(
    pattern: &[IntPoint],
    paths: &[P],
    paths_are_closed: bool,
) -> ClipResult<Paths>
where
    P: AsRef<[IntPoint]>,
{
    let mut quads = Paths::new();
    let mut translated = Paths::new();
    for path in paths {
        let path = path.as_ref();
        quads.extend(minkowski_quads(pattern, path, true, paths_are_closed));
        if paths_are_closed {
            if let Some(&offset) = pattern.first() {
                translated.push(path.iter().map(|&p| p + offset).collect());
            }
        }
    }
    union_nonzero(&quads, &translated)
}

/// Minkowski difference `poly1 ⊖ poly2`, the sweep of `poly1` subtracted at every vertex of the
/// closed loop `poly2`.
pub fn minkowski_diff(poly1: &[IntPoint], poly2: &[IntPoint]) -> ClipResult<Paths> {
    let quads = minkowski_quads(poly1, poly2, false, true);
    union_nonzero(&quads, &[])
}
