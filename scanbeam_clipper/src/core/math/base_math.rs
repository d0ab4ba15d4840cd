use super::{IntPoint, Vector2};

/// Largest coordinate magnitude for which 64 bit slope products cannot overflow.
pub const LO_RANGE: i64 = 0x3FFF_FFFF;

/// Largest coordinate magnitude accepted at all (slope products then require 128 bit math).
pub const HI_RANGE: i64 = 0x3FFF_FFFF_FFFF_FFFF;

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::core::math::*;
/// assert_eq!(min_max(8, 4), (4, 8));
/// assert_eq!(min_max(-1, 3), (-1, 3));
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Round to the nearest integer with halves going away from zero.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::core::math::*;
/// assert_eq!(round_half_away(2.5), 3);
/// assert_eq!(round_half_away(-2.5), -3);
/// assert_eq!(round_half_away(-2.4), -2);
/// ```
#[inline]
pub fn round_half_away(v: f64) -> i64 {
    v.round() as i64
}

/// Coordinate range classification used when paths are added to the clipper.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordRange {
    /// Fits 64 bit slope products.
    Low,
    /// Requires 128 bit slope products.
    High,
    /// Outside of what the engine accepts.
    OutOfRange,
}

/// Classify `pt` against [LO_RANGE] and [HI_RANGE].
#[inline]
pub fn coord_range(pt: IntPoint) -> CoordRange {
    let max_abs = pt.x.unsigned_abs().max(pt.y.unsigned_abs());
    if max_abs > HI_RANGE as u64 {
        CoordRange::OutOfRange
    } else if max_abs > LO_RANGE as u64 {
        CoordRange::High
    } else {
        CoordRange::Low
    }
}

/// Exact test for `a * b == c * d`, widening to 128 bits when `full_range` is set.
#[inline]
pub fn products_equal(a: i64, b: i64, c: i64, d: i64, full_range: bool) -> bool {
    if full_range {
        (a as i128) * (b as i128) == (c as i128) * (d as i128)
    } else {
        a * b == c * d
    }
}

/// Returns true if the segments `pt1->pt2` and `pt2->pt3` have equal slope (the three points are
/// collinear).
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::core::math::*;
/// let a = IntPoint::new(0, 0);
/// let b = IntPoint::new(5, 5);
/// let c = IntPoint::new(-3, -3);
/// assert!(slopes_equal3(a, b, c, false));
/// assert!(!slopes_equal3(a, b, IntPoint::new(1, 0), false));
/// ```
#[inline]
pub fn slopes_equal3(pt1: IntPoint, pt2: IntPoint, pt3: IntPoint, full_range: bool) -> bool {
    products_equal(
        pt1.y - pt2.y,
        pt2.x - pt3.x,
        pt1.x - pt2.x,
        pt2.y - pt3.y,
        full_range,
    )
}

/// Returns true if the segments `pt1->pt2` and `pt3->pt4` have equal slope.
#[inline]
pub fn slopes_equal4(
    pt1: IntPoint,
    pt2: IntPoint,
    pt3: IntPoint,
    pt4: IntPoint,
    full_range: bool,
) -> bool {
    products_equal(
        pt1.y - pt2.y,
        pt3.x - pt4.x,
        pt1.x - pt2.x,
        pt3.y - pt4.y,
        full_range,
    )
}

/// Returns true if `pt2` lies strictly between `pt1` and `pt3`, assuming the three points are
/// collinear. Coincident points are never "between".
#[inline]
pub fn pt2_is_between_pt1_and_pt3(pt1: IntPoint, pt2: IntPoint, pt3: IntPoint) -> bool {
    if pt1 == pt3 || pt1 == pt2 || pt3 == pt2 {
        false
    } else if pt1.x != pt3.x {
        (pt2.x > pt1.x) == (pt2.x < pt3.x)
    } else {
        (pt2.y > pt1.y) == (pt2.y < pt3.y)
    }
}

/// Returns true if the horizontal segments `seg1a->seg1b` and `seg2a->seg2b` overlap along the x
/// axis (touching at a single shared end point with no shared span does not count unless the
/// segments are identical).
pub fn horz_segments_overlap(
    seg1a: IntPoint,
    seg1b: IntPoint,
    seg2a: IntPoint,
    seg2b: IntPoint,
) -> bool {
    let strictly_within = |v: i64, a: i64, b: i64| (v > a) == (v < b);
    strictly_within(seg1a.x, seg2a.x, seg2b.x)
        || strictly_within(seg1b.x, seg2a.x, seg2b.x)
        || strictly_within(seg2a.x, seg1a.x, seg1b.x)
        || strictly_within(seg2b.x, seg1a.x, seg1b.x)
        || (seg1a.x == seg2a.x && seg1b.x == seg2b.x)
        || (seg1a.x == seg2b.x && seg1b.x == seg2a.x)
}

/// Shared interval of `[a1, a2]` and `[b1, b2]` (each given in either order), `None` when the
/// overlap is empty or a single value.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::core::math::*;
/// assert_eq!(overlap_interval(0, 10, 12, 5), Some((5, 10)));
/// assert_eq!(overlap_interval(0, 5, 5, 9), None);
/// ```
#[inline]
pub fn overlap_interval(a1: i64, a2: i64, b1: i64, b2: i64) -> Option<(i64, i64)> {
    let (a_min, a_max) = min_max(a1, a2);
    let (b_min, b_max) = min_max(b1, b2);
    let left = a_min.max(b_min);
    let right = a_max.min(b_max);
    if left < right {
        Some((left, right))
    } else {
        None
    }
}

/// Signed area of a closed path.
///
/// Positive for loops running counter clockwise in a y-up frame (the orientation the clipper
/// outputs outer loops with), negative for the opposite direction, zero for fewer than 3 points.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::core::math::*;
/// let square = vec![
///     IntPoint::new(0, 0),
///     IntPoint::new(10, 0),
///     IntPoint::new(10, 10),
///     IntPoint::new(0, 10),
/// ];
/// assert_eq!(area(&square), 100.0);
/// let reversed: Vec<_> = square.iter().rev().copied().collect();
/// assert_eq!(area(&reversed), -100.0);
/// ```
pub fn area(path: &[IntPoint]) -> f64 {
    let count = path.len();
    if count < 3 {
        return 0.0;
    }

    let mut a = 0.0;
    let mut prev = path[count - 1];
    for &curr in path {
        a += (prev.x as f64 + curr.x as f64) * (prev.y as f64 - curr.y as f64);
        prev = curr;
    }

    -a * 0.5
}

/// Orientation of a closed path, true when [area] is non-negative.
#[inline]
pub fn orientation(path: &[IntPoint]) -> bool {
    area(path) >= 0.0
}

/// Axis aligned bounds of a path as `(min, max)` corners, `None` for an empty path.
pub fn path_bounds(path: &[IntPoint]) -> Option<(IntPoint, IntPoint)> {
    let first = *path.first()?;
    let bounds = path.iter().skip(1).fold((first, first), |(min, max), p| {
        (
            IntPoint::new(min.x.min(p.x), min.y.min(p.y)),
            IntPoint::new(max.x.max(p.x), max.y.max(p.y)),
        )
    });
    Some(bounds)
}

/// Result of a point in polygon test.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointContainment {
    Outside,
    Inside,
    OnBoundary,
}

/// Point in polygon test (even-odd crossing) against the closed ring formed by `ring`.
///
/// The ring is implicitly closed from the last point back to the first. Points lying on an edge
/// or vertex return [PointContainment::OnBoundary].
pub fn point_in_ring<I>(pt: IntPoint, ring: I) -> PointContainment
where
    I: IntoIterator<Item = IntPoint>,
    I::IntoIter: Clone,
{
    let mut iter = ring.into_iter();
    let Some(first) = iter.clone().next() else {
        return PointContainment::Outside;
    };
    iter.next();

    let crosses = |ip: IntPoint, ip_next: IntPoint| -> f64 {
        (ip.x - pt.x) as f64 * (ip_next.y - pt.y) as f64
            - (ip_next.x - pt.x) as f64 * (ip.y - pt.y) as f64
    };

    let mut inside = false;
    let mut ip = first;
    for ip_next in iter.chain(std::iter::once(first)) {
        if ip_next.y == pt.y
            && (ip_next.x == pt.x || (ip.y == pt.y && ((ip_next.x > pt.x) == (ip.x < pt.x))))
        {
            return PointContainment::OnBoundary;
        }

        if (ip.y < pt.y) != (ip_next.y < pt.y) {
            if ip.x >= pt.x && ip_next.x > pt.x {
                inside = !inside;
            } else if ip.x >= pt.x || ip_next.x > pt.x {
                let d = crosses(ip, ip_next);
                if d == 0.0 {
                    return PointContainment::OnBoundary;
                }
                if (d > 0.0) == (ip_next.y > ip.y) {
                    inside = !inside;
                }
            }
        }

        ip = ip_next;
    }

    if inside {
        PointContainment::Inside
    } else {
        PointContainment::Outside
    }
}

/// Point in polygon test against a closed path, see [point_in_ring]. Paths with fewer than 3
/// points contain nothing.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::core::math::*;
/// let square = vec![
///     IntPoint::new(0, 0),
///     IntPoint::new(10, 0),
///     IntPoint::new(10, 10),
///     IntPoint::new(0, 10),
/// ];
/// assert_eq!(point_in_path(IntPoint::new(5, 5), &square), PointContainment::Inside);
/// assert_eq!(point_in_path(IntPoint::new(10, 5), &square), PointContainment::OnBoundary);
/// assert_eq!(point_in_path(IntPoint::new(11, 5), &square), PointContainment::Outside);
/// ```
pub fn point_in_path(pt: IntPoint, path: &[IntPoint]) -> PointContainment {
    if path.len() < 3 {
        return PointContainment::Outside;
    }

    point_in_ring(pt, path.iter().copied())
}

/// A point strictly inside the closed path, `None` if the path encloses no area.
///
/// Taken halfway across the widest interior span of a horizontal line placed halfway between
/// the two vertex y values furthest apart, so it never lies on a vertex row or on the boundary.
pub fn interior_point(path: &[IntPoint]) -> Option<Vector2<f64>> {
    if path.len() < 3 {
        return None;
    }

    let mut ys: Vec<i64> = path.iter().map(|p| p.y).collect();
    ys.sort_unstable();
    ys.dedup();
    let (y0, y1) = ys
        .windows(2)
        .map(|w| (w[0], w[1]))
        .max_by_key(|&(a, b)| b - a)?;
    let y = (y0 as f64 + y1 as f64) * 0.5;

    let mut xs = Vec::new();
    let mut prev = path[path.len() - 1];
    for &curr in path {
        if ((prev.y as f64) < y) != ((curr.y as f64) < y) {
            let t = (y - prev.y as f64) / (curr.y as f64 - prev.y as f64);
            xs.push(prev.x as f64 + t * (curr.x as f64 - prev.x as f64));
        }
        prev = curr;
    }
    xs.sort_by(f64::total_cmp);

    let (x0, x1) = xs
        .chunks_exact(2)
        .map(|c| (c[0], c[1]))
        .filter(|(a, b)| b > a)
        .max_by(|(a1, b1), (a2, b2)| (b1 - a1).total_cmp(&(b2 - a2)))?;
    Some(Vector2::new((x0 + x1) * 0.5, y))
}

/// [point_in_path] for a floating point query point.
pub fn float_point_in_path(pt: Vector2<f64>, path: &[IntPoint]) -> PointContainment {
    if path.len() < 3 {
        return PointContainment::Outside;
    }

    let mut inside = false;
    let mut prev = path[path.len() - 1];
    for &curr in path {
        let (ax, ay) = (prev.x as f64, prev.y as f64);
        let (bx, by) = (curr.x as f64, curr.y as f64);
        if ay == pt.y && by == pt.y {
            if (pt.x >= ax.min(bx)) && (pt.x <= ax.max(bx)) {
                return PointContainment::OnBoundary;
            }
        } else if (ay > pt.y) != (by > pt.y) {
            let x = ax + (pt.y - ay) * (bx - ax) / (by - ay);
            if x == pt.x {
                return PointContainment::OnBoundary;
            }
            if x > pt.x {
                inside = !inside;
            }
        }
        prev = curr;
    }

    if inside {
        PointContainment::Inside
    } else {
        PointContainment::Outside
    }
}

/// True if the closed path `inner` lies inside the closed path `outer`, assuming the two do not
/// cross (they may touch).
///
/// Decided by the first vertex of `inner` not on the boundary of `outer`. When every vertex
/// touches `outer` a point of the interior of `inner` decides. Coincident paths count as
/// contained.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::path;
/// # use scanbeam_clipper::core::math::*;
/// let outer = path![(0, 0), (10, 0), (10, 10), (0, 10)];
/// // every vertex on the boundary of outer, inside
/// let diamond = path![(5, 0), (10, 5), (5, 10), (0, 5)];
/// assert!(path_inside_path(&diamond, &outer));
/// // square with a notch cut up from its bottom edge, and the triangle filling the notch
/// let notched = path![(0, 0), (5, 5), (10, 0), (10, 10), (0, 10)];
/// let notch = path![(0, 0), (10, 0), (5, 5)];
/// assert!(!path_inside_path(&notch, &notched));
/// ```
pub fn path_inside_path(inner: &[IntPoint], outer: &[IntPoint]) -> bool {
    for &pt in inner {
        match point_in_path(pt, outer) {
            PointContainment::OnBoundary => continue,
            PointContainment::Inside => return true,
            PointContainment::Outside => return false,
        }
    }

    match interior_point(inner) {
        Some(pt) => float_point_in_path(pt, outer) != PointContainment::Outside,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_range_classification() {
        assert_eq!(coord_range(IntPoint::new(LO_RANGE, -LO_RANGE)), CoordRange::Low);
        assert_eq!(coord_range(IntPoint::new(LO_RANGE + 1, 0)), CoordRange::High);
        assert_eq!(coord_range(IntPoint::new(0, -HI_RANGE)), CoordRange::High);
        assert_eq!(coord_range(IntPoint::new(0, i64::MIN)), CoordRange::OutOfRange);
    }

    #[test]
    fn full_range_slopes_do_not_overflow() {
        let big = HI_RANGE / 2;
        let a = IntPoint::new(0, 0);
        let b = IntPoint::new(big, big);
        let c = IntPoint::new(-big, -big);
        assert!(slopes_equal3(a, b, c, true));
        assert!(!slopes_equal3(a, b, IntPoint::new(big, big - 1), true));
    }

    #[test]
    fn between_checks() {
        let a = IntPoint::new(0, 0);
        let b = IntPoint::new(5, 0);
        let c = IntPoint::new(10, 0);
        assert!(pt2_is_between_pt1_and_pt3(a, b, c));
        assert!(pt2_is_between_pt1_and_pt3(c, b, a));
        assert!(!pt2_is_between_pt1_and_pt3(a, c, b));
        assert!(!pt2_is_between_pt1_and_pt3(a, a, c));
        // vertical
        assert!(pt2_is_between_pt1_and_pt3(
            IntPoint::new(0, 0),
            IntPoint::new(0, 3),
            IntPoint::new(0, 9)
        ));
    }

    #[test]
    fn horizontal_overlap() {
        let p = |x| IntPoint::new(x, 0);
        assert!(horz_segments_overlap(p(0), p(10), p(5), p(15)));
        assert!(horz_segments_overlap(p(10), p(0), p(10), p(0)));
        assert!(!horz_segments_overlap(p(0), p(10), p(10), p(20)));
        assert!(!horz_segments_overlap(p(0), p(10), p(11), p(20)));
    }

    #[test]
    fn point_in_triangle() {
        let tri = vec![IntPoint::new(0, 0), IntPoint::new(10, 0), IntPoint::new(0, 10)];
        assert_eq!(point_in_path(IntPoint::new(2, 2), &tri), PointContainment::Inside);
        assert_eq!(point_in_path(IntPoint::new(5, 5), &tri), PointContainment::OnBoundary);
        assert_eq!(point_in_path(IntPoint::new(0, 0), &tri), PointContainment::OnBoundary);
        assert_eq!(point_in_path(IntPoint::new(6, 6), &tri), PointContainment::Outside);
        assert_eq!(point_in_path(IntPoint::new(2, 2), &tri[..2]), PointContainment::Outside);
    }

    #[test]
    fn bounds() {
        assert_eq!(path_bounds(&[]), None);
        let path = vec![IntPoint::new(3, -1), IntPoint::new(-2, 4), IntPoint::new(0, 0)];
        assert_eq!(
            path_bounds(&path),
            Some((IntPoint::new(-2, -1), IntPoint::new(3, 4)))
        );
    }

    #[test]
    fn interior_point_of_touching_triangle() {
        let tri = vec![IntPoint::new(4000, 4000), IntPoint::new(4000, 3000), IntPoint::new(3700, 3100)];
        let pt = interior_point(&tri).unwrap();
        assert_eq!(float_point_in_path(pt, &tri), PointContainment::Inside);
        assert!(interior_point(&tri[..2]).is_none());
        let flat = vec![IntPoint::new(0, 0), IntPoint::new(5, 0), IntPoint::new(9, 0)];
        assert!(interior_point(&flat).is_none());
    }

    #[test]
    fn float_point_containment() {
        let square = vec![
            IntPoint::new(0, 0),
            IntPoint::new(10, 0),
            IntPoint::new(10, 10),
            IntPoint::new(0, 10),
        ];
        let check = |x: f64, y: f64| float_point_in_path(Vector2::new(x, y), &square);
        assert_eq!(check(5.5, 0.5), PointContainment::Inside);
        assert_eq!(check(10.0, 3.5), PointContainment::OnBoundary);
        assert_eq!(check(4.5, 0.0), PointContainment::OnBoundary);
        assert_eq!(check(10.5, 3.5), PointContainment::Outside);
    }

    #[test]
    fn containment_with_every_vertex_on_boundary() {
        let p = IntPoint::new;
        let notched = vec![p(0, 0), p(5, 5), p(10, 0), p(10, 10), p(0, 10)];
        let notch = vec![p(0, 0), p(10, 0), p(5, 5)];
        assert!(notch
            .iter()
            .all(|&pt| point_in_path(pt, &notched) == PointContainment::OnBoundary));
        assert!(!path_inside_path(&notch, &notched));
        assert!(path_inside_path(&notched, &notched));

        let square = vec![p(0, 0), p(10, 0), p(10, 10), p(0, 10)];
        let diamond = vec![p(5, 0), p(10, 5), p(5, 10), p(0, 5)];
        assert!(path_inside_path(&diamond, &square));
        assert!(!path_inside_path(&square, &diamond));
    }
}
