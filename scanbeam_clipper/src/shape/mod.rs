//! Floating point polygon sets: scaling onto the clipper's integer grid and back, and nesting of
//! loops into an outer/hole hierarchy.
use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuilder};

use crate::{
    clipper::{ClipError, ClipResult},
    core::{
        math::{area, path_bounds, path_inside_path, IntPoint, Path, Vector2, HI_RANGE},
        traits::Real,
    },
};

/// Scale float `points` onto the integer grid (multiply by `scale`, round half away from zero).
///
/// Fails with [ClipError::CoordinateOutOfRange] for non finite values or values whose magnitude
/// exceeds [HI_RANGE] after scaling.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::core::math::*;
/// # use scanbeam_clipper::shape::*;
/// let pts = vec![vec2(0.0, 0.0), vec2(1.25, 0.0), vec2(1.25, 0.5)];
/// let path = to_int_path(&pts, 1000.0).unwrap();
/// assert_eq!(path[2], IntPoint::new(1250, 500));
/// ```
pub fn to_int_path<T>(points: &[Vector2<T>], scale: T) -> ClipResult<Path>
where
    T: Real,
{
    points
        .iter()
        .map(|v| match v.to_int_point(scale) {
            Some(pt) if in_high_range(pt.x) && in_high_range(pt.y) => Ok(pt),
            _ => Err(ClipError::CoordinateOutOfRange {
                x: v.x.to_scaled_coord(scale).unwrap_or(i64::MAX),
                y: v.y.to_scaled_coord(scale).unwrap_or(i64::MAX),
            }),
        })
        .collect()
}

#[inline]
fn in_high_range(c: i64) -> bool {
    c.unsigned_abs() <= HI_RANGE as u64
}

/// Map an integer path back to float coordinates (divide by `scale`).
pub fn from_int_path<T>(path: &[IntPoint], scale: T) -> Vec<Vector2<T>>
where
    T: Real,
{
    path.iter()
        .map(|&pt| Vector2::from_int_point(pt, scale))
        .collect()
}

/// Integer path together with the scale it was created with, so results can be mapped back.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledPath<T> {
    pub path: Path,
    pub scale: T,
}

impl<T> ScaledPath<T>
where
    T: Real,
{
    pub fn from_float(points: &[Vector2<T>], scale: T) -> ClipResult<Self> {
        Ok(Self {
            path: to_int_path(points, scale)?,
            scale,
        })
    }

    pub fn to_float(&self) -> Vec<Vector2<T>> {
        from_int_path(&self.path, self.scale)
    }

    /// Area in float units.
    pub fn area(&self) -> T {
        let a = T::from(area(&self.path)).unwrap_or_else(T::zero);
        a / (self.scale * self.scale)
    }
}

/// Nesting of a set of closed loops: for every loop the index of the loop immediately enclosing
/// it, and its depth (even depths are outer boundaries, odd depths are holes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopHierarchy {
    pub parents: Vec<Option<usize>>,
    pub depths: Vec<usize>,
}

impl LoopHierarchy {
    #[inline]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    #[inline]
    pub fn is_hole(&self, index: usize) -> bool {
        self.depths[index] % 2 == 1
    }

    /// Indexes of loops with no parent.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| self.parents[i].is_none())
            .collect()
    }

    pub fn children_of(&self, index: usize) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| self.parents[i] == Some(index))
            .collect()
    }
}

fn build_bounds_index(bounds: &[Option<(IntPoint, IntPoint)>]) -> Option<StaticAABB2DIndex<f64>> {
    let mut builder = StaticAABB2DIndexBuilder::new(bounds.len());
    for b in bounds {
        // empty loops get a degenerate box that no query hits in a useful way
        let (min, max) = b.unwrap_or((IntPoint::zero(), IntPoint::zero()));
        builder.add(min.x as f64, min.y as f64, max.x as f64, max.y as f64);
    }
    builder.build().ok()
}

/// Assign each loop its immediately enclosing loop.
///
/// Candidates are limited with a spatial index over the loop bounding boxes, then confirmed with
/// point in polygon tests. Among containing candidates the one with the smallest absolute area
/// is the parent. Loops with fewer than 3 points are never parents and have no parent.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::path;
/// # use scanbeam_clipper::shape::*;
/// let loops = vec![
///     path![(0, 0), (100, 0), (100, 100), (0, 100)],
///     path![(10, 10), (90, 10), (90, 90), (10, 90)],
///     path![(20, 20), (30, 20), (30, 30), (20, 30)],
///     path![(200, 0), (210, 0), (210, 10)],
/// ];
/// let hierarchy = nest_loops(&loops);
/// assert_eq!(hierarchy.parents, vec![None, Some(0), Some(1), None]);
/// assert_eq!(hierarchy.depths, vec![0, 1, 2, 0]);
/// assert!(hierarchy.is_hole(1));
/// ```
pub fn nest_loops<P>(loops: &[P]) -> LoopHierarchy
where
    P: AsRef<[IntPoint]>,
{
    let count = loops.len();
    if count == 0 {
        return LoopHierarchy::default();
    }

    let valid = |i: usize| loops[i].as_ref().len() >= 3;
    let bounds: Vec<_> = loops
        .iter()
        .map(|l| {
            let l = l.as_ref();
            if l.len() >= 3 {
                path_bounds(l)
            } else {
                None
            }
        })
        .collect();
    let abs_areas: Vec<_> = loops.iter().map(|l| area(l.as_ref()).abs()).collect();
    let index = build_bounds_index(&bounds);

    let mut parents = vec![None; count];
    let mut query_stack = Vec::new();
    for i in 0..count {
        let Some((min, max)) = bounds[i] else {
            continue;
        };

        let candidates = match &index {
            Some(index) => index.query_with_stack(
                min.x as f64,
                min.y as f64,
                max.x as f64,
                max.y as f64,
                &mut query_stack,
            ),
            None => (0..count).collect(),
        };

        let mut parent: Option<usize> = None;
        for j in candidates {
            if j == i || !valid(j) || abs_areas[j] <= abs_areas[i] {
                continue;
            }
            let Some((j_min, j_max)) = bounds[j] else {
                continue;
            };
            if j_min.x > min.x || j_min.y > min.y || j_max.x < max.x || j_max.y < max.y {
                continue;
            }
            if parent.map_or(false, |p| abs_areas[p] <= abs_areas[j]) {
                continue;
            }
            if path_inside_path(loops[i].as_ref(), loops[j].as_ref()) {
                parent = Some(j);
            }
        }
        parents[i] = parent;
    }

    let depths = (0..count)
        .map(|i| {
            let mut depth = 0;
            let mut p = parents[i];
            while let Some(pi) = p {
                depth += 1;
                p = parents[pi];
            }
            depth
        })
        .collect();

    LoopHierarchy { parents, depths }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;

    #[test]
    fn non_finite_input_is_rejected() {
        let pts = vec![vec2(0.0, 0.0), vec2(f64::NAN, 1.0)];
        assert!(matches!(
            to_int_path(&pts, 10.0),
            Err(ClipError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn values_beyond_high_range_are_rejected() {
        let pts = vec![vec2(0.0, 0.0), vec2(4.7e18, 0.0), vec2(0.0, 1.0)];
        assert!(matches!(
            to_int_path(&pts, 1.0),
            Err(ClipError::CoordinateOutOfRange { y: 0, .. })
        ));

        let pts = vec![vec2(0.0, -5.0), vec2(1.0, 0.0)];
        assert!(to_int_path(&pts, 1e18).is_err());

        let edge = HI_RANGE as f64 / 2.0;
        let path = to_int_path(&[vec2(edge, -edge)], 1.0).unwrap();
        assert!(path[0].x <= HI_RANGE && path[0].y >= -HI_RANGE);
    }

    #[test]
    fn scaled_path_round_trip_area() {
        let pts = vec![vec2(0.0, 0.0), vec2(2.5, 0.0), vec2(2.5, 2.0), vec2(0.0, 2.0)];
        let scaled = ScaledPath::from_float(&pts, 1000.0).unwrap();
        assert_eq!(scaled.path[1], IntPoint::new(2500, 0));
        assert!((scaled.area() - 5.0_f64).abs() < 1e-9);
        assert!(scaled.to_float()[2].fuzzy_eq(vec2(2.5, 2.0)));
    }

    #[test]
    fn side_by_side_loops_are_roots() {
        let loops = vec![
            path![(0, 0), (10, 0), (10, 10), (0, 10)],
            path![(10, 0), (20, 0), (20, 10), (10, 10)],
        ];
        let hierarchy = nest_loops(&loops);
        assert_eq!(hierarchy.roots(), vec![0, 1]);
        assert!(hierarchy.children_of(0).is_empty());
    }

    #[test]
    fn degenerate_loops_are_skipped() {
        let loops = vec![
            path![(0, 0), (10, 0), (10, 10), (0, 10)],
            path![(1, 1), (2, 2)],
        ];
        let hierarchy = nest_loops(&loops);
        assert_eq!(hierarchy.parents, vec![None, None]);
    }
}
