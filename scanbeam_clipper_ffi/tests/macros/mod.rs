use scanbeam_clipper_ffi::sbc_point;

/// Signed shoelace area of an FFI point buffer (positive for the `(0, 0), (1, 0), (1, 1)` turn).
pub fn ring_area(points: &[sbc_point]) -> f64 {
    let Some(&last) = points.last() else {
        return 0.0;
    };
    let mut a = 0.0;
    let mut prev = last;
    for &curr in points {
        a += (prev.x as f64 + curr.x as f64) * (prev.y as f64 - curr.y as f64);
        prev = curr;
    }
    -a * 0.5
}

/// Assert the signed area of a point buffer (integer coordinates, so areas are multiples of 0.5).
macro_rules! assert_ring_area {
    ($points:expr, $expected:expr) => {{
        let points = $points;
        let area = crate::macros::ring_area(&points);
        let expected: f64 = $expected;
        if (area - expected).abs() > 1e-9 {
            panic!(
                "ring area mismatch\n  area: `{}`,\n  expected: `{}`\n  points: `{:?}`",
                area, expected, points
            );
        }
    }};
}

/// Assert the hole flag and parent index reported for one solution path, and that the path
/// orientation agrees with the hole flag.
macro_rules! assert_path_info {
    ($solution:expr, $index:expr, hole: $hole:expr, parent: $parent:expr) => {{
        let (mut is_hole, mut is_open, mut parent) = (2u8, 2u8, -2i32);
        assert_eq!(
            sbc_solution_get_path_info($solution, $index, &mut is_hole, &mut is_open, &mut parent),
            0
        );
        let expected_hole: bool = $hole;
        assert_eq!(is_hole != 0, expected_hole, "hole flag of path {}", $index);
        assert_eq!(is_open, 0, "path {} is open", $index);
        assert_eq!(parent, $parent, "parent of path {}", $index);
        let area = crate::macros::ring_area(&solution_path($solution, $index));
        assert_eq!(area < 0.0, expected_hole, "area {} of path {}", area, $index);
    }};
}
