mod test_utils;

use scanbeam_clipper::{
    clipper::{boolean_op, ClipType, FillRule},
    core::{
        math::{vec2, IntPoint, Vector2},
        traits::FuzzyEq,
    },
    path,
    shape::{from_int_path, nest_loops, to_int_path, ScaledPath},
};
use test_utils::init_logging;

fn float_rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<Vector2<f64>> {
    vec![
        vec2(min_x, min_y),
        vec2(max_x, min_y),
        vec2(max_x, max_y),
        vec2(min_x, max_y),
    ]
}

#[test]
fn scaling_rounds_half_away_from_zero() {
    let pts = vec![vec2(2.5, -2.5), vec2(0.4, -0.6), vec2(1.0, 3.0)];
    let path = to_int_path(&pts, 1.0).unwrap();
    assert_eq!(path, path![(3, -3), (0, -1), (1, 3)]);
}

#[test]
fn scaling_f32_input() {
    let pts: Vec<Vector2<f32>> = vec![vec2(0.25, 0.5), vec2(-1.0, 8.0)];
    let path = to_int_path(&pts, 4.0).unwrap();
    assert_eq!(path, path![(1, 2), (-4, 32)]);
    let back = from_int_path(&path, 4.0f32);
    assert!(back[0].fuzzy_eq(vec2(0.25, 0.5)));
}

#[test]
fn scaling_out_of_range_fails() {
    let pts = vec![vec2(1.0e30, 0.0)];
    assert!(to_int_path(&pts, 1.0).is_err());
    let pts = vec![vec2(f64::INFINITY, 0.0)];
    assert!(to_int_path(&pts, 1.0).is_err());
}

#[test]
fn float_boolean_through_scaled_paths() {
    init_logging();
    let scale = 1.0e6;
    let a = ScaledPath::from_float(&float_rect(0.0, 0.0, 1.5, 1.5), scale).unwrap();
    let b = ScaledPath::from_float(&float_rect(0.75, 0.75, 2.25, 2.25), scale).unwrap();
    assert!(a.area().fuzzy_eq_eps(2.25, 1e-9));

    let result = boolean_op(
        ClipType::Intersection,
        &[a.path.clone()],
        &[b.path.clone()],
        FillRule::NonZero,
        FillRule::NonZero,
    )
    .unwrap();
    assert_eq!(result.len(), 1);

    let overlap = ScaledPath {
        path: result[0].points.clone(),
        scale,
    };
    assert!(overlap.area().fuzzy_eq_eps(0.5625, 1e-9));
    for v in overlap.to_float() {
        assert!(v.x.fuzzy_eq(0.75) || v.x.fuzzy_eq(1.5));
        assert!(v.y.fuzzy_eq(0.75) || v.y.fuzzy_eq(1.5));
    }
}

#[test]
fn nest_loops_of_clip_output() {
    init_logging();
    let frame = vec![
        path![(0, 0), (100, 0), (100, 100), (0, 100)],
        path![(20, 20), (80, 20), (80, 80), (20, 80)],
    ];
    let islands = vec![
        path![(30, 30), (40, 30), (40, 40), (30, 40)],
        path![(60, 60), (70, 60), (70, 70), (60, 70)],
    ];
    // frame with a window, two islands placed inside the window
    let framed = boolean_op(
        ClipType::Difference,
        &frame[..1],
        &frame[1..],
        FillRule::NonZero,
        FillRule::NonZero,
    )
    .unwrap();
    let mut loops = framed.paths();
    loops.extend(islands);

    let hierarchy = nest_loops(&loops);
    assert_eq!(hierarchy.len(), 4);
    let outer = (0..2).find(|&i| !framed[i].is_hole).unwrap();
    let window = 1 - outer;
    assert_eq!(hierarchy.parents[outer], None);
    assert_eq!(hierarchy.parents[window], Some(outer));
    assert_eq!(hierarchy.parents[2], Some(window));
    assert_eq!(hierarchy.parents[3], Some(window));
    assert!(hierarchy.is_hole(window));
    assert!(!hierarchy.is_hole(2));
    assert_eq!(hierarchy.roots(), vec![outer]);
    assert_eq!(hierarchy.children_of(window), vec![2, 3]);

    // hole flags agree with the clipper's own hierarchy
    for i in 0..2 {
        assert_eq!(hierarchy.is_hole(i), framed[i].is_hole);
    }
}

#[test]
fn nest_loops_of_many_loops() {
    // grid of squares, each containing a smaller square
    let mut loops = Vec::new();
    for i in 0..10 {
        for j in 0..10 {
            let (x, y) = (i * 20, j * 20);
            loops.push(path![(x, y), (x + 15, y), (x + 15, y + 15), (x, y + 15)]);
            loops.push(path![(x + 5, y + 5), (x + 10, y + 5), (x + 10, y + 10), (x + 5, y + 10)]);
        }
    }
    let hierarchy = nest_loops(&loops);
    for k in 0..100 {
        assert_eq!(hierarchy.parents[2 * k], None);
        assert_eq!(hierarchy.parents[2 * k + 1], Some(2 * k));
        assert_eq!(hierarchy.depths[2 * k + 1], 1);
    }
}

#[test]
fn nest_loops_empty() {
    let loops: Vec<Vec<IntPoint>> = Vec::new();
    let hierarchy = nest_loops(&loops);
    assert!(hierarchy.is_empty());
    assert!(hierarchy.roots().is_empty());
}
