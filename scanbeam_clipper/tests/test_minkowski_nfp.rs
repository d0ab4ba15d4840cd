mod test_utils;

use scanbeam_clipper::{
    clipper::{boolean_op, minkowski_diff, minkowski_sum, minkowski_sum_paths, ClipType, FillRule},
    core::math::{area, path_bounds, point_in_path, IntPoint, Path, PointContainment},
    nfp::{no_fit_polygon, NfpCache, NfpKey, NfpMode},
    path,
};
use test_utils::init_logging;

fn translated(path: &[IntPoint], offset: IntPoint) -> Path {
    path.iter().map(|&p| p + offset).collect()
}

fn overlap_area(a: &[IntPoint], b: &[IntPoint]) -> f64 {
    boolean_op(
        ClipType::Intersection,
        &[a.to_vec()],
        &[b.to_vec()],
        FillRule::NonZero,
        FillRule::NonZero,
    )
    .unwrap()
    .total_area()
}

fn largest(paths: &[Path]) -> &Path {
    paths
        .iter()
        .max_by(|p1, p2| area(p1).abs().total_cmp(&area(p2).abs()))
        .unwrap()
}

#[test]
fn minkowski_sum_of_open_segment_is_swept_box() {
    init_logging();
    let pattern = path![(-1, -1), (1, -1), (1, 1), (-1, 1)];
    let line = path![(0, 0), (10, 0)];
    let sum = minkowski_sum(&pattern, &line, false).unwrap();
    assert_eq!(sum.len(), 1);
    assert_eq!(area(&sum[0]), 24.0);
    assert_eq!(
        path_bounds(&sum[0]),
        Some((IntPoint::new(-1, -1), IntPoint::new(11, 1)))
    );
}

#[test]
fn minkowski_sum_of_closed_loop_is_annulus() {
    init_logging();
    let pattern = path![(-1, -1), (1, -1), (1, 1), (-1, 1)];
    let square = path![(0, 0), (10, 0), (10, 10), (0, 10)];
    let sum = minkowski_sum(&pattern, &square, true).unwrap();
    assert_eq!(sum.len(), 2);
    let total: f64 = sum.iter().map(|p| area(p)).sum();
    assert_eq!(total, 144.0 - 64.0);
    assert_eq!(
        path_bounds(largest(&sum)),
        Some((IntPoint::new(-1, -1), IntPoint::new(11, 11)))
    );
}

#[test]
fn minkowski_sum_paths_covers_loop_interior() {
    init_logging();
    let pattern = path![(-1, -1), (1, -1), (1, 1), (-1, 1)];
    let squares = vec![
        path![(0, 0), (10, 0), (10, 10), (0, 10)],
        path![(30, 0), (40, 0), (40, 10), (30, 10)],
    ];
    let sum = minkowski_sum_paths(&pattern, &squares, true).unwrap();
    assert_eq!(sum.len(), 2);
    for p in &sum {
        assert_eq!(area(p), 144.0);
    }
}

#[test]
fn minkowski_diff_of_square_with_itself_spans_both_directions() {
    init_logging();
    let square = path![(0, 0), (10, 0), (10, 10), (0, 10)];
    let diff = minkowski_diff(&square, &square).unwrap();
    assert!(!diff.is_empty());
    assert_eq!(
        path_bounds(largest(&diff)),
        Some((IntPoint::new(-10, -10), IntPoint::new(10, 10)))
    );
}

#[test]
fn minkowski_of_empty_input_is_empty() {
    let square = path![(0, 0), (10, 0), (10, 10), (0, 10)];
    assert!(minkowski_sum(&[], &square, true).unwrap().is_empty());
    assert!(minkowski_diff(&square, &[]).unwrap().is_empty());
}

mod no_fit_polygons {
    use super::*;

    fn sheet() -> Path {
        path![(0, 0), (10, 0), (10, 10), (0, 10)]
    }

    fn part_at(x: i64, y: i64) -> Path {
        path![(x, y), (x + 2, y), (x + 2, y + 2), (x, y + 2)]
    }

    #[test]
    fn outside_nfp_independent_of_part_position() {
        init_logging();
        let at_origin = no_fit_polygon(&sheet(), &part_at(0, 0), NfpMode::Outside).unwrap();
        let far_away = no_fit_polygon(&sheet(), &part_at(50, -70), NfpMode::Outside).unwrap();
        assert_eq!(at_origin.len(), 1);
        assert_eq!(far_away.len(), 1);
        assert_eq!(
            path_bounds(&at_origin[0]),
            Some((IntPoint::new(-2, -2), IntPoint::new(10, 10)))
        );
        assert_eq!(path_bounds(&at_origin[0]), path_bounds(&far_away[0]));
        assert_eq!(area(&far_away[0]), 144.0);
    }

    #[test]
    fn outside_nfp_boundary_touches_without_overlap() {
        init_logging();
        let a = path![(0, 0), (20, 0), (20, 5), (5, 5), (5, 20), (0, 20)];
        let b = part_at(100, 100);
        let nfp = no_fit_polygon(&a, &b, NfpMode::Outside).unwrap();
        assert_eq!(nfp.len(), 1);

        let reference = b[0];
        for &position in &nfp[0] {
            let placed = translated(&b, position - reference);
            assert_eq!(overlap_area(&a, &placed), 0.0, "position: {:?}", position);
        }

        // strictly inside the nfp the parts overlap
        let inside = IntPoint::new(1, 1);
        assert_eq!(point_in_path(inside, &nfp[0]), PointContainment::Inside);
        let placed = translated(&b, inside - reference);
        assert!(overlap_area(&a, &placed) > 0.0);
    }

    #[test]
    fn inside_nfp_is_valid_placement_region() {
        init_logging();
        let b = part_at(3, 3);
        let nfp = no_fit_polygon(&sheet(), &b, NfpMode::Inside).unwrap();
        assert_eq!(nfp.len(), 1);
        assert_eq!(area(&nfp[0]), 64.0);
        assert_eq!(
            path_bounds(&nfp[0]),
            Some((IntPoint::new(0, 0), IntPoint::new(8, 8)))
        );

        // a part placed on any inside nfp vertex is fully covered by the sheet
        for &position in &nfp[0] {
            let placed = translated(&b, position - b[0]);
            assert_eq!(overlap_area(&sheet(), &placed), 4.0);
        }
    }

    #[test]
    fn inside_nfp_of_exact_fit_is_degenerate() {
        init_logging();
        let b = path![(0, 0), (10, 0), (10, 10), (0, 10)];
        let nfp = no_fit_polygon(&sheet(), &b, NfpMode::Inside).unwrap();
        let total: f64 = nfp.iter().map(|p| area(p)).sum();
        assert_eq!(total, 0.0);
    }
}

mod nfp_cache {
    use super::*;

    #[test]
    fn placement_cycles_reuse_and_evict() {
        init_logging();
        let parts = [
            path![(0, 0), (10, 0), (10, 10), (0, 10)],
            path![(0, 0), (4, 0), (4, 3), (0, 3)],
            path![(0, 0), (6, 0), (3, 5)],
        ];
        let mut cache: NfpCache = NfpCache::new();

        let pairs = [(0u32, 1u32), (0, 2), (1, 2), (0, 1)];
        cache.begin_generation();
        for &(a, b) in &pairs {
            assert!(cache.request(NfpKey::new(a, b, false, 0, 0)).is_none());
        }
        // duplicate requests are queued once
        assert_eq!(cache.pending().len(), 3);

        let computed: Vec<_> = cache
            .pending()
            .iter()
            .map(|&key| {
                let nfp = no_fit_polygon(
                    &parts[key.a as usize],
                    &parts[key.b as usize],
                    NfpMode::Outside,
                )
                .ok();
                (key, nfp)
            })
            .collect();
        cache.finish_generation(computed);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.generation(), 1);

        // second cycle only needs part 0 against part 1
        cache.begin_generation();
        let key = NfpKey::new(0, 1, false, 0, 0);
        let nfp = cache.request(key).unwrap().clone();
        assert_eq!(
            nfp,
            no_fit_polygon(&parts[0], &parts[1], NfpMode::Outside).unwrap()
        );
        assert!(cache.pending().is_empty());
        cache.finish_generation(Vec::new());
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&NfpKey::new(1, 2, false, 0, 0)).is_none());

        cache.clear();
        assert!(cache.is_empty());
    }
}
