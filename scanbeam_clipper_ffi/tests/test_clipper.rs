#[macro_use]
mod macros;

use scanbeam_clipper_ffi::*;
use std::{ffi::CStr, ptr};

fn square(x: i64, y: i64, size: i64) -> Vec<sbc_point> {
    vec![
        sbc_point::new(x, y),
        sbc_point::new(x + size, y),
        sbc_point::new(x + size, y + size),
        sbc_point::new(x, y + size),
    ]
}

fn create_clipper(options: Option<&sbc_clip_o>) -> *mut sbc_clipper {
    let mut result = ptr::null();
    let options_ptr = options.map_or(ptr::null(), |o| o as *const _);
    let err = unsafe { sbc_clipper_create(options_ptr, &mut result) };
    assert_eq!(err, 0);
    result as *mut _
}

unsafe fn add_path(clipper: *mut sbc_clipper, points: &[sbc_point], poly_type: u32) -> u8 {
    let mut added = 0;
    assert_eq!(
        sbc_clipper_add_path(
            clipper,
            points.as_ptr(),
            points.len() as u32,
            poly_type,
            1,
            &mut added
        ),
        0
    );
    added
}

unsafe fn solution_path(solution: *const sbc_solution, index: u32) -> Vec<sbc_point> {
    let mut count = 0;
    assert_eq!(sbc_solution_get_path_count(solution, index, &mut count), 0);
    let mut points = vec![sbc_point::new(0, 0); count as usize];
    assert_eq!(
        sbc_solution_get_path_data(solution, index, points.as_mut_ptr()),
        0
    );
    points
}

unsafe fn ring_area_of(solution: *const sbc_solution, index: u32) -> f64 {
    macros::ring_area(&solution_path(solution, index))
}

#[test]
fn clip_options_init() {
    let mut options = sbc_clip_o {
        reverse_solution: 1,
        strictly_simple: 1,
        preserve_collinear: 1,
    };
    unsafe {
        assert_eq!(sbc_clip_o_init(&mut options), 0);
        assert_eq!(sbc_clip_o_init(ptr::null_mut()), 1);
    }
    assert_eq!(options.reverse_solution, 0);
    assert_eq!(options.strictly_simple, 0);
    assert_eq!(options.preserve_collinear, 0);
}

#[test]
fn clipper_union_and_intersection() {
    let clipper = create_clipper(None);
    unsafe {
        assert_eq!(add_path(clipper, &square(0, 0, 10), 0), 1);
        assert_eq!(add_path(clipper, &square(5, 5, 10), 1), 1);

        // union
        let mut solution = ptr::null();
        assert_eq!(sbc_clipper_execute(clipper, 1, 1, 1, &mut solution), 0);
        let mut count = 0;
        assert_eq!(sbc_solution_get_count(solution, &mut count), 0);
        assert_eq!(count, 1);
        let points = solution_path(solution, 0);
        assert_eq!(points.len(), 8);
        assert_ring_area!(points, 175.0);
        assert_path_info!(solution, 0, hole: false, parent: -1);
        assert_eq!(sbc_solution_get_path_count(solution, 1, &mut count), 2);
        sbc_solution_f(solution as *mut _);

        // intersection on the same clipper
        let mut solution = ptr::null();
        assert_eq!(sbc_clipper_execute(clipper, 0, 1, 1, &mut solution), 0);
        let points = solution_path(solution, 0);
        assert_eq!(points.len(), 4);
        assert_ring_area!(points, 25.0);
        sbc_solution_f(solution as *mut _);

        // cleared clipper gives empty result
        assert_eq!(sbc_clipper_clear(clipper), 0);
        let mut solution = ptr::null();
        assert_eq!(sbc_clipper_execute(clipper, 1, 1, 1, &mut solution), 0);
        let mut count = 1;
        assert_eq!(sbc_solution_get_count(solution, &mut count), 0);
        assert_eq!(count, 0);
        sbc_solution_f(solution as *mut _);

        sbc_clipper_f(clipper);
    }
}

#[test]
fn clipper_hole_info() {
    let clipper = create_clipper(None);
    unsafe {
        add_path(clipper, &square(0, 0, 20), 0);
        add_path(clipper, &square(5, 5, 10), 1);
        let mut solution = ptr::null();
        assert_eq!(sbc_clipper_execute(clipper, 2, 1, 1, &mut solution), 0);
        let mut count = 0;
        assert_eq!(sbc_solution_get_count(solution, &mut count), 0);
        assert_eq!(count, 2);

        // outer ring first or second depending on sweep order
        let outer = if ring_area_of(solution, 0) > 0.0 { 0 } else { 1 };
        let hole = 1 - outer;
        assert_ring_area!(solution_path(solution, outer), 400.0);
        assert_ring_area!(solution_path(solution, hole), -100.0);
        assert_path_info!(solution, outer, hole: false, parent: -1);
        assert_path_info!(solution, hole, hole: true, parent: outer as i32);

        let mut is_hole = 0;
        assert_eq!(
            sbc_solution_get_path_info(solution, hole, &mut is_hole, ptr::null_mut(), ptr::null_mut()),
            0
        );
        assert_eq!(is_hole, 1);

        sbc_solution_f(solution as *mut _);
        sbc_clipper_f(clipper);
    }
}

#[test]
fn clipper_options_applied() {
    let options = sbc_clip_o {
        reverse_solution: 1,
        strictly_simple: 0,
        preserve_collinear: 0,
    };
    let clipper = create_clipper(Some(&options));
    unsafe {
        add_path(clipper, &square(0, 0, 10), 0);
        let mut solution = ptr::null();
        assert_eq!(sbc_clipper_execute(clipper, 1, 1, 1, &mut solution), 0);
        assert_ring_area!(solution_path(solution, 0), -100.0);
        sbc_solution_f(solution as *mut _);
        sbc_clipper_f(clipper);
    }
}

#[test]
fn clipper_invalid_arguments() {
    let clipper = create_clipper(None);
    let null_clipper: *mut sbc_clipper = ptr::null_mut();
    let points = square(0, 0, 10);
    unsafe {
        let mut added = 0;
        assert_eq!(
            sbc_clipper_add_path(null_clipper, points.as_ptr(), 4, 0, 1, &mut added),
            1
        );
        assert_eq!(
            sbc_clipper_add_path(clipper, points.as_ptr(), 4, 7, 1, &mut added),
            2
        );
        assert_eq!(sbc_clipper_clear(null_clipper), 1);

        // degenerate path is dropped, not an error
        assert_eq!(
            sbc_clipper_add_path(clipper, points.as_ptr(), 2, 0, 1, &mut added),
            0
        );
        assert_eq!(added, 0);
        // empty path with null buffer
        assert_eq!(
            sbc_clipper_add_path(clipper, ptr::null(), 0, 0, 1, ptr::null_mut()),
            0
        );

        let mut solution = ptr::null();
        assert_eq!(sbc_clipper_execute(null_clipper, 1, 1, 1, &mut solution), 1);
        assert_eq!(sbc_clipper_execute(clipper, 9, 1, 1, &mut solution), 2);
        assert_eq!(sbc_clipper_execute(clipper, 1, 1, 9, &mut solution), 3);
        assert!(solution.is_null());

        let mut count = 0;
        assert_eq!(sbc_solution_get_count(ptr::null(), &mut count), 1);

        sbc_clipper_f(clipper);
        sbc_clipper_f(ptr::null_mut());
        sbc_solution_f(ptr::null_mut());
    }
}

#[test]
fn clipper_out_of_range_sets_last_error() {
    let clipper = create_clipper(None);
    let points = vec![
        sbc_point::new(0, 0),
        sbc_point::new(i64::MAX, 0),
        sbc_point::new(0, 10),
    ];
    unsafe {
        sbc_clear_last_error();
        let mut msg = ptr::null();
        assert_eq!(sbc_last_error_msg(&mut msg), 1);

        assert_eq!(
            sbc_clipper_add_path(clipper, points.as_ptr(), 3, 0, 1, ptr::null_mut()),
            3
        );
        assert_eq!(sbc_last_error_msg(&mut msg), 0);
        let msg = CStr::from_ptr(msg).to_str().unwrap();
        assert!(msg.contains("outside the supported range"), "{}", msg);

        let mut report = ptr::null();
        assert_eq!(sbc_last_error_report(&mut report), 0);
        let report = CStr::from_ptr(report).to_str().unwrap();
        assert!(report.starts_with("sbc_clipper_add_path"), "{}", report);

        sbc_clear_last_error();
        let mut msg = ptr::null();
        assert_eq!(sbc_last_error_msg(&mut msg), 1);
        sbc_clipper_f(clipper);
    }
}

#[test]
fn no_fit_polygon_pathlist() {
    let a = square(0, 0, 10);
    let b = square(0, 0, 2);
    unsafe {
        let mut outside = ptr::null();
        assert_eq!(
            sbc_no_fit_polygon(a.as_ptr(), 4, b.as_ptr(), 4, 0, &mut outside),
            0
        );
        let mut count = 0;
        assert_eq!(sbc_pathlist_get_count(outside, &mut count), 0);
        assert_eq!(count, 1);
        assert_eq!(sbc_pathlist_get_path_count(outside, 0, &mut count), 0);
        let mut points = vec![sbc_point::new(0, 0); count as usize];
        assert_eq!(
            sbc_pathlist_get_path_data(outside, 0, points.as_mut_ptr()),
            0
        );
        assert_ring_area!(points, 144.0);
        assert_eq!(sbc_pathlist_get_path_count(outside, 1, &mut count), 2);
        sbc_pathlist_f(outside as *mut _);

        let mut inside = ptr::null();
        assert_eq!(
            sbc_no_fit_polygon(a.as_ptr(), 4, b.as_ptr(), 4, 1, &mut inside),
            0
        );
        let mut count = 0;
        assert_eq!(sbc_pathlist_get_count(inside, &mut count), 0);
        assert_eq!(count, 1);
        sbc_pathlist_f(inside as *mut _);

        assert_eq!(sbc_pathlist_get_count(ptr::null(), &mut count), 1);
    }
}
