//! This module contains the C foreign function interface for scanbeam_clipper.
#![allow(non_camel_case_types)]
use core::slice;
use log::warn;
use scanbeam_clipper::{
    clipper::{ClipError, ClipOptions, ClipType, Clipper, FillRule, PolyType, Solution},
    core::math::{IntPoint, Path, Paths},
    nfp::{no_fit_polygon, NfpMode},
};
use std::{convert::TryFrom, ffi::c_char, panic};

pub mod error_handling;

use error_handling::{clear_last_error, set_last_error, LAST_ERROR};

/// Helper macro to catch unwind and return -1 if panic was caught otherwise returns whatever the
/// expression returned.
macro_rules! ffi_catch_unwind {
    ($body: expr) => {
        match panic::catch_unwind(move || $body) {
            Ok(r) => r,
            Err(_) => -1,
        }
    };
}

/// Represents a 2D integer point with x and y coordinate values.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct sbc_point {
    pub x: i64,
    pub y: i64,
}

impl sbc_point {
    pub fn new(x: i64, y: i64) -> Self {
        sbc_point { x, y }
    }

    pub fn from_internal(p: IntPoint) -> Self {
        sbc_point::new(p.x, p.y)
    }

    pub fn to_internal(self) -> IntPoint {
        IntPoint::new(self.x, self.y)
    }
}

/// FFI representation of [ClipOptions].
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct sbc_clip_o {
    pub reverse_solution: u8,
    pub strictly_simple: u8,
    pub preserve_collinear: u8,
}

impl sbc_clip_o {
    /// Convert FFI clip options type to internal type.
    pub fn to_internal(&self) -> ClipOptions {
        ClipOptions {
            reverse_solution: self.reverse_solution != 0,
            strictly_simple: self.strictly_simple != 0,
            preserve_collinear: self.preserve_collinear != 0,
        }
    }
}

impl Default for sbc_clip_o {
    fn default() -> Self {
        let d = ClipOptions::default();
        Self {
            reverse_solution: d.reverse_solution as u8,
            strictly_simple: d.strictly_simple as u8,
            preserve_collinear: d.preserve_collinear as u8,
        }
    }
}

/// Write default option values to a [sbc_clip_o].
///
/// ## Specific Error Codes
/// * 1 = `options` is null.
///
/// # Safety
///
/// `options` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_clip_o_init(options: *mut sbc_clip_o) -> i32 {
    ffi_catch_unwind!({
        if options.is_null() {
            return 1;
        }

        options.write(Default::default());
        0
    })
}

fn clip_type_from_u32(i: u32) -> Option<ClipType> {
    match i {
        0 => Some(ClipType::Intersection),
        1 => Some(ClipType::Union),
        2 => Some(ClipType::Difference),
        3 => Some(ClipType::Xor),
        _ => None,
    }
}

fn fill_rule_from_u32(i: u32) -> Option<FillRule> {
    match i {
        0 => Some(FillRule::EvenOdd),
        1 => Some(FillRule::NonZero),
        2 => Some(FillRule::Positive),
        3 => Some(FillRule::Negative),
        _ => None,
    }
}

fn poly_type_from_u32(i: u32) -> Option<PolyType> {
    match i {
        0 => Some(PolyType::Subject),
        1 => Some(PolyType::Clip),
        _ => None,
    }
}

unsafe fn path_from_raw(points: *const sbc_point, n_points: u32) -> Path {
    if points.is_null() || n_points == 0 {
        return Path::new();
    }

    slice::from_raw_parts(points, n_points as usize)
        .iter()
        .map(|p| p.to_internal())
        .collect()
}

fn report_clip_error(function: &str, err: &ClipError) {
    warn!("{function} failed: {err}");
    set_last_error(err.to_string(), format!("{function}: {err:?}"));
}

/// Opaque type that wraps a [Clipper].
///
/// Note the internal member is only public for composing in other Rust libraries wanting to use the
/// FFI opaque type as part of their FFI API.
#[derive(Debug, Default)]
pub struct sbc_clipper(pub Clipper);

/// Create a new clipper object.
///
/// `options` sets the clip options to use, may be null to use defaults.
/// `clipper` is an out parameter to hold the created clipper.
///
/// # Safety
///
/// `options` must be null or point to a valid [sbc_clip_o].
/// `clipper` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_clipper_create(
    options: *const sbc_clip_o,
    clipper: *mut *const sbc_clipper,
) -> i32 {
    ffi_catch_unwind!({
        let result = match options.as_ref() {
            Some(o) => Clipper::with_options(o.to_internal()),
            None => Clipper::new(),
        };

        clipper.write(Box::into_raw(Box::new(sbc_clipper(result))));
        0
    })
}

/// Free an existing [sbc_clipper] object.
///
/// Nothing happens if `clipper` is null.
///
/// # Safety
///
/// `clipper` must be null or a valid sbc_clipper object that was created with
/// [sbc_clipper_create] and has not already been freed.
#[no_mangle]
pub unsafe extern "C" fn sbc_clipper_f(clipper: *mut sbc_clipper) {
    if !clipper.is_null() {
        drop(Box::from_raw(clipper))
    }
}

/// Add a path to the subject (`poly_type` = 0) or clip (`poly_type` = 1) set of the clipper.
///
/// `points` is an array of [sbc_point] (may be null if `n_points` is 0).
/// `is_closed` marks the path as a closed loop if non-zero (open paths must be subject paths).
/// `added` is an out parameter set to non-zero if the path was added, zero if it was dropped as
/// degenerate. May be null.
///
/// ## Specific Error Codes
/// * 1 = `clipper` is null.
/// * 2 = `poly_type` is not a valid value.
/// * 3 = a coordinate is outside the supported range (see [sbc_last_error_msg]).
///
/// # Safety
///
/// `clipper` must be null or a valid sbc_clipper object that was created with
/// [sbc_clipper_create] and has not been freed.
/// `points` may be null if `n_points` is 0 or must point to a valid contiguous buffer of
/// [sbc_point] with length of at least `n_points`.
/// `added` must be null or point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_clipper_add_path(
    clipper: *mut sbc_clipper,
    points: *const sbc_point,
    n_points: u32,
    poly_type: u32,
    is_closed: u8,
    added: *mut u8,
) -> i32 {
    ffi_catch_unwind!({
        if clipper.is_null() {
            return 1;
        }

        let Some(poly_type) = poly_type_from_u32(poly_type) else {
            return 2;
        };

        let path = path_from_raw(points, n_points);
        match (*clipper).0.add_path(&path, poly_type, is_closed != 0) {
            Ok(was_added) => {
                if !added.is_null() {
                    added.write(was_added as u8);
                }
                0
            }
            Err(err) => {
                report_clip_error("sbc_clipper_add_path", &err);
                3
            }
        }
    })
}

/// Remove all paths from the clipper.
///
/// ## Specific Error Codes
/// * 1 = `clipper` is null.
///
/// # Safety
///
/// `clipper` must be null or a valid sbc_clipper object that was created with
/// [sbc_clipper_create] and has not been freed.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_clipper_clear(clipper: *mut sbc_clipper) -> i32 {
    ffi_catch_unwind!({
        if clipper.is_null() {
            return 1;
        }

        (*clipper).0.clear();
        0
    })
}

/// Run a boolean operation over the paths added to the clipper.
///
/// `clip_type` must be one of the following:
/// * 0 = intersection
/// * 1 = union
/// * 2 = difference
/// * 3 = xor
///
/// `subject_fill` and `clip_fill` must be one of the following:
/// * 0 = even-odd
/// * 1 = non-zero
/// * 2 = positive
/// * 3 = negative
///
/// `solution` is an out parameter to hold the result, it is only written on success.
///
/// ## Specific Error Codes
/// * 1 = `clipper` is null.
/// * 2 = `clip_type` is not a valid value.
/// * 3 = `subject_fill` or `clip_fill` is not a valid value.
/// * 4 = the operation failed (see [sbc_last_error_msg]).
///
/// # Safety
///
/// `clipper` must be null or a valid sbc_clipper object that was created with
/// [sbc_clipper_create] and has not been freed.
/// `solution` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_clipper_execute(
    clipper: *const sbc_clipper,
    clip_type: u32,
    subject_fill: u32,
    clip_fill: u32,
    solution: *mut *const sbc_solution,
) -> i32 {
    ffi_catch_unwind!({
        if clipper.is_null() {
            return 1;
        }

        let Some(clip_type) = clip_type_from_u32(clip_type) else {
            return 2;
        };

        let (Some(subject_fill), Some(clip_fill)) =
            (fill_rule_from_u32(subject_fill), fill_rule_from_u32(clip_fill))
        else {
            return 3;
        };

        match (*clipper).0.execute(clip_type, subject_fill, clip_fill) {
            Ok(result) => {
                solution.write(Box::into_raw(Box::new(sbc_solution(result))));
                0
            }
            Err(err) => {
                report_clip_error("sbc_clipper_execute", &err);
                4
            }
        }
    })
}

/// Opaque type that wraps a [Solution].
///
/// Note the internal member is only public for composing in other Rust libraries wanting to use the
/// FFI opaque type as part of their FFI API.
#[derive(Debug, Clone)]
pub struct sbc_solution(pub Solution);

/// Free an existing [sbc_solution] object.
///
/// Nothing happens if `solution` is null.
///
/// # Safety
///
/// `solution` must be null or a valid sbc_solution object that was created by
/// [sbc_clipper_execute] and has not already been freed.
#[no_mangle]
pub unsafe extern "C" fn sbc_solution_f(solution: *mut sbc_solution) {
    if !solution.is_null() {
        drop(Box::from_raw(solution))
    }
}

/// Get the number of paths in the solution.
///
/// ## Specific Error Codes
/// * 1 = `solution` is null.
///
/// # Safety
///
/// `solution` must be null or a valid sbc_solution object that was created by
/// [sbc_clipper_execute] and has not been freed.
/// `count` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_solution_get_count(
    solution: *const sbc_solution,
    count: *mut u32,
) -> i32 {
    ffi_catch_unwind!({
        if solution.is_null() {
            return 1;
        }

        count.write(u32::try_from((*solution).0.len()).unwrap());
        0
    })
}

/// Get the vertex count of the path at `index` in the solution.
///
/// ## Specific Error Codes
/// * 1 = `solution` is null.
/// * 2 = `index` is out of bounds.
///
/// # Safety
///
/// `solution` must be null or a valid sbc_solution object that was created by
/// [sbc_clipper_execute] and has not been freed.
/// `count` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_solution_get_path_count(
    solution: *const sbc_solution,
    index: u32,
    count: *mut u32,
) -> i32 {
    ffi_catch_unwind!({
        if solution.is_null() {
            return 1;
        }

        match (*solution).0.get(index as usize) {
            Some(p) => {
                count.write(u32::try_from(p.points.len()).unwrap());
                0
            }
            None => 2,
        }
    })
}

/// Fills the buffer given with the points of the path at `index` in the solution.
///
/// You must use [sbc_solution_get_path_count] to ensure the buffer given has adequate length
/// to be filled with all points!
///
/// ## Specific Error Codes
/// * 1 = `solution` is null.
/// * 2 = `index` is out of bounds.
///
/// # Safety
///
/// `solution` must be null or a valid sbc_solution object that was created by
/// [sbc_clipper_execute] and has not been freed.
/// `points` must point to a buffer large enough to hold all points of the path.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_solution_get_path_data(
    solution: *const sbc_solution,
    index: u32,
    points: *mut sbc_point,
) -> i32 {
    ffi_catch_unwind!({
        if solution.is_null() {
            return 1;
        }

        match (*solution).0.get(index as usize) {
            Some(p) => {
                write_points(&p.points, points);
                0
            }
            None => 2,
        }
    })
}

/// Get the hole/open state and parent of the path at `index` in the solution.
///
/// `is_hole` and `is_open` are written non-zero when set. `parent` is written with the index of
/// the enclosing path, or -1 if the path has no parent. Any out parameter may be null.
///
/// ## Specific Error Codes
/// * 1 = `solution` is null.
/// * 2 = `index` is out of bounds.
///
/// # Safety
///
/// `solution` must be null or a valid sbc_solution object that was created by
/// [sbc_clipper_execute] and has not been freed.
/// `is_hole`, `is_open` and `parent` must each be null or point to a valid place in memory to be
/// written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_solution_get_path_info(
    solution: *const sbc_solution,
    index: u32,
    is_hole: *mut u8,
    is_open: *mut u8,
    parent: *mut i32,
) -> i32 {
    ffi_catch_unwind!({
        if solution.is_null() {
            return 1;
        }

        let Some(p) = (*solution).0.get(index as usize) else {
            return 2;
        };

        if !is_hole.is_null() {
            is_hole.write(p.is_hole as u8);
        }
        if !is_open.is_null() {
            is_open.write(p.is_open as u8);
        }
        if !parent.is_null() {
            parent.write(p.parent.map_or(-1, |i| i32::try_from(i).unwrap()));
        }
        0
    })
}

unsafe fn write_points(path: &[IntPoint], buffer: *mut sbc_point) {
    for (i, &p) in path.iter().enumerate() {
        buffer.add(i).write(sbc_point::from_internal(p));
    }
}

/// Opaque type that represents a list of paths.
///
/// Note the internal member is only public for composing in other Rust libraries wanting to use the
/// FFI opaque type as part of their FFI API.
#[derive(Debug, Clone)]
pub struct sbc_pathlist(pub Paths);

/// Free an existing [sbc_pathlist] object.
///
/// Nothing happens if `pathlist` is null.
///
/// # Safety
///
/// `pathlist` must be null or a valid sbc_pathlist object that has not already been freed.
#[no_mangle]
pub unsafe extern "C" fn sbc_pathlist_f(pathlist: *mut sbc_pathlist) {
    if !pathlist.is_null() {
        drop(Box::from_raw(pathlist))
    }
}

/// Get the number of paths in the list.
///
/// ## Specific Error Codes
/// * 1 = `pathlist` is null.
///
/// # Safety
///
/// `pathlist` must be null or a valid sbc_pathlist object that has not been freed.
/// `count` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_pathlist_get_count(
    pathlist: *const sbc_pathlist,
    count: *mut u32,
) -> i32 {
    ffi_catch_unwind!({
        if pathlist.is_null() {
            return 1;
        }

        count.write(u32::try_from((*pathlist).0.len()).unwrap());
        0
    })
}

/// Get the vertex count of the path at `index` in the list.
///
/// ## Specific Error Codes
/// * 1 = `pathlist` is null.
/// * 2 = `index` is out of bounds.
///
/// # Safety
///
/// `pathlist` must be null or a valid sbc_pathlist object that has not been freed.
/// `count` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_pathlist_get_path_count(
    pathlist: *const sbc_pathlist,
    index: u32,
    count: *mut u32,
) -> i32 {
    ffi_catch_unwind!({
        if pathlist.is_null() {
            return 1;
        }

        match (&(*pathlist).0).get(index as usize) {
            Some(p) => {
                count.write(u32::try_from(p.len()).unwrap());
                0
            }
            None => 2,
        }
    })
}

/// Fills the buffer given with the points of the path at `index` in the list.
///
/// You must use [sbc_pathlist_get_path_count] to ensure the buffer given has adequate length
/// to be filled with all points!
///
/// ## Specific Error Codes
/// * 1 = `pathlist` is null.
/// * 2 = `index` is out of bounds.
///
/// # Safety
///
/// `pathlist` must be null or a valid sbc_pathlist object that has not been freed.
/// `points` must point to a buffer large enough to hold all points of the path.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_pathlist_get_path_data(
    pathlist: *const sbc_pathlist,
    index: u32,
    points: *mut sbc_point,
) -> i32 {
    ffi_catch_unwind!({
        if pathlist.is_null() {
            return 1;
        }

        match (&(*pathlist).0).get(index as usize) {
            Some(p) => {
                write_points(p, points);
                0
            }
            None => 2,
        }
    })
}

/// Compute the no-fit polygon of `b` relative to `a`, see [no_fit_polygon].
///
/// `inside` selects the inside (non-zero) or outside (zero) no-fit polygon.
/// `result` is an out parameter to hold the created path list, it is only written on success.
///
/// ## Specific Error Codes
/// * 1 = the computation failed (see [sbc_last_error_msg]).
///
/// # Safety
///
/// `a_points` and `b_points` may be null if their counts are 0 or must point to valid contiguous
/// buffers of [sbc_point] with lengths of at least `n_a` and `n_b`.
/// `result` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_no_fit_polygon(
    a_points: *const sbc_point,
    n_a: u32,
    b_points: *const sbc_point,
    n_b: u32,
    inside: u8,
    result: *mut *const sbc_pathlist,
) -> i32 {
    ffi_catch_unwind!({
        let a = path_from_raw(a_points, n_a);
        let b = path_from_raw(b_points, n_b);
        let mode = if inside != 0 {
            NfpMode::Inside
        } else {
            NfpMode::Outside
        };

        match no_fit_polygon(&a, &b, mode) {
            Ok(paths) => {
                result.write(Box::into_raw(Box::new(sbc_pathlist(paths))));
                0
            }
            Err(err) => {
                report_clip_error("sbc_no_fit_polygon", &err);
                1
            }
        }
    })
}

/// Get the message of the last error set on this thread.
///
/// `msg` is written with a pointer to a null terminated string that stays valid until the next
/// call that sets or clears the last error on this thread.
///
/// ## Specific Error Codes
/// * 1 = no error has been set.
///
/// # Safety
///
/// `msg` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_last_error_msg(msg: *mut *const c_char) -> i32 {
    ffi_catch_unwind!({
        LAST_ERROR.with(|last| match last.borrow().as_ref() {
            Some(data) => {
                msg.write(data.error_msg.as_ptr());
                0
            }
            None => 1,
        })
    })
}

/// Get the report data (function and error details) of the last error set on this thread.
///
/// Same lifetime rules as [sbc_last_error_msg].
///
/// ## Specific Error Codes
/// * 1 = no error has been set.
///
/// # Safety
///
/// `report` must point to a valid place in memory to be written.
#[no_mangle]
#[must_use]
pub unsafe extern "C" fn sbc_last_error_report(report: *mut *const c_char) -> i32 {
    ffi_catch_unwind!({
        LAST_ERROR.with(|last| match last.borrow().as_ref() {
            Some(data) => {
                report.write(data.error_report_data.as_ptr());
                0
            }
            None => 1,
        })
    })
}

/// Clear the last error set on this thread.
#[no_mangle]
pub extern "C" fn sbc_clear_last_error() {
    clear_last_error();
}
