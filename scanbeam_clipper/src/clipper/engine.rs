use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::core::math::IntPoint;

use super::{
    bounds::EdgeSet, sweep::Sweep, ClipError, ClipOptions, ClipResult, ClipType, FillRule,
    PolyType, Solution,
};

/// Polygon clipper holding subject and clip paths.
///
/// Paths are converted into edges when added; [Clipper::execute] never modifies them so the same
/// clipper may be executed any number of times with different clip types and fill rules.
///
/// # Examples
///
/// ```
/// # use scanbeam_clipper::path;
/// # use scanbeam_clipper::clipper::*;
/// let mut clipper = Clipper::new();
/// clipper
///     .add_path(&path![(0, 0), (10, 0), (10, 10), (0, 10)], PolyType::Subject, true)
///     .unwrap();
/// clipper
///     .add_path(&path![(5, 5), (15, 5), (15, 15), (5, 15)], PolyType::Clip, true)
///     .unwrap();
///
/// let intersection = clipper
///     .execute(ClipType::Intersection, FillRule::NonZero, FillRule::NonZero)
///     .unwrap();
/// assert_eq!(intersection.total_area(), 25.0);
///
/// let difference = clipper
///     .execute(ClipType::Difference, FillRule::NonZero, FillRule::NonZero)
///     .unwrap();
/// assert_eq!(difference.total_area(), 75.0);
/// ```
#[derive(Debug, Default)]
pub struct Clipper {
    options: ClipOptions,
    input: EdgeSet,
    locked: AtomicBool,
}

/// Holds the execute lock, released on drop whatever way the call exits.
struct ExecuteGuard<'a> {
    locked: &'a AtomicBool,
}

impl<'a> ExecuteGuard<'a> {
    fn acquire(locked: &'a AtomicBool) -> ClipResult<Self> {
        locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| ClipError::ExecuteLocked)?;
        Ok(Self { locked })
    }
}

impl Drop for ExecuteGuard<'_> {
    fn drop(&mut self) {
        self.locked.store(false, Ordering::Release);
    }
}

impl Clipper {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_options(options: ClipOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    #[inline]
    pub fn options(&self) -> &ClipOptions {
        &self.options
    }

    /// Replace the options. `preserve_collinear` only affects paths added afterwards.
    #[inline]
    pub fn set_options(&mut self, options: ClipOptions) {
        self.options = options;
    }

    /// Add a path to the subject or clip set.
    ///
    /// Open paths (`closed == false`) are only supported as subject paths. Returns `Ok(false)`
    /// if the path was dropped because it is degenerate (too few distinct vertexes, zero area
    /// closed path) or an open clip path.
    pub fn add_path(
        &mut self,
        path: &[IntPoint],
        poly_type: PolyType,
        closed: bool,
    ) -> ClipResult<bool> {
        self.input
            .add_path(path, poly_type, closed, self.options.preserve_collinear)
    }

    /// Add several paths, returns true if any was added.
    pub fn add_paths<P>(
        &mut self,
        paths: &[P],
        poly_type: PolyType,
        closed: bool,
    ) -> ClipResult<bool>
    where
        P: AsRef<[IntPoint]>,
    {
        let mut any_added = false;
        for path in paths {
            any_added |= self.add_path(path.as_ref(), poly_type, closed)?;
        }
        Ok(any_added)
    }

    /// Remove all paths.
    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// True if at least one open subject path was added.
    #[inline]
    pub fn has_open_paths(&self) -> bool {
        self.input.has_open_paths
    }

    /// Run the boolean operation over the added paths.
    ///
    /// Fails with [ClipError::ExecuteLocked] if another call on this clipper is in progress, and
    /// with the other [ClipError] variants if the sweep hits an unrecoverable numerical state, in
    /// which case no partial output is returned.
    pub fn execute(
        &self,
        clip_type: ClipType,
        subject_fill: FillRule,
        clip_fill: FillRule,
    ) -> ClipResult<Solution> {
        let _guard = ExecuteGuard::acquire(&self.locked)?;
        debug!(
            "execute {clip_type:?} ({subject_fill:?}, {clip_fill:?}) over {} edges",
            self.input.edges.len()
        );
        Sweep::new(
            &self.input,
            self.options,
            clip_type,
            subject_fill,
            clip_fill,
        )
        .run()
    }
}
