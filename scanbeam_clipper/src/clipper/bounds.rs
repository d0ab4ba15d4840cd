//! Conversion of input paths into edges chained into bounds, and the local minima that start
//! those bounds.

use log::debug;

use crate::core::math::{
    coord_range, pt2_is_between_pt1_and_pt3, slopes_equal3, CoordRange, IntPoint,
};

use super::{
    edge::{Edge, EdgeSide, OutIdx, HORIZONTAL},
    scanbeam::LocalMinimum,
    ClipError, PolyType,
};

/// All edges and local minima added to a clipper, kept immutable across execute calls.
#[derive(Debug, Clone, Default)]
pub(crate) struct EdgeSet {
    pub edges: Vec<Edge>,
    pub minima: Vec<LocalMinimum>,
    pub use_full_range: bool,
    pub has_open_paths: bool,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.minima.clear();
        self.use_full_range = false;
        self.has_open_paths = false;
    }

    /// Add one path, returns `Ok(false)` if the path was degenerate and dropped.
    pub fn add_path(
        &mut self,
        path: &[IntPoint],
        poly_type: PolyType,
        closed: bool,
        preserve_collinear: bool,
    ) -> Result<bool, ClipError> {
        if !closed && poly_type == PolyType::Clip {
            debug!("dropping open clip path, open paths must be subject paths");
            return Ok(false);
        }

        if path.is_empty() {
            return Ok(false);
        }

        let mut high_i = path.len() - 1;
        if closed {
            while high_i > 0 && path[high_i] == path[0] {
                high_i -= 1;
            }
        }
        while high_i > 0 && path[high_i] == path[high_i - 1] {
            high_i -= 1;
        }

        if (closed && high_i < 2) || (!closed && high_i < 1) {
            debug!("dropping degenerate path with {} points", path.len());
            return Ok(false);
        }

        let path = &path[..=high_i];
        let mut full_range = self.use_full_range;
        for &pt in path {
            match coord_range(pt) {
                CoordRange::Low => {}
                CoordRange::High => full_range = true,
                CoordRange::OutOfRange => {
                    return Err(ClipError::CoordinateOutOfRange { x: pt.x, y: pt.y });
                }
            }
        }
        self.use_full_range = full_range;

        let base = self.edges.len();
        let count = path.len();
        self.edges.extend(path.iter().enumerate().map(|(i, &pt)| {
            Edge::new(pt, base + (i + 1) % count, base + (i + count - 1) % count)
        }));

        match self.link_path_edges(base, poly_type, closed, preserve_collinear) {
            Some(()) => Ok(true),
            None => {
                self.edges.truncate(base);
                debug!("dropping path with no area after removing duplicate/collinear points");
                Ok(false)
            }
        }
    }

    fn link_path_edges(
        &mut self,
        base: usize,
        poly_type: PolyType,
        closed: bool,
        preserve_collinear: bool,
    ) -> Option<()> {
        let full_range = self.use_full_range;

        // remove duplicate vertices, and collinear edges when closed
        let mut e_start = base;
        let mut e = e_start;
        let mut e_loop_stop = e_start;
        loop {
            let (prev, next) = (self.edges[e].prev, self.edges[e].next);
            if self.edges[e].curr == self.edges[next].curr && (closed || next != e_start) {
                if e == next {
                    break;
                }
                if e == e_start {
                    e_start = next;
                }
                e = self.remove_edge(e);
                e_loop_stop = e;
                continue;
            }

            if prev == next {
                // only two vertices
                break;
            }

            let (prev_pt, pt, next_pt) = (
                self.edges[prev].curr,
                self.edges[e].curr,
                self.edges[next].curr,
            );
            if closed
                && slopes_equal3(prev_pt, pt, next_pt, full_range)
                && (!preserve_collinear || !pt2_is_between_pt1_and_pt3(prev_pt, pt, next_pt))
            {
                if e == e_start {
                    e_start = next;
                }
                e = self.remove_edge(e);
                e = self.edges[e].prev;
                e_loop_stop = e;
                continue;
            }

            e = next;
            if e == e_loop_stop || (!closed && self.edges[e].next == e_start) {
                break;
            }
        }

        if (!closed && e == self.edges[e].next)
            || (closed && self.edges[e].prev == self.edges[e].next)
        {
            return None;
        }

        if !closed {
            self.has_open_paths = true;
            let start_prev = self.edges[e_start].prev;
            self.edges[start_prev].out_idx = OutIdx::Skip;
        }

        let mut is_flat = true;
        let start_y = self.edges[e_start].curr.y;
        e = e_start;
        loop {
            let next = self.edges[e].next;
            let next_curr = self.edges[next].curr;
            self.edges[e].init_geometry(next_curr, poly_type);
            e = next;
            if is_flat && self.edges[e].curr.y != start_y {
                is_flat = false;
            }
            if e == e_start {
                break;
            }
        }

        if is_flat {
            if closed {
                return None;
            }
            self.add_flat_open_path(e);
            return Some(());
        }

        let mut e_min: Option<usize> = None;
        {
            let prev = self.edges[e].prev;
            if self.edges[prev].bot == self.edges[prev].top {
                e = self.edges[e].next;
            }
        }

        loop {
            e = self.find_next_loc_min(e);
            match e_min {
                Some(m) if m == e => break,
                None => e_min = Some(e),
                _ => {}
            }

            let prev = self.edges[e].prev;
            let (left, right, left_is_forward) = if self.edges[e].dx < self.edges[prev].dx {
                (prev, e, false)
            } else {
                (e, prev, true)
            };

            let wind_delta = if !closed {
                0
            } else if self.edges[left].next == right {
                -1
            } else {
                1
            };
            self.edges[left].wind_delta = wind_delta;
            self.edges[right].wind_delta = -wind_delta;

            e = self.process_bound(left, left_is_forward);
            if self.edges[e].out_idx == OutIdx::Skip {
                e = self.process_bound(e, left_is_forward);
            }

            let mut e2 = self.process_bound(right, !left_is_forward);
            if self.edges[e2].out_idx == OutIdx::Skip {
                e2 = self.process_bound(e2, !left_is_forward);
            }

            let mut lm = LocalMinimum {
                y: self.edges[left].bot.y,
                left_bound: Some(left),
                right_bound: Some(right),
            };
            if self.edges[left].out_idx == OutIdx::Skip {
                lm.left_bound = None;
            } else if self.edges[right].out_idx == OutIdx::Skip {
                lm.right_bound = None;
            }
            self.minima.push(lm);

            if !left_is_forward {
                e = e2;
            }
        }

        Some(())
    }

    /// A completely horizontal open path forms a single right bound.
    fn add_flat_open_path(&mut self, start: usize) {
        let mut e = start;
        let prev = self.edges[e].prev;
        self.edges[prev].out_idx = OutIdx::Skip;
        let lm = LocalMinimum {
            y: self.edges[e].bot.y,
            left_bound: None,
            right_bound: Some(e),
        };
        self.edges[e].side = EdgeSide::Right;
        self.edges[e].wind_delta = 0;
        loop {
            let prev = self.edges[e].prev;
            if self.edges[e].bot.x != self.edges[prev].top.x {
                self.edges[e].reverse_horizontal();
            }
            let next = self.edges[e].next;
            if self.edges[next].out_idx == OutIdx::Skip {
                break;
            }
            self.edges[e].next_in_lml = Some(next);
            e = next;
        }
        self.minima.push(lm);
    }

    /// Unlink `e` from its path ring, returns the edge that followed it.
    fn remove_edge(&mut self, e: usize) -> usize {
        let (prev, next) = (self.edges[e].prev, self.edges[e].next);
        self.edges[prev].next = next;
        self.edges[next].prev = prev;
        next
    }

    #[inline]
    fn is_horz(&self, e: usize) -> bool {
        self.edges[e].dx == HORIZONTAL
    }

    fn find_next_loc_min(&self, mut e: usize) -> usize {
        let edges = &self.edges;
        loop {
            while edges[e].bot != edges[edges[e].prev].bot || edges[e].curr == edges[e].top {
                e = edges[e].next;
            }

            if !self.is_horz(e) && !self.is_horz(edges[e].prev) {
                break;
            }

            while self.is_horz(edges[e].prev) {
                e = edges[e].prev;
            }

            let e2 = e;
            while self.is_horz(e) {
                e = edges[e].next;
            }

            if edges[e].top.y == edges[edges[e].prev].bot.y {
                // just an intermediate horizontal
                continue;
            }

            if edges[edges[e2].prev].bot.x < edges[e].bot.x {
                e = e2;
            }
            break;
        }

        e
    }

    #[inline]
    fn step(&self, e: usize, forward: bool) -> usize {
        if forward {
            self.edges[e].next
        } else {
            self.edges[e].prev
        }
    }

    /// Chain the edges of one bound starting at `e` through `next_in_lml`, returns the first edge
    /// beyond the bound.
    fn process_bound(&mut self, e: usize, forward: bool) -> usize {
        let mut e = e;
        let mut result = e;

        if self.edges[e].out_idx == OutIdx::Skip {
            // more edges may remain in the bound beyond the skip edge, in which case they start
            // another local minimum
            if forward {
                while self.edges[e].top.y == self.edges[self.edges[e].next].bot.y {
                    e = self.edges[e].next;
                }
                // top horizontals are left to the opposite bound
                while e != result && self.edges[e].is_horizontal() {
                    e = self.edges[e].prev;
                }
            } else {
                while self.edges[e].top.y == self.edges[self.edges[e].prev].bot.y {
                    e = self.edges[e].prev;
                }
                while e != result && self.edges[e].is_horizontal() {
                    e = self.edges[e].next;
                }
            }

            if e == result {
                result = self.step(e, forward);
            } else {
                let start = self.step(result, forward);
                let lm = LocalMinimum {
                    y: self.edges[start].bot.y,
                    left_bound: None,
                    right_bound: Some(start),
                };
                self.edges[start].wind_delta = 0;
                result = self.process_bound(start, forward);
                self.minima.push(lm);
            }
            return result;
        }

        if self.edges[e].is_horizontal() {
            // may not be a true local minimum when following a skip edge, and consecutive
            // horizontals may start heading left before going right
            let e_start = self.step(e, !forward);
            if self.edges[e_start].is_horizontal() {
                if self.edges[e_start].bot.x != self.edges[e].bot.x
                    && self.edges[e_start].top.x != self.edges[e].bot.x
                {
                    self.edges[e].reverse_horizontal();
                }
            } else if self.edges[e_start].bot.x != self.edges[e].bot.x {
                self.edges[e].reverse_horizontal();
            }
        }

        let e_start = e;
        if forward {
            loop {
                let next = self.edges[result].next;
                if self.edges[result].top.y == self.edges[next].bot.y
                    && self.edges[next].out_idx != OutIdx::Skip
                {
                    result = next;
                } else {
                    break;
                }
            }
            let next = self.edges[result].next;
            if self.edges[result].is_horizontal() && self.edges[next].out_idx != OutIdx::Skip {
                // at the top of a bound, horizontals are added only when the preceding edge
                // attaches to the horizontal's left vertex
                let mut horz = result;
                while self.edges[self.edges[horz].prev].is_horizontal() {
                    horz = self.edges[horz].prev;
                }
                let horz_prev = self.edges[horz].prev;
                if self.edges[horz_prev].top.x > self.edges[next].top.x {
                    result = horz_prev;
                }
            }
            while e != result {
                let next = self.edges[e].next;
                self.edges[e].next_in_lml = Some(next);
                self.reverse_bound_horizontal(e, e_start, true);
                e = next;
            }
            self.reverse_bound_horizontal(e, e_start, true);
            self.edges[result].next
        } else {
            loop {
                let prev = self.edges[result].prev;
                if self.edges[result].top.y == self.edges[prev].bot.y
                    && self.edges[prev].out_idx != OutIdx::Skip
                {
                    result = prev;
                } else {
                    break;
                }
            }
            let prev = self.edges[result].prev;
            if self.edges[result].is_horizontal() && self.edges[prev].out_idx != OutIdx::Skip {
                let mut horz = result;
                while self.edges[self.edges[horz].next].is_horizontal() {
                    horz = self.edges[horz].next;
                }
                let horz_next = self.edges[horz].next;
                if self.edges[horz_next].top.x >= self.edges[prev].top.x {
                    result = horz_next;
                }
            }
            while e != result {
                let prev = self.edges[e].prev;
                self.edges[e].next_in_lml = Some(prev);
                self.reverse_bound_horizontal(e, e_start, false);
                e = prev;
            }
            self.reverse_bound_horizontal(e, e_start, false);
            self.edges[result].prev
        }
    }

    /// Align an inner horizontal of a bound so its bottom meets the preceding edge's top.
    fn reverse_bound_horizontal(&mut self, e: usize, e_start: usize, forward: bool) {
        if e == e_start || !self.edges[e].is_horizontal() {
            return;
        }
        let before = self.step(e, !forward);
        if self.edges[e].bot.x != self.edges[before].top.x {
            self.edges[e].reverse_horizontal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn square_forms_one_local_minimum() {
        let mut set = EdgeSet::new();
        let added = set
            .add_path(&path![(0, 0), (10, 0), (10, 10), (0, 10)], PolyType::Subject, true, false)
            .unwrap();
        assert!(added);
        assert_eq!(set.minima.len(), 1);
        let lm = set.minima[0];
        assert_eq!(lm.y, 10);
        let left = lm.left_bound.unwrap();
        let right = lm.right_bound.unwrap();
        assert_eq!(set.edges[left].wind_delta, -set.edges[right].wind_delta);
        assert!(!set.use_full_range);
    }

    #[test]
    fn degenerate_paths_are_dropped() {
        let mut set = EdgeSet::new();
        assert!(!set
            .add_path(&path![(0, 0), (10, 0), (0, 0)], PolyType::Subject, true, false)
            .unwrap());
        // collinear closed path has no area
        assert!(!set
            .add_path(&path![(0, 0), (5, 5), (10, 10)], PolyType::Subject, true, false)
            .unwrap());
        // flat closed path
        assert!(!set
            .add_path(&path![(0, 0), (5, 0), (10, 0)], PolyType::Clip, true, false)
            .unwrap());
        // open clip path
        assert!(!set
            .add_path(&path![(0, 0), (5, 5)], PolyType::Clip, false, false)
            .unwrap());
        assert!(set.edges.is_empty());
        assert!(set.minima.is_empty());
    }

    #[test]
    fn open_path_has_one_bound_per_minimum() {
        let mut set = EdgeSet::new();
        assert!(set
            .add_path(&path![(0, 0), (5, 10), (10, 0)], PolyType::Subject, false, false)
            .unwrap());
        assert!(set.has_open_paths);
        assert!(!set.minima.is_empty());
        for lm in &set.minima {
            for e in [lm.left_bound, lm.right_bound].into_iter().flatten() {
                assert_eq!(set.edges[e].wind_delta, 0);
            }
        }
    }

    #[test]
    fn large_coordinates_switch_to_full_range() {
        let mut set = EdgeSet::new();
        let big = 0x4000_0000;
        assert!(set
            .add_path(&path![(0, 0), (big, 0), (big, big)], PolyType::Subject, true, false)
            .unwrap());
        assert!(set.use_full_range);

        let err = set
            .add_path(&path![(0, 0), (i64::MAX, 0), (0, 5)], PolyType::Subject, true, false)
            .unwrap_err();
        assert_eq!(err, ClipError::CoordinateOutOfRange { x: i64::MAX, y: 0 });
    }
}
