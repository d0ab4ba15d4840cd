//! Post sweep cleanup of output rings and conversion into a [Solution].

use log::debug;

use crate::{
    core::math::{area, pt2_is_between_pt1_and_pt3, slopes_equal3, Path},
    shape::nest_loops,
};

use super::{solution::SolutionPath, sweep::Sweep, Solution};

impl Sweep {
    /// Give closed rings the orientation matching their hole state.
    pub(super) fn fix_orientations(&mut self) {
        for rec in 0..self.out_recs.len() {
            if !self.out_recs[rec].is_open {
                self.orient_ring(rec);
            }
        }
    }

    /// Remove duplicate and (unless preserved) collinear points from every ring.
    pub(super) fn fixup_out_records(&mut self) {
        for rec in 0..self.out_recs.len() {
            if self.out_recs[rec].pts.is_none() {
                continue;
            }
            if self.out_recs[rec].is_open {
                self.fixup_out_polyline(rec);
            } else {
                self.fixup_out_polygon(rec);
            }
        }
    }

    fn fixup_out_polygon(&mut self, rec: usize) {
        self.out_recs[rec].bottom_pt = None;
        let Some(mut pp) = self.out_recs[rec].pts else {
            return;
        };
        let preserve_collinear = self.options.preserve_collinear || self.options.strictly_simple;
        let mut last_ok = None;

        loop {
            let (prev, next) = (self.out_pts[pp].prev, self.out_pts[pp].next);
            if prev == pp || prev == next {
                // fewer than 3 points remain
                self.out_recs[rec].pts = None;
                return;
            }

            let (prev_pt, pt, next_pt) = (
                self.out_pts[prev].pt,
                self.out_pts[pp].pt,
                self.out_pts[next].pt,
            );
            let redundant = pt == next_pt
                || pt == prev_pt
                || (slopes_equal3(prev_pt, pt, next_pt, self.use_full_range)
                    && (!preserve_collinear || !pt2_is_between_pt1_and_pt3(prev_pt, pt, next_pt)));

            if redundant {
                last_ok = None;
                self.out_pts[prev].next = next;
                self.out_pts[next].prev = prev;
                pp = prev;
            } else if last_ok == Some(pp) {
                break;
            } else {
                if last_ok.is_none() {
                    last_ok = Some(pp);
                }
                pp = next;
            }
        }

        self.out_recs[rec].pts = Some(pp);
    }

    fn fixup_out_polyline(&mut self, rec: usize) {
        let Some(mut pp) = self.out_recs[rec].pts else {
            return;
        };
        let mut last_pp = self.out_pts[pp].prev;
        while pp != last_pp {
            pp = self.out_pts[pp].next;
            let prev = self.out_pts[pp].prev;
            if self.out_pts[pp].pt == self.out_pts[prev].pt {
                if pp == last_pp {
                    last_pp = prev;
                }
                let prev_prev = self.out_pts[prev].prev;
                self.out_pts[prev_prev].next = pp;
                self.out_pts[pp].prev = prev_prev;
            }
        }
        if self.out_pts[pp].prev == pp {
            self.out_recs[rec].pts = None;
        }
    }

    /// Split rings at every vertex they touch themselves, so no output ring revisits a point.
    pub(super) fn do_simple_polygons(&mut self) {
        let mut i = 0;
        while i < self.out_recs.len() {
            let rec = i;
            i += 1;
            let Some(start) = self.out_recs[rec].pts else {
                continue;
            };
            if self.out_recs[rec].is_open {
                continue;
            }

            let mut op = start;
            loop {
                let mut op2 = self.out_pts[op].next;
                while Some(op2) != self.out_recs[rec].pts {
                    if self.out_pts[op].pt == self.out_pts[op2].pt
                        && self.out_pts[op2].next != op
                        && self.out_pts[op2].prev != op
                    {
                        let op3 = self.out_pts[op].prev;
                        let op4 = self.out_pts[op2].prev;
                        self.out_pts[op].prev = op4;
                        self.out_pts[op4].next = op;
                        self.out_pts[op2].prev = op3;
                        self.out_pts[op3].next = op2;

                        self.out_recs[rec].pts = Some(op);
                        let rec2 = self.create_out_rec();
                        self.out_recs[rec2].pts = Some(op2);
                        self.update_out_pt_idxs(rec2);

                        if self.poly2_contains_poly1(op2, op) {
                            self.out_recs[rec2].is_hole = !self.out_recs[rec].is_hole;
                            self.out_recs[rec2].first_left = Some(rec);
                            self.fixup_first_lefts2(rec2, rec);
                        } else if self.poly2_contains_poly1(op, op2) {
                            self.out_recs[rec2].is_hole = self.out_recs[rec].is_hole;
                            self.out_recs[rec].is_hole = !self.out_recs[rec2].is_hole;
                            self.out_recs[rec2].first_left = self.out_recs[rec].first_left;
                            self.out_recs[rec].first_left = Some(rec2);
                            self.fixup_first_lefts2(rec, rec2);
                        } else {
                            self.out_recs[rec2].is_hole = self.out_recs[rec].is_hole;
                            self.out_recs[rec2].first_left = self.out_recs[rec].first_left;
                            self.fixup_first_lefts1(rec, rec2);
                        }
                        op2 = op;
                    }
                    op2 = self.out_pts[op2].next;
                }
                op = self.out_pts[op].next;
                if Some(op) == self.out_recs[rec].pts {
                    break;
                }
            }
        }
    }

    /// Export all non degenerate rings.
    ///
    /// Hole state, parent and orientation of closed rings are taken from how the finished rings
    /// nest: a ring is a hole when it lies inside an odd number of other rings, and its parent is
    /// the smallest ring containing it.
    pub(super) fn build_solution(&mut self) -> Solution {
        let mut exported = Vec::new();
        for rec in 0..self.out_recs.len() {
            let out_rec = &self.out_recs[rec];
            let Some(pts) = out_rec.pts else {
                continue;
            };
            let count = self.point_count(pts);
            let min_count = if out_rec.is_open { 2 } else { 3 };
            if count < min_count {
                continue;
            }

            let mut points = Path::with_capacity(count);
            let mut op = self.out_pts[pts].prev;
            for _ in 0..count {
                points.push(self.out_pts[op].pt);
                op = self.out_pts[op].prev;
            }
            exported.push((out_rec.is_open, points));
        }

        let closed: Vec<usize> = (0..exported.len()).filter(|&i| !exported[i].0).collect();
        let hierarchy = nest_loops(&closed.iter().map(|&i| &exported[i].1).collect::<Vec<_>>());
        let mut nesting = vec![None; exported.len()];
        for (k, &i) in closed.iter().enumerate() {
            nesting[i] = Some((hierarchy.is_hole(k), hierarchy.parents[k].map(|p| closed[p])));
        }

        let reverse = self.options.reverse_solution;
        let paths: Vec<_> = exported
            .into_iter()
            .zip(nesting)
            .map(|((is_open, mut points), nesting)| {
                let (is_hole, parent) = nesting.unwrap_or((false, None));
                if !is_open && (is_hole ^ reverse) == (area(&points) > 0.0) {
                    points.reverse();
                }
                SolutionPath {
                    points,
                    is_hole,
                    is_open,
                    parent,
                }
            })
            .collect();

        debug!(
            "clip produced {} paths from {} output records",
            paths.len(),
            self.out_recs.len()
        );
        Solution::from_paths(paths)
    }
}
