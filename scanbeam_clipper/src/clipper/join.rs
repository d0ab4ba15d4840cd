//! Deferred joins: output rings that share collinear edge segments are stitched together (or
//! split apart) once the sweep has finished.

use crate::core::math::{
    horz_segments_overlap, overlap_interval, path_inside_path, point_in_ring, slopes_equal3,
    IntPoint, Path, PointContainment,
};

use super::{output::OutPt, sweep::Sweep};

/// Two output points whose rings share a segment ending at `off_pt`.
#[derive(Debug, Clone, Copy)]
pub(super) struct Join {
    pub out_pt1: usize,
    pub out_pt2: usize,
    pub off_pt: IntPoint,
}

/// Horizontal output segment remembered from the top of the previous scanbeam.
#[derive(Debug, Clone, Copy)]
pub(super) struct GhostJoin {
    pub out_pt: usize,
    pub off_pt: IntPoint,
}

impl GhostJoin {
    pub(super) fn overlaps(&self, out_pts: &[OutPt], seg_a: IntPoint, seg_b: IntPoint) -> bool {
        horz_segments_overlap(out_pts[self.out_pt].pt, self.off_pt, seg_a, seg_b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HorzDir {
    LeftToRight,
    RightToLeft,
}

impl Sweep {
    pub(super) fn add_join(&mut self, out_pt1: usize, out_pt2: usize, off_pt: IntPoint) {
        self.joins.push(Join {
            out_pt1,
            out_pt2,
            off_pt,
        });
    }

    pub(super) fn add_ghost_join(&mut self, out_pt: usize, off_pt: IntPoint) {
        self.ghost_joins.push(GhostJoin { out_pt, off_pt });
    }

    /// Process all recorded joins.
    pub(super) fn join_common_edges(&mut self) {
        for i in 0..self.joins.len() {
            let mut join = self.joins[i];
            let rec1 = self.get_out_rec(self.out_pts[join.out_pt1].idx);
            let mut rec2 = self.get_out_rec(self.out_pts[join.out_pt2].idx);
            if self.out_recs[rec1].pts.is_none() || self.out_recs[rec2].pts.is_none() {
                continue;
            }
            if self.out_recs[rec1].is_open || self.out_recs[rec2].is_open {
                continue;
            }

            let hole_state_rec = if rec1 == rec2 {
                rec1
            } else {
                self.hole_state_rec(rec1, rec2)
            };

            if !self.join_points(&mut join, rec1, rec2) {
                continue;
            }

            if rec1 == rec2 {
                // the ring was split in two
                self.out_recs[rec1].pts = Some(join.out_pt1);
                self.out_recs[rec1].bottom_pt = None;
                rec2 = self.create_out_rec();
                self.out_recs[rec2].pts = Some(join.out_pt2);
                self.update_out_pt_idxs(rec2);

                for other in 0..rec2 {
                    let rec = &self.out_recs[other];
                    let Some(pts) = rec.pts else {
                        continue;
                    };
                    if self.parse_first_left(rec.first_left) != Some(rec1)
                        || rec.is_hole == self.out_recs[rec1].is_hole
                    {
                        continue;
                    }
                    if self.poly2_contains_poly1(pts, join.out_pt2) {
                        self.out_recs[other].first_left = Some(rec2);
                    }
                }

                let (Some(pts1), Some(pts2)) = (self.out_recs[rec1].pts, self.out_recs[rec2].pts)
                else {
                    continue;
                };
                if self.poly2_contains_poly1(pts2, pts1) {
                    // rec2 is inside rec1
                    self.out_recs[rec2].is_hole = !self.out_recs[rec1].is_hole;
                    self.out_recs[rec2].first_left = Some(rec1);
                    self.fixup_first_lefts2(rec2, rec1);
                    self.orient_ring(rec2);
                } else if self.poly2_contains_poly1(pts1, pts2) {
                    // rec1 is inside rec2
                    self.out_recs[rec2].is_hole = self.out_recs[rec1].is_hole;
                    self.out_recs[rec1].is_hole = !self.out_recs[rec2].is_hole;
                    self.out_recs[rec2].first_left = self.out_recs[rec1].first_left;
                    self.out_recs[rec1].first_left = Some(rec2);
                    self.fixup_first_lefts2(rec1, rec2);
                    self.orient_ring(rec1);
                } else {
                    // the two rings are disjoint
                    self.out_recs[rec2].is_hole = self.out_recs[rec1].is_hole;
                    self.out_recs[rec2].first_left = self.out_recs[rec1].first_left;
                    self.fixup_first_lefts1(rec1, rec2);
                }
            } else {
                // two rings merged into rec1
                self.out_recs[rec2].pts = None;
                self.out_recs[rec2].bottom_pt = None;
                self.out_recs[rec2].idx = self.out_recs[rec1].idx;

                self.out_recs[rec1].is_hole = self.out_recs[hole_state_rec].is_hole;
                if hole_state_rec == rec2 {
                    self.out_recs[rec1].first_left = self.out_recs[rec2].first_left;
                }
                self.out_recs[rec2].first_left = Some(rec1);
                self.fixup_first_lefts2(rec2, rec1);
            }
        }
    }

    /// Reverse a ring whose direction disagrees with its hole state.
    pub(super) fn orient_ring(&mut self, rec: usize) {
        let Some(pts) = self.out_recs[rec].pts else {
            return;
        };
        if (self.out_recs[rec].is_hole ^ self.options.reverse_solution) == (self.rec_area(rec) > 0.0) {
            self.reverse_links(pts);
        }
    }

    pub(super) fn update_out_pt_idxs(&mut self, rec: usize) {
        let Some(start) = self.out_recs[rec].pts else {
            return;
        };
        let mut op = start;
        loop {
            self.out_pts[op].idx = rec;
            op = self.out_pts[op].prev;
            if op == start {
                break;
            }
        }
    }

    /// Skip first left links to records that no longer own points.
    pub(super) fn parse_first_left(&self, first_left: Option<usize>) -> Option<usize> {
        let mut fl = first_left;
        while let Some(r) = fl {
            if self.out_recs[r].pts.is_some() {
                break;
            }
            fl = self.out_recs[r].first_left;
        }
        fl
    }

    /// True if the ring at `pts1` lies inside the ring at `pts2`, decided by its first vertex not
    /// on the boundary of `pts2`, or by an interior point when every vertex touches `pts2`.
    pub(super) fn poly2_contains_poly1(&self, pts1: usize, pts2: usize) -> bool {
        for pt in self.ring_points(pts1) {
            match point_in_ring(pt, self.ring_points(pts2)) {
                PointContainment::OnBoundary => continue,
                PointContainment::Inside => return true,
                PointContainment::Outside => return false,
            }
        }
        let inner: Path = self.ring_points(pts1).collect();
        let outer: Path = self.ring_points(pts2).collect();
        path_inside_path(&inner, &outer)
    }

    /// Redirect records whose first left was `old_rec` to `new_rec` when `new_rec` contains them.
    pub(super) fn fixup_first_lefts1(&mut self, old_rec: usize, new_rec: usize) {
        let Some(new_pts) = self.out_recs[new_rec].pts else {
            return;
        };
        for i in 0..self.out_recs.len() {
            let rec = &self.out_recs[i];
            if let Some(pts) = rec.pts {
                if rec.first_left == Some(old_rec) && self.poly2_contains_poly1(pts, new_pts) {
                    self.out_recs[i].first_left = Some(new_rec);
                }
            }
        }
    }

    /// Redirect every first left link to `old_rec` to `new_rec`.
    pub(super) fn fixup_first_lefts2(&mut self, old_rec: usize, new_rec: usize) {
        for rec in self.out_recs.iter_mut() {
            if rec.first_left == Some(old_rec) {
                rec.first_left = Some(new_rec);
            }
        }
    }

    /// Next point from `op` (forward or backward) not coincident with `pt`, or `op` itself.
    fn skip_coincident(&self, op: usize, pt: IntPoint, forward: bool) -> usize {
        let step = |p: usize| {
            if forward {
                self.out_pts[p].next
            } else {
                self.out_pts[p].prev
            }
        };
        let mut p = step(op);
        while p != op && self.out_pts[p].pt == pt {
            p = step(p);
        }
        p
    }

    /// Splice the rings at `op1` and `op2` together, duplicating both points so the shared
    /// vertex appears on each side of the cut.
    fn splice_rings(&mut self, join: &mut Join, op1: usize, op2: usize, reverse1: bool) {
        let op1b;
        if reverse1 {
            op1b = self.dup_out_pt(op1, false);
            let op2b = self.dup_out_pt(op2, true);
            self.out_pts[op1].prev = op2;
            self.out_pts[op2].next = op1;
            self.out_pts[op1b].next = op2b;
            self.out_pts[op2b].prev = op1b;
        } else {
            op1b = self.dup_out_pt(op1, true);
            let op2b = self.dup_out_pt(op2, false);
            self.out_pts[op1].next = op2;
            self.out_pts[op2].prev = op1;
            self.out_pts[op1b].prev = op2b;
            self.out_pts[op2b].next = op1b;
        }
        join.out_pt1 = op1;
        join.out_pt2 = op1b;
    }

    fn join_points(&mut self, join: &mut Join, rec1: usize, rec2: usize) -> bool {
        let (mut op1, mut op2) = (join.out_pt1, join.out_pt2);
        let off_pt = join.off_pt;
        let op1_pt = self.out_pts[op1].pt;
        let is_horizontal = op1_pt.y == off_pt.y;

        if is_horizontal && off_pt == op1_pt && off_pt == self.out_pts[op2].pt {
            // strictly simple join, a ring touching itself at a single vertex
            if rec1 != rec2 {
                return false;
            }
            let op1b = self.skip_coincident(op1, off_pt, true);
            let reverse1 = self.out_pts[op1b].pt.y > off_pt.y;
            let op2b = self.skip_coincident(op2, off_pt, true);
            let reverse2 = self.out_pts[op2b].pt.y > off_pt.y;
            if reverse1 == reverse2 {
                return false;
            }
            self.splice_rings(join, op1, op2, reverse1);
            return true;
        }

        if is_horizontal {
            // extend both sides out to the extremes of their horizontal runs
            let mut op1b = op1;
            loop {
                let prev = self.out_pts[op1].prev;
                if self.out_pts[prev].pt.y != self.out_pts[op1].pt.y || prev == op1b || prev == op2 {
                    break;
                }
                op1 = prev;
            }
            loop {
                let next = self.out_pts[op1b].next;
                if self.out_pts[next].pt.y != self.out_pts[op1b].pt.y || next == op1 || next == op2 {
                    break;
                }
                op1b = next;
            }
            let next = self.out_pts[op1b].next;
            if next == op1 || next == op2 {
                // flat ring
                return false;
            }

            let mut op2b = op2;
            loop {
                let prev = self.out_pts[op2].prev;
                if self.out_pts[prev].pt.y != self.out_pts[op2].pt.y || prev == op2b || prev == op1b {
                    break;
                }
                op2 = prev;
            }
            loop {
                let next = self.out_pts[op2b].next;
                if self.out_pts[next].pt.y != self.out_pts[op2b].pt.y || next == op2 || next == op1 {
                    break;
                }
                op2b = next;
            }
            let next = self.out_pts[op2b].next;
            if next == op2 || next == op1 {
                return false;
            }

            let (p1, p1b, p2, p2b) = (
                self.out_pts[op1].pt,
                self.out_pts[op1b].pt,
                self.out_pts[op2].pt,
                self.out_pts[op2b].pt,
            );
            let Some((left, right)) = overlap_interval(p1.x, p1b.x, p2.x, p2b.x) else {
                return false;
            };

            // keep op1 and op2 off the discarded side of the resulting spike
            let in_range = |x: i64| x >= left && x <= right;
            let (pt, discard_left) = if in_range(p1.x) {
                (p1, p1.x > p1b.x)
            } else if in_range(p2.x) {
                (p2, p2.x > p2b.x)
            } else if in_range(p1b.x) {
                (p1b, p1b.x > p1.x)
            } else {
                (p2b, p2b.x > p2.x)
            };

            join.out_pt1 = op1;
            join.out_pt2 = op2;
            return self.join_horz(op1, op1b, op2, op2b, pt, discard_left);
        }

        // non horizontal: both points share y and the shared segment runs up to off_pt
        let full_range = self.use_full_range;
        let mut op1b = self.skip_coincident(op1, op1_pt, true);
        let reverse1 = self.out_pts[op1b].pt.y > op1_pt.y
            || !slopes_equal3(op1_pt, self.out_pts[op1b].pt, off_pt, full_range);
        if reverse1 {
            op1b = self.skip_coincident(op1, op1_pt, false);
            if self.out_pts[op1b].pt.y > op1_pt.y
                || !slopes_equal3(op1_pt, self.out_pts[op1b].pt, off_pt, full_range)
            {
                return false;
            }
        }

        let op2_pt = self.out_pts[op2].pt;
        let mut op2b = self.skip_coincident(op2, op2_pt, true);
        let reverse2 = self.out_pts[op2b].pt.y > op2_pt.y
            || !slopes_equal3(op2_pt, self.out_pts[op2b].pt, off_pt, full_range);
        if reverse2 {
            op2b = self.skip_coincident(op2, op2_pt, false);
            if self.out_pts[op2b].pt.y > op2_pt.y
                || !slopes_equal3(op2_pt, self.out_pts[op2b].pt, off_pt, full_range)
            {
                return false;
            }
        }

        if op1b == op1 || op2b == op2 || op1b == op2b || (rec1 == rec2 && reverse1 == reverse2) {
            return false;
        }

        self.splice_rings(join, op1, op2, reverse1);
        true
    }

    /// Move `op` along its horizontal run to `pt` and split it there, returns `(op, op_b)`.
    fn split_horz_run(
        &mut self,
        op: usize,
        dir: HorzDir,
        pt: IntPoint,
        discard_left: bool,
    ) -> (usize, usize) {
        let mut op = op;
        let insert_after = match dir {
            HorzDir::LeftToRight => {
                loop {
                    let next = self.out_pts[self.out_pts[op].next].pt;
                    if !(next.x <= pt.x && next.x >= self.out_pts[op].pt.x && next.y == pt.y) {
                        break;
                    }
                    op = self.out_pts[op].next;
                }
                if discard_left && self.out_pts[op].pt.x != pt.x {
                    op = self.out_pts[op].next;
                }
                !discard_left
            }
            HorzDir::RightToLeft => {
                loop {
                    let next = self.out_pts[self.out_pts[op].next].pt;
                    if !(next.x >= pt.x && next.x <= self.out_pts[op].pt.x && next.y == pt.y) {
                        break;
                    }
                    op = self.out_pts[op].next;
                }
                if !discard_left && self.out_pts[op].pt.x != pt.x {
                    op = self.out_pts[op].next;
                }
                discard_left
            }
        };

        let mut op_b = self.dup_out_pt(op, insert_after);
        if self.out_pts[op_b].pt != pt {
            op = op_b;
            self.out_pts[op].pt = pt;
            op_b = self.dup_out_pt(op, insert_after);
        }
        (op, op_b)
    }

    fn join_horz(
        &mut self,
        op1: usize,
        op1b: usize,
        op2: usize,
        op2b: usize,
        pt: IntPoint,
        discard_left: bool,
    ) -> bool {
        let dir_of = |a: usize, b: usize| {
            if self.out_pts[a].pt.x > self.out_pts[b].pt.x {
                HorzDir::RightToLeft
            } else {
                HorzDir::LeftToRight
            }
        };
        let dir1 = dir_of(op1, op1b);
        let dir2 = dir_of(op2, op2b);
        if dir1 == dir2 {
            return false;
        }

        let (op1, op1b) = self.split_horz_run(op1, dir1, pt, discard_left);
        let (op2, op2b) = self.split_horz_run(op2, dir2, pt, discard_left);

        if (dir1 == HorzDir::LeftToRight) == discard_left {
            self.out_pts[op1].prev = op2;
            self.out_pts[op2].next = op1;
            self.out_pts[op1b].next = op2b;
            self.out_pts[op2b].prev = op1b;
        } else {
            self.out_pts[op1].next = op2;
            self.out_pts[op2].prev = op1;
            self.out_pts[op1b].prev = op2b;
            self.out_pts[op2b].next = op1b;
        }
        true
    }
}
