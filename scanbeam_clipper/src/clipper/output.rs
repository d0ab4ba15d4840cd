//! Output rings under construction: arena-allocated points and the records that own them.

use crate::core::math::IntPoint;

use super::{
    edge::{edge_slopes_equal, EdgeSide, OutIdx, HORIZONTAL},
    sweep::Sweep,
};

/// A vertex of an output ring, linked circularly with its neighbors.
#[derive(Debug, Clone)]
pub(super) struct OutPt {
    /// Index of the owning [OutRec] at the time the point was created or last re-tagged.
    pub idx: usize,
    pub pt: IntPoint,
    pub next: usize,
    pub prev: usize,
}

/// An output ring (closed polygon or open polyline) being assembled by the sweep.
#[derive(Debug, Clone)]
pub(super) struct OutRec {
    /// Own index, or the index of the record this one was merged into.
    pub idx: usize,
    pub is_hole: bool,
    pub is_open: bool,
    /// Nearest record to the left when this one was created, resolves to the containing outer
    /// ring after hole linkage is fixed.
    pub first_left: Option<usize>,
    pub pts: Option<usize>,
    pub bottom_pt: Option<usize>,
}

fn get_dx(pt1: IntPoint, pt2: IntPoint) -> f64 {
    if pt1.y == pt2.y {
        HORIZONTAL
    } else {
        (pt2.x - pt1.x) as f64 / (pt2.y - pt1.y) as f64
    }
}

impl Sweep {
    pub(super) fn create_out_rec(&mut self) -> usize {
        let idx = self.out_recs.len();
        self.out_recs.push(OutRec {
            idx,
            is_hole: false,
            is_open: false,
            first_left: None,
            pts: None,
            bottom_pt: None,
        });
        idx
    }

    /// New single point ring owned by `rec`.
    fn new_out_pt(&mut self, rec: usize, pt: IntPoint) -> usize {
        let op = self.out_pts.len();
        self.out_pts.push(OutPt {
            idx: rec,
            pt,
            next: op,
            prev: op,
        });
        op
    }

    /// Follow merge forwarding to the record currently owning `idx`'s points.
    pub(super) fn get_out_rec(&self, idx: usize) -> usize {
        let mut rec = idx;
        while self.out_recs[rec].idx != rec {
            rec = self.out_recs[rec].idx;
        }
        rec
    }

    /// Append `pt` to the ring of edge `e` (front for left bounds, back for right bounds),
    /// creating the ring if the edge has none. Returns the point now representing `pt`.
    pub(super) fn add_out_pt(&mut self, e: usize, pt: IntPoint) -> usize {
        let to_front = self.edges[e].side == EdgeSide::Left;

        let existing = self.edges[e]
            .out_idx
            .rec()
            .and_then(|rec| self.out_recs[rec].pts.map(|op| (rec, op)));

        let Some((rec, op)) = existing else {
            let rec = match self.edges[e].out_idx.rec() {
                Some(rec) => rec,
                None => self.create_out_rec(),
            };
            let is_open = self.edges[e].wind_delta == 0;
            self.out_recs[rec].is_open = is_open;
            let new_op = self.new_out_pt(rec, pt);
            self.out_recs[rec].pts = Some(new_op);
            if !is_open {
                self.set_hole_state(e, rec);
            }
            self.edges[e].out_idx = OutIdx::Rec(rec);
            return new_op;
        };

        let op_prev = self.out_pts[op].prev;
        if to_front && pt == self.out_pts[op].pt {
            return op;
        }
        if !to_front && pt == self.out_pts[op_prev].pt {
            return op_prev;
        }

        let new_op = self.out_pts.len();
        self.out_pts.push(OutPt {
            idx: rec,
            pt,
            next: op,
            prev: op_prev,
        });
        self.out_pts[op_prev].next = new_op;
        self.out_pts[op].prev = new_op;
        if to_front {
            self.out_recs[rec].pts = Some(new_op);
        }
        new_op
    }

    /// Copy of `op` linked directly after (or before) it.
    pub(super) fn dup_out_pt(&mut self, op: usize, insert_after: bool) -> usize {
        let OutPt { idx, pt, next, prev } = self.out_pts[op];
        let result = self.out_pts.len();
        if insert_after {
            self.out_pts.push(OutPt {
                idx,
                pt,
                next,
                prev: op,
            });
            self.out_pts[next].prev = result;
            self.out_pts[op].next = result;
        } else {
            self.out_pts.push(OutPt {
                idx,
                pt,
                next: op,
                prev,
            });
            self.out_pts[prev].next = result;
            self.out_pts[op].prev = result;
        }
        result
    }

    /// Hole state of a new ring from the nearest ring to the left of `e` that encloses it: edges of
    /// the same ring seen in pairs cancel out.
    fn set_hole_state(&mut self, e: usize, rec: usize) {
        let mut enclosing = None;
        let mut e2 = self.edges[e].prev_in_ael;
        while let Some(ei) = e2 {
            let edge = &self.edges[ei];
            if let OutIdx::Rec(other) = edge.out_idx {
                if edge.wind_delta != 0 {
                    enclosing = match enclosing {
                        None => Some(other),
                        Some(r) if r == other => None,
                        Some(r) => Some(r),
                    };
                }
            }
            e2 = edge.prev_in_ael;
        }

        match enclosing {
            None => {
                self.out_recs[rec].first_left = None;
                self.out_recs[rec].is_hole = false;
            }
            Some(other) => {
                self.out_recs[rec].first_left = Some(other);
                self.out_recs[rec].is_hole = !self.out_recs[other].is_hole;
            }
        }
    }

    /// Start a new ring at a local minimum shared by `e1` and `e2`.
    pub(super) fn add_local_min_poly(&mut self, e1: usize, e2: usize, pt: IntPoint) -> usize {
        let (result, e, prev_e);
        if self.edges[e2].is_horizontal() || self.edges[e1].dx > self.edges[e2].dx {
            result = self.add_out_pt(e1, pt);
            self.edges[e2].out_idx = self.edges[e1].out_idx;
            self.edges[e1].side = EdgeSide::Left;
            self.edges[e2].side = EdgeSide::Right;
            e = e1;
            prev_e = if self.edges[e].prev_in_ael == Some(e2) {
                self.edges[e2].prev_in_ael
            } else {
                self.edges[e].prev_in_ael
            };
        } else {
            result = self.add_out_pt(e2, pt);
            self.edges[e1].out_idx = self.edges[e2].out_idx;
            self.edges[e1].side = EdgeSide::Right;
            self.edges[e2].side = EdgeSide::Left;
            e = e2;
            prev_e = if self.edges[e].prev_in_ael == Some(e1) {
                self.edges[e1].prev_in_ael
            } else {
                self.edges[e].prev_in_ael
            };
        }

        if let Some(p) = prev_e {
            let (edge, prev_edge) = (&self.edges[e], &self.edges[p]);
            if prev_edge.out_idx.is_rec()
                && prev_edge.top_x(pt.y) == edge.top_x(pt.y)
                && edge_slopes_equal(edge, prev_edge, self.use_full_range)
                && edge.wind_delta != 0
                && prev_edge.wind_delta != 0
            {
                let top = edge.top;
                let out_pt = self.add_out_pt(p, pt);
                self.add_join(result, out_pt, top);
            }
        }

        result
    }

    /// Close the ring(s) of two edges meeting at a local maximum.
    pub(super) fn add_local_max_poly(&mut self, e1: usize, e2: usize, pt: IntPoint) {
        self.add_out_pt(e1, pt);
        if self.edges[e2].wind_delta == 0 {
            self.add_out_pt(e2, pt);
        }

        match (self.edges[e1].out_idx.rec(), self.edges[e2].out_idx.rec()) {
            (Some(r1), Some(r2)) if r1 == r2 => {
                self.edges[e1].out_idx = OutIdx::Unassigned;
                self.edges[e2].out_idx = OutIdx::Unassigned;
            }
            (Some(r1), Some(r2)) if r1 < r2 => self.append_polygon(e1, e2),
            (Some(_), Some(_)) => self.append_polygon(e2, e1),
            _ => {}
        }
    }

    /// True if `rec2` is reachable by walking `rec1`'s first left chain.
    pub(super) fn param1_right_of_param2(&self, rec1: usize, rec2: usize) -> bool {
        let mut rec = self.out_recs[rec1].first_left;
        while let Some(r) = rec {
            if r == rec2 {
                return true;
            }
            rec = self.out_recs[r].first_left;
        }
        false
    }

    /// Record whose hole state a merge of `rec1` and `rec2` inherits.
    pub(super) fn hole_state_rec(&mut self, rec1: usize, rec2: usize) -> usize {
        if self.param1_right_of_param2(rec1, rec2) {
            rec2
        } else if self.param1_right_of_param2(rec2, rec1) {
            rec1
        } else {
            self.get_lowermost_rec(rec1, rec2)
        }
    }

    /// Join the ring of `e2` onto the ring of `e1`.
    fn append_polygon(&mut self, e1: usize, e2: usize) {
        let (Some(rec1), Some(rec2)) = (self.edges[e1].out_idx.rec(), self.edges[e2].out_idx.rec())
        else {
            return;
        };
        let (Some(p1_lft), Some(p2_lft)) = (self.out_recs[rec1].pts, self.out_recs[rec2].pts) else {
            return;
        };

        let hole_state_rec = self.hole_state_rec(rec1, rec2);

        let p1_rt = self.out_pts[p1_lft].prev;
        let p2_rt = self.out_pts[p2_lft].prev;

        let side;
        if self.edges[e1].side == EdgeSide::Left {
            if self.edges[e2].side == EdgeSide::Left {
                // z y x a b c
                self.reverse_links(p2_lft);
                self.out_pts[p2_lft].next = p1_lft;
                self.out_pts[p1_lft].prev = p2_lft;
                self.out_pts[p1_rt].next = p2_rt;
                self.out_pts[p2_rt].prev = p1_rt;
                self.out_recs[rec1].pts = Some(p2_rt);
            } else {
                // x y z a b c
                self.out_pts[p2_rt].next = p1_lft;
                self.out_pts[p1_lft].prev = p2_rt;
                self.out_pts[p2_lft].prev = p1_rt;
                self.out_pts[p1_rt].next = p2_lft;
                self.out_recs[rec1].pts = Some(p2_lft);
            }
            side = EdgeSide::Left;
        } else {
            if self.edges[e2].side == EdgeSide::Right {
                // a b c z y x
                self.reverse_links(p2_lft);
                self.out_pts[p1_rt].next = p2_rt;
                self.out_pts[p2_rt].prev = p1_rt;
                self.out_pts[p2_lft].next = p1_lft;
                self.out_pts[p1_lft].prev = p2_lft;
            } else {
                // a b c x y z
                self.out_pts[p1_rt].next = p2_lft;
                self.out_pts[p2_lft].prev = p1_rt;
                self.out_pts[p1_lft].prev = p2_rt;
                self.out_pts[p2_rt].next = p1_lft;
            }
            side = EdgeSide::Right;
        }

        self.out_recs[rec1].bottom_pt = None;
        if hole_state_rec == rec2 {
            if self.out_recs[rec2].first_left != Some(rec1) {
                self.out_recs[rec1].first_left = self.out_recs[rec2].first_left;
            }
            self.out_recs[rec1].is_hole = self.out_recs[rec2].is_hole;
        }
        self.out_recs[rec2].pts = None;
        self.out_recs[rec2].bottom_pt = None;
        self.out_recs[rec2].first_left = Some(rec1);

        let ok_idx = self.edges[e1].out_idx;
        let obsolete_idx = self.edges[e2].out_idx;
        self.edges[e1].out_idx = OutIdx::Unassigned;
        self.edges[e2].out_idx = OutIdx::Unassigned;

        let mut e = self.active_edges;
        while let Some(ei) = e {
            if self.edges[ei].out_idx == obsolete_idx {
                self.edges[ei].out_idx = ok_idx;
                self.edges[ei].side = side;
                break;
            }
            e = self.edges[ei].next_in_ael;
        }

        self.out_recs[rec2].idx = self.out_recs[rec1].idx;
    }

    /// Reverse the direction of the ring containing `pp`.
    pub(super) fn reverse_links(&mut self, pp: usize) {
        let mut op = pp;
        loop {
            let OutPt { next, prev, .. } = self.out_pts[op];
            self.out_pts[op].next = prev;
            self.out_pts[op].prev = next;
            op = next;
            if op == pp {
                break;
            }
        }
    }

    /// Number of points in the ring containing `pp`.
    pub(super) fn point_count(&self, pp: usize) -> usize {
        let mut count = 0;
        let mut op = pp;
        loop {
            count += 1;
            op = self.out_pts[op].next;
            if op == pp {
                break;
            }
        }
        count
    }

    /// Iterate the points of the ring starting at `pp` in forward order.
    pub(super) fn ring_points(&self, pp: usize) -> impl Iterator<Item = IntPoint> + Clone + '_ {
        let mut op = Some(pp);
        std::iter::from_fn(move || {
            let current = op?;
            let next = self.out_pts[current].next;
            op = if next == pp { None } else { Some(next) };
            Some(self.out_pts[current].pt)
        })
    }

    /// Signed area of a record's ring, same sign as the exported path.
    pub(super) fn rec_area(&self, rec: usize) -> f64 {
        let Some(pp) = self.out_recs[rec].pts else {
            return 0.0;
        };
        let mut a = 0.0;
        let mut op = pp;
        loop {
            let prev = self.out_pts[self.out_pts[op].prev].pt;
            let pt = self.out_pts[op].pt;
            a += (prev.x as f64 + pt.x as f64) * (prev.y as f64 - pt.y as f64);
            op = self.out_pts[op].next;
            if op == pp {
                break;
            }
        }
        a * 0.5
    }

    /// Lowest (largest y, then smallest x) point of the ring containing `pp`.
    pub(super) fn get_bottom_pt(&self, pp: usize) -> usize {
        let mut pp = pp;
        let mut dups = None;
        let mut p = self.out_pts[pp].next;
        while p != pp {
            let (ppt, bpt) = (self.out_pts[p].pt, self.out_pts[pp].pt);
            if ppt.y > bpt.y {
                pp = p;
                dups = None;
            } else if ppt.y == bpt.y && ppt.x <= bpt.x {
                if ppt.x < bpt.x {
                    dups = None;
                    pp = p;
                } else if self.out_pts[p].next != pp && self.out_pts[p].prev != pp {
                    dups = Some(p);
                }
            }
            p = self.out_pts[p].next;
        }

        // several distinct vertices share the bottom point, pick by adjoining edge slopes
        if let Some(mut d) = dups {
            while d != p {
                if !self.first_is_bottom_pt(p, d) {
                    pp = d;
                }
                d = self.out_pts[d].next;
                while self.out_pts[d].pt != self.out_pts[pp].pt {
                    d = self.out_pts[d].next;
                }
            }
        }
        pp
    }

    pub(super) fn first_is_bottom_pt(&self, btm1: usize, btm2: usize) -> bool {
        let neighbor_dx = |btm: usize, forward: bool| -> f64 {
            let step = |op: usize| {
                if forward {
                    self.out_pts[op].next
                } else {
                    self.out_pts[op].prev
                }
            };
            let pt = self.out_pts[btm].pt;
            let mut p = step(btm);
            while self.out_pts[p].pt == pt && p != btm {
                p = step(p);
            }
            get_dx(pt, self.out_pts[p].pt).abs()
        };

        let dx1p = neighbor_dx(btm1, false);
        let dx1n = neighbor_dx(btm1, true);
        let dx2p = neighbor_dx(btm2, false);
        let dx2n = neighbor_dx(btm2, true);
        (dx1p >= dx2p && dx1p >= dx2n) || (dx1n >= dx2p && dx1n >= dx2n)
    }

    fn get_lowermost_rec(&mut self, rec1: usize, rec2: usize) -> usize {
        for rec in [rec1, rec2] {
            if self.out_recs[rec].bottom_pt.is_none() {
                let bottom = self.out_recs[rec].pts.map(|pp| self.get_bottom_pt(pp));
                self.out_recs[rec].bottom_pt = bottom;
            }
        }

        let (Some(bp1), Some(bp2)) = (self.out_recs[rec1].bottom_pt, self.out_recs[rec2].bottom_pt)
        else {
            return rec1;
        };
        let (pt1, pt2) = (self.out_pts[bp1].pt, self.out_pts[bp2].pt);

        if pt1.y > pt2.y {
            rec1
        } else if pt1.y < pt2.y {
            rec2
        } else if pt1.x < pt2.x {
            rec1
        } else if pt1.x > pt2.x {
            rec2
        } else if self.out_pts[bp1].next == bp1 {
            rec2
        } else if self.out_pts[bp2].next == bp2 || self.first_is_bottom_pt(bp1, bp2) {
            rec1
        } else {
            rec2
        }
    }
}
