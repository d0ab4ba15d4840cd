//! Edge crossings within a scanbeam: discovery, ordering and the per-crossing output rules.

use log::trace;

use crate::core::math::IntPoint;

use super::{
    edge::{intersect_point, OutIdx},
    sweep::{EdgeList, Sweep},
    winding::effective_winding,
    ClipError, ClipType, FillRule, PolyType,
};

/// A pending crossing of two active edges.
#[derive(Debug, Clone, Copy)]
pub(super) struct IntersectNode {
    pub edge1: usize,
    pub edge2: usize,
    pub pt: IntPoint,
}

impl Sweep {
    fn stops_at(&self, e: usize, pt: IntPoint, protect: bool) -> bool {
        let edge = &self.edges[e];
        !protect && edge.next_in_lml.is_none() && edge.top == pt
    }

    fn swap_sides(&mut self, e1: usize, e2: usize) {
        let side = self.edges[e1].side;
        self.edges[e1].side = self.edges[e2].side;
        self.edges[e2].side = side;
    }

    fn swap_out_idx(&mut self, e1: usize, e2: usize) {
        let idx = self.edges[e1].out_idx;
        self.edges[e1].out_idx = self.edges[e2].out_idx;
        self.edges[e2].out_idx = idx;
    }

    /// Apply a crossing of `e1` (left) and `e2` (right) at `pt`: update winding counts and emit
    /// output points. Edges ending at `pt` are removed unless `protect` is set.
    pub(super) fn intersect_edges(
        &mut self,
        e1: usize,
        e2: usize,
        pt: IntPoint,
        protect: bool,
    ) -> Result<(), ClipError> {
        let e1_stops = self.stops_at(e1, pt, protect);
        let e2_stops = self.stops_at(e2, pt, protect);
        let e1_contributing = self.edges[e1].out_idx.is_rec();
        let e2_contributing = self.edges[e2].out_idx.is_rec();

        if self.edges[e1].wind_delta == 0 || self.edges[e2].wind_delta == 0 {
            return self.intersect_open_edges(e1, e2, pt, e1_stops, e2_stops);
        }

        // update winding counts, edges are still in their pre crossing order
        let (pt1, pt2) = (self.edges[e1].poly_type, self.edges[e2].poly_type);
        if pt1 == pt2 {
            if self.own_fill(e1) == FillRule::EvenOdd {
                let wc = self.edges[e1].wind_cnt;
                self.edges[e1].wind_cnt = self.edges[e2].wind_cnt;
                self.edges[e2].wind_cnt = wc;
            } else {
                let (wd1, wd2) = (self.edges[e1].wind_delta, self.edges[e2].wind_delta);
                let e1_wc = &mut self.edges[e1].wind_cnt;
                *e1_wc = if *e1_wc + wd2 == 0 { -*e1_wc } else { *e1_wc + wd2 };
                let e2_wc = &mut self.edges[e2].wind_cnt;
                *e2_wc = if *e2_wc - wd1 == 0 { -*e2_wc } else { *e2_wc - wd1 };
            }
        } else {
            let (wd1, wd2) = (self.edges[e1].wind_delta, self.edges[e2].wind_delta);
            if self.own_fill(e2) != FillRule::EvenOdd {
                self.edges[e1].wind_cnt2 += wd2;
            } else {
                let wc2 = self.edges[e1].wind_cnt2;
                self.edges[e1].wind_cnt2 = if wc2 == 0 { 1 } else { 0 };
            }
            if self.own_fill(e1) != FillRule::EvenOdd {
                self.edges[e2].wind_cnt2 -= wd1;
            } else {
                let wc2 = self.edges[e2].wind_cnt2;
                self.edges[e2].wind_cnt2 = if wc2 == 0 { 1 } else { 0 };
            }
        }

        let (e1_fill, e2_fill) = (self.own_fill(e1), self.own_fill(e2));
        let e1_wc = effective_winding(e1_fill, self.edges[e1].wind_cnt);
        let e2_wc = effective_winding(e2_fill, self.edges[e2].wind_cnt);
        let unit = |wc: i32| wc == 0 || wc == 1;

        if e1_contributing && e2_contributing {
            if e1_stops
                || e2_stops
                || !unit(e1_wc)
                || !unit(e2_wc)
                || (pt1 != pt2 && self.clip_type != ClipType::Xor)
            {
                self.add_local_max_poly(e1, e2, pt);
            } else {
                self.add_out_pt(e1, pt);
                self.add_out_pt(e2, pt);
                self.swap_sides(e1, e2);
                self.swap_out_idx(e1, e2);
            }
        } else if e1_contributing {
            if unit(e2_wc) {
                self.add_out_pt(e1, pt);
                self.swap_sides(e1, e2);
                self.swap_out_idx(e1, e2);
            }
        } else if e2_contributing {
            if unit(e1_wc) {
                self.add_out_pt(e2, pt);
                self.swap_sides(e1, e2);
                self.swap_out_idx(e1, e2);
            }
        } else if unit(e1_wc) && unit(e2_wc) && !e1_stops && !e2_stops {
            // neither edge is currently contributing
            let e1_wc2 = effective_winding(self.other_fill(e1), self.edges[e1].wind_cnt2);
            let e2_wc2 = effective_winding(self.other_fill(e2), self.edges[e2].wind_cnt2);

            if pt1 != pt2 {
                self.add_local_min_poly(e1, e2, pt);
            } else if e1_wc == 1 && e2_wc == 1 {
                let starts_output = match self.clip_type {
                    ClipType::Intersection => e1_wc2 > 0 && e2_wc2 > 0,
                    ClipType::Union => e1_wc2 <= 0 && e2_wc2 <= 0,
                    ClipType::Difference => match pt1 {
                        PolyType::Clip => e1_wc2 > 0 && e2_wc2 > 0,
                        PolyType::Subject => e1_wc2 <= 0 && e2_wc2 <= 0,
                    },
                    ClipType::Xor => true,
                };
                if starts_output {
                    self.add_local_min_poly(e1, e2, pt);
                }
            } else {
                self.swap_sides(e1, e2);
            }
        }

        if e1_stops != e2_stops {
            let stopping = if e1_stops { e1 } else { e2 };
            if self.edges[stopping].out_idx.is_rec() {
                self.swap_sides(e1, e2);
                self.swap_out_idx(e1, e2);
            }
        }

        if e1_stops {
            self.delete_from_ael(e1);
        }
        if e2_stops {
            self.delete_from_ael(e2);
        }
        Ok(())
    }

    /// Crossing where at least one edge belongs to an open path.
    fn intersect_open_edges(
        &mut self,
        e1: usize,
        e2: usize,
        pt: IntPoint,
        e1_stops: bool,
        e2_stops: bool,
    ) -> Result<(), ClipError> {
        let e1_contributing = self.edges[e1].out_idx.is_rec();
        let e2_contributing = self.edges[e2].out_idx.is_rec();
        let (wd1, wd2) = (self.edges[e1].wind_delta, self.edges[e2].wind_delta);

        if wd1 == 0 && wd2 == 0 {
            if (e1_stops || e2_stops) && e1_contributing && e2_contributing {
                self.add_local_max_poly(e1, e2, pt);
            }
        } else if self.edges[e1].poly_type == self.edges[e2].poly_type
            && wd1 != wd2
            && self.clip_type == ClipType::Union
        {
            if wd1 == 0 {
                if e2_contributing {
                    self.add_out_pt(e1, pt);
                    if e1_contributing {
                        self.edges[e1].out_idx = OutIdx::Unassigned;
                    }
                }
            } else if e1_contributing {
                self.add_out_pt(e2, pt);
                if e2_contributing {
                    self.edges[e2].out_idx = OutIdx::Unassigned;
                }
            }
        } else if self.edges[e1].poly_type != self.edges[e2].poly_type {
            if wd1 == 0
                && self.edges[e2].wind_cnt.abs() == 1
                && (self.clip_type != ClipType::Union || self.edges[e2].wind_cnt2 == 0)
            {
                self.add_out_pt(e1, pt);
                if e1_contributing {
                    self.edges[e1].out_idx = OutIdx::Unassigned;
                }
            } else if wd2 == 0
                && self.edges[e1].wind_cnt.abs() == 1
                && (self.clip_type != ClipType::Union || self.edges[e1].wind_cnt2 == 0)
            {
                self.add_out_pt(e2, pt);
                if e2_contributing {
                    self.edges[e2].out_idx = OutIdx::Unassigned;
                }
            }
        }

        for (stops, e) in [(e1_stops, e1), (e2_stops, e2)] {
            if !stops {
                continue;
            }
            if self.edges[e].out_idx.is_rec() {
                return Err(ClipError::Invariant(
                    "open path edge still contributing at its end",
                ));
            }
            self.delete_from_ael(e);
        }
        Ok(())
    }

    /// Find, order and apply all edge crossings between `bot_y` and `top_y`.
    pub(super) fn process_intersections(&mut self, bot_y: i64, top_y: i64) -> Result<(), ClipError> {
        if self.active_edges.is_none() {
            return Ok(());
        }

        let result = self
            .build_intersect_list(bot_y, top_y)
            .and_then(|_| {
                if self.intersections.len() > 1 {
                    self.fixup_intersection_order(bot_y, top_y)
                } else {
                    Ok(())
                }
            })
            .and_then(|_| self.process_intersect_list());

        self.sorted_edges = None;
        self.intersections.clear();
        result
    }

    /// Bubble sort the edges by their x at `top_y`, every swap is a crossing.
    fn build_intersect_list(&mut self, bot_y: i64, top_y: i64) -> Result<(), ClipError> {
        self.sorted_edges = self.active_edges;
        let mut e = self.active_edges;
        while let Some(ei) = e {
            let x = self.edges[ei].top_x(top_y);
            let edge = &mut self.edges[ei];
            edge.prev_in_sel = edge.prev_in_ael;
            edge.next_in_sel = edge.next_in_ael;
            edge.curr.x = x;
            e = edge.next_in_ael;
        }

        let mut modified = true;
        while modified {
            let Some(head) = self.sorted_edges else {
                break;
            };
            modified = false;
            let mut e = head;
            while let Some(next) = self.edges[e].next_in_sel {
                if self.edges[e].curr.x > self.edges[next].curr.x {
                    let (edge, next_edge) = (&self.edges[e], &self.edges[next]);
                    let (mut pt, found) = intersect_point(edge, next_edge, self.use_full_range);
                    if !found && edge.curr.x > next_edge.curr.x + 1 {
                        return Err(ClipError::MissingIntersection);
                    }
                    if pt.y > bot_y {
                        pt.y = bot_y;
                        pt.x = if edge.dx.abs() > next_edge.dx.abs() {
                            next_edge.top_x(bot_y)
                        } else {
                            edge.top_x(bot_y)
                        };
                    }
                    self.intersections.push(IntersectNode {
                        edge1: e,
                        edge2: next,
                        pt,
                    });
                    self.swap_positions(e, next, EdgeList::Sorted);
                    modified = true;
                } else {
                    e = next;
                }
            }

            // the last edge is in its final place, shrink the pass
            match self.edges[e].prev_in_sel {
                Some(prev) => self.edges[prev].next_in_sel = None,
                None => break,
            }
        }

        trace!("{} crossings in scanbeam", self.intersections.len());
        Ok(())
    }

    fn edges_adjacent(&self, node: &IntersectNode) -> bool {
        self.edges[node.edge1].next_in_sel == Some(node.edge2)
            || self.edges[node.edge1].prev_in_sel == Some(node.edge2)
    }

    /// Reorder crossings so that each is between edges adjacent at the time it is processed.
    fn fixup_intersection_order(&mut self, bot_y: i64, top_y: i64) -> Result<(), ClipError> {
        // stable, bottom (largest y) first
        self.intersections.sort_by(|a, b| b.pt.y.cmp(&a.pt.y));

        self.copy_ael_to_sel();
        let count = self.intersections.len();
        for i in 0..count {
            if !self.edges_adjacent(&self.intersections[i]) {
                let j = (i + 1..count)
                    .find(|&j| self.edges_adjacent(&self.intersections[j]))
                    .ok_or(ClipError::IntersectionOrder { bot_y, top_y })?;
                self.intersections.swap(i, j);
            }
            let node = self.intersections[i];
            self.swap_positions(node.edge1, node.edge2, EdgeList::Sorted);
        }
        Ok(())
    }

    fn process_intersect_list(&mut self) -> Result<(), ClipError> {
        for i in 0..self.intersections.len() {
            let node = self.intersections[i];
            self.intersect_edges(node.edge1, node.edge2, node.pt, true)?;
            self.swap_positions(node.edge1, node.edge2, EdgeList::Active);
        }
        Ok(())
    }
}
