//! Per-call sweep context and the scanbeam state machine driving it.

use log::{debug, trace};

use crate::core::math::IntPoint;

use super::{
    bounds::EdgeSet,
    edge::{edge_slopes_equal, Edge, EdgeSide, OutIdx},
    intersect::IntersectNode,
    join::{GhostJoin, Join},
    output::{OutPt, OutRec},
    scanbeam::{MinimaQueue, Scanbeam},
    ClipError, ClipOptions, ClipType, FillRule, Solution,
};

/// Which intrusive edge list an operation acts on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum EdgeList {
    /// Active edge list, ordered left to right at the current sweep y.
    Active,
    /// Sorted edge list, the transient ordering used for horizontals and intersections.
    Sorted,
}

/// All mutable state of one execute call. Created from the clipper's immutable input edges and
/// dropped when the call returns, whatever the outcome.
#[derive(Debug)]
pub(super) struct Sweep {
    pub(super) edges: Vec<Edge>,
    pub(super) minima: MinimaQueue,
    pub(super) scanbeam: Scanbeam,
    pub(super) active_edges: Option<usize>,
    pub(super) sorted_edges: Option<usize>,
    pub(super) intersections: Vec<IntersectNode>,
    pub(super) out_recs: Vec<OutRec>,
    pub(super) out_pts: Vec<OutPt>,
    pub(super) joins: Vec<Join>,
    pub(super) ghost_joins: Vec<GhostJoin>,
    pub(super) clip_type: ClipType,
    pub(super) subj_fill: FillRule,
    pub(super) clip_fill: FillRule,
    pub(super) use_full_range: bool,
    pub(super) options: ClipOptions,
}

impl Sweep {
    pub(super) fn new(
        input: &EdgeSet,
        options: ClipOptions,
        clip_type: ClipType,
        subj_fill: FillRule,
        clip_fill: FillRule,
    ) -> Self {
        let mut sweep = Sweep {
            edges: input.edges.clone(),
            minima: MinimaQueue::new(&input.minima),
            scanbeam: Scanbeam::new(),
            active_edges: None,
            sorted_edges: None,
            intersections: Vec::new(),
            out_recs: Vec::new(),
            out_pts: Vec::new(),
            joins: Vec::new(),
            ghost_joins: Vec::new(),
            clip_type,
            subj_fill,
            clip_fill,
            use_full_range: input.use_full_range,
            options,
        };
        sweep.reset();
        sweep
    }

    fn reset(&mut self) {
        let minima: Vec<_> = self.minima.iter().copied().collect();
        for lm in minima {
            self.scanbeam.insert(lm.y);
            if let Some(lb) = lm.left_bound {
                let e = &mut self.edges[lb];
                e.curr = e.bot;
                e.side = EdgeSide::Left;
                e.out_idx = OutIdx::Unassigned;
            }
            if let Some(rb) = lm.right_bound {
                let e = &mut self.edges[rb];
                e.curr = e.bot;
                e.side = EdgeSide::Right;
                e.out_idx = OutIdx::Unassigned;
            }
        }
    }

    /// Run the sweep to completion and build the solution.
    pub(super) fn run(mut self) -> Result<Solution, ClipError> {
        let result = self.execute_internal();
        if let Err(ref err) = result {
            debug!("clip execute aborted: {err}");
        }
        result?;
        Ok(self.build_solution())
    }

    fn execute_internal(&mut self) -> Result<(), ClipError> {
        let Some(mut bot_y) = self.scanbeam.pop() else {
            return Ok(());
        };

        loop {
            self.insert_local_minima_into_ael(bot_y)?;
            self.ghost_joins.clear();
            self.process_horizontals(false)?;

            let Some(top_y) = self.scanbeam.pop() else {
                break;
            };
            trace!("scanbeam {bot_y} -> {top_y}");

            self.process_intersections(bot_y, top_y)?;
            self.process_edges_at_top_of_scanbeam(top_y)?;
            bot_y = top_y;

            if self.scanbeam.is_empty() && !self.minima.is_pending() {
                break;
            }
        }

        self.fix_orientations();
        self.join_common_edges();
        self.fixup_out_records();
        if self.options.strictly_simple {
            self.do_simple_polygons();
        }

        Ok(())
    }

    fn insert_local_minima_into_ael(&mut self, bot_y: i64) -> Result<(), ClipError> {
        while let Some(lm) = self.minima.pop_at(bot_y) {
            let mut op1 = None;

            match (lm.left_bound, lm.right_bound) {
                (None, Some(rb)) => {
                    self.insert_edge_into_ael(rb, None);
                    self.set_winding_count(rb);
                    if self.is_contributing(rb) {
                        op1 = Some(self.add_out_pt(rb, self.edges[rb].bot));
                    }
                }
                (Some(lb), None) => {
                    self.insert_edge_into_ael(lb, None);
                    self.set_winding_count(lb);
                    if self.is_contributing(lb) {
                        op1 = Some(self.add_out_pt(lb, self.edges[lb].bot));
                    }
                    self.scanbeam.insert(self.edges[lb].top.y);
                }
                (Some(lb), Some(rb)) => {
                    self.insert_edge_into_ael(lb, None);
                    self.insert_edge_into_ael(rb, Some(lb));
                    self.set_winding_count(lb);
                    self.edges[rb].wind_cnt = self.edges[lb].wind_cnt;
                    self.edges[rb].wind_cnt2 = self.edges[lb].wind_cnt2;
                    if self.is_contributing(lb) {
                        op1 = Some(self.add_local_min_poly(lb, rb, self.edges[lb].bot));
                    }
                    self.scanbeam.insert(self.edges[lb].top.y);
                }
                (None, None) => continue,
            }

            if let Some(rb) = lm.right_bound {
                if self.edges[rb].is_horizontal() {
                    self.add_edge_to_sel(rb);
                } else {
                    self.scanbeam.insert(self.edges[rb].top.y);
                }
            }

            let (Some(lb), Some(rb)) = (lm.left_bound, lm.right_bound) else {
                continue;
            };

            // output polygons sharing an edge with a horizontal rb need joining later
            if let Some(op1) = op1 {
                let rb_edge = &self.edges[rb];
                if rb_edge.is_horizontal() && rb_edge.wind_delta != 0 {
                    let (rb_bot, rb_top) = (rb_edge.bot, rb_edge.top);
                    let promoted: Vec<_> = self
                        .ghost_joins
                        .iter()
                        .filter(|gj| gj.overlaps(&self.out_pts, rb_bot, rb_top))
                        .map(|gj| (gj.out_pt, gj.off_pt))
                        .collect();
                    for (out_pt, off_pt) in promoted {
                        self.add_join(out_pt, op1, off_pt);
                    }
                }
            }

            if let (Some(op1), Some(prev)) = (op1, self.edges[lb].prev_in_ael) {
                let (lb_edge, prev_edge) = (&self.edges[lb], &self.edges[prev]);
                if lb_edge.out_idx.is_rec()
                    && prev_edge.curr.x == lb_edge.bot.x
                    && prev_edge.out_idx.is_rec()
                    && edge_slopes_equal(prev_edge, lb_edge, self.use_full_range)
                    && lb_edge.wind_delta != 0
                    && prev_edge.wind_delta != 0
                {
                    let (lb_bot, lb_top) = (lb_edge.bot, lb_edge.top);
                    let op2 = self.add_out_pt(prev, lb_bot);
                    self.add_join(op1, op2, lb_top);
                }
            }

            if self.edges[lb].next_in_ael != Some(rb) {
                if let (Some(op1), Some(prev)) = (op1, self.edges[rb].prev_in_ael) {
                    let (rb_edge, prev_edge) = (&self.edges[rb], &self.edges[prev]);
                    if rb_edge.out_idx.is_rec()
                        && prev_edge.out_idx.is_rec()
                        && edge_slopes_equal(prev_edge, rb_edge, self.use_full_range)
                        && rb_edge.wind_delta != 0
                        && prev_edge.wind_delta != 0
                    {
                        let (rb_bot, rb_top) = (rb_edge.bot, rb_edge.top);
                        let op2 = self.add_out_pt(prev, rb_bot);
                        self.add_join(op1, op2, rb_top);
                    }
                }

                // rb is treated as right of the crossed edges above the minimum
                let lb_curr = self.edges[lb].curr;
                let mut e = self.edges[lb].next_in_ael;
                while let Some(ei) = e {
                    if ei == rb {
                        break;
                    }
                    self.intersect_edges(rb, ei, lb_curr, false)?;
                    e = self.edges[ei].next_in_ael;
                }
            }
        }

        Ok(())
    }

    fn insert_edge_into_ael(&mut self, e: usize, start: Option<usize>) {
        let Some(head) = self.active_edges else {
            self.edges[e].prev_in_ael = None;
            self.edges[e].next_in_ael = None;
            self.active_edges = Some(e);
            return;
        };

        if start.is_none() && self.edges[e].inserts_before(&self.edges[head]) {
            self.edges[e].prev_in_ael = None;
            self.edges[e].next_in_ael = Some(head);
            self.edges[head].prev_in_ael = Some(e);
            self.active_edges = Some(e);
            return;
        }

        let mut start = start.unwrap_or(head);
        while let Some(next) = self.edges[start].next_in_ael {
            if self.edges[e].inserts_before(&self.edges[next]) {
                break;
            }
            start = next;
        }

        let next = self.edges[start].next_in_ael;
        self.edges[e].next_in_ael = next;
        if let Some(n) = next {
            self.edges[n].prev_in_ael = Some(e);
        }
        self.edges[e].prev_in_ael = Some(start);
        self.edges[start].next_in_ael = Some(e);
    }

    /// Push `e` onto the front of the sorted edge list (used as the horizontal queue).
    pub(super) fn add_edge_to_sel(&mut self, e: usize) {
        self.edges[e].prev_in_sel = None;
        self.edges[e].next_in_sel = self.sorted_edges;
        if let Some(head) = self.sorted_edges {
            self.edges[head].prev_in_sel = Some(e);
        }
        self.sorted_edges = Some(e);
    }

    #[inline]
    fn links(&self, e: usize, list: EdgeList) -> (Option<usize>, Option<usize>) {
        let edge = &self.edges[e];
        match list {
            EdgeList::Active => (edge.prev_in_ael, edge.next_in_ael),
            EdgeList::Sorted => (edge.prev_in_sel, edge.next_in_sel),
        }
    }

    #[inline]
    fn set_prev(&mut self, e: usize, list: EdgeList, value: Option<usize>) {
        match list {
            EdgeList::Active => self.edges[e].prev_in_ael = value,
            EdgeList::Sorted => self.edges[e].prev_in_sel = value,
        }
    }

    #[inline]
    fn set_next(&mut self, e: usize, list: EdgeList, value: Option<usize>) {
        match list {
            EdgeList::Active => self.edges[e].next_in_ael = value,
            EdgeList::Sorted => self.edges[e].next_in_sel = value,
        }
    }

    #[inline]
    fn head_mut(&mut self, list: EdgeList) -> &mut Option<usize> {
        match list {
            EdgeList::Active => &mut self.active_edges,
            EdgeList::Sorted => &mut self.sorted_edges,
        }
    }

    /// Unlink `e` from `list`, a no-op if it is not linked.
    pub(super) fn delete_from_list(&mut self, e: usize, list: EdgeList) {
        let (prev, next) = self.links(e, list);
        if prev.is_none() && next.is_none() && *self.head_mut(list) != Some(e) {
            return;
        }

        match prev {
            Some(p) => self.set_next(p, list, next),
            None => *self.head_mut(list) = next,
        }
        if let Some(n) = next {
            self.set_prev(n, list, prev);
        }
        self.set_prev(e, list, None);
        self.set_next(e, list, None);
    }

    #[inline]
    pub(super) fn delete_from_ael(&mut self, e: usize) {
        self.delete_from_list(e, EdgeList::Active);
    }

    /// Exchange the positions of `e1` and `e2` within `list`.
    pub(super) fn swap_positions(&mut self, e1: usize, e2: usize, list: EdgeList) {
        let (p1, n1) = self.links(e1, list);
        let (p2, n2) = self.links(e2, list);
        // either edge already removed
        if (p1.is_none() && n1.is_none()) || (p2.is_none() && n2.is_none()) {
            return;
        }

        if n1 == Some(e2) {
            if let Some(n) = n2 {
                self.set_prev(n, list, Some(e1));
            }
            if let Some(p) = p1 {
                self.set_next(p, list, Some(e2));
            }
            self.set_prev(e2, list, p1);
            self.set_next(e2, list, Some(e1));
            self.set_prev(e1, list, Some(e2));
            self.set_next(e1, list, n2);
        } else if n2 == Some(e1) {
            if let Some(n) = n1 {
                self.set_prev(n, list, Some(e2));
            }
            if let Some(p) = p2 {
                self.set_next(p, list, Some(e1));
            }
            self.set_prev(e1, list, p2);
            self.set_next(e1, list, Some(e2));
            self.set_prev(e2, list, Some(e1));
            self.set_next(e2, list, n1);
        } else {
            self.set_next(e1, list, n2);
            if let Some(n) = n2 {
                self.set_prev(n, list, Some(e1));
            }
            self.set_prev(e1, list, p2);
            if let Some(p) = p2 {
                self.set_next(p, list, Some(e1));
            }
            self.set_next(e2, list, n1);
            if let Some(n) = n1 {
                self.set_prev(n, list, Some(e2));
            }
            self.set_prev(e2, list, p1);
            if let Some(p) = p1 {
                self.set_next(p, list, Some(e2));
            }
        }

        if self.links(e1, list).0.is_none() {
            *self.head_mut(list) = Some(e1);
        } else if self.links(e2, list).0.is_none() {
            *self.head_mut(list) = Some(e2);
        }
    }

    /// Mirror the active edge list into the sorted edge list.
    pub(super) fn copy_ael_to_sel(&mut self) {
        self.sorted_edges = self.active_edges;
        let mut e = self.active_edges;
        while let Some(ei) = e {
            let edge = &mut self.edges[ei];
            edge.prev_in_sel = edge.prev_in_ael;
            edge.next_in_sel = edge.next_in_ael;
            e = edge.next_in_ael;
        }
    }

    /// The other bound ending at `e`'s top, if it is (or may still become) active.
    pub(super) fn get_maxima_pair(&self, e: usize) -> Option<usize> {
        let edge = &self.edges[e];
        let (next, prev) = (&self.edges[edge.next], &self.edges[edge.prev]);
        let result = if next.top == edge.top && next.next_in_lml.is_none() {
            edge.next
        } else if prev.top == edge.top && prev.next_in_lml.is_none() {
            edge.prev
        } else {
            return None;
        };

        let r = &self.edges[result];
        if r.out_idx == OutIdx::Skip
            || (r.next_in_ael.is_none() && r.prev_in_ael.is_none() && !r.is_horizontal())
        {
            None
        } else {
            Some(result)
        }
    }

    /// Replace `e` in the active edge list with the next edge of its bound, returns that edge.
    pub(super) fn update_edge_into_ael(&mut self, e: usize) -> Result<usize, ClipError> {
        let next = self.edges[e]
            .next_in_lml
            .ok_or(ClipError::Invariant("edge has no successor in its bound"))?;

        let Edge {
            prev_in_ael,
            next_in_ael,
            out_idx,
            side,
            wind_delta,
            wind_cnt,
            wind_cnt2,
            ..
        } = self.edges[e];

        match prev_in_ael {
            Some(p) => self.edges[p].next_in_ael = Some(next),
            None => self.active_edges = Some(next),
        }
        if let Some(n) = next_in_ael {
            self.edges[n].prev_in_ael = Some(next);
        }

        let n = &mut self.edges[next];
        n.out_idx = out_idx;
        n.side = side;
        n.wind_delta = wind_delta;
        n.wind_cnt = wind_cnt;
        n.wind_cnt2 = wind_cnt2;
        n.curr = n.bot;
        n.prev_in_ael = prev_in_ael;
        n.next_in_ael = next_in_ael;
        let (horizontal, top_y) = (n.is_horizontal(), n.top.y);

        let old = &mut self.edges[e];
        old.prev_in_ael = None;
        old.next_in_ael = None;

        if !horizontal {
            self.scanbeam.insert(top_y);
        }

        Ok(next)
    }

    fn process_edges_at_top_of_scanbeam(&mut self, top_y: i64) -> Result<(), ClipError> {
        let mut e = self.active_edges;
        while let Some(ei) = e {
            // maxima are treated as bent horizontals, except maxima with horizontal pairs
            let mut is_maxima_edge = self.edges[ei].is_maxima(top_y);
            if is_maxima_edge {
                is_maxima_edge = self
                    .get_maxima_pair(ei)
                    .map_or(true, |pair| !self.edges[pair].is_horizontal());
            }

            if is_maxima_edge {
                let prev = self.edges[ei].prev_in_ael;
                self.do_maxima(ei)?;
                e = match prev {
                    None => self.active_edges,
                    Some(p) => self.edges[p].next_in_ael,
                };
                continue;
            }

            // promote horizontals, otherwise advance the current position
            let mut ei = ei;
            let intermediate_horizontal = self.edges[ei].is_intermediate(top_y)
                && self.edges[ei]
                    .next_in_lml
                    .map_or(false, |n| self.edges[n].is_horizontal());
            if intermediate_horizontal {
                ei = self.update_edge_into_ael(ei)?;
                if self.edges[ei].out_idx.is_rec() {
                    self.add_out_pt(ei, self.edges[ei].bot);
                }
                self.add_edge_to_sel(ei);
            } else {
                let x = self.edges[ei].top_x(top_y);
                self.edges[ei].curr = IntPoint::new(x, top_y);
            }

            if self.options.strictly_simple {
                if let Some(prev) = self.edges[ei].prev_in_ael {
                    let (edge, prev_edge) = (&self.edges[ei], &self.edges[prev]);
                    if edge.out_idx.is_rec()
                        && edge.wind_delta != 0
                        && prev_edge.out_idx.is_rec()
                        && prev_edge.curr.x == edge.curr.x
                        && prev_edge.wind_delta != 0
                    {
                        let curr = edge.curr;
                        let op = self.add_out_pt(prev, curr);
                        let op2 = self.add_out_pt(ei, curr);
                        // strictly simple (touching) join
                        self.add_join(op, op2, curr);
                    }
                }
            }

            e = self.edges[ei].next_in_ael;
        }

        self.process_horizontals(true)?;

        // promote intermediate vertices
        let mut e = self.active_edges;
        while let Some(ei) = e {
            let mut ei = ei;
            if self.edges[ei].is_intermediate(top_y) {
                let op = if self.edges[ei].out_idx.is_rec() {
                    Some(self.add_out_pt(ei, self.edges[ei].top))
                } else {
                    None
                };
                ei = self.update_edge_into_ael(ei)?;

                // output polygons sharing an edge need joining later
                if let Some(op) = op {
                    self.join_with_touching_neighbor(ei, op);
                }
            }
            e = self.edges[ei].next_in_ael;
        }

        Ok(())
    }

    /// After `e` was promoted to the next edge of its bound, record a join if an adjacent
    /// contributing edge starts at the same point with the same slope.
    pub(super) fn join_with_touching_neighbor(&mut self, e: usize, op: usize) {
        let edge = &self.edges[e];
        if edge.wind_delta == 0 {
            return;
        }
        let (bot, top) = (edge.bot, edge.top);

        for neighbor in [edge.prev_in_ael, edge.next_in_ael] {
            let Some(n) = neighbor else {
                continue;
            };
            let other = &self.edges[n];
            if other.curr == bot
                && other.out_idx.is_rec()
                && other.curr.y > other.top.y
                && edge_slopes_equal(&self.edges[e], other, self.use_full_range)
                && other.wind_delta != 0
            {
                let op2 = self.add_out_pt(n, bot);
                self.add_join(op, op2, top);
                return;
            }
        }
    }

    fn do_maxima(&mut self, e: usize) -> Result<(), ClipError> {
        let Some(max_pair) = self.get_maxima_pair(e) else {
            if self.edges[e].out_idx.is_rec() {
                self.add_out_pt(e, self.edges[e].top);
            }
            self.delete_from_ael(e);
            return Ok(());
        };

        let top = self.edges[e].top;
        let mut next = self.edges[e].next_in_ael;
        while let Some(n) = next {
            if n == max_pair {
                break;
            }
            self.intersect_edges(e, n, top, true)?;
            self.swap_positions(e, n, EdgeList::Active);
            next = self.edges[e].next_in_ael;
        }

        let (e_out, pair_out) = (self.edges[e].out_idx, self.edges[max_pair].out_idx);
        if e_out == OutIdx::Unassigned && pair_out == OutIdx::Unassigned {
            self.delete_from_ael(e);
            self.delete_from_ael(max_pair);
        } else if e_out.is_rec() && pair_out.is_rec() {
            self.intersect_edges(e, max_pair, top, false)?;
        } else if self.edges[e].wind_delta == 0 {
            if e_out.is_rec() {
                self.add_out_pt(e, top);
                self.edges[e].out_idx = OutIdx::Unassigned;
            }
            self.delete_from_ael(e);

            if self.edges[max_pair].out_idx.is_rec() {
                self.add_out_pt(max_pair, top);
                self.edges[max_pair].out_idx = OutIdx::Unassigned;
            }
            self.delete_from_ael(max_pair);
        } else {
            return Err(ClipError::Invariant(
                "maxima pair has mismatched contribution state",
            ));
        }

        Ok(())
    }
}
