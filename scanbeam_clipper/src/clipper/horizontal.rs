//! Horizontal edge processing. Horizontals are queued on the sorted edge list and swept across the
//! active edges they span once the non horizontal edges at their y are in place.

use crate::core::math::IntPoint;

use super::{
    edge::EdgeSide,
    sweep::{EdgeList, Sweep},
    ClipError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Sweep {
    /// Drain the horizontal queue.
    pub(super) fn process_horizontals(&mut self, is_top_of_scanbeam: bool) -> Result<(), ClipError> {
        while let Some(horz) = self.sorted_edges {
            self.delete_from_list(horz, EdgeList::Sorted);
            self.process_horizontal(horz, is_top_of_scanbeam)?;
        }
        Ok(())
    }

    fn horz_direction(&self, horz: usize) -> (Direction, i64, i64) {
        let edge = &self.edges[horz];
        if edge.bot.x < edge.top.x {
            (Direction::LeftToRight, edge.bot.x, edge.top.x)
        } else {
            (Direction::RightToLeft, edge.top.x, edge.bot.x)
        }
    }

    fn next_in_direction(&self, e: usize, dir: Direction) -> Option<usize> {
        match dir {
            Direction::LeftToRight => self.edges[e].next_in_ael,
            Direction::RightToLeft => self.edges[e].prev_in_ael,
        }
    }

    /// Crossing of the horizontal with `e`, arguments ordered left to right.
    fn intersect_with_horz(
        &mut self,
        horz: usize,
        e: usize,
        dir: Direction,
        pt: IntPoint,
        protect: bool,
    ) -> Result<(), ClipError> {
        match dir {
            Direction::LeftToRight => self.intersect_edges(horz, e, pt, protect),
            Direction::RightToLeft => self.intersect_edges(e, horz, pt, protect),
        }
    }

    fn process_horizontal(&mut self, horz: usize, is_top_of_scanbeam: bool) -> Result<(), ClipError> {
        let mut horz = horz;
        let (mut dir, mut horz_left, mut horz_right) = self.horz_direction(horz);

        let mut last_horz = horz;
        while let Some(next) = self.edges[last_horz].next_in_lml {
            if !self.edges[next].is_horizontal() {
                break;
            }
            last_horz = next;
        }
        let max_pair = if self.edges[last_horz].next_in_lml.is_none() {
            self.get_maxima_pair(last_horz)
        } else {
            None
        };

        loop {
            let is_last_horz = horz == last_horz;
            let mut e = self.next_in_direction(horz, dir);
            while let Some(ei) = e {
                // stop at the end of an intermediate horizontal where e continues past the
                // following edge of the bound
                if let Some(next_lml) = self.edges[horz].next_in_lml {
                    if self.edges[ei].curr.x == self.edges[horz].top.x
                        && self.edges[ei].dx < self.edges[next_lml].dx
                    {
                        break;
                    }
                }

                let e_next = self.next_in_direction(ei, dir);
                let curr_x = self.edges[ei].curr.x;
                let within = match dir {
                    Direction::LeftToRight => curr_x <= horz_right,
                    Direction::RightToLeft => curr_x >= horz_left,
                };

                if within {
                    if self.edges[horz].out_idx.is_rec() && self.edges[horz].wind_delta != 0 {
                        self.prepare_horz_joins(horz, is_top_of_scanbeam);
                    }

                    if Some(ei) == max_pair && is_last_horz {
                        let top = self.edges[ei].top;
                        self.intersect_with_horz(horz, ei, dir, top, false)?;
                        if self.edges[ei].out_idx.is_rec() {
                            return Err(ClipError::Invariant(
                                "horizontal maxima pair still contributing",
                            ));
                        }
                        return Ok(());
                    }

                    let pt = IntPoint::new(curr_x, self.edges[horz].curr.y);
                    self.intersect_with_horz(horz, ei, dir, pt, true)?;
                    self.swap_positions(horz, ei, EdgeList::Active);
                } else {
                    let beyond = match dir {
                        Direction::LeftToRight => curr_x >= horz_right,
                        Direction::RightToLeft => curr_x <= horz_left,
                    };
                    if beyond {
                        break;
                    }
                }
                e = e_next;
            }

            if self.edges[horz].out_idx.is_rec() && self.edges[horz].wind_delta != 0 {
                self.prepare_horz_joins(horz, is_top_of_scanbeam);
            }

            let next_is_horizontal = self.edges[horz]
                .next_in_lml
                .map_or(false, |n| self.edges[n].is_horizontal());
            if !next_is_horizontal {
                break;
            }
            horz = self.update_edge_into_ael(horz)?;
            if self.edges[horz].out_idx.is_rec() {
                self.add_out_pt(horz, self.edges[horz].bot);
            }
            (dir, horz_left, horz_right) = self.horz_direction(horz);
        }

        if self.edges[horz].next_in_lml.is_some() {
            if self.edges[horz].out_idx.is_rec() {
                let op1 = self.add_out_pt(horz, self.edges[horz].top);
                horz = self.update_edge_into_ael(horz)?;
                // no longer horizontal here
                self.join_with_touching_neighbor(horz, op1);
            } else {
                self.update_edge_into_ael(horz)?;
            }
        } else if let Some(pair) = max_pair {
            if self.edges[pair].out_idx.is_rec() {
                let top = self.edges[horz].top;
                self.intersect_with_horz(horz, pair, dir, top, false)?;
                if self.edges[pair].out_idx.is_rec() {
                    return Err(ClipError::Invariant(
                        "horizontal maxima pair still contributing",
                    ));
                }
            } else {
                self.delete_from_ael(horz);
                self.delete_from_ael(pair);
            }
        } else {
            if self.edges[horz].out_idx.is_rec() {
                self.add_out_pt(horz, self.edges[horz].top);
            }
            self.delete_from_ael(horz);
        }

        Ok(())
    }

    /// Remember the horizontal's output segment so minima starting on it later in the sweep can
    /// be joined to it.
    fn prepare_horz_joins(&mut self, horz: usize, is_top_of_scanbeam: bool) {
        if !is_top_of_scanbeam {
            return;
        }
        let Some(rec) = self.edges[horz].out_idx.rec() else {
            return;
        };
        let Some(mut out_pt) = self.out_recs[rec].pts else {
            return;
        };
        if self.edges[horz].side != EdgeSide::Left {
            out_pt = self.out_pts[out_pt].prev;
        }

        let edge = &self.edges[horz];
        let off_pt = if self.out_pts[out_pt].pt == edge.top {
            edge.bot
        } else {
            edge.top
        };
        self.add_ghost_join(out_pt, off_pt);
    }
}
