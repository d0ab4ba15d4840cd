//! Winding counts and the fill rule / clip type decision of whether an edge bounds output.

use super::{sweep::Sweep, ClipType, FillRule, PolyType};

/// Winding value of `wind_cnt` as seen by `fill` (sign folded for the signed rules).
#[inline]
pub(super) fn effective_winding(fill: FillRule, wind_cnt: i32) -> i32 {
    match fill {
        FillRule::Positive => wind_cnt,
        FillRule::Negative => -wind_cnt,
        FillRule::EvenOdd | FillRule::NonZero => wind_cnt.abs(),
    }
}

impl Sweep {
    #[inline]
    pub(super) fn fill_of(&self, poly_type: PolyType) -> FillRule {
        match poly_type {
            PolyType::Subject => self.subj_fill,
            PolyType::Clip => self.clip_fill,
        }
    }

    /// Fill rule of the edge's own polygon set.
    #[inline]
    pub(super) fn own_fill(&self, e: usize) -> FillRule {
        self.fill_of(self.edges[e].poly_type)
    }

    /// Fill rule of the opposite polygon set.
    #[inline]
    pub(super) fn other_fill(&self, e: usize) -> FillRule {
        self.fill_of(self.edges[e].poly_type.other())
    }

    /// Compute `wind_cnt` and `wind_cnt2` for an edge just inserted into the active list.
    pub(super) fn set_winding_count(&mut self, e: usize) {
        let poly_type = self.edges[e].poly_type;
        let wind_delta = self.edges[e].wind_delta;

        let mut same_type = self.edges[e].prev_in_ael;
        while let Some(s) = same_type {
            let edge = &self.edges[s];
            if edge.poly_type == poly_type && edge.wind_delta != 0 {
                break;
            }
            same_type = edge.prev_in_ael;
        }

        let (wind_cnt, mut wind_cnt2, mut walk) = match same_type {
            None => {
                let wc = match (wind_delta, self.own_fill(e)) {
                    (0, FillRule::Negative) => -1,
                    (0, _) => 1,
                    (wd, _) => wd,
                };
                (wc, 0, self.active_edges)
            }
            Some(s) if wind_delta == 0 && self.clip_type != ClipType::Union => {
                (1, self.edges[s].wind_cnt2, self.edges[s].next_in_ael)
            }
            Some(s) if self.own_fill(e) == FillRule::EvenOdd => {
                let wc = if wind_delta == 0 {
                    // open path, inside when an even number of same type edges lie to the left
                    let mut inside = true;
                    let mut e2 = self.edges[s].prev_in_ael;
                    while let Some(x) = e2 {
                        let edge = &self.edges[x];
                        if edge.poly_type == self.edges[s].poly_type && edge.wind_delta != 0 {
                            inside = !inside;
                        }
                        e2 = edge.prev_in_ael;
                    }
                    if inside {
                        0
                    } else {
                        1
                    }
                } else {
                    wind_delta
                };
                (wc, self.edges[s].wind_cnt2, self.edges[s].next_in_ael)
            }
            Some(s) => {
                let prev = &self.edges[s];
                let wc = if prev.wind_cnt * prev.wind_delta < 0 {
                    // prev edge is decreasing the winding toward zero
                    if prev.wind_cnt.abs() > 1 {
                        if prev.wind_delta * wind_delta < 0 {
                            prev.wind_cnt
                        } else {
                            prev.wind_cnt + wind_delta
                        }
                    } else if wind_delta == 0 {
                        1
                    } else {
                        wind_delta
                    }
                } else if wind_delta == 0 {
                    if prev.wind_cnt < 0 {
                        prev.wind_cnt - 1
                    } else {
                        prev.wind_cnt + 1
                    }
                } else if prev.wind_delta * wind_delta < 0 {
                    prev.wind_cnt
                } else {
                    prev.wind_cnt + wind_delta
                };
                (wc, prev.wind_cnt2, prev.next_in_ael)
            }
        };

        // accumulate the opposite set's winding from the edges in between
        let alt_even_odd = self.other_fill(e) == FillRule::EvenOdd;
        while let Some(w) = walk {
            if w == e {
                break;
            }
            let edge = &self.edges[w];
            if alt_even_odd {
                if edge.wind_delta != 0 {
                    wind_cnt2 = if wind_cnt2 == 0 { 1 } else { 0 };
                }
            } else {
                wind_cnt2 += edge.wind_delta;
            }
            walk = edge.next_in_ael;
        }

        self.edges[e].wind_cnt = wind_cnt;
        self.edges[e].wind_cnt2 = wind_cnt2;
    }

    /// Whether edge `e` bounds a region of the boolean result.
    pub(super) fn is_contributing(&self, e: usize) -> bool {
        let edge = &self.edges[e];
        let (wc, wc2) = (edge.wind_cnt, edge.wind_cnt2);

        let on_boundary = match self.own_fill(e) {
            FillRule::EvenOdd => edge.wind_delta != 0 || wc == 1,
            FillRule::NonZero => wc.abs() == 1,
            FillRule::Positive => wc == 1,
            FillRule::Negative => wc == -1,
        };
        if !on_boundary {
            return false;
        }

        let other_fill = self.other_fill(e);
        let outside_other = || match other_fill {
            FillRule::EvenOdd | FillRule::NonZero => wc2 == 0,
            FillRule::Positive => wc2 <= 0,
            FillRule::Negative => wc2 >= 0,
        };
        let inside_other = || match other_fill {
            FillRule::EvenOdd | FillRule::NonZero => wc2 != 0,
            FillRule::Positive => wc2 > 0,
            FillRule::Negative => wc2 < 0,
        };

        match self.clip_type {
            ClipType::Intersection => inside_other(),
            ClipType::Union => outside_other(),
            ClipType::Difference => match edge.poly_type {
                PolyType::Subject => outside_other(),
                PolyType::Clip => inside_other(),
            },
            ClipType::Xor => {
                if edge.wind_delta == 0 {
                    // open paths are clipped by xor as if by union
                    outside_other()
                } else {
                    true
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_winding_per_rule() {
        assert_eq!(effective_winding(FillRule::EvenOdd, -1), 1);
        assert_eq!(effective_winding(FillRule::NonZero, -2), 2);
        assert_eq!(effective_winding(FillRule::Positive, -1), -1);
        assert_eq!(effective_winding(FillRule::Negative, -1), 1);
    }
}
