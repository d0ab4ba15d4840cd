//! Edge model used by the sweep: one directed segment per input vertex pair, linked into bounds.

use crate::core::math::{products_equal, round_half_away, IntPoint};

use super::PolyType;

/// Inverse slope marker for horizontal edges.
pub(crate) const HORIZONTAL: f64 = -1.0e40;

/// Side of its output fragment an edge is currently building.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum EdgeSide {
    Left,
    Right,
}

/// Output fragment assignment of an edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum OutIdx {
    /// Not currently contributing to output.
    Unassigned,
    /// Open path end edge that never enters the active edge list.
    Skip,
    /// Contributing to the output fragment with this index.
    Rec(usize),
}

impl OutIdx {
    #[inline]
    pub fn rec(self) -> Option<usize> {
        match self {
            OutIdx::Rec(i) => Some(i),
            _ => None,
        }
    }

    #[inline]
    pub fn is_rec(self) -> bool {
        matches!(self, OutIdx::Rec(_))
    }
}

/// Edge node stored in the edge arena, all links are arena indexes.
#[derive(Debug, Clone)]
pub(crate) struct Edge {
    pub bot: IntPoint,
    pub curr: IntPoint,
    pub top: IntPoint,
    pub delta: IntPoint,
    pub dx: f64,
    pub poly_type: PolyType,
    pub side: EdgeSide,
    /// +1/-1 for closed paths depending on bound direction, 0 for open paths.
    pub wind_delta: i32,
    pub wind_cnt: i32,
    /// Winding count of the other polygon type at this edge.
    pub wind_cnt2: i32,
    pub out_idx: OutIdx,
    // ring links along the source path
    pub next: usize,
    pub prev: usize,
    pub next_in_lml: Option<usize>,
    pub next_in_ael: Option<usize>,
    pub prev_in_ael: Option<usize>,
    pub next_in_sel: Option<usize>,
    pub prev_in_sel: Option<usize>,
}

impl Edge {
    pub fn new(curr: IntPoint, next: usize, prev: usize) -> Self {
        Edge {
            bot: IntPoint::zero(),
            curr,
            top: IntPoint::zero(),
            delta: IntPoint::zero(),
            dx: 0.0,
            poly_type: PolyType::Subject,
            side: EdgeSide::Left,
            wind_delta: 0,
            wind_cnt: 0,
            wind_cnt2: 0,
            out_idx: OutIdx::Unassigned,
            next,
            prev,
            next_in_lml: None,
            next_in_ael: None,
            prev_in_ael: None,
            next_in_sel: None,
            prev_in_sel: None,
        }
    }

    /// Assign bottom/top from this edge's vertex and the next vertex along the path.
    pub fn init_geometry(&mut self, next_curr: IntPoint, poly_type: PolyType) {
        if self.curr.y >= next_curr.y {
            self.bot = self.curr;
            self.top = next_curr;
        } else {
            self.top = self.curr;
            self.bot = next_curr;
        }
        self.set_dx();
        self.poly_type = poly_type;
    }

    pub fn set_dx(&mut self) {
        self.delta = self.top - self.bot;
        self.dx = if self.delta.y == 0 {
            HORIZONTAL
        } else {
            self.delta.x as f64 / self.delta.y as f64
        };
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.delta.y == 0
    }

    /// Swap the x of the ends of a horizontal edge so its bottom aligns with the adjoining edge.
    #[inline]
    pub fn reverse_horizontal(&mut self) {
        std::mem::swap(&mut self.top.x, &mut self.bot.x);
    }

    /// X coordinate of the edge at `y`.
    #[inline]
    pub fn top_x(&self, y: i64) -> i64 {
        if y == self.top.y {
            self.top.x
        } else {
            self.bot.x + round_half_away(self.dx * (y - self.bot.y) as f64)
        }
    }

    /// The edge ends at `y` and continues with another segment of its bound.
    #[inline]
    pub fn is_intermediate(&self, y: i64) -> bool {
        self.top.y == y && self.next_in_lml.is_some()
    }

    /// The edge ends at `y` and its bound ends with it.
    #[inline]
    pub fn is_maxima(&self, y: i64) -> bool {
        self.top.y == y && self.next_in_lml.is_none()
    }

    /// Returns true if `self` belongs before `other` in the active edge list when inserted at the
    /// current sweep position.
    pub fn inserts_before(&self, other: &Edge) -> bool {
        if self.curr.x == other.curr.x {
            if self.top.y > other.top.y {
                self.top.x < other.top_x(self.top.y)
            } else {
                other.top.x > self.top_x(other.top.y)
            }
        } else {
            self.curr.x < other.curr.x
        }
    }
}

/// Exact slope equality of two edges.
#[inline]
pub(crate) fn edge_slopes_equal(e1: &Edge, e2: &Edge, full_range: bool) -> bool {
    products_equal(e1.delta.y, e2.delta.x, e1.delta.x, e2.delta.y, full_range)
}

/// Intersection point of the lines through `e1` and `e2`, clamped so it does not lie above the
/// lower of the two edge tops.
///
/// The boolean is false when the edges are parallel (the point is then the higher of the two
/// bottoms) or when the clamped point falls right of `e1`'s top.
pub(crate) fn intersect_point(e1: &Edge, e2: &Edge, full_range: bool) -> (IntPoint, bool) {
    if edge_slopes_equal(e1, e2, full_range) || e1.dx == e2.dx {
        let ip = if e2.bot.y > e1.bot.y { e2.bot } else { e1.bot };
        return (ip, false);
    }

    let mut ip = IntPoint::zero();
    if e1.delta.x == 0 {
        ip.x = e1.bot.x;
        if e2.is_horizontal() {
            ip.y = e2.bot.y;
        } else {
            let b2 = e2.bot.y as f64 - e2.bot.x as f64 / e2.dx;
            ip.y = round_half_away(ip.x as f64 / e2.dx + b2);
        }
    } else if e2.delta.x == 0 {
        ip.x = e2.bot.x;
        if e1.is_horizontal() {
            ip.y = e1.bot.y;
        } else {
            let b1 = e1.bot.y as f64 - e1.bot.x as f64 / e1.dx;
            ip.y = round_half_away(ip.x as f64 / e1.dx + b1);
        }
    } else {
        let b1 = e1.bot.x as f64 - e1.bot.y as f64 * e1.dx;
        let b2 = e2.bot.x as f64 - e2.bot.y as f64 * e2.dx;
        let q = (b2 - b1) / (e1.dx - e2.dx);
        ip.y = round_half_away(q);
        ip.x = if e1.dx.abs() < e2.dx.abs() {
            round_half_away(e1.dx * q + b1)
        } else {
            round_half_away(e2.dx * q + b2)
        };
    }

    if ip.y < e1.top.y || ip.y < e2.top.y {
        if e1.top.y > e2.top.y {
            ip.y = e1.top.y;
            ip.x = e2.top_x(e1.top.y);
            return (ip, ip.x < e1.top.x);
        }

        ip.y = e2.top.y;
        ip.x = if e1.dx.abs() < e2.dx.abs() {
            e1.top_x(ip.y)
        } else {
            e2.top_x(ip.y)
        };
    }

    (ip, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(bot: (i64, i64), top: (i64, i64)) -> Edge {
        let mut e = Edge::new(IntPoint::from(bot), 0, 0);
        e.init_geometry(IntPoint::from(top), PolyType::Subject);
        e
    }

    #[test]
    fn geometry_orders_bottom_as_larger_y() {
        let e = edge((0, 0), (10, 20));
        assert_eq!(e.bot, IntPoint::new(10, 20));
        assert_eq!(e.top, IntPoint::new(0, 0));
        assert_eq!(e.dx, 0.5);
        assert!(!e.is_horizontal());

        let h = edge((0, 5), (10, 5));
        assert!(h.is_horizontal());
        assert_eq!(h.dx, HORIZONTAL);
    }

    #[test]
    fn top_x_rounds_half_away_from_zero() {
        let e = edge((0, 10), (-5, 0));
        // dx = 0.5, at y = 5 the exact x is -2.5
        assert_eq!(e.top_x(5), -3);
        assert_eq!(e.top_x(0), -5);
        assert_eq!(e.top_x(10), 0);
    }

    #[test]
    fn crossing_diagonals() {
        let e1 = edge((0, 10), (10, 0));
        let e2 = edge((10, 10), (0, 0));
        let (ip, ok) = intersect_point(&e1, &e2, false);
        assert!(ok);
        assert_eq!(ip, IntPoint::new(5, 5));
    }

    #[test]
    fn vertical_against_sloped() {
        let e1 = edge((4, 10), (4, 0));
        let e2 = edge((0, 10), (8, 2));
        let (ip, ok) = intersect_point(&e1, &e2, false);
        assert!(ok);
        assert_eq!(ip, IntPoint::new(4, 6));
    }

    #[test]
    fn parallel_edges_report_no_intersection() {
        let e1 = edge((0, 10), (10, 0));
        let e2 = edge((5, 10), (15, 0));
        let (ip, ok) = intersect_point(&e1, &e2, false);
        assert!(!ok);
        assert_eq!(ip, IntPoint::new(0, 10));
    }

    #[test]
    fn insertion_order_uses_direction_above() {
        let left = edge((5, 10), (0, 0));
        let right = edge((5, 10), (10, 0));
        assert!(left.inserts_before(&right));
        assert!(!right.inserts_before(&left));
    }
}
