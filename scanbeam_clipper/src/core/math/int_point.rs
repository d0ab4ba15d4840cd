use std::ops;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer 2D point, the coordinate type the clipper operates on.
///
/// Equality is exact. Floating point input is mapped onto this grid with a scale factor (see
/// [crate::shape]).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

/// Sequence of points forming a closed loop or an open polyline.
pub type Path = Vec<IntPoint>;

/// Collection of paths, e.g. all the loops of a polygon set.
pub type Paths = Vec<Path>;

impl IntPoint {
    /// Create a new point with x and y components.
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        IntPoint { x, y }
    }

    /// Create a zero point (x = 0, y = 0).
    #[inline]
    pub const fn zero() -> Self {
        IntPoint::new(0, 0)
    }

    /// Point reflection through the origin.
    #[inline]
    pub fn negate(&self) -> Self {
        IntPoint::new(-self.x, -self.y)
    }
}

impl From<(i64, i64)> for IntPoint {
    #[inline]
    fn from(value: (i64, i64)) -> Self {
        IntPoint::new(value.0, value.1)
    }
}

macro_rules! ImplBinaryOp {
    ($op_trait:ident, $op_func:ident, $op:tt) => {
        impl ops::$op_trait<IntPoint> for IntPoint {
            type Output = IntPoint;
            fn $op_func(self, rhs: IntPoint) -> Self::Output {
                IntPoint::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl ops::$op_trait<&IntPoint> for IntPoint {
            type Output = IntPoint;
            fn $op_func(self, rhs: &IntPoint) -> Self::Output {
                IntPoint::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl ops::$op_trait<IntPoint> for &IntPoint {
            type Output = IntPoint;
            fn $op_func(self, rhs: IntPoint) -> Self::Output {
                IntPoint::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
    };
}

ImplBinaryOp!(Add, add, +);
ImplBinaryOp!(Sub, sub, -);

impl ops::Neg for IntPoint {
    type Output = IntPoint;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops() {
        let p1 = IntPoint::new(4, 5);
        let p2 = IntPoint::new(1, 2);
        assert_eq!(p1 + p2, IntPoint::new(5, 7));
        assert_eq!(&p1 - p2, IntPoint::new(3, 3));
        assert_eq!(-p1, IntPoint::new(-4, -5));
        assert_eq!(IntPoint::from((7, -3)), IntPoint::new(7, -3));
    }

    #[test]
    fn ordering_is_x_then_y() {
        let mut pts = vec![
            IntPoint::new(2, 0),
            IntPoint::new(1, 5),
            IntPoint::new(1, -1),
        ];
        pts.sort();
        assert_eq!(
            pts,
            vec![IntPoint::new(1, -1), IntPoint::new(1, 5), IntPoint::new(2, 0)]
        );
    }
}
