use std::ops;

use crate::core::traits::Real;

use super::IntPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Floating point 2D point/vector used for polygons before they are scaled onto the clipper's
/// integer grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector2<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T> Vector2<T>
where
    T: Real,
{
    /// Create a new vector with x and y components.
    pub fn new(x: T, y: T) -> Self {
        Vector2 { x, y }
    }

    /// Create a zero vector (x = 0, y = 0).
    pub fn zero() -> Self {
        Vector2::new(T::zero(), T::zero())
    }

    /// Fuzzy equal comparison with another vector using `fuzzy_epsilon` given.
    pub fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: T) -> bool {
        self.x.fuzzy_eq_eps(other.x, fuzzy_epsilon) && self.y.fuzzy_eq_eps(other.y, fuzzy_epsilon)
    }

    /// Fuzzy equal comparison with another vector using T::fuzzy_epsilon().
    pub fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }

    /// Scale onto the integer grid, `None` if either component is not representable.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scanbeam_clipper::core::math::*;
    /// let v = vec2(1.5, -0.25);
    /// assert_eq!(v.to_int_point(100.0), Some(IntPoint::new(150, -25)));
    /// assert_eq!(vec2(f64::INFINITY, 0.0).to_int_point(1.0), None);
    /// ```
    pub fn to_int_point(&self, scale: T) -> Option<IntPoint> {
        Some(IntPoint::new(
            self.x.to_scaled_coord(scale)?,
            self.y.to_scaled_coord(scale)?,
        ))
    }

    /// Inverse of [Vector2::to_int_point].
    pub fn from_int_point(pt: IntPoint, scale: T) -> Self {
        Vector2::new(
            T::from_scaled_coord(pt.x, scale),
            T::from_scaled_coord(pt.y, scale),
        )
    }
}

#[inline(always)]
pub fn vec2<T>(x: T, y: T) -> Vector2<T>
where
    T: Real,
{
    Vector2::new(x, y)
}

macro_rules! ImplBinaryOp {
    ($op_trait:ident, $op_func:ident, $op:tt) => {
        impl<T: Real> ops::$op_trait<Vector2<T>> for Vector2<T> {
            type Output = Vector2<T>;
            fn $op_func(self, rhs: Vector2<T>) -> Self::Output {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
    };
}

ImplBinaryOp!(Add, add, +);
ImplBinaryOp!(Sub, sub, -);
