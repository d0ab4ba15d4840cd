use super::FuzzyEq;
use num_traits::{Float, NumCast, ToPrimitive};

/// Trait representing a floating point coordinate type that can be scaled onto the clipper's
/// integer grid and back.
pub trait Real: Float + FuzzyEq + Default + std::fmt::Debug + 'static {
    /// Multiply by `scale` and round half away from zero to an integer coordinate.
    ///
    /// Returns `None` if the scaled value is not finite or does not fit in an `i64`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scanbeam_clipper::core::traits::*;
    /// assert_eq!(1.25f64.to_scaled_coord(100.0), Some(125));
    /// assert_eq!((-0.005f64).to_scaled_coord(1000.0), Some(-5));
    /// assert_eq!(f64::NAN.to_scaled_coord(10.0), None);
    /// ```
    #[inline]
    fn to_scaled_coord(self, scale: Self) -> Option<i64> {
        let v = (self * scale).round();
        if !v.is_finite() {
            return None;
        }
        v.to_i64()
    }

    /// Inverse of [Real::to_scaled_coord] (exact up to the rounding applied when scaling).
    #[inline]
    fn from_scaled_coord(v: i64, scale: Self) -> Self {
        <Self as NumCast>::from(v).unwrap_or_else(Self::nan) / scale
    }
}

impl Real for f32 {}
impl Real for f64 {}
