//! Core/common math for integer clipping coordinates: points, exact slope tests, rounding, area
//! and point containment, plus the float vector type used before scaling.
mod base_math;
mod int_point;
mod vector2;

pub use base_math::*;
pub use int_point::{IntPoint, Path, Paths};
pub use vector2::*;
