//! Core module has common/shared math, traits, and point types used by the clipper, the float
//! polygon helpers and the no-fit-polygon helpers.
pub mod math;
pub mod traits;
