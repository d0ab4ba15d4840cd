//! Core/common traits for use in scanbeam_clipper.
mod fuzzy_eq;
mod real;

pub use fuzzy_eq::FuzzyEq;
pub use real::Real;
