//! Polygon boolean clipping (intersection, union, difference, xor) over integer coordinates using
//! a scanbeam (Vatti) sweep, plus Minkowski sums and no-fit-polygon derivation built on top of it.
//!
//! # Examples
//!
//! ```
//! # use scanbeam_clipper::path;
//! # use scanbeam_clipper::clipper::*;
//! let subject = vec![path![(0, 0), (10, 0), (10, 10), (0, 10)]];
//! let clip = vec![path![(5, 5), (15, 5), (15, 15), (5, 15)]];
//! let solution = boolean_op(
//!     ClipType::Intersection,
//!     &subject,
//!     &clip,
//!     FillRule::NonZero,
//!     FillRule::NonZero,
//! )
//! .unwrap();
//! assert_eq!(solution.len(), 1);
//! assert_eq!(solution.total_area(), 25.0);
//! ```
#[macro_use]
mod macros;
pub mod clipper;
pub mod core;
pub mod nfp;
pub mod shape;

pub use static_aabb2d_index;
