//! Precision-aware 2D/3D computational geometry.
//!
//! Every comparison and constructor takes an explicit [`Precision`]: two
//! scalars are equal when their difference rounds to zero at that many
//! decimal digits.

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod relation;
pub mod wkt;

pub use error::{GeokernError, GeometryError, Result, WktError};
pub use math::{AlmostEq, Precision};
