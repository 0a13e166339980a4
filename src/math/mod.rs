pub mod frame;
pub mod intersect_2d;
pub mod intersect_3d;
pub mod polygon_2d;
pub mod polygon_3d;
pub mod precision;
pub mod vector;

pub use frame::Frame;
pub use precision::{almost_equal, almost_zero, round_to, sign, AlmostEq, Precision, Sign};
pub use vector::{Vector2Ext, VectorExt};

/// Point in `D`-dimensional space.
pub type Point<const D: usize> = nalgebra::Point<f64, D>;

/// Displacement in `D`-dimensional space.
pub type Vector<const D: usize> = nalgebra::SVector<f64, D>;

/// Displacement of unit length. Only produced by [`VectorExt::normalized`].
pub type UnitVector<const D: usize> = nalgebra::Unit<Vector<D>>;

/// 2D point type (U, V).
pub type Point2 = Point<2>;

/// 3D point type (X, Y, Z).
pub type Point3 = Point<3>;

/// 2D vector type.
pub type Vector2 = Vector<2>;

/// 3D vector type.
pub type Vector3 = Vector<3>;

/// 2D unit vector type.
pub type UnitVector2 = UnitVector<2>;

/// 3D unit vector type.
pub type UnitVector3 = UnitVector<3>;
