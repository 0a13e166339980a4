use nalgebra::Unit;

use super::precision::{almost_equal, almost_zero, AlmostEq, Precision};
use super::{Point, Point3, UnitVector, Vector, Vector2, Vector3};
use crate::error::{GeometryError, Result};

/// Precision-aware operations on vectors of any dimension.
pub trait VectorExt<const D: usize> {
    /// Returns the unit vector pointing the same way.
    ///
    /// The result has unit length at full `f64` precision; `p` only decides
    /// whether the input is too short to normalize.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the length rounds to zero.
    fn normalized(&self, p: Precision) -> Result<UnitVector<D>>;

    /// Returns `true` if the sine of the angle between the vectors rounds to zero.
    ///
    /// Zero-length vectors are parallel to nothing.
    fn is_parallel(&self, other: &Vector<D>, p: Precision) -> bool;

    /// Returns `true` if the cosine of the angle between the vectors rounds to zero.
    fn is_perpendicular(&self, other: &Vector<D>, p: Precision) -> bool;

    /// Unsigned angle to `other` in radians, in `[0, π]`.
    fn angle_to(&self, other: &Vector<D>) -> f64;
}

impl<const D: usize> VectorExt<D> for Vector<D> {
    fn normalized(&self, p: Precision) -> Result<UnitVector<D>> {
        let len = self.norm();
        if almost_zero(len, p) {
            return Err(GeometryError::degenerate(format!(
                "cannot normalize vector of length {len}"
            )));
        }
        Ok(Unit::new_normalize(*self))
    }

    fn is_parallel(&self, other: &Vector<D>, p: Precision) -> bool {
        match (unit_or_none(self), unit_or_none(other)) {
            (Some(a), Some(b)) => almost_zero(sine_between(&a, &b), p),
            _ => false,
        }
    }

    fn is_perpendicular(&self, other: &Vector<D>, p: Precision) -> bool {
        match (unit_or_none(self), unit_or_none(other)) {
            (Some(a), Some(b)) => almost_zero(a.into_inner().dot(&b.into_inner()), p),
            _ => false,
        }
    }

    fn angle_to(&self, other: &Vector<D>) -> f64 {
        self.angle(other)
    }
}

/// Planar-only vector operations.
pub trait Vector2Ext {
    /// Z-component of the 3D cross product; positive when `other` is counter-clockwise of `self`.
    fn cross_2d(&self, other: &Vector2) -> f64;

    /// The vector rotated by +90°.
    fn perpendicular(&self) -> Vector2;

    /// The vector rotated counter-clockwise by `angle` radians.
    fn rotated(&self, angle: f64) -> Vector2;
}

impl Vector2Ext for Vector2 {
    fn cross_2d(&self, other: &Vector2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    fn perpendicular(&self) -> Vector2 {
        Vector2::new(-self.y, self.x)
    }

    fn rotated(&self, angle: f64) -> Vector2 {
        let (s, c) = angle.sin_cos();
        Vector2::new(c * self.x - s * self.y, s * self.x + c * self.y)
    }
}

impl<const D: usize> AlmostEq for Vector<D> {
    fn almost_eq(&self, other: &Self, p: Precision) -> bool {
        self.iter()
            .zip(other.iter())
            .all(|(a, b)| almost_equal(*a, *b, p))
    }
}

impl<const D: usize> AlmostEq for Point<D> {
    fn almost_eq(&self, other: &Self, p: Precision) -> bool {
        self.coords.almost_eq(&other.coords, p)
    }
}

impl<const D: usize> AlmostEq for UnitVector<D> {
    fn almost_eq(&self, other: &Self, p: Precision) -> bool {
        self.into_inner().almost_eq(&other.into_inner(), p)
    }
}

fn unit_or_none<const D: usize>(v: &Vector<D>) -> Option<UnitVector<D>> {
    Unit::try_new(*v, f64::EPSILON)
}

/// Sine of the angle between two unit vectors, valid in any dimension.
pub(crate) fn sine_between<const D: usize>(a: &UnitVector<D>, b: &UnitVector<D>) -> f64 {
    let (a, b) = (a.into_inner(), b.into_inner());
    (b - a * a.dot(&b)).norm()
}

/// Unit vector along world axis `index`.
pub(crate) fn world_axis<const D: usize>(index: usize) -> Vector<D> {
    Vector::<D>::from_fn(|i, _| if i == index { 1.0 } else { 0.0 })
}

/// Embeds a point into 3D space (`z = 0` for planar points).
pub(crate) fn point_to_3d<const D: usize>(p: &Point<D>) -> Point3 {
    Point3::from(vector_to_3d(&p.coords))
}

/// Embeds a vector into 3D space (`z = 0` for planar vectors).
pub(crate) fn vector_to_3d<const D: usize>(v: &Vector<D>) -> Vector3 {
    Vector3::from_fn(|i, _| if i < D { v[i] } else { 0.0 })
}

/// Drops the coordinates of a 3D point beyond dimension `D`.
pub(crate) fn point_from_3d<const D: usize>(p: &Point3) -> Point<D> {
    Point::from(vector_from_3d::<D>(&p.coords))
}

/// Drops the coordinates of a 3D vector beyond dimension `D`.
pub(crate) fn vector_from_3d<const D: usize>(v: &Vector3) -> Vector<D> {
    Vector::<D>::from_fn(|i, _| if i < 3 { v[i] } else { 0.0 })
}

/// Arithmetic mean of a point set. `None` when empty.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean_point<const D: usize>(points: &[Point<D>]) -> Option<Point<D>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector::<D>::zeros(), |acc, pt| acc + pt.coords);
    Some(Point::from(sum / points.len() as f64))
}
