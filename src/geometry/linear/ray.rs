use crate::error::Result;
use crate::math::{AlmostEq, Point, Precision, UnitVector, Vector, VectorExt};

use super::{Domain, Linear};

/// A half-line: the origin and every point ahead of it along the direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray<const D: usize> {
    origin: Point<D>,
    direction: UnitVector<D>,
}

/// Planar ray.
pub type Ray2 = Ray<2>;

/// Spatial ray.
pub type Ray3 = Ray<3>;

impl<const D: usize> Ray<D> {
    /// Creates a ray from its origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector rounds to zero length.
    pub fn new(origin: Point<D>, direction: Vector<D>, p: Precision) -> Result<Self> {
        Ok(Self::from_unit(origin, direction.normalized(p)?))
    }

    /// Creates the ray starting at `origin` and passing through `through`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide at precision `p`.
    pub fn from_points(origin: Point<D>, through: Point<D>, p: Precision) -> Result<Self> {
        Self::new(origin, through - origin, p)
    }

    #[must_use]
    pub fn from_unit(origin: Point<D>, direction: UnitVector<D>) -> Self {
        Self { origin, direction }
    }
}

impl<const D: usize> Linear<D> for Ray<D> {
    fn origin(&self) -> &Point<D> {
        &self.origin
    }

    fn direction(&self) -> &UnitVector<D> {
        &self.direction
    }

    fn domain(&self) -> Domain {
        Domain::new(0.0, f64::INFINITY)
    }
}

impl<const D: usize> AlmostEq for Ray<D> {
    fn almost_eq(&self, other: &Self, p: Precision) -> bool {
        self.origin.almost_eq(&other.origin, p) && self.direction.almost_eq(&other.direction, p)
    }
}
