use crate::error::Result;
use crate::math::{AlmostEq, Point, Precision, UnitVector, Vector, VectorExt};

use super::{Domain, Linear};

/// An infinite line defined by an origin point and a unit direction.
///
/// The parametric form is: `P(t) = origin + t * direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line<const D: usize> {
    origin: Point<D>,
    direction: UnitVector<D>,
}

/// Planar line.
pub type Line2 = Line<2>;

/// Spatial line.
pub type Line3 = Line<3>;

impl<const D: usize> Line<D> {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector rounds to zero length.
    pub fn new(origin: Point<D>, direction: Vector<D>, p: Precision) -> Result<Self> {
        Ok(Self::from_unit(origin, direction.normalized(p)?))
    }

    /// Creates the line through two points, directed from `a` to `b`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide at precision `p`.
    pub fn from_points(a: Point<D>, b: Point<D>, p: Precision) -> Result<Self> {
        Self::new(a, b - a, p)
    }

    /// Creates a line from an already normalized direction.
    #[must_use]
    pub fn from_unit(origin: Point<D>, direction: UnitVector<D>) -> Self {
        Self { origin, direction }
    }

    /// The same line with the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::from_unit(self.origin, -self.direction)
    }
}

impl<const D: usize> Linear<D> for Line<D> {
    fn origin(&self) -> &Point<D> {
        &self.origin
    }

    fn direction(&self) -> &UnitVector<D> {
        &self.direction
    }

    fn domain(&self) -> Domain {
        Domain::unbounded()
    }
}

impl<const D: usize> AlmostEq for Line<D> {
    /// Lines are equal when they cover the same points, whatever their origin or sense.
    fn almost_eq(&self, other: &Self, p: Precision) -> bool {
        self.direction
            .into_inner()
            .is_parallel(&other.direction.into_inner(), p)
            && self.contains_point(&other.origin, p)
    }
}
