use nalgebra::Unit;

use crate::error::Result;
use crate::math::{AlmostEq, Point, Precision, UnitVector, VectorExt};

use super::{Domain, Linear};

/// A bounded straight segment between two distinct end-points.
///
/// Identity is order-independent: `P0-P1` and `P1-P0` are equal, although
/// their parametrizations run in opposite senses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment<const D: usize> {
    start: Point<D>,
    end: Point<D>,
    direction: UnitVector<D>,
    length: f64,
}

/// Planar segment.
pub type LineSegment2 = LineSegment<2>;

/// Spatial segment.
pub type LineSegment3 = LineSegment<3>;

impl<const D: usize> LineSegment<D> {
    /// Creates a segment between two points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`](crate::error::GeometryError::DegenerateInput)
    /// if the points coincide at precision `p`.
    pub fn new(start: Point<D>, end: Point<D>, p: Precision) -> Result<Self> {
        let direction = (end - start).normalized(p)?;
        Ok(Self {
            start,
            end,
            direction,
            length: nalgebra::distance(&start, &end),
        })
    }

    /// Creates a segment from end-points already known to be distinct.
    pub(crate) fn new_unchecked(start: Point<D>, end: Point<D>) -> Self {
        Self {
            start,
            end,
            direction: Unit::new_normalize(end - start),
            length: nalgebra::distance(&start, &end),
        }
    }

    #[must_use]
    pub fn start(&self) -> &Point<D> {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Point<D> {
        &self.end
    }

    /// Both end-points, start first.
    #[must_use]
    pub fn endpoints(&self) -> [Point<D>; 2] {
        [self.start, self.end]
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn midpoint(&self) -> Point<D> {
        nalgebra::center(&self.start, &self.end)
    }

    /// The same segment traversed from `end` to `start`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            direction: -self.direction,
            length: self.length,
        }
    }

    /// Returns `true` if `q` is one of the end-points.
    #[must_use]
    pub fn has_endpoint(&self, q: &Point<D>, p: Precision) -> bool {
        self.start.almost_eq(q, p) || self.end.almost_eq(q, p)
    }
}

impl<const D: usize> Linear<D> for LineSegment<D> {
    fn origin(&self) -> &Point<D> {
        &self.start
    }

    fn direction(&self) -> &UnitVector<D> {
        &self.direction
    }

    fn domain(&self) -> Domain {
        Domain::new(0.0, self.length)
    }
}

impl<const D: usize> AlmostEq for LineSegment<D> {
    fn almost_eq(&self, other: &Self, p: Precision) -> bool {
        (self.start.almost_eq(&other.start, p) && self.end.almost_eq(&other.end, p))
            || (self.start.almost_eq(&other.end, p) && self.end.almost_eq(&other.start, p))
    }
}
