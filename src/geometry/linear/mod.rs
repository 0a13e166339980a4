mod line;
mod ray;
mod segment;

pub use line::{Line, Line2, Line3};
pub use ray::{Ray, Ray2, Ray3};
pub use segment::{LineSegment, LineSegment2, LineSegment3};

use crate::math::{almost_zero, sign, Point, Precision, Sign, UnitVector};

/// Parameter domain of a linear primitive, in arc-length units from its origin.
///
/// Either end may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    /// Start of the parameter range.
    pub start: f64,
    /// End of the parameter range.
    pub end: f64,
}

impl Domain {
    /// Creates a new domain.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The whole real line.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Returns `true` if `t` lies in the domain at precision `p`.
    #[must_use]
    pub fn contains(&self, t: f64, p: Precision) -> bool {
        sign(t - self.start, p) != Sign::Negative && sign(self.end - t, p) != Sign::Negative
    }

    /// Returns `true` if both ends are finite.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }

    /// Returns `true` if the domain is longer than zero at precision `p`.
    #[must_use]
    pub fn has_length(&self, p: Precision) -> bool {
        self.end > self.start && !almost_zero(self.end - self.start, p)
    }

    /// Returns `true` if `inner` lies within `self` at precision `p`.
    #[must_use]
    pub fn covers(&self, inner: &Domain, p: Precision) -> bool {
        let start_ok = self.start.is_infinite()
            || (inner.start.is_finite() && sign(inner.start - self.start, p) != Sign::Negative);
        let end_ok = self.end.is_infinite()
            || (inner.end.is_finite() && sign(self.end - inner.end, p) != Sign::Negative);
        start_ok && end_ok
    }

    /// Common part of two domains, which may be empty (`start > end`).
    #[must_use]
    pub fn intersect(&self, other: &Domain) -> Domain {
        Domain::new(self.start.max(other.start), self.end.min(other.end))
    }
}

/// A straight one-dimensional primitive: `origin + t * direction`, `t ∈ domain`.
///
/// The direction has unit length, so `t` measures arc length.
pub trait Linear<const D: usize> {
    /// The point at `t = 0`.
    fn origin(&self) -> &Point<D>;

    /// Unit direction of increasing `t`.
    fn direction(&self) -> &UnitVector<D>;

    /// Parameter range covered by the primitive.
    fn domain(&self) -> Domain;

    /// Point at parameter `t`. `t` is not checked against the domain.
    fn point_at(&self, t: f64) -> Point<D> {
        self.origin() + self.direction().into_inner() * t
    }

    /// Parameter of the foot of the perpendicular from `q` to the supporting line.
    fn project(&self, q: &Point<D>) -> f64 {
        (q - self.origin()).dot(&self.direction().into_inner())
    }

    /// Point of the primitive closest to `q`.
    fn closest_point(&self, q: &Point<D>) -> Point<D> {
        let domain = self.domain();
        self.point_at(self.project(q).clamp(domain.start, domain.end))
    }

    /// Euclidean distance from `q` to the primitive.
    fn distance_to(&self, q: &Point<D>) -> f64 {
        nalgebra::distance(q, &self.closest_point(q))
    }

    /// The infinite line carrying the primitive.
    fn support(&self) -> Line<D> {
        Line::from_unit(*self.origin(), *self.direction())
    }

    /// Returns `true` if `q` lies on the primitive at precision `p`.
    fn contains_point(&self, q: &Point<D>, p: Precision) -> bool {
        let t = self.project(q);
        almost_zero(nalgebra::distance(q, &self.point_at(t)), p) && self.domain().contains(t, p)
    }
}
