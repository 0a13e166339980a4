use nalgebra::Unit;

use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::turn;
use crate::math::vector::mean_point;
use crate::math::{
    almost_zero, sign, AlmostEq, Frame, Point, Point2, Precision, Sign, UnitVector, UnitVector3,
    Vector2Ext, VectorExt,
};

use super::{Area, Orientation, Plane};

/// A triangle given by three non-collinear points.
///
/// `u` is the unit vector from `P0` to `P1` and `v` the unit vector from `P0`
/// to `P2`. The local frame uses `u` and the part of `v` perpendicular to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle<const D: usize> {
    vertices: [Point<D>; 3],
    u: UnitVector<D>,
    v: UnitVector<D>,
    frame: Frame<D>,
}

/// Planar triangle.
pub type Triangle2 = Triangle<2>;

/// Spatial triangle.
pub type Triangle3 = Triangle<3>;

impl<const D: usize> Triangle<D> {
    /// Creates a triangle.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if `p2` lies on the line
    /// through `p0` and `p1`, or `p0` and `p1` coincide, at precision `p`.
    pub fn new(p0: Point<D>, p1: Point<D>, p2: Point<D>, p: Precision) -> Result<Self> {
        let u = (p1 - p0).normalized(p)?;
        let w = p2 - p0;
        let off_axis = w - u.into_inner() * w.dot(&u.into_inner());
        if almost_zero(off_axis.norm(), p) {
            return Err(GeometryError::degenerate("triangle points are collinear"));
        }
        Ok(Self::from_parts([p0, p1, p2], u, Unit::new_normalize(off_axis)))
    }

    /// Creates a triangle from vertices already known to be non-collinear.
    pub(crate) fn new_unchecked(p0: Point<D>, p1: Point<D>, p2: Point<D>) -> Self {
        let u = Unit::new_normalize(p1 - p0);
        let w = p2 - p0;
        let off_axis = w - u.into_inner() * w.dot(&u.into_inner());
        Self::from_parts([p0, p1, p2], u, Unit::new_normalize(off_axis))
    }

    fn from_parts(vertices: [Point<D>; 3], u: UnitVector<D>, axis_v: UnitVector<D>) -> Self {
        let frame = if D == 2 {
            Frame::world()
        } else {
            Frame::from_axes(vertices[0], u.into_inner(), axis_v.into_inner())
        };
        Self {
            vertices,
            u,
            v: Unit::new_normalize(vertices[2] - vertices[0]),
            frame,
        }
    }

    #[must_use]
    pub fn p0(&self) -> &Point<D> {
        &self.vertices[0]
    }

    #[must_use]
    pub fn p1(&self) -> &Point<D> {
        &self.vertices[1]
    }

    #[must_use]
    pub fn p2(&self) -> &Point<D> {
        &self.vertices[2]
    }

    /// Unit vector from `P0` towards `P1`.
    #[must_use]
    pub fn u(&self) -> &UnitVector<D> {
        &self.u
    }

    /// Unit vector from `P0` towards `P2`.
    #[must_use]
    pub fn v(&self) -> &UnitVector<D> {
        &self.v
    }

    /// Mean of the three vertices.
    #[must_use]
    pub fn center_of_mass(&self) -> Point<D> {
        mean_point(&self.vertices).unwrap_or(self.vertices[0])
    }

    /// The triangle traversed `P0 → P2 → P1`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new_unchecked(self.vertices[0], self.vertices[2], self.vertices[1])
    }
}

impl Triangle<2> {
    /// Winding of `P0 → P1 → P2`.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        let [a, b, c] = self.vertices;
        if (b - a).cross_2d(&(c - a)) < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::CounterClockwise
        }
    }
}

impl Triangle<3> {
    /// Unit normal `u × v`; `P0 → P1 → P2` winds counter-clockwise around it.
    #[must_use]
    pub fn normal(&self) -> UnitVector3 {
        Unit::new_normalize(self.u.cross(&self.v.into_inner()))
    }

    /// The plane through the triangle, with origin `P0` and axes `u`, `v`.
    #[must_use]
    pub fn plane(&self) -> Plane {
        Plane::from_axes(self.vertices[0], self.u, self.v)
    }
}

impl<const D: usize> Area<D> for Triangle<D> {
    fn vertices(&self) -> &[Point<D>] {
        &self.vertices
    }

    fn frame(&self) -> &Frame<D> {
        &self.frame
    }

    /// Signed-edge test: the point may not lie strictly right of one edge and
    /// strictly left of another.
    fn contains_local(&self, q: &Point2, p: Precision) -> bool {
        let ring = self.local_ring();
        let signs: Vec<Sign> = (0..3)
            .map(|i| sign(turn(&ring[i], &ring[(i + 1) % 3], q), p))
            .collect();
        !(signs.contains(&Sign::Negative) && signs.contains(&Sign::Positive))
    }

    /// Half the Gram determinant of the two edge vectors.
    fn area(&self) -> f64 {
        let a = self.vertices[1] - self.vertices[0];
        let b = self.vertices[2] - self.vertices[0];
        let gram = a.norm_squared() * b.norm_squared() - a.dot(&b).powi(2);
        0.5 * gram.max(0.0).sqrt()
    }

    fn centroid(&self) -> Point<D> {
        self.center_of_mass()
    }

    fn is_convex(&self, _p: Precision) -> bool {
        true
    }
}

impl<const D: usize> AlmostEq for Triangle<D> {
    /// Triangles are equal when they have the same three corners, in any order.
    fn almost_eq(&self, other: &Self, p: Precision) -> bool {
        let matches = |a: &[Point<D>; 3], b: &[Point<D>; 3]| {
            a.iter().all(|q| b.iter().any(|r| q.almost_eq(r, p)))
        };
        matches(&self.vertices, &other.vertices) && matches(&other.vertices, &self.vertices)
    }
}
