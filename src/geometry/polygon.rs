use std::ops::Index;

use nalgebra::Unit;

use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::{is_simple, signed_area};
use crate::math::polygon_3d::newell_normal;
use crate::math::vector::vector_to_3d;
use crate::math::{AlmostEq, Frame, Point, Precision, Vector3};

use super::{Area, Orientation, Plane, Triangle};

/// A closed, simple, planar polygon without holes.
///
/// Vertices are stored without a closing duplicate. Indexing wraps around:
/// `poly[n]` is `poly[0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<const D: usize> {
    vertices: Vec<Point<D>>,
    frame: Frame<D>,
}

/// Planar polygon.
pub type Polygon2 = Polygon<2>;

/// Spatial polygon.
pub type Polygon3 = Polygon<3>;

impl<const D: usize> Polygon<D> {
    /// Creates a polygon from its boundary vertices.
    ///
    /// Consecutive repeated vertices and a closing duplicate are dropped first.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if fewer than three distinct
    /// vertices remain, the vertices are collinear, not coplanar (3D), or the
    /// boundary touches or crosses itself, at precision `p`.
    pub fn new(points: Vec<Point<D>>, p: Precision) -> Result<Self> {
        let vertices = dedup_ring(points, p);
        if vertices.len() < 3 {
            return Err(GeometryError::degenerate(format!(
                "polygon needs at least 3 distinct vertices, got {}",
                vertices.len()
            )));
        }
        let frame = Frame::fit(&vertices, p)?;
        let polygon = Self { vertices, frame };
        if !is_simple(&polygon.local_ring(), p) {
            return Err(GeometryError::degenerate("polygon boundary is not simple"));
        }
        Ok(polygon)
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex at a wrapping index; negative indices count back from the end.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn vertex(&self, i: isize) -> &Point<D> {
        let n = self.vertices.len() as isize;
        &self.vertices[i.rem_euclid(n) as usize]
    }

    /// The same polygon traversed in the opposite sense.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices[1..].reverse();
        Self {
            vertices,
            frame: self.frame,
        }
    }

    /// Consumes the polygon, returning its vertices.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Point<D>> {
        self.vertices
    }
}

impl<const D: usize> From<Triangle<D>> for Polygon<D> {
    fn from(t: Triangle<D>) -> Self {
        Self {
            vertices: t.vertices().to_vec(),
            frame: *t.frame(),
        }
    }
}

impl Polygon<2> {
    /// Shoelace area, positive for counter-clockwise boundaries.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    /// Winding of the boundary.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.signed_area() < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::CounterClockwise
        }
    }
}

impl Polygon<3> {
    /// Unit normal from Newell's method; the boundary winds counter-clockwise around it.
    #[must_use]
    pub fn normal(&self) -> Unit<Vector3> {
        Unit::new_normalize(newell_normal(&self.vertices))
    }

    /// The polygon's reference plane, with origin at the first vertex.
    #[must_use]
    pub fn plane(&self) -> Plane {
        let u = vector_to_3d(self.frame.axis_u());
        let mut v = vector_to_3d(self.frame.axis_v());
        if u.cross(&v).dot(&newell_normal(&self.vertices)) < 0.0 {
            v = -v;
        }
        Plane::from_axes(
            self.vertices[0],
            Unit::new_normalize(u),
            Unit::new_normalize(v),
        )
    }
}

impl<const D: usize> Area<D> for Polygon<D> {
    fn vertices(&self) -> &[Point<D>] {
        &self.vertices
    }

    fn frame(&self) -> &Frame<D> {
        &self.frame
    }
}

impl<const D: usize> Index<usize> for Polygon<D> {
    type Output = Point<D>;

    fn index(&self, i: usize) -> &Point<D> {
        &self.vertices[i % self.vertices.len()]
    }
}

impl<const D: usize> AlmostEq for Polygon<D> {
    /// Polygons are equal when their boundaries match up to a cyclic shift,
    /// in either direction.
    fn almost_eq(&self, other: &Self, p: Precision) -> bool {
        let n = self.vertices.len();
        if n != other.vertices.len() {
            return false;
        }
        (0..n).any(|shift| {
            let forward = (0..n).all(|i| self[i].almost_eq(&other[i + shift], p));
            let backward = (0..n).all(|i| self[i].almost_eq(&other[shift + n - i], p));
            forward || backward
        })
    }
}

/// Drops consecutive repeated vertices and a closing duplicate.
pub(crate) fn dedup_ring<const D: usize>(points: Vec<Point<D>>, p: Precision) -> Vec<Point<D>> {
    let mut ring: Vec<Point<D>> = Vec::with_capacity(points.len());
    for q in points {
        if ring.last().is_none_or(|last| !last.almost_eq(&q, p)) {
            ring.push(q);
        }
    }
    while ring.len() > 1 && ring[0].almost_eq(&ring[ring.len() - 1], p) {
        ring.pop();
    }
    ring
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::{Point2, Point3};

    const P: Precision = Precision::DEFAULT;

    fn q(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn square(side: f64) -> Polygon2 {
        Polygon::new(
            vec![q(0.0, 0.0), q(side, 0.0), q(side, side), q(0.0, side)],
            P,
        )
        .unwrap()
    }

    #[test]
    fn square_and_rectangle_area() {
        assert_relative_eq!(square(3.0).area(), 9.0, epsilon = 1e-12);
        let rect = Polygon::new(
            vec![q(1.0, 1.0), q(6.0, 1.0), q(6.0, 3.0), q(1.0, 3.0)],
            P,
        )
        .unwrap();
        assert_relative_eq!(rect.area(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(rect.perimeter(), 14.0, epsilon = 1e-12);
    }

    #[test]
    fn closing_duplicate_is_dropped() {
        let poly = Polygon::new(
            vec![q(0.0, 0.0), q(1.0, 0.0), q(1.0, 0.0), q(0.0, 1.0), q(0.0, 0.0)],
            P,
        )
        .unwrap();
        assert_eq!(poly.vertex_count(), 3);
    }

    #[test]
    fn invalid_rings_fail() {
        assert!(Polygon::new(vec![q(0.0, 0.0), q(1.0, 0.0)], P).is_err());
        assert!(Polygon::new(vec![q(0.0, 0.0), q(1.0, 0.0), q(2.0, 0.0)], P).is_err());
        let bow_tie = vec![q(0.0, 0.0), q(1.0, 1.0), q(1.0, 0.0), q(0.0, 1.0)];
        assert!(Polygon::new(bow_tie, P).is_err());
        let warped = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.5),
            p(0.0, 1.0, 0.0),
        ];
        assert!(Polygon::new(warped, P).is_err());
    }

    #[test]
    fn modular_indexing() {
        let sq = square(1.0);
        assert_eq!(sq[4], sq[0]);
        assert_eq!(sq[7], sq[3]);
        assert_eq!(*sq.vertex(-1), sq[3]);
    }

    #[test]
    fn orientation_and_reversal() {
        let sq = square(2.0);
        assert_eq!(sq.orientation(), Orientation::CounterClockwise);
        let rev = sq.reversed();
        assert_eq!(rev.orientation(), Orientation::Clockwise);
        assert_relative_eq!(rev.signed_area(), -4.0, epsilon = 1e-12);
        assert!(rev.almost_eq(&sq, P));
    }

    #[test]
    fn equality_up_to_rotation() {
        let a = square(1.0);
        let b = Polygon::new(vec![q(1.0, 1.0), q(0.0, 1.0), q(0.0, 0.0), q(1.0, 0.0)], P).unwrap();
        assert!(a.almost_eq(&b, P));
        let c = Polygon::new(vec![q(1.0, 1.0), q(0.0, 1.0), q(0.0, 0.0), q(1.1, 0.0)], P).unwrap();
        assert!(!a.almost_eq(&c, P));
    }

    #[test]
    fn centroid_of_l_shape() {
        let l = Polygon::new(
            vec![
                q(0.0, 0.0),
                q(2.0, 0.0),
                q(2.0, 1.0),
                q(1.0, 1.0),
                q(1.0, 2.0),
                q(0.0, 2.0),
            ],
            P,
        )
        .unwrap();
        let c = l.centroid();
        assert_relative_eq!(c.x, 5.0 / 6.0, epsilon = 1e-12);
        assert!(!l.is_convex(P));
        assert!(square(1.0).is_convex(P));
    }

    #[test]
    fn spatial_polygon_plane_follows_winding() {
        let poly = Polygon::new(
            vec![
                p(0.0, 0.0, 2.0),
                p(2.0, 0.0, 2.0),
                p(2.0, 2.0, 2.0),
                p(1.0, 1.0, 2.0),
                p(0.0, 2.0, 2.0),
            ],
            P,
        )
        .unwrap();
        let plane = poly.plane();
        assert!(plane.normal().almost_eq(&poly.normal(), Precision::MAX));
        assert_relative_eq!(plane.normal().z, 1.0, epsilon = 1e-12);
        assert!(plane.contains_point(&poly[3], P));
        assert_relative_eq!(poly.area(), 3.0, epsilon = 1e-12);
        let flipped = poly.reversed().plane();
        assert_relative_eq!(flipped.normal().z, -1.0, epsilon = 1e-12);
    }
}
