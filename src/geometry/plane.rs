use nalgebra::Unit;

use crate::error::{GeometryError, Result};
use crate::math::intersect_3d::signed_distance_to_plane;
use crate::math::{
    almost_zero, AlmostEq, Frame, Point2, Point3, Precision, UnitVector3, Vector3, VectorExt,
};

/// An infinite plane in 3D space.
///
/// Defined by an origin point and two orthonormal direction vectors
/// (`axis_u`, `axis_v`). The normal is `axis_u × axis_v`.
///
/// Parametric form: `P(u, v) = origin + u * axis_u + v * axis_v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    origin: Point3,
    normal: UnitVector3,
    axis_u: UnitVector3,
    axis_v: UnitVector3,
}

impl Plane {
    /// Creates the plane through three points.
    ///
    /// `axis_u` points from `a` to `b`; the normal follows the right-hand rule
    /// for `a → b → c`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the points are collinear
    /// (or coincide) at precision `p`.
    pub fn from_points(a: Point3, b: Point3, c: Point3, p: Precision) -> Result<Self> {
        let axis_u = (b - a).normalized(p)?;
        let u = axis_u.into_inner();
        let ac = c - a;
        let off_axis = ac - u * ac.dot(&u);
        if almost_zero(off_axis.norm(), p) {
            return Err(GeometryError::degenerate("plane points are collinear"));
        }
        let normal = u.cross(&ac).normalize();
        Ok(Self::from_axes(a, axis_u, Unit::new_normalize(normal.cross(&u))))
    }

    /// Creates a plane from an origin and a normal vector.
    ///
    /// The U and V directions are computed automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector rounds to zero length.
    pub fn from_normal(origin: Point3, normal: Vector3, p: Precision) -> Result<Self> {
        let normal = normal.normalized(p)?;

        // Choose a reference vector not parallel to the normal
        let reference = if normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };

        let n = normal.into_inner();
        let axis_u = Unit::new_normalize(reference - n * reference.dot(&n));
        let axis_v = Unit::new_normalize(n.cross(&axis_u.into_inner()));

        Ok(Self {
            origin,
            normal,
            axis_u,
            axis_v,
        })
    }

    /// Creates a plane from an origin, a normal and a U direction.
    ///
    /// `axis_u` is projected into the plane; `axis_v` is `normal × axis_u`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the normal rounds to zero
    /// or `axis_u` has no component in the plane at precision `p`.
    pub fn from_normal_and_axis(
        origin: Point3,
        normal: Vector3,
        axis_u: Vector3,
        p: Precision,
    ) -> Result<Self> {
        let n = normal.normalized(p)?.into_inner();
        let axis_u = (axis_u - n * axis_u.dot(&n)).normalized(p)?;
        let axis_v = Unit::new_normalize(n.cross(&axis_u.into_inner()));
        Ok(Self::from_axes(origin, axis_u, axis_v))
    }

    /// Plane spanned by two orthonormal axes.
    pub(crate) fn from_axes(origin: Point3, axis_u: UnitVector3, axis_v: UnitVector3) -> Self {
        Self {
            origin,
            normal: Unit::new_normalize(axis_u.cross(&axis_v.into_inner())),
            axis_u,
            axis_v,
        }
    }

    /// Returns the origin point of the plane.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit normal.
    #[must_use]
    pub fn normal(&self) -> &UnitVector3 {
        &self.normal
    }

    /// Returns the U direction vector.
    #[must_use]
    pub fn axis_u(&self) -> &UnitVector3 {
        &self.axis_u
    }

    /// Returns the V direction vector.
    #[must_use]
    pub fn axis_v(&self) -> &UnitVector3 {
        &self.axis_v
    }

    /// The plane's local coordinate frame.
    #[must_use]
    pub fn frame(&self) -> Frame<3> {
        Frame::from_axes(self.origin, self.axis_u.into_inner(), self.axis_v.into_inner())
    }

    /// Signed distance of `q` from the plane, positive on the normal side.
    #[must_use]
    pub fn signed_distance(&self, q: &Point3) -> f64 {
        signed_distance_to_plane(q, &self.origin, &self.normal)
    }

    /// Returns `true` if `q` lies on the plane at precision `p`.
    #[must_use]
    pub fn contains_point(&self, q: &Point3, p: Precision) -> bool {
        almost_zero(self.signed_distance(q), p)
    }

    /// Returns `true` if `other` covers the same points, whatever its normal's sense.
    #[must_use]
    pub fn is_coplanar(&self, other: &Plane, p: Precision) -> bool {
        self.normal
            .into_inner()
            .is_parallel(&other.normal.into_inner(), p)
            && self.contains_point(&other.origin, p)
    }

    /// Orthogonal projection of `q` onto the plane.
    #[must_use]
    pub fn project_onto(&self, q: &Point3) -> Point3 {
        q - self.normal.into_inner() * self.signed_distance(q)
    }

    /// Projection of `q` onto the plane along the world Z axis.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::AmbiguousProjection`] if the plane is vertical
    /// (its normal is perpendicular to Z) at precision `p`.
    pub fn vertical_project_onto(&self, q: &Point3, p: Precision) -> Result<Point3> {
        let n = self.normal.into_inner();
        if almost_zero(n.z, p) {
            return Err(GeometryError::AmbiguousProjection(format!(
                "plane normal {:?} is perpendicular to Z",
                n.as_slice()
            ))
            .into());
        }
        let z = self.origin.z - (n.x * (q.x - self.origin.x) + n.y * (q.y - self.origin.y)) / n.z;
        Ok(Point3::new(q.x, q.y, z))
    }

    /// Local `(u, v)` coordinates of the orthogonal projection of `q`.
    #[must_use]
    pub fn project_into(&self, q: &Point3) -> Point2 {
        let d = q - self.origin;
        Point2::new(d.dot(&self.axis_u.into_inner()), d.dot(&self.axis_v.into_inner()))
    }

    /// World position of local coordinates `uv`; the inverse of [`Plane::project_into`]
    /// for points on the plane.
    #[must_use]
    pub fn evaluate(&self, uv: &Point2) -> Point3 {
        self.origin + self.axis_u.into_inner() * uv.x + self.axis_v.into_inner() * uv.y
    }

    /// The same plane with the opposite normal.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self::from_axes(self.origin, self.axis_v, self.axis_u)
    }
}

impl AlmostEq for Plane {
    /// Planes are equal when they cover the same points and their normals agree.
    fn almost_eq(&self, other: &Self, p: Precision) -> bool {
        self.contains_point(&other.origin, p) && self.normal.almost_eq(&other.normal, p)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const P: Precision = Precision::DEFAULT;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn tilted() -> Plane {
        Plane::from_points(p(1.0, 0.0, 0.0), p(0.0, 2.0, 0.0), p(0.0, 0.0, 3.0), P).unwrap()
    }

    #[test]
    fn axes_are_orthonormal_and_right_handed() {
        for plane in [
            tilted(),
            Plane::from_normal(p(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), P).unwrap(),
            Plane::from_normal(p(0.0, 0.0, 0.0), Vector3::new(0.3, -2.0, 0.7), P).unwrap(),
        ] {
            let (u, v, n) = (plane.axis_u(), plane.axis_v(), plane.normal());
            assert_relative_eq!(u.dot(&v.into_inner()), 0.0, epsilon = 1e-12);
            assert_relative_eq!(u.cross(&v.into_inner()), n.into_inner(), epsilon = 1e-12);
        }
    }

    #[test]
    fn u_axis_is_kept_after_projection_into_plane() {
        let plane = tilted();
        let rebuilt = Plane::from_normal_and_axis(
            *plane.origin(),
            plane.normal().into_inner() * 2.0,
            plane.axis_u().into_inner() * 5.0 + plane.normal().into_inner(),
            P,
        )
        .unwrap();
        let (u, v) = (rebuilt.axis_u().into_inner(), rebuilt.axis_v().into_inner());
        assert_relative_eq!(u, plane.axis_u().into_inner(), epsilon = 1e-12);
        assert_relative_eq!(v, plane.axis_v().into_inner(), epsilon = 1e-12);
        let origin = p(0.0, 0.0, 0.0);
        assert!(Plane::from_normal_and_axis(origin, Vector3::z(), Vector3::z(), P).is_err());
    }

    #[test]
    fn collinear_points_fail() {
        let r = Plane::from_points(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), p(3.0, 3.0, 3.0), P);
        assert!(r.is_err());
        let r = Plane::from_points(p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(3.0, 3.0, 3.0), P);
        assert!(r.is_err());
    }

    #[test]
    fn contains_barycentric_combinations() {
        let (a, b, c) = (p(1.0, 0.0, 0.0), p(0.0, 2.0, 0.0), p(0.0, 0.0, 3.0));
        let plane = Plane::from_points(a, b, c, P).unwrap();
        for (wa, wb) in [(0.2, 0.3), (-1.0, 4.0), (0.5, 0.5), (3.0, -7.5)] {
            let wc = 1.0 - wa - wb;
            let q = Point3::from(a.coords * wa + b.coords * wb + c.coords * wc);
            assert!(plane.contains_point(&q, P));
        }
        assert!(!plane.contains_point(&p(1.0, 1.0, 1.0), P));
    }

    #[test]
    fn project_into_then_evaluate_is_identity() {
        let plane = tilted();
        for uv in [(0.0, 0.0), (1.5, -2.25), (-100.0, 37.0)] {
            let q = plane.evaluate(&Point2::new(uv.0, uv.1));
            let back = plane.evaluate(&plane.project_into(&q));
            assert!(back.almost_eq(&q, Precision::MAX));
        }
    }

    #[test]
    fn projection_lands_on_plane() {
        let plane = tilted();
        let q = p(5.0, -3.0, 2.0);
        let foot = plane.project_onto(&q);
        assert!(plane.contains_point(&foot, Precision::MAX));
        assert_relative_eq!(
            (q - foot).norm(),
            plane.signed_distance(&q).abs(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn vertical_projection() {
        let plane = tilted();
        let q = plane.vertical_project_onto(&p(0.2, 0.3, 50.0), P).unwrap();
        assert_relative_eq!(q.x, 0.2);
        assert_relative_eq!(q.y, 0.3);
        assert!(plane.contains_point(&q, Precision::MAX));
    }

    #[test]
    fn vertical_projection_onto_wall_is_ambiguous() {
        let wall = Plane::from_normal(p(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 0.0), P).unwrap();
        let err = wall.vertical_project_onto(&p(1.0, 1.0, 1.0), P).unwrap_err();
        assert!(matches!(
            err,
            crate::error::GeokernError::Geometry(GeometryError::AmbiguousProjection(_))
        ));
    }

    #[test]
    fn coplanar_ignores_normal_sense() {
        let plane = tilted();
        assert!(plane.is_coplanar(&plane.flipped(), P));
        assert!(!plane.almost_eq(&plane.flipped(), P));
        assert_relative_eq!(
            plane.flipped().normal().into_inner(),
            -plane.normal().into_inner(),
            epsilon = 1e-12
        );
    }
}
