use super::precision::{almost_zero, Precision};
use super::vector::world_axis;
use super::{Point, Point2, Vector, Vector2};
use crate::error::{GeometryError, Result};

/// An orthonormal 2D coordinate frame embedded in `D`-dimensional space.
///
/// Planar work (containment, clipping, hulls) happens in the frame's local
/// `(u, v)` coordinates and is lifted back with [`Frame::to_world`]. In 2D the
/// frame is always the world frame, so local and world coordinates coincide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<const D: usize> {
    origin: Point<D>,
    axis_u: Vector<D>,
    axis_v: Vector<D>,
}

impl<const D: usize> Frame<D> {
    /// Fits a frame through a point set.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the points coincide, are
    /// collinear, or (in 3D) do not share a plane at precision `p`.
    pub fn fit(points: &[Point<D>], p: Precision) -> Result<Self> {
        let Some((far, far_dist)) = farthest_from_first(points) else {
            return Err(GeometryError::degenerate("cannot fit a frame to no points"));
        };
        if almost_zero(far_dist, p) {
            return Err(GeometryError::degenerate("points coincide"));
        }
        let origin = points[0];
        let axis_u = (far - origin) / far_dist;
        let (perp, perp_dist) = most_perpendicular(points, &origin, &axis_u);
        if almost_zero(perp_dist, p) {
            return Err(GeometryError::degenerate("points are collinear"));
        }
        if D == 2 {
            return Ok(Self::world());
        }
        let frame = Self {
            origin,
            axis_u,
            axis_v: perp / perp_dist,
        };
        if let Some(off) = points.iter().map(|q| frame.offset(q)).find(|d| !almost_zero(*d, p)) {
            return Err(GeometryError::degenerate(format!(
                "points are not coplanar (offset {off})"
            )));
        }
        Ok(frame)
    }

    /// Frame from explicit orthonormal axes.
    pub(crate) fn from_axes(origin: Point<D>, axis_u: Vector<D>, axis_v: Vector<D>) -> Self {
        Self {
            origin,
            axis_u,
            axis_v,
        }
    }

    /// The world frame spanned by the first two axes.
    #[must_use]
    pub fn world() -> Self {
        Self {
            origin: Point::origin(),
            axis_u: world_axis(0),
            axis_v: world_axis(1),
        }
    }

    #[must_use]
    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    #[must_use]
    pub fn axis_u(&self) -> &Vector<D> {
        &self.axis_u
    }

    #[must_use]
    pub fn axis_v(&self) -> &Vector<D> {
        &self.axis_v
    }

    /// Local `(u, v)` coordinates of the orthogonal projection of `q`.
    #[must_use]
    pub fn to_local(&self, q: &Point<D>) -> Point2 {
        let d = q - self.origin;
        Point2::new(d.dot(&self.axis_u), d.dot(&self.axis_v))
    }

    /// Local components of a direction.
    #[must_use]
    pub fn local_vector(&self, v: &Vector<D>) -> Vector2 {
        Vector2::new(v.dot(&self.axis_u), v.dot(&self.axis_v))
    }

    /// World position of local coordinates `uv`.
    #[must_use]
    pub fn to_world(&self, uv: &Point2) -> Point<D> {
        self.origin + self.axis_u * uv.x + self.axis_v * uv.y
    }

    /// Component of `v` orthogonal to the frame's plane.
    #[must_use]
    pub fn out_of_plane(&self, v: &Vector<D>) -> Vector<D> {
        v - self.axis_u * v.dot(&self.axis_u) - self.axis_v * v.dot(&self.axis_v)
    }

    /// Distance of `q` from the frame's plane. Always zero in 2D.
    #[must_use]
    pub fn offset(&self, q: &Point<D>) -> f64 {
        self.out_of_plane(&(q - self.origin)).norm()
    }

    /// Returns `true` if `q` lies in the frame's plane at precision `p`.
    #[must_use]
    pub fn is_coplanar(&self, q: &Point<D>, p: Precision) -> bool {
        almost_zero(self.offset(q), p)
    }
}

fn farthest_from_first<const D: usize>(points: &[Point<D>]) -> Option<(Point<D>, f64)> {
    let origin = points.first()?;
    points
        .iter()
        .map(|q| (*q, nalgebra::distance(origin, q)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

fn most_perpendicular<const D: usize>(
    points: &[Point<D>],
    origin: &Point<D>,
    axis: &Vector<D>,
) -> (Vector<D>, f64) {
    points
        .iter()
        .map(|q| {
            let d = q - origin;
            let perp = d - axis * d.dot(axis);
            let len = perp.norm();
            (perp, len)
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or((Vector::<D>::zeros(), 0.0))
}
