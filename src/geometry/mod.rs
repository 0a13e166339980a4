mod any;
pub mod linear;
mod plane;
mod polygon;
mod polyline;
mod shape;
mod triangle;

pub use any::{Geometry, Geometry2, Geometry3};
pub use linear::{
    Domain, Line, Line2, Line3, LineSegment, LineSegment2, LineSegment3, Linear, Ray, Ray2, Ray3,
};
pub use plane::Plane;
pub use polygon::{Polygon, Polygon2, Polygon3};
pub use polyline::{Polyline, Polyline2, Polyline3};
pub use shape::Shape;
pub use triangle::{Triangle, Triangle2, Triangle3};

use crate::math::polygon_2d::{centroid, is_convex, point_in_polygon, signed_area};
use crate::math::vector::mean_point;
use crate::math::{Frame, Point, Point2, Precision};

/// Winding of a planar ring as seen from `+Z` (2D only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
}

impl Orientation {
    /// The opposite winding.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// A bounded planar region with a straight boundary: a triangle or a simple polygon.
///
/// Planar computations run in the region's local frame; in 2D the frame is the
/// world frame.
pub trait Area<const D: usize> {
    /// Boundary vertices in order, without a closing duplicate.
    fn vertices(&self) -> &[Point<D>];

    /// Local frame the region lies in.
    fn frame(&self) -> &Frame<D>;

    /// Boundary vertices in local frame coordinates.
    fn local_ring(&self) -> Vec<Point2> {
        let frame = self.frame();
        self.vertices().iter().map(|q| frame.to_local(q)).collect()
    }

    /// Containment of a point given in local frame coordinates, boundary inclusive.
    fn contains_local(&self, q: &Point2, p: Precision) -> bool {
        point_in_polygon(q, &self.local_ring(), p)
    }

    /// Enclosed area.
    fn area(&self) -> f64 {
        signed_area(&self.local_ring()).abs()
    }

    /// Length of the closed boundary.
    fn perimeter(&self) -> f64 {
        self.edges().iter().map(LineSegment::length).sum()
    }

    /// Area-weighted centroid.
    fn centroid(&self) -> Point<D> {
        match centroid(&self.local_ring()) {
            Some(c) => self.frame().to_world(&c),
            None => mean_point(self.vertices()).unwrap_or_else(Point::origin),
        }
    }

    /// Boundary edges, from each vertex to the next.
    fn edges(&self) -> Vec<LineSegment<D>> {
        let vs = self.vertices();
        let n = vs.len();
        (0..n)
            .map(|i| LineSegment::new_unchecked(vs[i], vs[(i + 1) % n]))
            .collect()
    }

    /// Returns `true` if no boundary turn bends the other way.
    fn is_convex(&self, p: Precision) -> bool {
        is_convex(&self.local_ring(), p)
    }
}
