use crate::geometry::{
    Area, Geometry, Line, LineSegment, Linear, Plane, Polygon, Polyline, Ray, Triangle,
};
use crate::math::{almost_equal, round_to, Point, Precision, Vector};

use super::ToWkt;

/// `x` rounded to `p` digits, without trailing zeros or a negative zero.
///
/// A value sitting on a rounding tie gets one more digit, so that it still
/// reads back equal at `p`.
pub(crate) fn number(x: f64, p: Precision) -> String {
    let digits = p.digits() as usize;
    let rounded = round_to(x, p);
    let mut text = if almost_equal(rounded, x, p) {
        format!("{rounded:.digits$}")
    } else {
        format!("{x:.*}", digits + 1)
    };
    if text.contains('.') {
        text.truncate(text.trim_end_matches('0').trim_end_matches('.').len());
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}

/// Coordinates rounded to `p`.
fn coordinate<const D: usize>(q: &Point<D>, p: Precision) -> String {
    q.iter().map(|&x| number(x, p)).collect::<Vec<_>>().join(" ")
}

/// Coordinates at full precision, for the unbounded extensions.
fn exact<const D: usize>(v: &Vector<D>) -> String {
    // `+ 0.0` folds a negative zero.
    v.iter().map(|&x| format!("{}", x + 0.0)).collect::<Vec<_>>().join(" ")
}

fn coordinates<const D: usize>(points: &[Point<D>], p: Precision) -> String {
    points.iter().map(|q| coordinate(q, p)).collect::<Vec<_>>().join(", ")
}

/// Closed ring: the first vertex is repeated at the end.
fn ring<const D: usize>(points: &[Point<D>], p: Precision) -> String {
    match points.first() {
        Some(first) => format!("(({}, {}))", coordinates(points, p), coordinate(first, p)),
        None => "(())".to_string(),
    }
}

fn anchor<const D: usize>(tag: &str, origin: &Point<D>, direction: &Vector<D>) -> String {
    format!("{tag} ({}, {})", exact(&origin.coords), exact(direction))
}

impl<const D: usize> ToWkt for Point<D> {
    fn to_wkt(&self, p: Precision) -> String {
        format!("POINT ({})", coordinate(self, p))
    }
}

impl<const D: usize> ToWkt for Line<D> {
    fn to_wkt(&self, _p: Precision) -> String {
        anchor("LINE", self.origin(), &self.direction().into_inner())
    }
}

impl<const D: usize> ToWkt for Ray<D> {
    fn to_wkt(&self, _p: Precision) -> String {
        anchor("RAY", self.origin(), &self.direction().into_inner())
    }
}

impl<const D: usize> ToWkt for LineSegment<D> {
    fn to_wkt(&self, p: Precision) -> String {
        format!("LINESTRING ({})", coordinates(&self.endpoints(), p))
    }
}

impl<const D: usize> ToWkt for Polyline<D> {
    fn to_wkt(&self, p: Precision) -> String {
        format!("LINESTRING ({})", coordinates(self.vertices(), p))
    }
}

impl<const D: usize> ToWkt for Triangle<D> {
    fn to_wkt(&self, p: Precision) -> String {
        format!("TRIANGLE {}", ring(&[*self.p0(), *self.p1(), *self.p2()], p))
    }
}

impl<const D: usize> ToWkt for Polygon<D> {
    fn to_wkt(&self, p: Precision) -> String {
        format!("POLYGON {}", ring(self.vertices(), p))
    }
}

impl ToWkt for Plane {
    fn to_wkt(&self, _p: Precision) -> String {
        format!(
            "PLANE ({}, {}, {})",
            exact(&self.origin().coords),
            exact(&self.normal().into_inner()),
            exact(&self.axis_u().into_inner())
        )
    }
}

impl<const D: usize> ToWkt for Geometry<D> {
    fn to_wkt(&self, p: Precision) -> String {
        match self {
            Self::Point(q) => q.to_wkt(p),
            Self::Line(line) => line.to_wkt(p),
            Self::Ray(ray) => ray.to_wkt(p),
            Self::Segment(segment) => segment.to_wkt(p),
            Self::Polyline(polyline) => polyline.to_wkt(p),
            Self::Triangle(triangle) => triangle.to_wkt(p),
            Self::Polygon(polygon) => polygon.to_wkt(p),
            Self::MultiPolygon(polygons) if polygons.is_empty() => "MULTIPOLYGON EMPTY".to_string(),
            Self::MultiPolygon(polygons) => format!(
                "MULTIPOLYGON ({})",
                polygons.iter().map(|poly| ring(poly.vertices(), p)).collect::<Vec<_>>().join(", ")
            ),
            Self::Collection(members) if members.is_empty() => {
                "GEOMETRYCOLLECTION EMPTY".to_string()
            }
            Self::Collection(members) => format!(
                "GEOMETRYCOLLECTION ({})",
                members.iter().map(|g| g.to_wkt(p)).collect::<Vec<_>>().join(", ")
            ),
        }
    }
}
