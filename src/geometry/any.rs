use crate::math::{AlmostEq, Point, Precision};

use super::{Line, LineSegment, Polygon, Polyline, Ray, Shape, Triangle};

/// Any primitive of one dimension, plus multi-part containers.
///
/// This is the unit of the WKT codec and of the runtime relation queries.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry<const D: usize> {
    Point(Point<D>),
    Line(Line<D>),
    Ray(Ray<D>),
    Segment(LineSegment<D>),
    Polyline(Polyline<D>),
    Triangle(Triangle<D>),
    Polygon(Polygon<D>),
    MultiPolygon(Vec<Polygon<D>>),
    Collection(Vec<Geometry<D>>),
}

/// Planar geometry.
pub type Geometry2 = Geometry<2>;

/// Spatial geometry.
pub type Geometry3 = Geometry<3>;

impl<const D: usize> Geometry<D> {
    /// Name of the variant, for messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::Line(_) => "line",
            Self::Ray(_) => "ray",
            Self::Segment(_) => "segment",
            Self::Polyline(_) => "polyline",
            Self::Triangle(_) => "triangle",
            Self::Polygon(_) => "polygon",
            Self::MultiPolygon(_) => "multipolygon",
            Self::Collection(_) => "collection",
        }
    }

    /// Returns `true` for an empty multi-polygon or collection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::MultiPolygon(parts) => parts.is_empty(),
            Self::Collection(parts) => parts.is_empty(),
            _ => false,
        }
    }
}

impl<const D: usize> AlmostEq for Geometry<D> {
    /// Containers compare member by member, in order.
    fn almost_eq(&self, other: &Self, p: Precision) -> bool {
        fn all_eq<T: AlmostEq>(a: &[T], b: &[T], p: Precision) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.almost_eq(y, p))
        }
        match (self, other) {
            (Self::Point(a), Self::Point(b)) => a.almost_eq(b, p),
            (Self::Line(a), Self::Line(b)) => a.almost_eq(b, p),
            (Self::Ray(a), Self::Ray(b)) => a.almost_eq(b, p),
            (Self::Segment(a), Self::Segment(b)) => a.almost_eq(b, p),
            (Self::Polyline(a), Self::Polyline(b)) => a.almost_eq(b, p),
            (Self::Triangle(a), Self::Triangle(b)) => a.almost_eq(b, p),
            (Self::Polygon(a), Self::Polygon(b)) => a.almost_eq(b, p),
            (Self::MultiPolygon(a), Self::MultiPolygon(b)) => all_eq(a, b, p),
            (Self::Collection(a), Self::Collection(b)) => all_eq(a, b, p),
            _ => false,
        }
    }
}

impl<const D: usize> From<Shape<D>> for Geometry<D> {
    /// `Nothing` becomes an empty collection.
    fn from(shape: Shape<D>) -> Self {
        match shape {
            Shape::Nothing => Self::Collection(Vec::new()),
            Shape::Point(q) => Self::Point(q),
            Shape::Line(l) => Self::Line(l),
            Shape::Ray(r) => Self::Ray(r),
            Shape::Segment(s) => Self::Segment(s),
            Shape::Triangle(t) => Self::Triangle(t),
            Shape::Polygon(poly) => Self::Polygon(poly),
            Shape::Collection(parts) => {
                Self::Collection(parts.into_iter().map(Self::from).collect())
            }
        }
    }
}

macro_rules! geometry_from {
    ($($variant:ident => $ty:ident),* $(,)?) => {
        $(
            impl<const D: usize> From<$ty<D>> for Geometry<D> {
                fn from(value: $ty<D>) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

geometry_from!(
    Line => Line,
    Ray => Ray,
    Segment => LineSegment,
    Polyline => Polyline,
    Triangle => Triangle,
    Polygon => Polygon,
);

impl<const D: usize> From<Point<D>> for Geometry<D> {
    fn from(q: Point<D>) -> Self {
        Self::Point(q)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    const P: Precision = Precision::DEFAULT;

    #[test]
    fn nothing_is_empty_collection() {
        let g: Geometry2 = Shape::Nothing.into();
        assert!(g.is_empty());
        assert_eq!(g.kind_name(), "collection");
    }

    #[test]
    fn conversions_keep_values() {
        let seg = LineSegment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), P).unwrap();
        let g = Geometry::from(seg);
        assert!(g.almost_eq(&Geometry::Segment(seg.reversed()), P));
        assert!(!g.almost_eq(&Geometry::Point(Point2::new(0.0, 0.0)), P));
    }
}
