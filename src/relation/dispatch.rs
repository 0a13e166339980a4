use crate::error::{GeokernError, GeometryError, Result};
use crate::geometry::{Geometry, LineSegment, Shape};
use crate::math::Precision;

use super::{Adjacent, Contains, Intersect, Overlap};

fn unsupported<const D: usize>(
    relation: &'static str,
    lhs: &Geometry<D>,
    rhs: &Geometry<D>,
) -> GeokernError {
    GeometryError::UnsupportedRelation {
        relation,
        lhs: lhs.kind_name(),
        rhs: rhs.kind_name(),
    }
    .into()
}

/// Matches a pair of geometries against the listed variant pairs and evaluates
/// `$body` with the unwrapped operands; any other pair is unsupported.
macro_rules! relate {
    (
        $relation:literal, $lhs:expr, $rhs:expr,
        |$a:ident, $b:ident| $body:expr,
        [$($l:ident x $r:ident),* $(,)?]
    ) => {
        match ($lhs, $rhs) {
            $( (Geometry::$l($a), Geometry::$r($b)) => Ok($body), )*
            (lhs, rhs) => Err(unsupported($relation, lhs, rhs)),
        }
    };
}

impl<const D: usize> Geometry<D> {
    /// Boundary-inclusive containment of `other` in `self`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedRelation`] for pairs without a
    /// containment test, such as anything containing a line or a collection.
    pub fn contains(&self, other: &Geometry<D>, p: Precision) -> Result<bool> {
        relate!("contains", self, other, |a, b| a.contains(b, p), [
            Point x Point,
            Line x Point, Line x Line, Line x Ray, Line x Segment,
            Ray x Point, Ray x Line, Ray x Ray, Ray x Segment,
            Segment x Point, Segment x Line, Segment x Ray, Segment x Segment,
            Polyline x Point, Polyline x Line, Polyline x Ray, Polyline x Segment,
            Triangle x Point, Triangle x Line, Triangle x Ray, Triangle x Segment,
            Triangle x Triangle, Triangle x Polygon, Triangle x Polyline,
            Polygon x Point, Polygon x Line, Polygon x Ray, Polygon x Segment,
            Polygon x Triangle, Polygon x Polygon, Polygon x Polyline,
        ])
    }

    /// Lower-dimensional contact between `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedRelation`] for pairs the relation
    /// engine does not define, including multi-polygons and collections.
    pub fn intersection(&self, other: &Geometry<D>, p: Precision) -> Result<Shape<D>> {
        relate!("intersection", self, other, |a, b| a.intersection(b, p), [
            Point x Point, Point x Line, Point x Ray, Point x Segment,
            Point x Polyline, Point x Triangle, Point x Polygon,
            Line x Point, Ray x Point, Segment x Point,
            Polyline x Point, Triangle x Point, Polygon x Point,
            Line x Line, Line x Ray, Line x Segment,
            Ray x Line, Ray x Ray, Ray x Segment,
            Segment x Line, Segment x Ray, Segment x Segment,
            Line x Triangle, Line x Polygon,
            Ray x Triangle, Ray x Polygon,
            Segment x Triangle, Segment x Polygon,
            Triangle x Line, Triangle x Ray, Triangle x Segment,
            Polygon x Line, Polygon x Ray, Polygon x Segment,
            Polyline x Line, Polyline x Ray, Polyline x Segment, Polyline x Polyline,
            Line x Polyline, Ray x Polyline, Segment x Polyline,
            Polyline x Triangle, Polyline x Polygon,
            Triangle x Polyline, Polygon x Polyline,
            Triangle x Triangle, Triangle x Polygon,
            Polygon x Triangle, Polygon x Polygon,
        ])
    }

    /// Returns `true` if [`Geometry::intersection`] is not empty.
    ///
    /// # Errors
    ///
    /// See [`Geometry::intersection`].
    pub fn intersects(&self, other: &Geometry<D>, p: Precision) -> Result<bool> {
        self.intersection(other, p).map(|shape| shape.is_something())
    }

    /// Common part of positive length or area.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedRelation`] unless both operands are
    /// linear primitives, polylines, or areas.
    pub fn overlap(&self, other: &Geometry<D>, p: Precision) -> Result<Shape<D>> {
        relate!("overlap", self, other, |a, b| a.overlap(b, p), [
            Line x Line, Line x Ray, Line x Segment,
            Ray x Line, Ray x Ray, Ray x Segment,
            Segment x Line, Segment x Ray, Segment x Segment,
            Line x Triangle, Line x Polygon,
            Ray x Triangle, Ray x Polygon,
            Segment x Triangle, Segment x Polygon,
            Triangle x Line, Triangle x Ray, Triangle x Segment,
            Polygon x Line, Polygon x Ray, Polygon x Segment,
            Polyline x Line, Polyline x Ray, Polyline x Segment, Polyline x Polyline,
            Line x Polyline, Ray x Polyline, Segment x Polyline,
            Polyline x Triangle, Polyline x Polygon,
            Triangle x Polyline, Polygon x Polyline,
            Triangle x Triangle, Triangle x Polygon,
            Polygon x Triangle, Polygon x Polygon,
        ])
    }

    /// Returns `true` if [`Geometry::overlap`] is not empty.
    ///
    /// # Errors
    ///
    /// See [`Geometry::overlap`].
    pub fn overlaps(&self, other: &Geometry<D>, p: Precision) -> Result<bool> {
        self.overlap(other, p).map(|shape| shape.is_something())
    }

    /// The single edge two non-overlapping areas share.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedRelation`] unless both operands are
    /// triangles or polygons.
    pub fn adjacent_side(
        &self,
        other: &Geometry<D>,
        p: Precision,
    ) -> Result<Option<LineSegment<D>>> {
        relate!("adjacent_side", self, other, |a, b| a.adjacent_side(b, p), [
            Triangle x Triangle, Triangle x Polygon,
            Polygon x Triangle, Polygon x Polygon,
        ])
    }

    /// # Errors
    ///
    /// See [`Geometry::adjacent_side`].
    pub fn is_adjacent(&self, other: &Geometry<D>, p: Precision) -> Result<bool> {
        self.adjacent_side(other, p).map(|side| side.is_some())
    }

    /// Returns `true` if two areas meet without overlapping.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnsupportedRelation`] unless both operands are
    /// triangles or polygons.
    pub fn touches(&self, other: &Geometry<D>, p: Precision) -> Result<bool> {
        relate!("touches", self, other, |a, b| a.touches(b, p), [
            Triangle x Triangle, Triangle x Polygon,
            Polygon x Triangle, Polygon x Polygon,
        ])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Line, Polygon, Polyline, Triangle};
    use crate::math::{AlmostEq, Point2};

    const P: Precision = Precision::DEFAULT;

    fn q(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square(x: f64, y: f64) -> Geometry<2> {
        Polygon::new(vec![q(x, y), q(x + 1.0, y), q(x + 1.0, y + 1.0), q(x, y + 1.0)], P)
            .unwrap()
            .into()
    }

    #[test]
    fn runtime_relations_match_typed_ones() {
        let a = square(0.0, 0.0);
        let b = square(1.0, 0.0);
        assert!(!a.overlaps(&b, P).unwrap());
        assert!(a.touches(&b, P).unwrap());
        assert!(a.is_adjacent(&b, P).unwrap());
        let side = LineSegment::new(q(1.0, 0.0), q(1.0, 1.0), P).unwrap();
        assert!(a.adjacent_side(&b, P).unwrap().unwrap().almost_eq(&side, P));
    }

    #[test]
    fn point_queries() {
        let t: Geometry<2> = Triangle::new(q(0.0, 0.0), q(2.0, 0.0), q(0.0, 2.0), P)
            .unwrap()
            .into();
        let inside = Geometry::Point(q(0.5, 0.5));
        assert!(t.contains(&inside, P).unwrap());
        assert!(inside.intersects(&t, P).unwrap());
        let shape = t.intersection(&inside, P).unwrap();
        assert!(shape.almost_eq(&Shape::Point(q(0.5, 0.5)), P));
    }

    #[test]
    fn polyline_meets_line() {
        let chain: Geometry<2> = Polyline::new(vec![q(0.0, 0.0), q(2.0, 2.0)], P).unwrap().into();
        let line: Geometry<2> = Line::from_points(q(0.0, 2.0), q(2.0, 0.0), P).unwrap().into();
        let shape = line.intersection(&chain, P).unwrap();
        assert!(shape.almost_eq(&Shape::Point(q(1.0, 1.0)), P));
    }

    #[test]
    fn polyline_against_areas() {
        let chain: Geometry<2> = Polyline::new(vec![q(-1.0, 0.5), q(0.5, 0.5), q(0.5, 3.0)], P)
            .unwrap()
            .into();
        let t: Geometry<2> = Triangle::new(q(0.0, 0.0), q(2.0, 0.0), q(0.0, 2.0), P)
            .unwrap()
            .into();
        assert!(chain.overlaps(&t, P).unwrap());
        assert!(!chain.intersects(&t, P).unwrap());
        assert!(!t.contains(&chain, P).unwrap());
        let inner: Geometry<2> = Polyline::new(vec![q(0.2, 0.2), q(1.0, 0.2), q(0.2, 1.0)], P)
            .unwrap()
            .into();
        assert!(t.contains(&inner, P).unwrap());
        assert!(square(0.0, 0.0).contains(&inner, P).unwrap());
        assert!(inner.overlaps(&chain, P).is_ok_and(|o| !o));
    }

    #[test]
    fn unsupported_pairs_are_errors() {
        let a = square(0.0, 0.0);
        let bag = Geometry::Collection(vec![a.clone()]);
        let err = a.intersects(&bag, P).unwrap_err();
        assert!(matches!(
            err,
            GeokernError::Geometry(GeometryError::UnsupportedRelation {
                relation: "intersection",
                lhs: "polygon",
                rhs: "collection",
            })
        ));
        let line: Geometry<2> = Line::from_points(q(0.0, 0.0), q(1.0, 0.0), P).unwrap().into();
        assert!(a.contains(&line, P).is_ok_and(|c| !c));
        assert!(Geometry::Point(q(0.0, 0.0)).contains(&line, P).is_err());
        assert!(a.touches(&line, P).is_err());
    }
}
