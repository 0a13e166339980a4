use crate::geometry::{Domain, Line, LineSegment, Linear, Ray, Shape};
use crate::math::{almost_zero, AlmostEq, Point, Precision, VectorExt};

use super::{Contains, Intersect, Overlap};

/// Transversal crossing of two linear primitives, if it lies within both domains.
///
/// Solves for the closest approach of the two supporting lines; parallel
/// primitives never cross.
pub(crate) fn crossing<const D: usize, A, B>(a: &A, b: &B, p: Precision) -> Option<Point<D>>
where
    A: Linear<D> + ?Sized,
    B: Linear<D> + ?Sized,
{
    let da = a.direction().into_inner();
    let db = b.direction().into_inner();
    if da.is_parallel(&db, p) {
        return None;
    }
    let w = a.origin() - b.origin();
    let c = da.dot(&db);
    let denom = 1.0 - c * c;
    let (wa, wb) = (da.dot(&w), db.dot(&w));
    let t = (c * wb - wa) / denom;
    let u = (wb - c * wa) / denom;
    let (pa, pb) = (a.point_at(t), b.point_at(u));
    let meets = almost_zero(nalgebra::distance(&pa, &pb), p);
    (meets && a.domain().contains(t, p) && b.domain().contains(u, p)).then_some(pa)
}

/// Returns `true` if both primitives lie on the same infinite line.
pub(crate) fn collinear<const D: usize, A, B>(a: &A, b: &B, p: Precision) -> bool
where
    A: Linear<D> + ?Sized,
    B: Linear<D> + ?Sized,
{
    a.direction()
        .into_inner()
        .is_parallel(&b.direction().into_inner(), p)
        && a.support().contains_point(b.origin(), p)
}

/// `b`'s domain expressed in `a`'s parameter. Only meaningful for collinear primitives.
fn mapped_domain<const D: usize, A, B>(a: &A, b: &B) -> Domain
where
    A: Linear<D> + ?Sized,
    B: Linear<D> + ?Sized,
{
    let shift = a.project(b.origin());
    let sense = if a.direction().dot(&b.direction().into_inner()) < 0.0 {
        -1.0
    } else {
        1.0
    };
    let bd = b.domain();
    let (s, e) = (shift + sense * bd.start, shift + sense * bd.end);
    Domain::new(s.min(e), s.max(e))
}

/// Common part of two collinear primitives, in `a`'s parameter, if it has positive length.
pub(crate) fn shared_interval<const D: usize, A, B>(a: &A, b: &B, p: Precision) -> Option<Domain>
where
    A: Linear<D> + ?Sized,
    B: Linear<D> + ?Sized,
{
    if !collinear(a, b, p) {
        return None;
    }
    let common = a.domain().intersect(&mapped_domain(a, b));
    common.has_length(p).then_some(common)
}

/// The part of `a` covering `interval` as the matching linear shape.
pub(crate) fn linear_piece<const D: usize, A>(a: &A, interval: Domain) -> Shape<D>
where
    A: Linear<D> + ?Sized,
{
    match (interval.start.is_finite(), interval.end.is_finite()) {
        (false, false) => Shape::Line(a.support()),
        (true, false) => Shape::Ray(Ray::from_unit(a.point_at(interval.start), *a.direction())),
        (false, true) => Shape::Ray(Ray::from_unit(a.point_at(interval.end), -*a.direction())),
        (true, true) => Shape::Segment(LineSegment::new_unchecked(
            a.point_at(interval.start),
            a.point_at(interval.end),
        )),
    }
}

/// Collinear overlap of positive length.
pub(crate) fn linear_overlap<const D: usize, A, B>(a: &A, b: &B, p: Precision) -> Shape<D>
where
    A: Linear<D> + ?Sized,
    B: Linear<D> + ?Sized,
{
    shared_interval(a, b, p).map_or(Shape::Nothing, |interval| linear_piece(a, interval))
}

/// Returns `true` if `b` lies entirely on `a`.
pub(crate) fn linear_contains_linear<const D: usize, A, B>(a: &A, b: &B, p: Precision) -> bool
where
    A: Linear<D> + ?Sized,
    B: Linear<D> + ?Sized,
{
    collinear(a, b, p) && a.domain().covers(&mapped_domain(a, b), p)
}

macro_rules! linear_pairs {
    ($($a:ident x $b:ident),* $(,)?) => {
        $(
            impl<const D: usize> Intersect<$b<D>, D> for $a<D> {
                fn intersection(&self, other: &$b<D>, p: Precision) -> Shape<D> {
                    crossing(self, other, p).map_or(Shape::Nothing, Shape::Point)
                }
            }

            impl<const D: usize> Overlap<$b<D>, D> for $a<D> {
                fn overlap(&self, other: &$b<D>, p: Precision) -> Shape<D> {
                    linear_overlap(self, other, p)
                }
            }

            impl<const D: usize> Contains<$b<D>> for $a<D> {
                fn contains(&self, other: &$b<D>, p: Precision) -> bool {
                    linear_contains_linear(self, other, p)
                }
            }
        )*
    };
}

linear_pairs!(
    Line x Line,
    Line x Ray,
    Line x LineSegment,
    Ray x Line,
    Ray x Ray,
    Ray x LineSegment,
    LineSegment x Line,
    LineSegment x Ray,
    LineSegment x LineSegment,
);

macro_rules! point_relations {
    ($($t:ident),* $(,)?) => {
        $(
            impl<const D: usize> Contains<Point<D>> for $t<D> {
                fn contains(&self, other: &Point<D>, p: Precision) -> bool {
                    self.contains_point(other, p)
                }
            }

            impl<const D: usize> Intersect<Point<D>, D> for $t<D> {
                fn intersection(&self, other: &Point<D>, p: Precision) -> Shape<D> {
                    point_contact(self, other, p)
                }
            }
        )*
    };
}

point_relations!(Line, Ray, LineSegment);

/// `q` as a shape if `container` holds it.
pub(crate) fn point_contact<const D: usize, T>(
    container: &T,
    q: &Point<D>,
    p: Precision,
) -> Shape<D>
where
    T: Contains<Point<D>> + ?Sized,
{
    if container.contains(q, p) {
        Shape::Point(*q)
    } else {
        Shape::Nothing
    }
}

impl<const D: usize> Contains<Point<D>> for Point<D> {
    fn contains(&self, other: &Point<D>, p: Precision) -> bool {
        self.almost_eq(other, p)
    }
}

/// A point meets anything that contains it.
impl<const D: usize, T: Contains<Point<D>>> Intersect<T, D> for Point<D> {
    fn intersection(&self, other: &T, p: Precision) -> Shape<D> {
        point_contact(other, self, p)
    }
}
