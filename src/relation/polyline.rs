use crate::geometry::{Area, Line, LineSegment, Linear, Polygon, Polyline, Ray, Shape, Triangle};
use crate::math::{AlmostEq, Point, Precision};

use super::area::{area_contains_linear, clip_linear, linear_area_overlap};
use super::linear::{crossing, linear_overlap, point_contact};
use super::{mirror_relations, Contains, Intersect, Overlap};

/// Adds the parts of `shape` not yet in `parts`.
fn push_unique<const D: usize>(parts: &mut Vec<Shape<D>>, shape: &Shape<D>, p: Precision) {
    for piece in shape.parts() {
        if !parts.iter().any(|known| known.almost_eq(piece, p)) {
            parts.push(piece.clone());
        }
    }
}

/// Crossing points of any segment of `a` with `l`, merged at precision `p`.
///
/// Segments collinear with `l` contribute nothing here; they overlap.
fn polyline_linear_intersection<const D: usize, L>(a: &Polyline<D>, l: &L, p: Precision) -> Shape<D>
where
    L: Linear<D> + ?Sized,
{
    let points = a
        .segments()
        .iter()
        .filter_map(|s| crossing(s, l, p))
        .collect();
    Shape::from_points(points, p)
}

fn polyline_linear_overlap<const D: usize, L>(a: &Polyline<D>, l: &L, p: Precision) -> Shape<D>
where
    L: Linear<D> + ?Sized,
{
    let mut parts = Vec::new();
    for s in a.segments() {
        push_unique(&mut parts, &linear_overlap(&s, l, p), p);
    }
    Shape::from_parts(parts)
}

/// Point contacts of the chain with an area; `Nothing` if any piece runs inside.
fn polyline_area_intersection<const D: usize, A>(
    a: &Polyline<D>,
    area: &A,
    p: Precision,
) -> Shape<D>
where
    A: Area<D> + ?Sized,
{
    let mut points = Vec::new();
    for s in a.segments() {
        let clip = clip_linear(&s, area, p);
        if !clip.intervals.is_empty() {
            return Shape::Nothing;
        }
        points.extend(clip.contacts.iter().map(|t| s.point_at(*t)));
    }
    Shape::from_points(points, p)
}

fn polyline_area_overlap<const D: usize, A>(a: &Polyline<D>, area: &A, p: Precision) -> Shape<D>
where
    A: Area<D> + ?Sized,
{
    let mut parts = Vec::new();
    for s in a.segments() {
        push_unique(&mut parts, &linear_area_overlap(&s, area, p), p);
    }
    Shape::from_parts(parts)
}

impl<const D: usize> Contains<Point<D>> for Polyline<D> {
    fn contains(&self, other: &Point<D>, p: Precision) -> bool {
        self.contains_point(other, p)
    }
}

impl<const D: usize> Intersect<Point<D>, D> for Polyline<D> {
    fn intersection(&self, other: &Point<D>, p: Precision) -> Shape<D> {
        point_contact(self, other, p)
    }
}

impl<const D: usize> Intersect<Polyline<D>, D> for Polyline<D> {
    /// Crossing points between any two segments.
    fn intersection(&self, other: &Polyline<D>, p: Precision) -> Shape<D> {
        let theirs = other.segments();
        let points = self
            .segments()
            .iter()
            .flat_map(|s| theirs.iter().filter_map(move |t| crossing(s, t, p)))
            .collect();
        Shape::from_points(points, p)
    }
}

impl<const D: usize> Overlap<Polyline<D>, D> for Polyline<D> {
    /// Pieces of positive length the two chains run along together.
    fn overlap(&self, other: &Polyline<D>, p: Precision) -> Shape<D> {
        let mut parts = Vec::new();
        for s in other.segments() {
            push_unique(&mut parts, &polyline_linear_overlap(self, &s, p), p);
        }
        Shape::from_parts(parts)
    }
}

macro_rules! polyline_linear {
    ($($t:ident),* $(,)?) => {
        $(
            impl<const D: usize> Intersect<$t<D>, D> for Polyline<D> {
                fn intersection(&self, other: &$t<D>, p: Precision) -> Shape<D> {
                    polyline_linear_intersection(self, other, p)
                }
            }

            impl<const D: usize> Overlap<$t<D>, D> for Polyline<D> {
                fn overlap(&self, other: &$t<D>, p: Precision) -> Shape<D> {
                    polyline_linear_overlap(self, other, p)
                }
            }

            impl<const D: usize> Contains<$t<D>> for Polyline<D> {
                /// Only a segment lying on a single piece of the chain is contained.
                fn contains(&self, other: &$t<D>, p: Precision) -> bool {
                    self.segments().iter().any(|s| s.contains(other, p))
                }
            }
        )*
        mirror_relations!($(Polyline x $t),*);
    };
}

polyline_linear!(Line, Ray, LineSegment);

macro_rules! polyline_area {
    ($($a:ident),* $(,)?) => {
        $(
            impl<const D: usize> Intersect<$a<D>, D> for Polyline<D> {
                fn intersection(&self, other: &$a<D>, p: Precision) -> Shape<D> {
                    polyline_area_intersection(self, other, p)
                }
            }

            impl<const D: usize> Overlap<$a<D>, D> for Polyline<D> {
                fn overlap(&self, other: &$a<D>, p: Precision) -> Shape<D> {
                    polyline_area_overlap(self, other, p)
                }
            }

            impl<const D: usize> Contains<Polyline<D>> for $a<D> {
                fn contains(&self, other: &Polyline<D>, p: Precision) -> bool {
                    other.segments().iter().all(|s| area_contains_linear(self, s, p))
                }
            }
        )*
        mirror_relations!($(Polyline x $a),*);
    };
}

polyline_area!(Triangle, Polygon);
