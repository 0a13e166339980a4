use nalgebra::Unit;
use tracing::warn;

use crate::geometry::{Area, Domain, Line, LineSegment, Linear, Polygon, Ray, Shape, Triangle};
use crate::math::intersect_2d::{clip_linear_polygon, clip_polygon_convex, LinearClip};
use crate::math::intersect_3d::{plane_plane_intersect, PlanePair};
use crate::math::polygon_2d::{clean_ring, is_convex, signed_area};
use crate::math::vector::{point_from_3d, point_to_3d, vector_from_3d, vector_to_3d};
use crate::math::{
    almost_equal, almost_zero, AlmostEq, Frame, Point, Point2, Precision, UnitVector3,
};
use crate::operations::triangulate::triangulate_ring;

use super::linear::{linear_piece, point_contact};
use super::{mirror_relations, Adjacent, Contains, Intersect, Overlap};

pub(crate) fn area_contains_point<const D: usize, A>(a: &A, q: &Point<D>, p: Precision) -> bool
where
    A: Area<D> + ?Sized,
{
    let frame = a.frame();
    frame.is_coplanar(q, p) && a.contains_local(&frame.to_local(q), p)
}

/// Parameters of `l` inside the area.
///
/// A primitive lying in the area's plane is clipped in local coordinates;
/// one crossing the plane can only meet the area in a single contact.
pub(crate) fn clip_linear<const D: usize, L, A>(l: &L, a: &A, p: Precision) -> LinearClip
where
    L: Linear<D> + ?Sized,
    A: Area<D> + ?Sized,
{
    let frame = a.frame();
    let dir = l.direction().into_inner();
    let domain = l.domain();
    let across = frame.out_of_plane(&dir);
    if almost_zero(across.norm(), p) {
        if !frame.is_coplanar(l.origin(), p) {
            return LinearClip::default();
        }
        return clip_linear_polygon(
            &frame.to_local(l.origin()),
            &frame.local_vector(&dir),
            (domain.start, domain.end),
            &a.local_ring(),
            p,
        );
    }

    let offset = frame.out_of_plane(&(l.origin() - frame.origin()));
    let t = -offset.dot(&across) / across.norm_squared();
    let mut clip = LinearClip::default();
    if domain.contains(t, p) && area_contains_point(a, &l.point_at(t), p) {
        clip.contacts.push(t);
    }
    clip
}

/// Point contacts of a linear primitive with an area; `Nothing` if any part of it runs inside.
pub(crate) fn linear_area_intersection<const D: usize, L, A>(l: &L, a: &A, p: Precision) -> Shape<D>
where
    L: Linear<D> + ?Sized,
    A: Area<D> + ?Sized,
{
    let clip = clip_linear(l, a, p);
    if !clip.intervals.is_empty() {
        return Shape::Nothing;
    }
    Shape::from_points(clip.contacts.iter().map(|t| l.point_at(*t)).collect(), p)
}

pub(crate) fn linear_area_overlap<const D: usize, L, A>(l: &L, a: &A, p: Precision) -> Shape<D>
where
    L: Linear<D> + ?Sized,
    A: Area<D> + ?Sized,
{
    let clip = clip_linear(l, a, p);
    Shape::from_parts(
        clip.intervals
            .iter()
            .map(|&(s, e)| linear_piece(l, Domain::new(s, e)))
            .collect(),
    )
}

/// Only bounded primitives fit in an area.
pub(crate) fn area_contains_linear<const D: usize, A, L>(a: &A, l: &L, p: Precision) -> bool
where
    A: Area<D> + ?Sized,
    L: Linear<D> + ?Sized,
{
    let domain = l.domain();
    domain.is_bounded()
        && clip_linear(l, a, p)
            .intervals
            .iter()
            .any(|&(s, e)| Domain::new(s, e).covers(&domain, p))
}

/// `a` is simply connected, so a boundary inside `a` encloses only points of `a`.
pub(crate) fn area_contains_area<const D: usize, A, B>(a: &A, b: &B, p: Precision) -> bool
where
    A: Area<D> + ?Sized,
    B: Area<D> + ?Sized,
{
    b.vertices().iter().all(|q| area_contains_point(a, q, p))
        && b.edges().iter().all(|e| area_contains_linear(a, e, p))
}

fn coplanar<const D: usize, A, B>(a: &A, b: &B, p: Precision) -> bool
where
    A: Area<D> + ?Sized,
    B: Area<D> + ?Sized,
{
    b.vertices().iter().all(|q| a.frame().is_coplanar(q, p))
}

/// Common region of two coplanar areas.
///
/// Two convex operands clip each other directly. A non-convex operand is first
/// split into triangles, and the overlap is returned as the collection of
/// convex pieces.
pub(crate) fn area_overlap<const D: usize, A, B>(a: &A, b: &B, p: Precision) -> Shape<D>
where
    A: Area<D> + ?Sized,
    B: Area<D> + ?Sized,
{
    if !coplanar(a, b, p) {
        return Shape::Nothing;
    }
    let frame = *a.frame();
    let ring_a = a.local_ring();
    let ring_b: Vec<Point2> = b.vertices().iter().map(|q| frame.to_local(q)).collect();
    let (Some(pieces_a), Some(pieces_b)) = (convex_pieces(&ring_a, p), convex_pieces(&ring_b, p))
    else {
        return Shape::Nothing;
    };

    let mut parts = Vec::new();
    for clip in &pieces_a {
        for subject in &pieces_b {
            parts.push(lift_piece(&frame, &clip_polygon_convex(subject, clip, p), p));
        }
    }
    Shape::from_parts(parts)
}

/// The ring itself when convex, otherwise its triangles.
fn convex_pieces(ring: &[Point2], p: Precision) -> Option<Vec<Vec<Point2>>> {
    if is_convex(ring, p) {
        return Some(vec![ring.to_vec()]);
    }
    match triangulate_ring(ring, p) {
        Ok(triangles) => Some(
            triangles
                .iter()
                .map(|&[i, j, k]| vec![ring[i], ring[j], ring[k]])
                .collect(),
        ),
        Err(err) => {
            warn!(%err, "cannot split overlap operand into triangles");
            None
        }
    }
}

/// Lifts a clipped local ring back to world space, dropping slivers.
fn lift_piece<const D: usize>(frame: &Frame<D>, piece: &[Point2], p: Precision) -> Shape<D> {
    let ring = clean_ring(piece, p);
    if ring.len() < 3 || almost_zero(signed_area(&ring), p) {
        return Shape::Nothing;
    }
    let world: Vec<Point<D>> = ring.iter().map(|uv| frame.to_world(uv)).collect();
    if let [a, b, c] = world[..] {
        Triangle::new(a, b, c, p).map_or(Shape::Nothing, Shape::Triangle)
    } else {
        Polygon::new(world, p).map_or(Shape::Nothing, Shape::Polygon)
    }
}

/// Boundary contact of two areas that do not overlap.
pub(crate) fn area_intersection<const D: usize, A, B>(a: &A, b: &B, p: Precision) -> Shape<D>
where
    A: Area<D> + ?Sized,
    B: Area<D> + ?Sized,
{
    if coplanar(a, b, p) {
        if area_overlap(a, b, p).is_something() {
            return Shape::Nothing;
        }
        return boundary_contact(a, b, p);
    }
    crossing_contact(a, b, p)
}

/// Contacts of `b`'s edges with the coplanar area `a`.
fn boundary_contact<const D: usize, A, B>(a: &A, b: &B, p: Precision) -> Shape<D>
where
    A: Area<D> + ?Sized,
    B: Area<D> + ?Sized,
{
    let mut segments = Vec::new();
    let mut points = Vec::new();
    for edge in b.edges() {
        let clip = clip_linear(&edge, a, p);
        segments.extend(
            clip.intervals
                .iter()
                .map(|&(s, e)| LineSegment::new_unchecked(edge.point_at(s), edge.point_at(e))),
        );
        points.extend(clip.contacts.iter().map(|t| edge.point_at(*t)));
    }
    merge_contacts(segments, points, p)
}

/// Unit normal of a frame's plane, in 3D.
pub(crate) fn frame_normal<const D: usize>(frame: &Frame<D>) -> UnitVector3 {
    Unit::new_normalize(vector_to_3d(frame.axis_u()).cross(&vector_to_3d(frame.axis_v())))
}

/// Contact of two areas in different planes, along the line where the planes meet.
fn crossing_contact<const D: usize, A, B>(a: &A, b: &B, p: Precision) -> Shape<D>
where
    A: Area<D> + ?Sized,
    B: Area<D> + ?Sized,
{
    let (fa, fb) = (a.frame(), b.frame());
    let relation = plane_plane_intersect(
        &point_to_3d(fa.origin()),
        &frame_normal(fa),
        &point_to_3d(fb.origin()),
        &frame_normal(fb),
        p,
    );
    let PlanePair::Crossing { origin, direction } = relation else {
        return Shape::Nothing;
    };
    let line = Line::from_unit(
        point_from_3d::<D>(&origin),
        Unit::new_normalize(vector_from_3d::<D>(&direction.into_inner())),
    );
    let (clip_a, clip_b) = (clip_linear(&line, a, p), clip_linear(&line, b, p));

    let mut segments = Vec::new();
    let mut points = Vec::new();
    for &(s1, e1) in &clip_a.intervals {
        for &(s2, e2) in &clip_b.intervals {
            let common = Domain::new(s1, e1).intersect(&Domain::new(s2, e2));
            if common.has_length(p) {
                segments.push(LineSegment::new_unchecked(
                    line.point_at(common.start),
                    line.point_at(common.end),
                ));
            } else if almost_equal(common.start, common.end, p) {
                points.push(line.point_at(common.start));
            }
        }
    }
    let touching = |t: f64, other: &LinearClip| {
        other.intervals.iter().any(|&(s, e)| Domain::new(s, e).contains(t, p))
            || other.contacts.iter().any(|c| almost_equal(*c, t, p))
    };
    points.extend(
        clip_a
            .contacts
            .iter()
            .filter(|t| touching(**t, &clip_b))
            .chain(clip_b.contacts.iter().filter(|t| touching(**t, &clip_a)))
            .map(|t| line.point_at(*t)),
    );
    merge_contacts(segments, points, p)
}

/// Deduplicates segments and drops points already covered by a segment.
pub(crate) fn merge_contacts<const D: usize>(
    segments: Vec<LineSegment<D>>,
    points: Vec<Point<D>>,
    p: Precision,
) -> Shape<D> {
    let mut unique: Vec<LineSegment<D>> = Vec::with_capacity(segments.len());
    for s in segments {
        if !unique.iter().any(|u| u.almost_eq(&s, p)) {
            unique.push(s);
        }
    }
    let loose: Vec<Point<D>> = points
        .into_iter()
        .filter(|q| !unique.iter().any(|s| s.contains_point(q, p)))
        .collect();
    let mut parts: Vec<Shape<D>> = unique.into_iter().map(Shape::Segment).collect();
    parts.push(Shape::from_points(loose, p));
    Shape::from_parts(parts)
}

/// The one full edge two non-overlapping areas share.
pub(crate) fn adjacent_side<const D: usize, A, B>(
    a: &A,
    b: &B,
    p: Precision,
) -> Option<LineSegment<D>>
where
    A: Area<D> + ?Sized,
    B: Area<D> + ?Sized,
{
    if area_overlap(a, b, p).is_something() {
        return None;
    }
    let theirs = b.edges();
    let shared: Vec<LineSegment<D>> = a
        .edges()
        .into_iter()
        .filter(|e| theirs.iter().any(|f| e.almost_eq(f, p)))
        .collect();
    match shared[..] {
        [edge] => Some(edge),
        _ => None,
    }
}

macro_rules! area_pairs {
    ($($a:ident x $b:ident),* $(,)?) => {
        $(
            impl<const D: usize> Intersect<$b<D>, D> for $a<D> {
                fn intersection(&self, other: &$b<D>, p: Precision) -> Shape<D> {
                    area_intersection(self, other, p)
                }
            }

            impl<const D: usize> Overlap<$b<D>, D> for $a<D> {
                fn overlap(&self, other: &$b<D>, p: Precision) -> Shape<D> {
                    area_overlap(self, other, p)
                }
            }

            impl<const D: usize> Contains<$b<D>> for $a<D> {
                fn contains(&self, other: &$b<D>, p: Precision) -> bool {
                    area_contains_area(self, other, p)
                }
            }

            impl<const D: usize> Adjacent<$b<D>, D> for $a<D> {
                fn adjacent_side(&self, other: &$b<D>, p: Precision) -> Option<LineSegment<D>> {
                    adjacent_side(self, other, p)
                }
            }
        )*
    };
}

area_pairs!(
    Triangle x Triangle,
    Triangle x Polygon,
    Polygon x Triangle,
    Polygon x Polygon,
);

macro_rules! linear_area_pairs {
    ($($l:ident x $a:ident),* $(,)?) => {
        $(
            impl<const D: usize> Intersect<$a<D>, D> for $l<D> {
                fn intersection(&self, other: &$a<D>, p: Precision) -> Shape<D> {
                    linear_area_intersection(self, other, p)
                }
            }

            impl<const D: usize> Overlap<$a<D>, D> for $l<D> {
                fn overlap(&self, other: &$a<D>, p: Precision) -> Shape<D> {
                    linear_area_overlap(self, other, p)
                }
            }

            impl<const D: usize> Contains<$l<D>> for $a<D> {
                fn contains(&self, other: &$l<D>, p: Precision) -> bool {
                    area_contains_linear(self, other, p)
                }
            }
        )*
        mirror_relations!($($l x $a),*);
    };
}

linear_area_pairs!(
    Line x Triangle,
    Line x Polygon,
    Ray x Triangle,
    Ray x Polygon,
    LineSegment x Triangle,
    LineSegment x Polygon,
);

macro_rules! area_point_relations {
    ($($a:ident),* $(,)?) => {
        $(
            impl<const D: usize> Contains<Point<D>> for $a<D> {
                fn contains(&self, other: &Point<D>, p: Precision) -> bool {
                    area_contains_point(self, other, p)
                }
            }

            impl<const D: usize> Intersect<Point<D>, D> for $a<D> {
                fn intersection(&self, other: &Point<D>, p: Precision) -> Shape<D> {
                    point_contact(self, other, p)
                }
            }
        )*
    };
}

area_point_relations!(Triangle, Polygon);
