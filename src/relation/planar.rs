use crate::geometry::{
    Area, Line, LineSegment, Linear, Plane, Polygon, Polyline, Ray, Shape, Triangle,
};
use crate::math::intersect_3d::{line_plane_intersect, plane_plane_intersect, LinePlane, PlanePair};
use crate::math::{Point3, Precision};

use super::area::{clip_linear, frame_normal, merge_contacts};
use super::linear::point_contact;
use super::{Contains, Intersect, Overlap};

fn relation_to<L: Linear<3> + ?Sized>(plane: &Plane, l: &L, p: Precision) -> LinePlane {
    line_plane_intersect(
        l.origin(),
        &l.direction().into_inner(),
        plane.origin(),
        plane.normal(),
        p,
    )
}

/// Transversal crossing point within the primitive's domain.
fn plane_linear_intersection<L>(plane: &Plane, l: &L, p: Precision) -> Shape<3>
where
    L: Linear<3> + ?Sized,
{
    match relation_to(plane, l, p) {
        LinePlane::Crossing { point, t } if l.domain().contains(t, p) => Shape::Point(point),
        _ => Shape::Nothing,
    }
}

fn area_on_plane<A: Area<3> + ?Sized>(plane: &Plane, a: &A, p: Precision) -> bool {
    a.vertices().iter().all(|q| plane.contains_point(q, p))
}

fn plane_area_overlap<A>(plane: &Plane, a: &A, p: Precision) -> Shape<3>
where
    A: Area<3> + Clone + Into<Shape<3>>,
{
    if area_on_plane(plane, a, p) {
        a.clone().into()
    } else {
        Shape::Nothing
    }
}

/// Where the plane cuts an area lying in another plane.
fn plane_area_intersection<A: Area<3> + ?Sized>(plane: &Plane, a: &A, p: Precision) -> Shape<3> {
    let frame = a.frame();
    let relation = plane_plane_intersect(
        plane.origin(),
        plane.normal(),
        frame.origin(),
        &frame_normal(frame),
        p,
    );
    let PlanePair::Crossing { origin, direction } = relation else {
        return Shape::Nothing;
    };
    let line = Line::from_unit(origin, direction);
    let clip = clip_linear(&line, a, p);
    merge_contacts(
        clip.intervals
            .iter()
            .map(|&(s, e)| LineSegment::new_unchecked(line.point_at(s), line.point_at(e)))
            .collect(),
        clip.contacts.iter().map(|t| line.point_at(*t)).collect(),
        p,
    )
}

impl Contains<Point3> for Plane {
    fn contains(&self, other: &Point3, p: Precision) -> bool {
        self.contains_point(other, p)
    }
}

impl Intersect<Point3, 3> for Plane {
    fn intersection(&self, other: &Point3, p: Precision) -> Shape<3> {
        point_contact(self, other, p)
    }
}

impl Contains<Plane> for Plane {
    fn contains(&self, other: &Plane, p: Precision) -> bool {
        self.is_coplanar(other, p)
    }
}

impl Intersect<Plane, 3> for Plane {
    /// The line where the planes cross; parallel and coincident planes never intersect.
    fn intersection(&self, other: &Plane, p: Precision) -> Shape<3> {
        let pair =
            plane_plane_intersect(self.origin(), self.normal(), other.origin(), other.normal(), p);
        match pair {
            PlanePair::Crossing { origin, direction } => {
                Shape::Line(Line::from_unit(origin, direction))
            }
            PlanePair::Parallel { .. } | PlanePair::Coincident => Shape::Nothing,
        }
    }
}

macro_rules! plane_mirror {
    ($($t:ident),*) => {
        $(
            impl Intersect<Plane, 3> for $t<3> {
                fn intersection(&self, other: &Plane, p: Precision) -> Shape<3> {
                    Intersect::<$t<3>, 3>::intersection(other, self, p)
                }
            }

            impl Overlap<Plane, 3> for $t<3> {
                fn overlap(&self, other: &Plane, p: Precision) -> Shape<3> {
                    Overlap::<$t<3>, 3>::overlap(other, self, p)
                }
            }
        )*
    };
}

macro_rules! plane_linear {
    ($($t:ident),* $(,)?) => {
        $(
            impl Contains<$t<3>> for Plane {
                fn contains(&self, other: &$t<3>, p: Precision) -> bool {
                    matches!(relation_to(self, other, p), LinePlane::Contained)
                }
            }

            impl Intersect<$t<3>, 3> for Plane {
                fn intersection(&self, other: &$t<3>, p: Precision) -> Shape<3> {
                    plane_linear_intersection(self, other, p)
                }
            }

            impl Overlap<$t<3>, 3> for Plane {
                fn overlap(&self, other: &$t<3>, p: Precision) -> Shape<3> {
                    if self.contains(other, p) {
                        Shape::from(*other)
                    } else {
                        Shape::Nothing
                    }
                }
            }
        )*
        plane_mirror!($($t),*);
    };
}

macro_rules! plane_area {
    ($($t:ident),* $(,)?) => {
        $(
            impl Contains<$t<3>> for Plane {
                fn contains(&self, other: &$t<3>, p: Precision) -> bool {
                    area_on_plane(self, other, p)
                }
            }

            impl Intersect<$t<3>, 3> for Plane {
                fn intersection(&self, other: &$t<3>, p: Precision) -> Shape<3> {
                    if area_on_plane(self, other, p) {
                        return Shape::Nothing;
                    }
                    plane_area_intersection(self, other, p)
                }
            }

            impl Overlap<$t<3>, 3> for Plane {
                fn overlap(&self, other: &$t<3>, p: Precision) -> Shape<3> {
                    plane_area_overlap(self, other, p)
                }
            }
        )*
        plane_mirror!($($t),*);
    };
}

plane_linear!(Line, Ray, LineSegment);
plane_area!(Triangle, Polygon);

impl Contains<Polyline<3>> for Plane {
    fn contains(&self, other: &Polyline<3>, p: Precision) -> bool {
        other.vertices().iter().all(|q| self.contains_point(q, p))
    }
}

impl Intersect<Polyline<3>, 3> for Plane {
    /// Crossing points of the chain; `Nothing` once a piece lies in the plane.
    fn intersection(&self, other: &Polyline<3>, p: Precision) -> Shape<3> {
        let mut points = Vec::new();
        for s in other.segments() {
            match relation_to(self, &s, p) {
                LinePlane::Contained => return Shape::Nothing,
                LinePlane::Crossing { point, t } if s.domain().contains(t, p) => points.push(point),
                _ => {}
            }
        }
        Shape::from_points(points, p)
    }
}

impl Overlap<Polyline<3>, 3> for Plane {
    /// The pieces of the chain lying in the plane.
    fn overlap(&self, other: &Polyline<3>, p: Precision) -> Shape<3> {
        let segments = other
            .segments()
            .into_iter()
            .filter(|s| self.contains(s, p))
            .collect();
        merge_contacts(segments, Vec::new(), p)
    }
}

plane_mirror!(Polyline);
