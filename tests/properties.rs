//! Property-based tests for kernel invariants using the `proptest` crate.

#![allow(clippy::unwrap_used)]

mod common;

use approx::assert_relative_eq;
use proptest::prelude::*;

use geokern::geometry::{Area, Geometry, Line, LineSegment, Plane, Polygon, Triangle};
use geokern::math::{Point2, Point3, Vector2, Vector2Ext};
use geokern::operations::{Polygonize, Triangulate};
use geokern::relation::{Adjacent, Contains, Intersect, Overlap};
use geokern::wkt::{FromWkt, ToWkt};
use geokern::{AlmostEq, Precision};

const P: Precision = Precision::DEFAULT;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_coord() -> impl Strategy<Value = f64> {
    -1000.0f64..1000.0
}

fn arb_point2() -> impl Strategy<Value = Point2> {
    (arb_coord(), arb_coord()).prop_map(|(x, y)| Point2::new(x, y))
}

fn arb_point3() -> impl Strategy<Value = Point3> {
    (arb_coord(), arb_coord(), arb_coord()).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

fn arb_precision() -> impl Strategy<Value = Precision> {
    (0u32..=9).prop_map(|digits| Precision::new(digits).unwrap_or_default())
}

/// Star-shaped ring around the origin: evenly spaced angles with bounded
/// jitter, radii in `[1, 10)`. Every angular gap stays within `(0.6, 1.4)`
/// times the even spacing, so no gap reaches half a turn.
fn arb_star_ring() -> impl Strategy<Value = Vec<Point2>> {
    (3usize..12).prop_flat_map(|n| {
        let spacing = std::f64::consts::TAU / n as f64;
        (
            0.0f64..spacing,
            prop::collection::vec((-0.2f64..0.2, 1.0f64..10.0), n),
        )
            .prop_map(move |(start, polar)| {
                polar
                    .into_iter()
                    .enumerate()
                    .map(|(i, (jitter, radius))| {
                        let angle = start + (i as f64 + jitter) * spacing;
                        Point2::new(radius * angle.cos(), radius * angle.sin())
                    })
                    .collect()
            })
    })
}

/// Sine of the corner at `a` of the triangle `a, b, c`.
fn corner_sine(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let (u, v) = (b - a, c - a);
    u.cross_2d(&v).abs() / (u.norm() * v.norm())
}

fn corner_sine_3d(a: &Point3, b: &Point3, c: &Point3) -> f64 {
    let (u, v) = (b - a, c - a);
    u.cross(&v).norm() / (u.norm() * v.norm())
}

// ---------------------------------------------------------------------------
// 1. WKT round trip
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn point_wkt_round_trip(q in arb_point3(), p in arb_precision()) {
        common::init_tracing();
        let back = Point3::from_wkt(&q.to_wkt(p), p).unwrap();
        prop_assert!(back.almost_eq(&q, p), "{} read back as {}", q, back);
    }

    #[test]
    fn triangle_wkt_round_trip(
        a in arb_point2(),
        b in arb_point2(),
        c in arb_point2(),
        p in arb_precision(),
    ) {
        prop_assume!((b - a).norm() > 10.0 && (c - a).norm() > 10.0 && (c - b).norm() > 10.0);
        prop_assume!(corner_sine(&a, &b, &c) > 0.2);
        let t = Triangle::new(a, b, c, p).unwrap();
        let g = Geometry::Collection(vec![t.into(), Polygon::from(t).into()]);
        let back = Geometry::<2>::from_wkt(&g.to_wkt(p), p).unwrap();
        prop_assert!(back.almost_eq(&g, p));
    }

    #[test]
    fn line_wkt_round_trip(a in arb_point3(), b in arb_point3(), p in arb_precision()) {
        prop_assume!((b - a).norm() > 1.0);
        let line = geokern::geometry::Line3::from_points(a, b, p).unwrap();
        let back = geokern::geometry::Line3::from_wkt(&line.to_wkt(p), p).unwrap();
        prop_assert!(back.almost_eq(&line, p));
    }
}

// ---------------------------------------------------------------------------
// 2. A line contains the points it was built from, not their offsets
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn line_contains_its_defining_points(
        a in arb_point2(),
        b in arb_point2(),
        offset in 0.01f64..100.0,
    ) {
        prop_assume!((b - a).norm() > 1.0);
        let line = Line::from_points(a, b, P).unwrap();
        prop_assert!(line.contains(&a, P));
        prop_assert!(line.contains(&b, P));
        let normal = (b - a).normalize().perpendicular();
        prop_assert!(!line.contains(&(a + normal * offset), P));
        prop_assert!(!line.contains(&(b - normal * offset), P));
    }
}

// ---------------------------------------------------------------------------
// 3. Intersection and overlap exclude each other
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn segments_intersect_xor_overlap(
        a in arb_point2(),
        b in arb_point2(),
        c in arb_point2(),
        d in arb_point2(),
    ) {
        prop_assume!((b - a).norm() > 1.0 && (d - c).norm() > 1.0);
        let s = LineSegment::new(a, b, P).unwrap();
        let t = LineSegment::new(c, d, P).unwrap();
        prop_assert!(!(s.intersects(&t, P) && s.overlaps(&t, P)));
        prop_assert_eq!(s.intersects(&t, P), t.intersects(&s, P));
    }

    #[test]
    fn collinear_segments_overlap_without_intersecting(
        start in -100.0f64..100.0,
        length in 1.0f64..50.0,
        shift in 0.1f64..0.9,
    ) {
        let s = LineSegment::new(Point2::new(start, 2.0), Point2::new(start + length, 2.0), P)
            .unwrap();
        let t = LineSegment::new(
            Point2::new(start + shift * length, 2.0),
            Point2::new(start + (1.0 + shift) * length, 2.0),
            P,
        )
        .unwrap();
        prop_assert!(s.overlaps(&t, P));
        prop_assert!(!s.intersects(&t, P));
    }
}

// ---------------------------------------------------------------------------
// 4. Triangle contains its center of mass, not pushed-out vertices
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn triangle_contains_center_of_mass(a in arb_point3(), b in arb_point3(), c in arb_point3()) {
        prop_assume!(corner_sine_3d(&a, &b, &c) > 0.05);
        prop_assume!(corner_sine_3d(&b, &c, &a) > 0.05);
        prop_assume!(corner_sine_3d(&c, &a, &b) > 0.05);
        let Ok(t) = Triangle::new(a, b, c, P) else {
            return Ok(());
        };
        let center = t.center_of_mass();
        prop_assert!(t.contains(&center, P));
        for v in t.vertices() {
            prop_assume!((v - center).norm() > 0.01);
            prop_assert!(!t.contains(&(v + (v - center) * 2.0), P));
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Rectangle areas
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rectangle_area_is_base_times_height(
        origin in arb_point2(),
        base in 0.1f64..100.0,
        height in 0.1f64..100.0,
        angle in -std::f64::consts::PI..std::f64::consts::PI,
    ) {
        let u = Vector2::new(angle.cos(), angle.sin());
        let v = u.perpendicular();
        let rect = Polygon::new(
            vec![origin, origin + u * base, origin + u * base + v * height, origin + v * height],
            P,
        )
        .unwrap();
        assert_relative_eq!(rect.area(), base * height, max_relative = 1e-9);
        let square = Polygon::new(
            vec![origin, origin + u * base, origin + (u + v) * base, origin + v * base],
            P,
        )
        .unwrap();
        assert_relative_eq!(square.area(), base * base, max_relative = 1e-9);
    }
}

// ---------------------------------------------------------------------------
// 6. Triangulation and polygonization are inverse
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn triangulate_then_polygonize_restores_polygon(ring in arb_star_ring()) {
        common::init_tracing();
        let n = ring.len();
        prop_assume!((0..n).all(|i| {
            corner_sine(&ring[i], &ring[(i + 1) % n], &ring[(i + n - 1) % n]) > 0.05
        }));
        let polygon = Polygon::new(ring, P).unwrap();
        let triangles = Triangulate::new(&polygon).execute(P).unwrap();
        prop_assume!(triangles.len() == n - 2);
        let merged = Polygonize::new(&triangles).execute(P).unwrap();
        prop_assert_eq!(merged.len(), 1);
        prop_assert!(merged[0].almost_eq(&polygon, P));
    }
}

#[test]
fn triangulate_then_polygonize_restores_non_convex_shapes() {
    common::init_tracing();
    let u_shape = vec![
        Point2::new(0.0, 0.0),
        Point2::new(3.0, 0.0),
        Point2::new(3.0, 3.0),
        Point2::new(2.0, 3.0),
        Point2::new(2.0, 1.0),
        Point2::new(1.0, 1.0),
        Point2::new(1.0, 3.0),
        Point2::new(0.0, 3.0),
    ];
    let ell = vec![
        Point2::new(0.0, 0.0),
        Point2::new(4.0, 0.0),
        Point2::new(4.0, 1.0),
        Point2::new(1.0, 1.0),
        Point2::new(1.0, 4.0),
        Point2::new(0.0, 4.0),
    ];
    for ring in [u_shape, ell] {
        let polygon = Polygon::new(ring, P).unwrap();
        let triangles = Triangulate::new(&polygon).execute(P).unwrap();
        let merged = Polygonize::new(&triangles).execute(P).unwrap();
        assert_eq!(merged.len(), 1);
        assert!(merged[0].almost_eq(&polygon, P));
    }
}

// ---------------------------------------------------------------------------
// 7. Adjacency is symmetric and reports the shared edge
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn adjacency_is_order_independent(
        origin in arb_point2(),
        side in 1.0f64..50.0,
        slide in -0.5f64..0.5,
    ) {
        let square = |corner: Point2| {
            Polygon::new(
                vec![
                    corner,
                    corner + Vector2::new(side, 0.0),
                    corner + Vector2::new(side, side),
                    corner + Vector2::new(0.0, side),
                ],
                P,
            )
            .unwrap()
        };
        let a = square(origin);
        let b = square(origin + Vector2::new(side, 0.0));
        let shared = LineSegment::new(
            origin + Vector2::new(side, 0.0),
            origin + Vector2::new(side, side),
            P,
        )
        .unwrap();
        let ab = a.adjacent_side(&b, P).unwrap();
        let ba = b.adjacent_side(&a, P).unwrap();
        prop_assert!(ab.almost_eq(&shared, P));
        prop_assert!(ba.almost_eq(&ab, P));

        // A partial side is a touch, not an adjacency.
        let c = square(origin + Vector2::new(side, side * slide.clamp(-0.4, 0.4) + side * 0.5));
        prop_assert!(!a.is_adjacent(&c, P));
        prop_assert!(a.touches(&c, P));
    }
}

// ---------------------------------------------------------------------------
// 8. Planes
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn collinear_points_span_no_plane(a in arb_point3(), b in arb_point3(), t in -3.0f64..3.0) {
        let c = a + (b - a) * t;
        prop_assert!(Plane::from_points(a, b, c, P).is_err());
    }

    #[test]
    fn plane_contains_barycentric_combinations(
        a in arb_point3(),
        b in arb_point3(),
        c in arb_point3(),
        (u, v) in (-2.0f64..2.0, -2.0f64..2.0),
    ) {
        let Ok(plane) = Plane::from_points(a, b, c, P) else {
            return Ok(());
        };
        let inside = Point3::from(a.coords * (1.0 - u - v) + b.coords * u + c.coords * v);
        prop_assert!(plane.contains(&inside, P));
    }
}
