use super::precision::{almost_zero, sign, AlmostEq, Precision, Sign};
use super::vector::Vector2Ext;
use super::Point2;

/// Computes the signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Area-weighted centroid of a ring. Falls back to the vertex mean for zero area.
#[must_use]
pub fn centroid(points: &[Point2]) -> Option<Point2> {
    let n = points.len();
    if n == 0 {
        return None;
    }
    let area = signed_area(points);
    if area.abs() < f64::EPSILON {
        return super::vector::mean_point(points);
    }
    // Shift to the first vertex to keep the products small.
    let o = points[0];
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let a = points[i] - o;
        let b = points[(i + 1) % n] - o;
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    let k = 1.0 / (6.0 * area);
    Some(Point2::new(o.x + cx * k, o.y + cy * k))
}

/// Signed distance of `c` from the directed line `a → b`; positive on the left.
#[must_use]
pub fn turn(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    let ab = b - a;
    let len = ab.norm();
    if len < f64::EPSILON {
        return 0.0;
    }
    ab.cross_2d(&(c - a)) / len
}

/// Distance from `q` to the closed segment `a-b`.
#[must_use]
pub fn distance_to_segment(q: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < f64::EPSILON * f64::EPSILON {
        return nalgebra::distance(q, a);
    }
    let t = ((q - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    nalgebra::distance(q, &(a + ab * t))
}

/// Returns `true` if `q` lies on any edge of the closed ring.
#[must_use]
pub fn point_on_boundary(q: &Point2, ring: &[Point2], p: Precision) -> bool {
    let n = ring.len();
    (0..n).any(|i| almost_zero(distance_to_segment(q, &ring[i], &ring[(i + 1) % n]), p))
}

/// Point-in-polygon test, boundary inclusive.
///
/// Points on an edge are inside. Otherwise a crossing-number test casts a ray
/// towards `+u`; the half-open rule on edge end-points makes an edge collinear
/// with the ray count as no crossing, so vertices are never counted twice.
#[must_use]
pub fn point_in_polygon(q: &Point2, ring: &[Point2], p: Precision) -> bool {
    if ring.len() < 3 {
        return false;
    }
    point_on_boundary(q, ring, p) || crosses_odd(q, ring)
}

/// Crossing-number parity of a ray from `q` towards `+u`, without tolerance.
///
/// Odd means `q` is enclosed. Meaningless for points on the ring itself.
#[must_use]
pub fn crosses_odd(q: &Point2, ring: &[Point2]) -> bool {
    let n = ring.len();
    let mut inside = false;
    for i in 0..n {
        let a = &ring[i];
        let b = &ring[(i + 1) % n];
        if (a.y > q.y) != (b.y > q.y) {
            let x_cross = a.x + (q.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if q.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

/// Returns `true` if every turn of the ring has the same sense (straight turns allowed).
#[must_use]
pub fn is_convex(ring: &[Point2], p: Precision) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut seen: Option<Sign> = None;
    for i in 0..n {
        let s = sign(turn(&ring[i], &ring[(i + 1) % n], &ring[(i + 2) % n]), p);
        if s == Sign::Zero {
            continue;
        }
        match seen {
            None => seen = Some(s),
            Some(prev) if prev != s => return false,
            Some(_) => {}
        }
    }
    seen.is_some()
}

/// Removes repeated vertices (including a closing duplicate) and straight-turn vertices.
#[must_use]
pub fn clean_ring(points: &[Point2], p: Precision) -> Vec<Point2> {
    let mut ring: Vec<Point2> = Vec::with_capacity(points.len());
    for q in points {
        if ring.last().is_none_or(|last| !last.almost_eq(q, p)) {
            ring.push(*q);
        }
    }
    while ring.len() > 1 && ring[0].almost_eq(&ring[ring.len() - 1], p) {
        ring.pop();
    }

    // Drop collinear vertices until the ring is stable.
    let mut changed = true;
    while changed && ring.len() >= 3 {
        changed = false;
        let n = ring.len();
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            if almost_zero(turn(&prev, &next, &ring[i]), p) {
                ring.remove(i);
                changed = true;
                break;
            }
        }
    }
    ring
}

/// Returns `true` if segments `a0-a1` and `b0-b1` cross at a single interior point of both.
#[must_use]
pub fn segments_cross_properly(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    p: Precision,
) -> bool {
    let s1 = sign(turn(a0, a1, b0), p);
    let s2 = sign(turn(a0, a1, b1), p);
    let s3 = sign(turn(b0, b1, a0), p);
    let s4 = sign(turn(b0, b1, a1), p);
    let opposite = |x: Sign, y: Sign| {
        matches!(
            (x, y),
            (Sign::Negative, Sign::Positive) | (Sign::Positive, Sign::Negative)
        )
    };
    opposite(s1, s2) && opposite(s3, s4)
}

/// Returns `true` if no two edges of the ring meet except adjacent edges at their shared vertex.
///
/// Adjacent edges folding back onto each other also make the ring non-simple.
#[must_use]
pub fn is_simple(ring: &[Point2], p: Precision) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let a0 = &ring[i];
        let a1 = &ring[(i + 1) % n];
        let a2 = &ring[(i + 2) % n];
        if almost_zero(turn(a0, a1, a2), p) && (a1 - a0).dot(&(a2 - a1)) < 0.0 {
            return false;
        }
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = &ring[j];
            let b1 = &ring[(j + 1) % n];
            if segments_touch(a0, a1, b0, b1, p) {
                return false;
            }
        }
    }
    true
}

/// Returns `true` if the closed segments `a0-a1` and `b0-b1` share any point.
#[must_use]
pub fn segments_touch(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2, p: Precision) -> bool {
    segments_cross_properly(a0, a1, b0, b1, p)
        || almost_zero(distance_to_segment(a0, b0, b1), p)
        || almost_zero(distance_to_segment(a1, b0, b1), p)
        || almost_zero(distance_to_segment(b0, a0, a1), p)
        || almost_zero(distance_to_segment(b1, a0, a1), p)
}
