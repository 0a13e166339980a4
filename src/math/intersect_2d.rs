use super::polygon_2d::{point_in_polygon, signed_area, turn};
use super::precision::{almost_equal, almost_zero, Precision};
use super::vector::Vector2Ext;
use super::{Point2, Vector2};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.cross_2d(d2);
    if cross.abs() < f64::EPSILON {
        return None;
    }
    let d = p2 - p1;
    let t = d.cross_2d(d2) / cross;
    let u = d.cross_2d(d1) / cross;
    Some((t, u))
}

/// Result of clipping a parametrized line against a polygon.
///
/// Parameters are in arc-length units along the line's unit direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearClip {
    /// Maximal parameter intervals of positive length inside the polygon.
    pub intervals: Vec<(f64, f64)>,
    /// Isolated parameters where the line only touches the polygon.
    pub contacts: Vec<f64>,
}

impl LinearClip {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty() && self.contacts.is_empty()
    }
}

/// Clips the line `origin + t * dir`, `t ∈ domain`, against a closed ring.
///
/// `dir` must have unit length; either end of `domain` may be infinite.
/// Breakpoints are the parameters where the line meets the ring's boundary;
/// each span between consecutive breakpoints is classified by its midpoint.
/// Breakpoints on the boundary that border no inside span are reported as
/// contacts.
#[must_use]
pub fn clip_linear_polygon(
    origin: &Point2,
    dir: &Vector2,
    domain: (f64, f64),
    ring: &[Point2],
    p: Precision,
) -> LinearClip {
    let mut result = LinearClip::default();
    if ring.len() < 3 {
        return result;
    }
    let (start, end) = domain;
    let eps = p.epsilon();
    let in_domain = |t: f64| t >= start - eps && t <= end + eps;

    let mut breaks: Vec<f64> = boundary_crossings(origin, dir, ring, p)
        .into_iter()
        .filter(|t| in_domain(*t))
        .map(|t| t.clamp(start, end))
        .collect();
    if start.is_finite() {
        breaks.push(start);
    }
    if end.is_finite() {
        breaks.push(end);
    }
    breaks.sort_by(f64::total_cmp);
    breaks.dedup_by(|a, b| almost_equal(*a, *b, p));

    let at = |t: f64| origin + dir * t;
    for w in breaks.windows(2) {
        let (t0, t1) = (w[0], w[1]);
        if almost_zero(t1 - t0, p) {
            continue;
        }
        if point_in_polygon(&at((t0 + t1) * 0.5), ring, p) {
            match result.intervals.last_mut() {
                Some(last) if almost_equal(last.1, t0, p) => last.1 = t1,
                _ => result.intervals.push((t0, t1)),
            }
        }
    }

    for t in breaks {
        let covered = result
            .intervals
            .iter()
            .any(|(a, b)| t >= a - eps && t <= b + eps);
        if !covered && point_in_polygon(&at(t), ring, p) {
            result.contacts.push(t);
        }
    }
    result
}

/// Parameters along `origin + t * dir` where the line meets each ring edge.
///
/// Edges lying on the line contribute both of their end-points.
fn boundary_crossings(origin: &Point2, dir: &Vector2, ring: &[Point2], p: Precision) -> Vec<f64> {
    let n = ring.len();
    let eps = p.epsilon();
    let mut ts = Vec::new();
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let e = b - a;
        let len = e.norm();
        if len < f64::EPSILON {
            continue;
        }
        let cross = dir.cross_2d(&e);
        if almost_zero(cross / len, p) {
            // Parallel edge: only matters when it lies on the line.
            if almost_zero((a - origin).cross_2d(dir), p) {
                ts.push((a - origin).dot(dir));
                ts.push((b - origin).dot(dir));
            }
            continue;
        }
        let d = a - origin;
        let t = d.cross_2d(&e) / cross;
        let s = d.cross_2d(dir) / cross * len;
        if s >= -eps && s <= len + eps {
            ts.push(t);
        }
    }
    ts
}

/// Sutherland–Hodgman clipping of `subject` by the convex ring `clip`.
///
/// Works for either orientation of `clip`. Returns the raw clipped ring,
/// possibly with repeated or straight-turn vertices, or an empty vector when
/// nothing remains.
#[must_use]
pub fn clip_polygon_convex(subject: &[Point2], clip: &[Point2], p: Precision) -> Vec<Point2> {
    let n = clip.len();
    if n < 3 || subject.len() < 3 {
        return Vec::new();
    }
    let orient = if signed_area(clip) < 0.0 { -1.0 } else { 1.0 };
    let eps = p.epsilon();
    let inside = |a: &Point2, b: &Point2, q: &Point2| turn(a, b, q) * orient >= -eps;

    let mut output: Vec<Point2> = subject.to_vec();
    for i in 0..n {
        if output.is_empty() {
            break;
        }
        let a = clip[i];
        let b = clip[(i + 1) % n];
        let input = std::mem::take(&mut output);
        let m = input.len();
        for j in 0..m {
            let cur = input[j];
            let prev = input[(j + m - 1) % m];
            let cur_in = inside(&a, &b, &cur);
            let prev_in = inside(&a, &b, &prev);
            if cur_in {
                if !prev_in {
                    if let Some(x) = edge_crossing(&prev, &cur, &a, &b) {
                        output.push(x);
                    }
                }
                output.push(cur);
            } else if prev_in {
                if let Some(x) = edge_crossing(&prev, &cur, &a, &b) {
                    output.push(x);
                }
            }
        }
    }
    output
}

/// Point where segment `s0-s1` crosses the infinite line through `a-b`.
fn edge_crossing(s0: &Point2, s1: &Point2, a: &Point2, b: &Point2) -> Option<Point2> {
    let d = s1 - s0;
    let (t, _) = line_line_intersect(s0, &d, a, &(b - a))?;
    Some(s0 + d * t.clamp(0.0, 1.0))
}
