use super::precision::{almost_zero, Precision};
use super::{Point3, UnitVector3, Vector3};

/// How two planes meet.
#[derive(Debug)]
pub enum PlanePair {
    /// The planes cut along a line.
    Crossing {
        origin: Point3,
        direction: UnitVector3,
    },
    /// Normals agree but the planes are `distance` apart.
    Parallel { distance: f64 },
    Coincident,
}

/// Meets two planes given by origin and unit normal.
///
/// The crossing line runs along `na × nb`; its origin is the point of the
/// line closest to `oa`.
#[must_use]
pub fn plane_plane_intersect(
    oa: &Point3,
    na: &UnitVector3,
    ob: &Point3,
    nb: &UnitVector3,
    p: Precision,
) -> PlanePair {
    let (na, nb) = (na.into_inner(), nb.into_inner());
    let axis = na.cross(&nb);
    let sine = axis.norm();

    if almost_zero(sine, p) {
        let distance = (ob - oa).dot(&na).abs();
        return if almost_zero(distance, p) {
            PlanePair::Coincident
        } else {
            PlanePair::Parallel { distance }
        };
    }

    // Solve for oa + s·na + t·nb lying on plane b while staying on plane a.
    let cosine = na.dot(&nb);
    let height = nb.dot(&(ob - oa));
    let gram = sine * sine;
    let t = height / gram;
    let s = -cosine * t;
    PlanePair::Crossing {
        origin: oa + na * s + nb * t,
        direction: UnitVector3::new_unchecked(axis / sine),
    }
}

/// How a line `origin + t·dir` meets a plane.
#[derive(Debug)]
pub enum LinePlane {
    /// Single crossing at parameter `t`.
    Crossing { point: Point3, t: f64 },
    Parallel,
    /// The whole line lies in the plane.
    Contained,
}

/// Meets a line with a plane.
///
/// `dir` must have unit length so that the parallel test compares a sine.
#[must_use]
pub fn line_plane_intersect(
    origin: &Point3,
    dir: &Vector3,
    plane_origin: &Point3,
    normal: &UnitVector3,
    p: Precision,
) -> LinePlane {
    let normal = normal.into_inner();
    let approach = normal.dot(dir);
    let gap = normal.dot(&(plane_origin - origin));

    match (almost_zero(approach, p), almost_zero(gap, p)) {
        (true, true) => LinePlane::Contained,
        (true, false) => LinePlane::Parallel,
        _ => {
            let t = gap / approach;
            LinePlane::Crossing {
                point: origin + dir * t,
                t,
            }
        }
    }
}

/// Height of `point` above the plane, measured along its normal.
#[must_use]
pub fn signed_distance_to_plane(
    point: &Point3,
    plane_origin: &Point3,
    normal: &UnitVector3,
) -> f64 {
    normal.into_inner().dot(&(point - plane_origin))
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Precision = Precision::DEFAULT;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn n(x: f64, y: f64, z: f64) -> UnitVector3 {
        UnitVector3::new_normalize(Vector3::new(x, y, z))
    }

    #[test]
    fn floor_and_wall_meet_on_x_axis() {
        let floor = (p(0.0, 0.0, 0.0), n(0.0, 0.0, 1.0));
        let wall = (p(3.0, 0.0, 7.0), n(0.0, 1.0, 0.0));
        let pair = plane_plane_intersect(&floor.0, &floor.1, &wall.0, &wall.1, P);
        let PlanePair::Crossing { origin, direction } = pair else {
            panic!("expected a crossing, got {pair:?}");
        };
        assert!(direction.x.abs() > 1.0 - 1e-12);
        assert!(origin.y.abs() < 1e-12 && origin.z.abs() < 1e-12);
    }

    #[test]
    fn opposed_normals_are_still_parallel() {
        let floor = (p(0.0, 0.0, 0.0), n(0.0, 0.0, 1.0));
        let ceiling = (p(2.0, 1.0, 5.0), n(0.0, 0.0, -1.0));
        let pair = plane_plane_intersect(&floor.0, &floor.1, &ceiling.0, &ceiling.1, P);
        let PlanePair::Parallel { distance } = pair else {
            panic!("expected parallel planes, got {pair:?}");
        };
        assert!((distance - 5.0).abs() < 1e-12);
    }

    #[test]
    fn offset_below_precision_is_coincident() {
        let up = n(0.0, 0.0, 1.0);
        let pair = plane_plane_intersect(&p(0.0, 0.0, 0.0), &up, &p(1.0, 2.0, 0.0004), &up, P);
        assert!(matches!(pair, PlanePair::Coincident));
    }

    #[test]
    fn crossing_origin_is_on_both_planes() {
        let (oa, na) = (p(1.0, 0.0, 0.0), n(1.0, 0.0, 0.0));
        let (ob, nb) = (p(0.0, 2.0, 0.0), n(0.0, 1.0, 1.0));
        let pair = plane_plane_intersect(&oa, &na, &ob, &nb, P);
        let PlanePair::Crossing { origin, direction } = pair else {
            panic!("expected a crossing");
        };
        assert!(signed_distance_to_plane(&origin, &oa, &na).abs() < 1e-12);
        assert!(signed_distance_to_plane(&origin, &ob, &nb).abs() < 1e-12);
        assert!(direction.dot(&na.into_inner()).abs() < 1e-12);
        assert!(direction.dot(&nb.into_inner()).abs() < 1e-12);
    }

    #[test]
    fn diagonal_line_pierces_floor() {
        let dir = Vector3::new(1.0, 1.0, 1.0).normalize();
        let (start, floor) = (p(0.0, 0.0, -3.0), p(0.0, 0.0, 0.0));
        let meet = line_plane_intersect(&start, &dir, &floor, &n(0.0, 0.0, 1.0), P);
        let LinePlane::Crossing { point, t } = meet else {
            panic!("expected a crossing, got {meet:?}");
        };
        assert!((t - 3.0 * 3.0_f64.sqrt()).abs() < 1e-12);
        assert!(point.z.abs() < 1e-12);
    }

    #[test]
    fn horizontal_lines_miss_or_lie_in_ceiling() {
        let (ceiling, up) = (p(0.0, 0.0, 5.0), n(0.0, 0.0, 1.0));
        let x = Vector3::x();
        assert!(matches!(
            line_plane_intersect(&p(0.0, 0.0, 0.0), &x, &ceiling, &up, P),
            LinePlane::Parallel
        ));
        assert!(matches!(
            line_plane_intersect(&p(3.0, 1.0, 5.0), &x, &ceiling, &up, P),
            LinePlane::Contained
        ));
    }

    #[test]
    fn height_sign_follows_normal() {
        let (o, up) = (p(0.0, 0.0, 1.0), n(0.0, 0.0, 2.0));
        assert!((signed_distance_to_plane(&p(4.0, 4.0, 3.0), &o, &up) - 2.0).abs() < 1e-12);
        assert!(signed_distance_to_plane(&p(0.0, 0.0, -1.0), &o, &up) < 0.0);
    }
}
