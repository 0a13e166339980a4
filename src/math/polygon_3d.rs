use super::{Point3, Vector3};

/// Newell's normal of a closed ring: twice the vector area.
///
/// Robust for non-convex rings; its direction follows the ring's
/// counter-clockwise sense (right-hand rule).
#[must_use]
pub fn newell_normal(points: &[Point3]) -> Vector3 {
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_square() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn newell_normal_of_ccw_square_points_up() {
        let n = newell_normal(&unit_square());
        assert_relative_eq!(n, Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn newell_normal_of_concave_ring() {
        let l = vec![
            p(0.0, 0.0, 1.0),
            p(2.0, 0.0, 1.0),
            p(2.0, 1.0, 1.0),
            p(1.0, 1.0, 1.0),
            p(1.0, 2.0, 1.0),
            p(0.0, 2.0, 1.0),
        ];
        let n = newell_normal(&l);
        assert_relative_eq!(n.z, 6.0, epsilon = 1e-12);
        assert_relative_eq!(n.x, 0.0, epsilon = 1e-12);
    }
}
