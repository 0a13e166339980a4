use tracing::{debug, instrument};

use crate::error::{GeometryError, Result};
use crate::geometry::Polygon;
use crate::math::polygon_2d::turn;
use crate::math::{sign, AlmostEq, Frame, Point, Point2, Precision, Sign};

/// Convex hull of a planar point set.
///
/// In 3D the points must share a plane. Points on the hull boundary between
/// two extreme points are dropped, so the result has only strict corners.
pub struct ConvexHull<'a, const D: usize> {
    points: &'a [Point<D>],
}

impl<'a, const D: usize> ConvexHull<'a, D> {
    /// Creates a new `ConvexHull` operation.
    #[must_use]
    pub fn new(points: &'a [Point<D>]) -> Self {
        Self { points }
    }

    /// Executes the operation, returning the hull as a counter-clockwise polygon
    /// (with respect to the frame fitted through the points).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the points coincide, are
    /// collinear, or do not share a plane, so that fewer than three extreme
    /// points remain at precision `p`.
    #[instrument(skip_all, fields(points = self.points.len()))]
    pub fn execute(&self, p: Precision) -> Result<Polygon<D>> {
        let frame = Frame::fit(self.points, p)?;
        let local: Vec<Point2> = self.points.iter().map(|q| frame.to_local(q)).collect();

        let mut order: Vec<usize> = (0..local.len()).collect();
        order.sort_by(|&a, &b| {
            local[a]
                .x
                .total_cmp(&local[b].x)
                .then(local[a].y.total_cmp(&local[b].y))
        });

        let mut lower = monotone_chain(order.iter().copied(), &local, p);
        let mut upper = monotone_chain(order.iter().rev().copied(), &local, p);
        lower.pop();
        upper.pop();
        lower.extend(upper);

        if lower.len() < 3 {
            return Err(GeometryError::degenerate(format!(
                "convex hull has only {} extreme points",
                lower.len()
            )));
        }
        debug!(extreme = lower.len(), "convex hull built");
        Polygon::new(lower.into_iter().map(|i| self.points[i]).collect(), p)
    }
}

/// One half of Andrew's monotone chain; only strict left turns survive.
fn monotone_chain(
    order: impl Iterator<Item = usize>,
    local: &[Point2],
    p: Precision,
) -> Vec<usize> {
    let mut chain: Vec<usize> = Vec::new();
    for i in order {
        if chain.last().is_some_and(|&last| local[last].almost_eq(&local[i], p)) {
            continue;
        }
        while chain.len() >= 2
            && sign(
                turn(&local[chain[chain.len() - 2]], &local[chain[chain.len() - 1]], &local[i]),
                p,
            ) != Sign::Positive
        {
            chain.pop();
        }
        chain.push(i);
    }
    chain
}
