use crate::error::{GeometryError, Result};
use crate::math::{almost_equal, AlmostEq, Point, Precision};

use super::{LineSegment, Linear};

/// An open chain of straight segments through at least two vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline<const D: usize> {
    vertices: Vec<Point<D>>,
}

/// Planar polyline.
pub type Polyline2 = Polyline<2>;

/// Spatial polyline.
pub type Polyline3 = Polyline<3>;

impl<const D: usize> Polyline<D> {
    /// Creates a polyline. Consecutive repeated vertices are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if fewer than two distinct
    /// vertices remain at precision `p`.
    pub fn new(points: Vec<Point<D>>, p: Precision) -> Result<Self> {
        let mut vertices: Vec<Point<D>> = Vec::with_capacity(points.len());
        for q in points {
            if vertices.last().is_none_or(|last| !last.almost_eq(&q, p)) {
                vertices.push(q);
            }
        }
        if vertices.len() < 2 {
            return Err(GeometryError::degenerate(
                "polyline needs at least 2 distinct vertices",
            ));
        }
        Ok(Self { vertices })
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point<D>] {
        &self.vertices
    }

    #[must_use]
    pub fn start(&self) -> &Point<D> {
        &self.vertices[0]
    }

    #[must_use]
    pub fn end(&self) -> &Point<D> {
        &self.vertices[self.vertices.len() - 1]
    }

    /// The segments between consecutive vertices.
    #[must_use]
    pub fn segments(&self) -> Vec<LineSegment<D>> {
        self.vertices
            .windows(2)
            .map(|w| LineSegment::new_unchecked(w[0], w[1]))
            .collect()
    }

    /// Total length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|w| nalgebra::distance(&w[0], &w[1]))
            .sum()
    }

    /// Returns `true` if `q` lies on any segment.
    #[must_use]
    pub fn contains_point(&self, q: &Point<D>, p: Precision) -> bool {
        self.segments().iter().any(|s| s.contains_point(q, p))
    }

    /// Fraction of the total length travelled from the start to reach `q`.
    ///
    /// The first segment containing `q` decides; `None` if `q` is not on the polyline.
    #[must_use]
    pub fn get_pct(&self, q: &Point<D>, p: Precision) -> Option<f64> {
        let total = self.length();
        let mut travelled = 0.0;
        for segment in self.segments() {
            if segment.contains_point(q, p) {
                let along = segment.project(q).clamp(0.0, segment.length());
                return Some((travelled + along) / total);
            }
            travelled += segment.length();
        }
        None
    }

    /// Point reached after travelling `pct` of the total length from the start.
    ///
    /// Values within precision `p` of `0` or `1` are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if `pct` lies outside `[0, 1]`.
    pub fn get_point(&self, pct: f64, p: Precision) -> Result<Point<D>> {
        if !(0.0..=1.0).contains(&pct) && !almost_equal(pct, 0.0, p) && !almost_equal(pct, 1.0, p)
        {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "pct",
                value: pct,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        let target = pct.clamp(0.0, 1.0) * self.length();
        let mut travelled = 0.0;
        let segments = self.segments();
        for segment in &segments {
            if travelled + segment.length() >= target {
                return Ok(segment.point_at(target - travelled));
            }
            travelled += segment.length();
        }
        Ok(*self.end())
    }

    /// The same polyline traversed from end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }
}

impl<const D: usize> AlmostEq for Polyline<D> {
    fn almost_eq(&self, other: &Self, p: Precision) -> bool {
        self.vertices.len() == other.vertices.len()
            && self
                .vertices
                .iter()
                .zip(&other.vertices)
                .all(|(a, b)| a.almost_eq(b, p))
    }
}
