use crate::math::{AlmostEq, Point, Precision};

use super::{Line, LineSegment, Polygon, Ray, Triangle};

/// Result of an intersection or overlap query.
///
/// `Nothing` is the empty result, never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<const D: usize> {
    Nothing,
    Point(Point<D>),
    Line(Line<D>),
    Ray(Ray<D>),
    Segment(LineSegment<D>),
    Triangle(Triangle<D>),
    Polygon(Polygon<D>),
    /// Several disjoint parts, never nested and never empty.
    Collection(Vec<Shape<D>>),
}

impl<const D: usize> Shape<D> {
    #[must_use]
    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    #[must_use]
    pub fn is_something(&self) -> bool {
        !self.is_nothing()
    }

    /// Name of the variant, for messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Nothing => "nothing",
            Self::Point(_) => "point",
            Self::Line(_) => "line",
            Self::Ray(_) => "ray",
            Self::Segment(_) => "segment",
            Self::Triangle(_) => "triangle",
            Self::Polygon(_) => "polygon",
            Self::Collection(_) => "collection",
        }
    }

    /// The non-empty parts of the shape: itself, or the members of a collection.
    #[must_use]
    pub fn parts(&self) -> &[Shape<D>] {
        match self {
            Self::Nothing => &[],
            Self::Collection(parts) => parts,
            single => std::slice::from_ref(single),
        }
    }

    /// Combines parts into one shape, flattening collections and dropping `Nothing`.
    #[must_use]
    pub fn from_parts(parts: Vec<Shape<D>>) -> Self {
        let mut flat = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                Self::Nothing => {}
                Self::Collection(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Self::Nothing,
            1 => flat.swap_remove(0),
            _ => Self::Collection(flat),
        }
    }

    /// Point shape from a set of points, merging points equal at precision `p`.
    #[must_use]
    pub fn from_points(points: Vec<Point<D>>, p: Precision) -> Self {
        let mut unique: Vec<Point<D>> = Vec::with_capacity(points.len());
        for q in points {
            if !unique.iter().any(|u| u.almost_eq(&q, p)) {
                unique.push(q);
            }
        }
        Self::from_parts(unique.into_iter().map(Self::Point).collect())
    }
}

impl<const D: usize> AlmostEq for Shape<D> {
    /// Collections compare as sets of parts.
    fn almost_eq(&self, other: &Self, p: Precision) -> bool {
        match (self, other) {
            (Self::Nothing, Self::Nothing) => true,
            (Self::Point(a), Self::Point(b)) => a.almost_eq(b, p),
            (Self::Line(a), Self::Line(b)) => a.almost_eq(b, p),
            (Self::Ray(a), Self::Ray(b)) => a.almost_eq(b, p),
            (Self::Segment(a), Self::Segment(b)) => a.almost_eq(b, p),
            (Self::Triangle(a), Self::Triangle(b)) => a.almost_eq(b, p),
            (Self::Polygon(a), Self::Polygon(b)) => a.almost_eq(b, p),
            (Self::Collection(a), Self::Collection(b)) => {
                a.len() == b.len()
                    && a.iter().all(|x| b.iter().any(|y| x.almost_eq(y, p)))
                    && b.iter().all(|y| a.iter().any(|x| x.almost_eq(y, p)))
            }
            _ => false,
        }
    }
}

impl<const D: usize> From<Point<D>> for Shape<D> {
    fn from(q: Point<D>) -> Self {
        Self::Point(q)
    }
}

impl<const D: usize> From<Line<D>> for Shape<D> {
    fn from(l: Line<D>) -> Self {
        Self::Line(l)
    }
}

impl<const D: usize> From<Ray<D>> for Shape<D> {
    fn from(r: Ray<D>) -> Self {
        Self::Ray(r)
    }
}

impl<const D: usize> From<LineSegment<D>> for Shape<D> {
    fn from(s: LineSegment<D>) -> Self {
        Self::Segment(s)
    }
}

impl<const D: usize> From<Triangle<D>> for Shape<D> {
    fn from(t: Triangle<D>) -> Self {
        Self::Triangle(t)
    }
}

impl<const D: usize> From<Polygon<D>> for Shape<D> {
    fn from(poly: Polygon<D>) -> Self {
        Self::Polygon(poly)
    }
}
