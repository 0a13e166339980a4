//! Precision-aware spatial relations between primitives.
//!
//! Each relation is a trait implemented for every supported pair of concrete
//! types, so an unsupported pair is a compile error. [`Geometry`](crate::geometry::Geometry)
//! offers the same relations at runtime and reports unsupported pairs as
//! [`GeometryError::UnsupportedRelation`](crate::error::GeometryError::UnsupportedRelation).
//!
//! `Intersects` and `Overlaps` never hold together: an intersection is a
//! contact of lower dimension than the operands share (a crossing point, a
//! touching edge), an overlap is a common part of positive length or area.

mod area;
mod dispatch;
mod linear;
mod planar;
mod polyline;

use crate::geometry::{LineSegment, Shape};
use crate::math::Precision;

/// Containment, boundary inclusive.
pub trait Contains<T: ?Sized> {
    /// Returns `true` if every point of `other` belongs to `self` at precision `p`.
    fn contains(&self, other: &T, p: Precision) -> bool;
}

/// Lower-dimensional contact between two primitives.
pub trait Intersect<Rhs: ?Sized, const D: usize> {
    /// The contact, or [`Shape::Nothing`] when the operands are apart or overlap.
    fn intersection(&self, other: &Rhs, p: Precision) -> Shape<D>;

    fn intersects(&self, other: &Rhs, p: Precision) -> bool {
        self.intersection(other, p).is_something()
    }
}

/// Common part of positive length or area.
pub trait Overlap<Rhs: ?Sized, const D: usize> {
    /// The common part, or [`Shape::Nothing`].
    fn overlap(&self, other: &Rhs, p: Precision) -> Shape<D>;

    fn overlaps(&self, other: &Rhs, p: Precision) -> bool {
        self.overlap(other, p).is_something()
    }
}

/// Edge-sharing relations between areas.
pub trait Adjacent<Rhs: ?Sized, const D: usize>: Intersect<Rhs, D> + Overlap<Rhs, D> {
    /// The single full edge both boundaries share, if the areas do not overlap.
    ///
    /// Edge direction does not matter. `None` when no edge or several edges are shared.
    fn adjacent_side(&self, other: &Rhs, p: Precision) -> Option<LineSegment<D>>;

    fn is_adjacent(&self, other: &Rhs, p: Precision) -> bool {
        self.adjacent_side(other, p).is_some()
    }

    /// Returns `true` if the boundaries meet but the areas do not overlap.
    fn touches(&self, other: &Rhs, p: Precision) -> bool {
        self.intersects(other, p) && !self.overlaps(other, p)
    }
}

/// Implements `Intersect` and `Overlap` for `$b × $a` by swapping the operands of `$a × $b`.
macro_rules! mirror_relations {
    ($($a:ident x $b:ident),* $(,)?) => {
        $(
            impl<const D: usize> $crate::relation::Intersect<$a<D>, D> for $b<D> {
                fn intersection(
                    &self,
                    other: &$a<D>,
                    p: $crate::math::Precision,
                ) -> $crate::geometry::Shape<D> {
                    $crate::relation::Intersect::intersection(other, self, p)
                }
            }

            impl<const D: usize> $crate::relation::Overlap<$a<D>, D> for $b<D> {
                fn overlap(
                    &self,
                    other: &$a<D>,
                    p: $crate::math::Precision,
                ) -> $crate::geometry::Shape<D> {
                    $crate::relation::Overlap::overlap(other, self, p)
                }
            }
        )*
    };
}

pub(crate) use mirror_relations;
